use crate::cards::Card;
use crate::deck::Deck;
use crate::evaluator::{evaluate_cards, EvalError};
use crate::hand::{check_distinct, HoleCards};
use rand::{rngs::StdRng, Rng, RngCore, SeedableRng};
use std::collections::VecDeque;

use super::{Agent, AgentError, Decision, DecisionInput};
use crate::history::Street;
use crate::player::RoundStatus;

fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(v) => StdRng::seed_from_u64(v),
        None => {
            let mut seed = [0u8; 32];
            rand::rng().fill_bytes(&mut seed);
            StdRng::from_seed(seed)
        }
    }
}

/// Monte Carlo estimate of the chance that `hand` wins at showdown.
///
/// Unknown community cards and every opponent's hole cards are dealt at random
/// from the cards not yet seen. A tie with `k` other hands counts as `1 / (k + 1)`
/// of a win.
pub fn estimate_win_probability<R: Rng + ?Sized>(
    hand: &HoleCards,
    community: &[Card],
    opponents: usize,
    trials: usize,
    rng: &mut R,
) -> Result<f64, EvalError> {
    check_distinct(hand, community)?;
    if opponents == 0 {
        return Ok(1.0);
    }

    let mut unseen = Deck::standard();
    for &card in hand.cards().iter().chain(community) {
        unseen.remove(card);
    }
    let missing = 5 - community.len();
    let opponents = opponents.min((unseen.len() - missing) / 2);
    let trials = trials.max(1);

    let mut cards: Vec<Card> = Vec::with_capacity(7);
    let mut won = 0.0;
    for _ in 0..trials {
        let mut deck = unseen.clone();
        deck.shuffle_with(rng);
        let dealt = deck.draw(missing + 2 * opponents).map_err(|_| EvalError::NotEnoughCards)?;
        let (board_rest, holes) = dealt.split_at(missing);

        cards.clear();
        cards.extend_from_slice(community);
        cards.extend_from_slice(board_rest);
        let shared = cards.len();
        cards.extend_from_slice(&hand.cards());
        let mine = evaluate_cards(&cards)?;

        let mut ties = 0usize;
        let mut beaten = false;
        for hole in holes.chunks_exact(2) {
            cards.truncate(shared);
            cards.extend_from_slice(hole);
            let theirs = evaluate_cards(&cards)?;
            if theirs < mine {
                beaten = true;
                break;
            }
            if theirs == mine {
                ties += 1;
            }
        }
        if !beaten {
            won += 1.0 / (ties + 1) as f64;
        }
    }
    Ok(won / trials as f64)
}

/// Calls everything.
#[derive(Debug, Default)]
pub struct CallingStation;

impl CallingStation {
    pub fn new() -> Self {
        Self
    }
}

impl Agent for CallingStation {
    fn name(&self) -> &str {
        "calling_station"
    }

    fn decide(&mut self, _input: &DecisionInput) -> Result<Decision, AgentError> {
        Ok(Decision::Call)
    }
}

/// Calls, min-raises or folds at random.
///
/// The default mix calls 70% of the time, min-raises 20% and folds the rest;
/// [`RandomAgent::cautious`] folds 80% and splits the rest evenly.
#[derive(Debug)]
pub struct RandomAgent {
    name: &'static str,
    call_below: f64,
    raise_above: f64,
    rng: StdRng,
}

impl RandomAgent {
    pub fn new(seed: Option<u64>) -> Self {
        Self { name: "random_agent", call_below: 0.7, raise_above: 0.8, rng: seeded_rng(seed) }
    }

    pub fn cautious(seed: Option<u64>) -> Self {
        Self { name: "random_agent_cautious", call_below: 0.1, raise_above: 0.9, rng: seeded_rng(seed) }
    }
}

impl Agent for RandomAgent {
    fn name(&self) -> &str {
        self.name
    }

    fn decide(&mut self, input: &DecisionInput) -> Result<Decision, AgentError> {
        let roll: f64 = self.rng.random();
        Ok(if roll < self.call_below {
            Decision::Call
        } else if roll > self.raise_above {
            Decision::Amount(input.min_raise_amount())
        } else {
            Decision::Fold
        })
    }
}

/// Plays its estimated win probability: shoves strong hands, min-raises good
/// ones, calls while roughly break-even and folds otherwise.
#[derive(Debug)]
pub struct FoldsWhenLosing {
    trials: usize,
    rng: StdRng,
}

impl FoldsWhenLosing {
    pub const DEFAULT_TRIALS: usize = 200;

    pub fn new(seed: Option<u64>) -> Self {
        Self { trials: Self::DEFAULT_TRIALS, rng: seeded_rng(seed) }
    }

    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }
}

impl Agent for FoldsWhenLosing {
    fn name(&self) -> &str {
        "folds_when_losing"
    }

    fn decide(&mut self, input: &DecisionInput) -> Result<Decision, AgentError> {
        let opponents = input.opponents();
        let p = estimate_win_probability(&input.hand, &input.community, opponents, self.trials, &mut self.rng)
            .map_err(|e| AgentError::Failed(e.to_string()))?;
        let fair_share = 1.0 / (opponents + 1) as f64;

        Ok(if p > 0.9 {
            Decision::AllIn
        } else if p > 0.7 {
            Decision::Amount(input.min_raise_amount())
        } else if p * 1.3 > fair_share {
            Decision::Call
        } else {
            Decision::Fold
        })
    }
}

/// Sizes its bets with the Kelly criterion on the estimated win probability.
///
/// Chip amounts are taken as fractions of the seat's own chips (stack plus bet).
/// Before the river it only calls when calling has a better log expectation than
/// folding; on the river it bets the Kelly fraction when that beats a min-raise.
#[derive(Debug)]
pub struct KellyStrategy {
    trials: usize,
    rng: StdRng,
}

impl KellyStrategy {
    pub fn new(seed: Option<u64>) -> Self {
        Self { trials: FoldsWhenLosing::DEFAULT_TRIALS, rng: seeded_rng(seed) }
    }

    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }
}

/// Fraction of the bankroll to stake at win probability `p` and net odds `payoff`.
fn kelly_fraction(p: f64, payoff: f64) -> f64 {
    ((payoff * p + p - 1.0) / payoff).clamp(0.0, 1.0)
}

fn log_expectation(p: f64, payoff: f64, fraction: f64) -> f64 {
    p * (1.0 + payoff * fraction).ln() + (1.0 - p) * (1.0 - fraction).ln()
}

/// Net odds of staking `fraction`: what the other seats can put against it.
fn payoff_for(input: &DecisionInput, scale: f64, fraction: f64) -> f64 {
    if fraction <= 0.0 {
        return 1.0;
    }
    let matched: f64 = input
        .players
        .iter()
        .filter(|p| p.id != input.seat)
        .map(|p| {
            let reach = match p.round_status {
                RoundStatus::In => p.bet + p.stack,
                _ => p.bet,
            };
            fraction.min(reach as f64 / scale)
        })
        .sum();
    matched / fraction
}

impl Agent for KellyStrategy {
    fn name(&self) -> &str {
        "kelly_strategy"
    }

    fn decide(&mut self, input: &DecisionInput) -> Result<Decision, AgentError> {
        let p = estimate_win_probability(&input.hand, &input.community, input.opponents(), self.trials, &mut self.rng)
            .map_err(|e| AgentError::Failed(e.to_string()))?;
        let scale = (input.me.bet + input.me.stack).max(1) as f64;
        let my_bet = input.me.bet as f64 / scale;
        let highest = input.highest_bet as f64 / scale;

        let fold = log_expectation(0.0, 1.0, my_bet);
        let call = log_expectation(p, payoff_for(input, scale, highest), highest);

        if input.street == Street::River {
            let mut payoff = input.players.len().saturating_sub(1).max(1) as f64;
            let mut optimal = 0.0;
            for _ in 0..10 {
                optimal = kelly_fraction(p, payoff);
                payoff = payoff_for(input, scale, optimal);
            }
            if optimal > highest + input.minimum_raise as f64 / scale {
                return Ok(Decision::Amount(((optimal - my_bet) * scale) as u64 + 1));
            }
        }
        Ok(if call > fold { Decision::Call } else { Decision::Fold })
    }
}

/// Replays a fixed list of decision tokens, then keeps calling.
#[derive(Debug)]
pub struct Scripted {
    name: String,
    tokens: VecDeque<String>,
}

impl Scripted {
    pub fn new<I: IntoIterator<Item = Decision>>(decisions: I) -> Self {
        Self::from_tokens(decisions.into_iter().map(|d| d.to_string()))
    }

    /// Tokens are parsed when played, so a bad token surfaces as an invalid decision.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { name: "scripted".to_string(), tokens: tokens.into_iter().map(Into::into).collect() }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl Agent for Scripted {
    fn name(&self) -> &str {
        &self.name
    }

    fn decide(&mut self, _input: &DecisionInput) -> Result<Decision, AgentError> {
        match self.tokens.pop_front() {
            Some(token) => Ok(token.parse()?),
            None => Ok(Decision::Call),
        }
    }
}
