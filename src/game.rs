use crate::agents::{Agent, AgentError, DecisionInput, Outcome, ProtocolViolation, TimedAgent};
use crate::betting::{resolve, BettingRound, Move};
use crate::deck::{Deck, DeckError};
use crate::evaluator::{evaluate, EvalError, Strength};
use crate::hand::{Board, HandError, HoleCards};
use crate::history::{ActionRecord, GameRecord, RoundRecord, ShownHand, Street};
use crate::player::{BetError, LastAction, Player, PublicInfo, RoundStatus};
use crate::pot::{build_pots, distribute};
use crate::rules::{Rules, RulesError};
use log::{debug, info, warn};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Fatal errors. A round that fails is cancelled: bets go back to the stacks and
/// nothing is recorded, so the game can go on with the next round.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum GameError {
    #[error(transparent)]
    Rules(#[from] RulesError),
    #[error("a game needs at least two seats, got {0}")]
    NotEnoughSeats(usize),
    #[error("a deck deals to at most {max} seats, got {0}", max = Game::MAX_SEATS)]
    TooManySeats(usize),
    #[error("fewer than two seats left in the game")]
    GameOver,
    #[error("seat {0} has no hole cards")]
    NoHoleCards(usize),
    #[error(transparent)]
    Deck(#[from] DeckError),
    #[error(transparent)]
    Hand(#[from] HandError),
    #[error(transparent)]
    Eval(#[from] EvalError),
    #[error(transparent)]
    Bet(#[from] BetError),
    #[error("protocol violation: {0}")]
    Protocol(#[from] ProtocolViolation),
}

/// A table of agents playing rounds of hold'em until one is left or the round
/// limit is reached.
#[derive(Debug)]
#[non_exhaustive]
pub struct Game {
    rules: Rules,
    players: Vec<Player>,
    agents: Vec<TimedAgent>,
    rng: ChaCha8Rng,
    deck: Deck,
    board: Board,
    first_player: usize,
    round: usize,
    actions: Vec<ActionRecord>,
    record: GameRecord,
}

impl Game {
    /// Two hole cards per seat plus a full board must come out of one deck.
    pub const MAX_SEATS: usize = (Deck::SIZE - Board::MAX) / 2;

    /// Seat `agents` in order. `seed` drives every shuffle of the game.
    pub fn new(rules: Rules, agents: Vec<Box<dyn Agent>>, seed: u64) -> Result<Self, GameError> {
        rules.validate()?;
        if agents.len() < 2 {
            return Err(GameError::NotEnoughSeats(agents.len()));
        }
        if agents.len() > Self::MAX_SEATS {
            return Err(GameError::TooManySeats(agents.len()));
        }
        let names: Vec<String> = agents.iter().map(|a| a.name().to_string()).collect();
        let players = (0..agents.len()).map(|i| Player::new(i, rules.initial_stack)).collect();
        let agents = agents.into_iter().map(|a| TimedAgent::spawn(a, rules.timeout())).collect();
        Ok(Self {
            record: GameRecord::new("none", rules.clone(), names),
            rules,
            players,
            agents,
            rng: ChaCha8Rng::seed_from_u64(seed),
            deck: Deck::standard(),
            board: Board::new(),
            first_player: 0,
            round: 0,
            actions: Vec::new(),
        })
    }

    pub fn with_tournament_id(mut self, id: impl Into<String>) -> Self {
        self.record.tournament_id = id.into();
        self
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Rounds played so far.
    pub fn round(&self) -> usize {
        self.round
    }

    pub fn first_player(&self) -> usize {
        self.first_player
    }

    pub fn record(&self) -> &GameRecord {
        &self.record
    }

    /// Seats that still have chips.
    pub fn in_game(&self) -> usize {
        self.players.iter().filter(|p| p.is_in_game()).count()
    }

    /// Chips on the table: stacks plus bets not yet collected.
    pub fn total_chips(&self) -> u64 {
        self.players.iter().map(|p| p.stack + p.bet).sum()
    }

    /// Play up to `n_rounds` rounds, stopping early once fewer than two seats have chips.
    pub fn play(&mut self, n_rounds: usize) -> Result<GameRecord, GameError> {
        for _ in 0..n_rounds {
            if self.in_game() < 2 {
                break;
            }
            self.play_round()?;
        }
        info!("game {} over after {} rounds", self.record.tournament_id, self.round);
        Ok(self.record.clone())
    }

    /// Play one round with a freshly shuffled deck.
    pub fn play_round(&mut self) -> Result<RoundRecord, GameError> {
        let seed: u64 = self.rng.random();
        self.play_round_with(Deck::shuffled(seed))
    }

    /// Play one round dealing from `deck`: hole cards in seat order, then the
    /// flop, turn and river.
    pub fn play_round_with(&mut self, deck: Deck) -> Result<RoundRecord, GameError> {
        let n = self.players.len();
        let players_in: Vec<usize> = (0..n).filter(|&i| self.players[i].is_in_game()).collect();
        if players_in.len() < 2 {
            return Err(GameError::GameOver);
        }

        self.first_player = (self.first_player + 1) % n;
        self.deck = deck;
        self.board = Board::new();
        self.actions.clear();
        info!("round {} starting with seats {:?}", self.round, players_in);

        // showdown only fails before any chips move
        let result = self.play_streets().and_then(|()| self.showdown(players_in));
        if let Err(e) = &result {
            warn!("round {} cancelled, bets returned: {e}", self.round);
            self.cancel_round();
        }
        result
    }

    fn play_streets(&mut self) -> Result<(), GameError> {
        let n = self.players.len();
        let big_blind_seat = self.deal_and_post_blinds()?;
        for street in Street::ALL {
            let cards = self.deck.draw(street.cards_dealt())?;
            if !cards.is_empty() {
                self.board.extend(cards)?;
                debug!("{street}: community {:?}", self.board.as_slice());
            }
            let first = match street {
                Street::Preflop => (big_blind_seat + 1) % n,
                _ => self.first_player,
            };
            self.run_street(street, first)?;
        }
        Ok(())
    }

    /// Give every outstanding bet back and clear the round state.
    fn cancel_round(&mut self) {
        for player in &mut self.players {
            player.cancel_round();
        }
        self.board = Board::new();
        self.actions.clear();
    }

    fn deal_and_post_blinds(&mut self) -> Result<usize, GameError> {
        let n = self.players.len();
        let mut blind_order =
            (0..n).map(|k| (self.first_player + k) % n).filter(|&i| self.players[i].is_in_game());
        let (small, big) = match (blind_order.next(), blind_order.next()) {
            (Some(s), Some(b)) => (s, b),
            _ => return Err(GameError::GameOver),
        };

        let mut posted = [0u64; 2];
        for seat in 0..n {
            if !self.players[seat].is_in_game() {
                self.players[seat].sit_out();
                continue;
            }
            let hole = HoleCards::from_slice(&self.deck.draw(2)?)?;
            let blind = match seat {
                s if s == small => self.rules.small_blind,
                s if s == big => self.rules.big_blind,
                _ => 0,
            };
            let paid = self.players[seat].start_round(hole, blind)?;
            if seat == small {
                posted[0] = paid;
            } else if seat == big {
                posted[1] = paid;
            }
        }

        for (seat, paid, action) in
            [(small, posted[0], LastAction::SmallBlind), (big, posted[1], LastAction::BigBlind)]
        {
            self.players[seat].last_action = Some(action);
            self.log_action(Street::Preflop, seat, action, paid);
        }
        Ok(big)
    }

    fn run_street(&mut self, street: Street, first: usize) -> Result<(), GameError> {
        let mut betting = BettingRound::new(street, first, &self.players);
        while let Some(seat) = betting.next_actor(&self.players) {
            let input = self.snapshot(seat, street, betting.highest())?;
            let mv = match self.agents[seat].request(input) {
                Outcome::Decided(decision) => {
                    resolve(decision, &self.players[seat], betting.highest(), self.rules.minimum_raise)?
                }
                Outcome::TimedOut => {
                    warn!("seat {seat} ({}) timed out, folding", self.agents[seat].name());
                    self.fold(street, seat, LastAction::TimedOut);
                    continue;
                }
                Outcome::Failed(AgentError::InvalidDecision(violation)) => return Err(violation.into()),
                Outcome::Failed(e) => {
                    warn!("seat {seat} ({}) failed, folding: {e}", self.agents[seat].name());
                    self.fold(street, seat, LastAction::Fold);
                    continue;
                }
            };
            let bet = self.apply(street, seat, mv)?;
            betting.record(seat, bet);
        }
        Ok(())
    }

    /// Owned view of the table for one decision.
    fn snapshot(&self, seat: usize, street: Street, highest: u64) -> Result<DecisionInput, GameError> {
        let player = &self.players[seat];
        let hand = player.hole.ok_or(GameError::NoHoleCards(seat))?;
        Ok(DecisionInput {
            seat,
            rules: self.rules.clone(),
            street,
            hand,
            community: self.board.as_slice().to_vec(),
            pot: self.players.iter().map(|p| p.bet).sum(),
            highest_bet: highest,
            minimum_raise: self.rules.minimum_raise,
            owed: highest.saturating_sub(player.bet),
            me: player.public_info(),
            players: self.players.iter().map(Player::public_info).collect(),
            round_actions: self.actions.clone(),
            history: self.record.recent(self.rules.history_depth).to_vec(),
        })
    }

    fn fold(&mut self, street: Street, seat: usize, action: LastAction) {
        self.players[seat].fold(action);
        self.log_action(street, seat, action, 0);
    }

    /// Apply a resolved move and return the seat's bet afterwards.
    fn apply(&mut self, street: Street, seat: usize, mv: Move) -> Result<u64, GameError> {
        let player = &mut self.players[seat];
        let (paid, action) = match mv {
            Move::Fold => {
                self.fold(street, seat, LastAction::Fold);
                return Ok(self.players[seat].bet);
            }
            Move::Call(0) => (player.place_bet(0)?, LastAction::Check),
            Move::Call(owed) => (player.place_bet(owed)?, LastAction::Call),
            Move::AllIn => (player.place_bet(player.stack)?, LastAction::AllIn),
            Move::Raise(amount) => (player.place_bet(amount)?, LastAction::Raise),
        };
        let action = match player.round_status {
            RoundStatus::AllIn => LastAction::AllIn,
            _ => action,
        };
        player.last_action = Some(action);
        let bet = player.bet;
        self.log_action(street, seat, action, paid);
        Ok(bet)
    }

    fn log_action(&mut self, street: Street, seat: usize, action: LastAction, amount: u64) {
        let (stack, bet) = (self.players[seat].stack, self.players[seat].bet);
        debug!("{street}: seat {seat} {} {amount} (bet {bet}, stack {stack})", action.label());
        self.actions.push(ActionRecord { street, seat, action, amount, stack, bet });
    }

    fn showdown(&mut self, players_in: Vec<usize>) -> Result<RoundRecord, GameError> {
        let community = self.board.as_slice().to_vec();
        let mut strengths: Vec<Option<Strength>> = vec![None; self.players.len()];
        let mut shown = Vec::new();
        for (seat, player) in self.players.iter().enumerate() {
            if player.round_status == RoundStatus::Out {
                continue;
            }
            let hole = player.hole.ok_or(GameError::NoHoleCards(seat))?;
            let strength = evaluate(&hole, &community)?;
            strengths[seat] = Some(strength);
            shown.push(ShownHand { seat, hole, strength });
        }
        let best = strengths.iter().flatten().min().copied();
        let winners: Vec<usize> =
            (0..self.players.len()).filter(|&i| best.is_some() && strengths[i] == best).collect();

        let final_info: Vec<PublicInfo> = self.players.iter().map(Player::public_info).collect();
        let pots = build_pots(&mut self.players);
        let settlement = distribute(&pots, &strengths);
        for (player, &won) in self.players.iter_mut().zip(&settlement.payouts) {
            player.win(won);
            player.finish_round();
        }
        if settlement.undistributed > 0 {
            debug!("{} chips left undistributed", settlement.undistributed);
        }
        info!("round {} won by seats {:?}, payouts {:?}", self.round, winners, settlement.payouts);

        let record = RoundRecord {
            round: self.round,
            players_in,
            community,
            players: final_info,
            shown,
            actions: std::mem::take(&mut self.actions),
            winners,
            payouts: settlement.payouts,
            undistributed: settlement.undistributed,
        };
        self.record.rounds.push(record.clone());
        self.round += 1;
        Ok(record)
    }
}
