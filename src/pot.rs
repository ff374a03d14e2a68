//! Side pots built from the bets committed during a round.

use crate::evaluator::Strength;
use crate::player::{Player, RoundStatus};
use serde::Serialize;

/// One bet layer: chips between the previous level and `cap`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SidePot {
    pub cap: u64,
    pub content: u64,
    /// Seats that have not folded and committed at least `cap`.
    pub eligible: Vec<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Settlement {
    /// Chips won, indexed by seat.
    pub payouts: Vec<u64>,
    /// Seats that won something, ascending.
    pub winners: Vec<usize>,
    /// Division remainders and pots nobody could win.
    pub undistributed: u64,
}

/// Collect every outstanding bet into ordered pots, main pot first.
///
/// All bets are drained through [`Player::settle_to_pot`], folded seats included
/// (dead money). Layers only folded seats reached are merged into the pot below
/// them, or into the next one when there is none.
pub fn build_pots(players: &mut [Player]) -> Vec<SidePot> {
    let totals: Vec<u64> = players.iter().map(|p| p.bet).collect();
    let mut levels: Vec<u64> = totals.iter().copied().chain([0]).collect();
    levels.sort_unstable();
    levels.dedup();

    let mut pots: Vec<SidePot> = Vec::new();
    let mut carry = 0u64;
    for pair in levels.windows(2) {
        let (low, high) = (pair[0], pair[1]);
        let width = high - low;
        let content: u64 = players.iter_mut().map(|p| p.settle_to_pot(width)).sum();
        let eligible: Vec<usize> = players
            .iter()
            .enumerate()
            .filter(|(i, p)| p.round_status != RoundStatus::Out && totals[*i] >= high)
            .map(|(i, _)| i)
            .collect();

        if eligible.is_empty() {
            match pots.last_mut() {
                Some(prev) => prev.content += content,
                None => carry += content,
            }
            continue;
        }
        pots.push(SidePot { cap: high, content: content + carry, eligible });
        carry = 0;
    }

    if carry > 0 {
        // every contributor folded; nobody can claim these chips
        pots.push(SidePot { cap: levels.last().copied().unwrap_or(0), content: carry, eligible: Vec::new() });
    }
    pots
}

/// Award each pot to its eligible seats holding the best strength.
///
/// `strengths` is indexed by seat; `None` marks a seat that cannot win.
/// Ties split by integer division and the remainder stays undistributed.
///
/// ```
/// use poker_arena::evaluator::Strength;
/// use poker_arena::pot::{distribute, SidePot};
///
/// let pots = vec![SidePot { cap: 50, content: 101, eligible: vec![0, 1] }];
/// let strengths = [Strength::from_value(3000), Strength::from_value(3000)];
/// let s = distribute(&pots, &strengths);
/// assert_eq!(s.payouts, vec![50, 50]);
/// assert_eq!(s.undistributed, 1);
/// ```
pub fn distribute(pots: &[SidePot], strengths: &[Option<Strength>]) -> Settlement {
    let mut settlement = Settlement { payouts: vec![0; strengths.len()], ..Default::default() };
    for pot in pots {
        let best = pot.eligible.iter().filter_map(|&i| strengths.get(i).copied().flatten()).min();
        let Some(best) = best else {
            settlement.undistributed += pot.content;
            continue;
        };
        let winners: Vec<usize> = pot
            .eligible
            .iter()
            .copied()
            .filter(|&i| strengths.get(i).copied().flatten() == Some(best))
            .collect();
        let share = pot.content / winners.len() as u64;
        settlement.undistributed += pot.content % winners.len() as u64;
        for &i in &winners {
            settlement.payouts[i] += share;
        }
    }
    settlement.winners = (0..strengths.len()).filter(|&i| settlement.payouts[i] > 0).collect();
    settlement
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::LastAction;

    fn table(bets: &[u64], stacks: &[u64]) -> Vec<Player> {
        bets.iter()
            .zip(stacks)
            .enumerate()
            .map(|(i, (&bet, &stack))| {
                let mut p = Player::new(i, bet + stack);
                p.start_round("2c 3d".parse().unwrap(), 0).unwrap();
                p.place_bet(bet).unwrap();
                p
            })
            .collect()
    }

    fn strength(v: u16) -> Option<Strength> {
        Strength::from_value(v)
    }

    #[test]
    fn single_level_is_one_pot() {
        let mut players = table(&[20, 20, 20], &[80, 80, 80]);
        let pots = build_pots(&mut players);
        assert_eq!(pots, vec![SidePot { cap: 20, content: 60, eligible: vec![0, 1, 2] }]);
        assert!(players.iter().all(|p| p.bet() == 0));
    }

    #[test]
    fn all_in_seats_only_reach_their_layers() {
        // seat 0 all-in 50, seat 1 all-in 100, seat 2 covers with 200
        let mut players = table(&[50, 100, 200], &[0, 0, 300]);
        let pots = build_pots(&mut players);
        assert_eq!(pots.len(), 3);
        assert_eq!((pots[0].content, pots[0].eligible.clone()), (150, vec![0, 1, 2]));
        assert_eq!((pots[1].content, pots[1].eligible.clone()), (100, vec![1, 2]));
        assert_eq!((pots[2].content, pots[2].eligible.clone()), (100, vec![2]));
    }

    #[test]
    fn folded_top_layer_merges_down() {
        let mut players = table(&[100, 50, 50], &[0, 0, 100]);
        players[0].fold(LastAction::Fold);
        let pots = build_pots(&mut players);
        assert_eq!(pots.len(), 1);
        assert_eq!(pots[0].content, 200);
        assert_eq!(pots[0].eligible, vec![1, 2]);
    }

    #[test]
    fn folded_dead_money_with_unequal_all_ins() {
        // seat 0 folds after 60, seats 1 and 2 all-in for 40 and 80
        let mut players = table(&[60, 40, 80], &[100, 0, 0]);
        players[0].fold(LastAction::Fold);
        let pots = build_pots(&mut players);
        assert_eq!(pots.len(), 3);
        assert_eq!(pots[0].content, 120);
        assert_eq!(pots[0].eligible, vec![1, 2]);
        // the folded seat's chips above 40 still feed the layer only seat 2 reached
        assert_eq!((pots[1].cap, pots[1].content), (60, 40));
        assert_eq!(pots[1].eligible, vec![2]);
        assert_eq!((pots[2].cap, pots[2].content), (80, 20));
        assert_eq!(pots.iter().map(|p| p.content).sum::<u64>(), 180);
    }

    #[test]
    fn best_strength_takes_each_pot() {
        let pots = vec![
            SidePot { cap: 50, content: 150, eligible: vec![0, 1, 2] },
            SidePot { cap: 100, content: 100, eligible: vec![1, 2] },
        ];
        let s = distribute(&pots, &[strength(10), strength(200), strength(5000)]);
        assert_eq!(s.payouts, vec![150, 100, 0]);
        assert_eq!(s.winners, vec![0, 1]);
        assert_eq!(s.undistributed, 0);
    }

    #[test]
    fn unclaimable_pot_is_undistributed() {
        let pots = vec![SidePot { cap: 30, content: 30, eligible: vec![] }];
        let s = distribute(&pots, &[None, None]);
        assert_eq!(s.undistributed, 30);
        assert!(s.winners.is_empty());
    }
}
