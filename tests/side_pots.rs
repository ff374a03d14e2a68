use poker_arena::evaluator::Strength;
use poker_arena::hand::HoleCards;
use poker_arena::player::{LastAction, Player, RoundStatus};
use poker_arena::pot::{build_pots, distribute};
use proptest::prelude::*;
use std::collections::BTreeSet;

fn hole() -> HoleCards {
    "2c 7d".parse().expect("valid hole cards")
}

/// Seat `i` commits `bets[i]` out of `stacks[i]`, then folds if `folded[i]`.
fn seats(bets: &[u64], stacks: &[u64], folded: &[bool]) -> Vec<Player> {
    bets.iter()
        .enumerate()
        .map(|(i, &bet)| {
            let mut p = Player::new(i, stacks[i]);
            p.start_round(hole(), 0).unwrap();
            p.place_bet(bet).unwrap();
            if folded[i] {
                p.fold(LastAction::Fold);
            }
            p
        })
        .collect()
}

fn strengths(values: &[u16]) -> Vec<Option<Strength>> {
    values.iter().map(|&v| Strength::from_value(v)).collect()
}

#[test]
fn two_all_ins_and_a_covering_stack() {
    // A all-in for 50, B all-in for 120, C bets 300 with plenty behind
    let mut players = seats(&[50, 120, 300], &[50, 120, 2000], &[false; 3]);
    let pots = build_pots(&mut players);
    assert_eq!(pots.len(), 3);
    assert_eq!((pots[0].cap, pots[0].content, pots[0].eligible.clone()), (50, 150, vec![0, 1, 2]));
    assert_eq!((pots[1].cap, pots[1].content, pots[1].eligible.clone()), (120, 140, vec![1, 2]));
    assert_eq!((pots[2].cap, pots[2].content, pots[2].eligible.clone()), (300, 180, vec![2]));

    // A has the best hand, B the second best
    let s = distribute(&pots, &strengths(&[100, 200, 3000]));
    assert_eq!(s.payouts, vec![150, 140, 180]);
    assert_eq!(s.undistributed, 0);
}

#[test]
fn short_all_in_wins_only_the_main_pot() {
    let mut players = seats(&[30, 100, 100], &[30, 500, 500], &[false; 3]);
    let pots = build_pots(&mut players);
    let s = distribute(&pots, &strengths(&[1, 5000, 6000]));
    assert_eq!(s.payouts, vec![90, 140, 0]);
    assert_eq!(s.winners, vec![0, 1]);
}

#[test]
fn dead_money_from_a_fold_stays_in_the_pots() {
    // seat 0 folds after 80; seats 1 and 2 are all-in for 40 and 60
    let mut players = seats(&[80, 40, 60], &[500, 40, 60], &[true, false, false]);
    let pots = build_pots(&mut players);
    // the 60..80 layer only reached the folded seat and merges down
    assert_eq!(pots.len(), 2);
    assert_eq!((pots[0].content, pots[0].eligible.clone()), (120, vec![1, 2]));
    assert_eq!((pots[1].content, pots[1].eligible.clone()), (60, vec![2]));

    let s = distribute(&pots, &strengths(&[1, 2000, 4000]));
    assert_eq!(s.payouts, vec![0, 120, 60]);
    assert_eq!(s.payouts.iter().sum::<u64>() + s.undistributed, 180);
}

#[test]
fn odd_chip_is_not_awarded() {
    let mut players = seats(&[25, 25, 25], &[100, 100, 100], &[false; 3]);
    let pots = build_pots(&mut players);
    let s = distribute(&pots, &strengths(&[3000, 3000, 5000]));
    assert_eq!(s.payouts, vec![37, 37, 0]);
    assert_eq!(s.undistributed, 1);
}

prop_compose! {
    fn table()(n in 2usize..7)(
        bets in prop::collection::vec(0u64..400, n),
        extra in prop::collection::vec(0u64..2, n),
        folded in prop::collection::vec(prop::bool::weighted(0.3), n),
        values in prop::collection::vec(1u16..=7462, n),
    ) -> (Vec<u64>, Vec<u64>, Vec<bool>, Vec<u16>) {
        // extra == 0 leaves the seat all-in
        let stacks = bets.iter().zip(&extra).map(|(b, e)| (*b).max(1) + e * 1000).collect();
        (bets, stacks, folded, values)
    }
}

proptest! {
    #[test]
    fn pots_conserve_chips_and_respect_eligibility((bets, stacks, folded, values) in table()) {
        let mut players = seats(&bets, &stacks, &folded);
        let committed: u64 = bets.iter().sum();
        let pots = build_pots(&mut players);

        prop_assert_eq!(pots.iter().map(|p| p.content).sum::<u64>(), committed);
        prop_assert!(players.iter().all(|p| p.bet() == 0));

        let max_live = bets.iter().zip(&folded).filter(|&(_, &f)| !f).map(|(&b, _)| b).max().unwrap_or(0);
        let levels: BTreeSet<u64> = bets.iter().copied().filter(|&b| b > 0 && b <= max_live).collect();
        // levels above every live seat are folded-only; with no level at all the
        // dead money forms one unclaimable pot
        prop_assert_eq!(pots.len(), levels.len() + usize::from(levels.is_empty() && committed > 0));

        for pot in &pots {
            for &seat in &pot.eligible {
                prop_assert!(!folded[seat]);
                prop_assert!(bets[seat] >= pot.cap);
                prop_assert_ne!(players[seat].round_status(), RoundStatus::Out);
            }
        }

        let strengths: Vec<Option<Strength>> = values
            .iter()
            .zip(&folded)
            .map(|(&v, &f)| if f { None } else { Strength::from_value(v) })
            .collect();
        let s = distribute(&pots, &strengths);
        prop_assert_eq!(s.payouts.iter().sum::<u64>() + s.undistributed, committed);
        for (seat, &won) in s.payouts.iter().enumerate() {
            if won > 0 {
                prop_assert!(!folded[seat]);
                // chips up to the winner's level plus folded money merged from above
                let reach: u64 = bets.iter().map(|&b| b.min(bets[seat])).sum();
                let dead_above: u64 = bets
                    .iter()
                    .zip(&folded)
                    .filter(|&(_, &f)| f)
                    .map(|(&b, _)| b.saturating_sub(bets[seat]))
                    .sum();
                prop_assert!(won <= reach + dead_above);
            }
        }
    }
}
