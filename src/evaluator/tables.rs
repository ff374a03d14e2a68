//! Precomputed lookup tables covering all 7462 distinct five-card hands.
//!
//! Strengths are dense in `1..=7462`, best first:
//!
//! | class           | strengths     |
//! |-----------------|---------------|
//! | straight flush  | 1 ..= 10      |
//! | four of a kind  | 11 ..= 166    |
//! | full house      | 167 ..= 322   |
//! | flush           | 323 ..= 1599  |
//! | straight        | 1600 ..= 1609 |
//! | three of a kind | 1610 ..= 2467 |
//! | two pair        | 2468 ..= 3325 |
//! | pair            | 3326 ..= 6185 |
//! | high card       | 6186 ..= 7462 |

use super::combinations::combinations;
use crate::cards::PRIMES;
use std::collections::HashMap;
use std::sync::LazyLock;

pub(crate) const MAX_STRAIGHT_FLUSH: u16 = 10;
pub(crate) const MAX_FOUR_OF_A_KIND: u16 = 166;
pub(crate) const MAX_FULL_HOUSE: u16 = 322;
pub(crate) const MAX_FLUSH: u16 = 1599;
pub(crate) const MAX_STRAIGHT: u16 = 1609;
pub(crate) const MAX_THREE_OF_A_KIND: u16 = 2467;
pub(crate) const MAX_TWO_PAIR: u16 = 3325;
pub(crate) const MAX_PAIR: u16 = 6185;
pub(crate) const MAX_HIGH_CARD: u16 = 7462;

/// Rank masks of the ten straights, ace-high first and the wheel (5-4-3-2-A) last.
pub(crate) const STRAIGHTS: [u16; 10] =
    [0x1f00, 0x0f80, 0x07c0, 0x03e0, 0x01f0, 0x00f8, 0x007c, 0x003e, 0x001f, 0x100f];

/// Rank indices from ace down to deuce.
const RANKS_DESC: [usize; 13] = [12, 11, 10, 9, 8, 7, 6, 5, 4, 3, 2, 1, 0];

const MASK_SPACE: usize = 1 << 13;

pub(crate) struct LookupTables {
    /// Five same-suited cards, keyed by rank mask. Zero for masks that are not five ranks.
    pub(crate) flush: Box<[u16]>,
    /// Five distinct ranks, not all the same suit: straights and high cards.
    pub(crate) unique5: Box<[u16]>,
    /// Hands with a repeated rank, keyed by the product of the five primes.
    pub(crate) paired: HashMap<u32, u16>,
}

pub(crate) static TABLES: LazyLock<LookupTables> = LazyLock::new(LookupTables::build);

impl LookupTables {
    fn build() -> Self {
        let mut flush = vec![0u16; MASK_SPACE].into_boxed_slice();
        let mut unique5 = vec![0u16; MASK_SPACE].into_boxed_slice();

        for (i, &mask) in STRAIGHTS.iter().enumerate() {
            flush[mask as usize] = 1 + i as u16;
            unique5[mask as usize] = MAX_FLUSH + 1 + i as u16;
        }

        // Numeric order of a five-bit mask is the high-card comparison order.
        let mut masks: Vec<u16> = (0..MASK_SPACE as u16)
            .filter(|m| m.count_ones() == 5 && !STRAIGHTS.contains(m))
            .collect();
        masks.sort_unstable_by(|a, b| b.cmp(a));
        for (i, &mask) in masks.iter().enumerate() {
            flush[mask as usize] = MAX_FULL_HOUSE + 1 + i as u16;
            unique5[mask as usize] = MAX_PAIR + 1 + i as u16;
        }

        Self { flush, unique5, paired: build_paired() }
    }
}

fn prime(rank: usize) -> u32 {
    PRIMES[rank]
}

fn build_paired() -> HashMap<u32, u16> {
    let mut paired = HashMap::with_capacity(4888);
    let others = |skip: &[usize]| -> Vec<usize> {
        RANKS_DESC.iter().copied().filter(|r| !skip.contains(r)).collect()
    };

    let mut next = MAX_STRAIGHT_FLUSH + 1;
    for quad in RANKS_DESC {
        for kicker in others(&[quad]) {
            paired.insert(prime(quad).pow(4) * prime(kicker), next);
            next += 1;
        }
    }
    debug_assert_eq!(next - 1, MAX_FOUR_OF_A_KIND);

    for trips in RANKS_DESC {
        for pair in others(&[trips]) {
            paired.insert(prime(trips).pow(3) * prime(pair).pow(2), next);
            next += 1;
        }
    }
    debug_assert_eq!(next - 1, MAX_FULL_HOUSE);

    next = MAX_STRAIGHT + 1;
    for trips in RANKS_DESC {
        for kickers in combinations(&others(&[trips]), 2) {
            paired.insert(prime(trips).pow(3) * prime(kickers[0]) * prime(kickers[1]), next);
            next += 1;
        }
    }
    debug_assert_eq!(next - 1, MAX_THREE_OF_A_KIND);

    for pairs in combinations(&RANKS_DESC, 2) {
        let (high, low) = (pairs[0], pairs[1]);
        for kicker in others(&[high, low]) {
            paired.insert(prime(high).pow(2) * prime(low).pow(2) * prime(kicker), next);
            next += 1;
        }
    }
    debug_assert_eq!(next - 1, MAX_TWO_PAIR);

    for pair in RANKS_DESC {
        for kickers in combinations(&others(&[pair]), 3) {
            let product: u32 = kickers.iter().map(|&k| prime(k)).product();
            paired.insert(prime(pair).pow(2) * product, next);
            next += 1;
        }
    }
    debug_assert_eq!(next - 1, MAX_PAIR);

    paired
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_strength_appears_exactly_once() {
        let t = &*TABLES;
        let mut seen: HashSet<u16> = HashSet::new();
        let flushes = t.flush.iter().filter(|&&v| v != 0);
        let unique = t.unique5.iter().filter(|&&v| v != 0);
        for &v in flushes.chain(unique).chain(t.paired.values()) {
            assert!(seen.insert(v), "strength {v} assigned twice");
        }
        assert_eq!(seen.len(), MAX_HIGH_CARD as usize);
        assert_eq!(seen.iter().min(), Some(&1));
        assert_eq!(seen.iter().max(), Some(&MAX_HIGH_CARD));
    }

    #[test]
    fn class_sizes() {
        let t = &*TABLES;
        assert_eq!(t.paired.len(), 156 + 156 + 858 + 858 + 2860);
        assert_eq!(t.flush.iter().filter(|&&v| v != 0).count(), 1287);
        assert_eq!(t.unique5.iter().filter(|&&v| v != 0).count(), 1287);
    }

    #[test]
    fn wheel_is_the_lowest_straight() {
        let t = &*TABLES;
        assert_eq!(t.unique5[0x100f], MAX_STRAIGHT);
        assert_eq!(t.flush[0x100f], MAX_STRAIGHT_FLUSH);
        assert_eq!(t.unique5[0x1f00], MAX_FLUSH + 1);
        // 6-high straight sits right above the wheel
        assert_eq!(t.unique5[0x001f], MAX_STRAIGHT - 1);
    }
}
