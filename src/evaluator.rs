//! Hand strength evaluation.
//!
//! Every five-card hand maps to a [`Strength`] in `1..=7462` where lower is
//! better: `1` is a royal flush and `7462` is 7-5-4-3-2 offsuit. Hands of equal
//! showdown value get exactly the same strength, so comparing strengths is all a
//! settlement needs.
//!
//! Lookups follow the prime-product scheme: same-suited hands and hands with five
//! distinct ranks resolve through a table keyed by the OR of the rank bits; every
//! other hand resolves through the product of the rank primes, which is unique
//! per rank multiset. Tables are built on first use.

pub(crate) mod combinations;
pub(crate) mod tables;

use crate::cards::{Card, Rank};
use crate::hand::{check_distinct, HandError, HoleCards};
use combinations::{multisets, ChooseFive};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use tables::TABLES;

/// Hand strength, lower is better.
///
/// `Ord` follows the numeric value, so `a < b` means `a` beats `b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Strength(u16);

impl Strength {
    pub const ROYAL_FLUSH: Strength = Strength(1);
    pub const WORST: Strength = Strength(tables::MAX_HIGH_CARD);

    pub const fn value(self) -> u16 {
        self.0
    }

    /// Strength from a raw value, `None` outside `1..=7462`.
    pub fn from_value(value: u16) -> Option<Strength> {
        (1..=tables::MAX_HIGH_CARD).contains(&value).then_some(Strength(value))
    }

    pub fn beats(self, other: Strength) -> bool {
        self.0 < other.0
    }

    pub fn category(self) -> Category {
        use tables::*;
        const BOUNDS: [(u16, Category); 8] = [
            (MAX_STRAIGHT_FLUSH, Category::StraightFlush),
            (MAX_FOUR_OF_A_KIND, Category::FourOfAKind),
            (MAX_FULL_HOUSE, Category::FullHouse),
            (MAX_FLUSH, Category::Flush),
            (MAX_STRAIGHT, Category::Straight),
            (MAX_THREE_OF_A_KIND, Category::ThreeOfAKind),
            (MAX_TWO_PAIR, Category::TwoPair),
            (MAX_PAIR, Category::Pair),
        ];
        BOUNDS
            .iter()
            .find(|(max, _)| self.0 <= *max)
            .map_or(Category::HighCard, |(_, category)| *category)
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.0, self.category())
    }
}

/// Poker hand category from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[repr(u8)]
pub enum Category {
    HighCard = 0,
    Pair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl Category {
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    pub const fn name(self) -> &'static str {
        match self {
            Category::HighCard => "high card",
            Category::Pair => "pair",
            Category::TwoPair => "two pair",
            Category::ThreeOfAKind => "three of a kind",
            Category::Straight => "straight",
            Category::Flush => "flush",
            Category::FullHouse => "full house",
            Category::FourOfAKind => "four of a kind",
            Category::StraightFlush => "straight flush",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EvalError {
    #[error("invalid hand: {0}")]
    InvalidHand(#[from] HandError),
    #[error("duplicate card: {0}")]
    DuplicateCard(Card),
    #[error("not enough cards to evaluate")]
    NotEnoughCards,
    #[error("too many cards to evaluate: {0}")]
    TooManyCards(usize),
    /// A well-formed hand missed the tables; the tables are wrong.
    #[error("lookup table miss for key {key:#x}")]
    LookupMiss { key: u32 },
}

/// Strength of a seat's hole cards plus the community cards revealed so far.
///
/// With all five community cards this is the best of the 21 five-card subsets.
///
/// ```
/// use poker_arena::cards::parse_cards;
/// use poker_arena::evaluator::{evaluate, Strength};
/// use poker_arena::hand::HoleCards;
///
/// let hole: HoleCards = "As Ks".parse().unwrap();
/// let community = parse_cards("Qs Js Ts 3c 4d").unwrap();
/// assert_eq!(evaluate(&hole, &community).unwrap(), Strength::ROYAL_FLUSH);
/// ```
pub fn evaluate(hole: &HoleCards, community: &[Card]) -> Result<Strength, EvalError> {
    check_distinct(hole, community)?;
    let mut cards = Vec::with_capacity(2 + community.len());
    cards.extend_from_slice(&hole.cards());
    cards.extend_from_slice(community);
    evaluate_cards(&cards)
}

/// Strength of the best hand in 1 to 7 distinct cards.
///
/// Fewer than five cards give a best-effort strength for relative comparison: the
/// weakest non-flush five-card hand that contains those ranks.
pub fn evaluate_cards(cards: &[Card]) -> Result<Strength, EvalError> {
    let mut seen = HashSet::with_capacity(cards.len());
    if let Some(dup) = cards.iter().find(|c| !seen.insert(**c)) {
        return Err(EvalError::DuplicateCard(*dup));
    }
    match cards.len() {
        0 => Err(EvalError::NotEnoughCards),
        1..=4 => evaluate_partial(cards),
        5..=7 => {
            let mut best = Strength::WORST;
            for idx in ChooseFive::new(cards.len()) {
                let five = [cards[idx[0]], cards[idx[1]], cards[idx[2]], cards[idx[3]], cards[idx[4]]];
                best = best.min(evaluate_five(&five)?);
            }
            Ok(best)
        }
        n => Err(EvalError::TooManyCards(n)),
    }
}

/// Strength of exactly five distinct cards.
pub fn evaluate_five(cards: &[Card; 5]) -> Result<Strength, EvalError> {
    let tables = &*TABLES;
    let suits = cards.iter().fold(0xf, |acc, c| acc & c.suit_mask());
    let mask = cards.iter().fold(0, |acc, c| acc | c.rank_bit());

    let value = if suits != 0 {
        tables.flush[mask as usize]
    } else if mask.count_ones() == 5 {
        tables.unique5[mask as usize]
    } else {
        let product: u32 = cards.iter().map(|c| c.prime()).product();
        return tables
            .paired
            .get(&product)
            .map(|&v| Strength(v))
            .ok_or(EvalError::LookupMiss { key: product });
    };

    if value == 0 {
        return Err(EvalError::LookupMiss { key: mask });
    }
    Ok(Strength(value))
}

fn strength_of_ranks(ranks: &[Rank]) -> Option<u16> {
    let tables = &*TABLES;
    let mask = ranks.iter().fold(0u32, |acc, r| acc | (1 << r.index()));
    if mask.count_ones() == 5 {
        return Some(tables.unique5[mask as usize]);
    }
    let product: u32 = ranks.iter().map(|r| r.prime()).product();
    tables.paired.get(&product).copied()
}

fn evaluate_partial(cards: &[Card]) -> Result<Strength, EvalError> {
    let held: Vec<Rank> = cards.iter().map(|c| c.rank()).collect();
    let mut worst: Option<u16> = None;
    for extra in multisets(&Rank::ALL, 5 - held.len()) {
        let ranks: Vec<Rank> = held.iter().chain(extra.iter()).copied().collect();
        if Rank::ALL.iter().any(|r| ranks.iter().filter(|x| *x == r).count() > 4) {
            continue;
        }
        if let Some(v) = strength_of_ranks(&ranks) {
            worst = Some(worst.map_or(v, |w| w.max(v)));
        }
    }
    let key = cards.iter().map(|c| c.prime()).product();
    worst.map(Strength).ok_or(EvalError::LookupMiss { key })
}

/// Compare two hole-card holdings on shared community cards; `Less` means `a` wins.
pub fn compare(a: &HoleCards, b: &HoleCards, community: &[Card]) -> Result<std::cmp::Ordering, EvalError> {
    Ok(evaluate(a, community)?.cmp(&evaluate(b, community)?))
}
