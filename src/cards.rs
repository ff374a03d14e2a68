//! Card codec.
//!
//! A [`Card`] is a compact 32-bit value laid out as:
//!
//! ```text
//!   +--------+--------+--------+--------+
//!   |xxxbbbbb|bbbbbbbb|cdhsrrrr|xxpppppp|
//!   +--------+--------+--------+--------+
//!   p = prime of the rank (deuce=2, trey=3, four=5, ..., ace=41)
//!   r = rank index (deuce=0, trey=1, ..., ace=12)
//!   cdhs = one-hot suit (spades=1, hearts=2, diamonds=4, clubs=8)
//!   b = one bit set for the rank
//! ```
//!
//! The prime field makes the product of five cards unique per rank multiset and
//! the rank bit makes straights and flushes a single mask lookup.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Prime identifier per rank index.
pub const PRIMES: [u32; 13] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41];

/// Card ranks from Two (low) to Ace (high).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Rank {
    Two = 0,
    Three = 1,
    Four = 2,
    Five = 3,
    Six = 4,
    Seven = 5,
    Eight = 6,
    Nine = 7,
    Ten = 8,
    Jack = 9,
    Queen = 10,
    King = 11,
    Ace = 12,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// Rank index, 0 for a deuce up to 12 for an ace.
    pub const fn index(self) -> u8 {
        self as u8
    }

    pub const fn prime(self) -> u32 {
        PRIMES[self as usize]
    }

    /// Rank from its index, `None` when out of `0..=12`.
    pub fn from_index(index: u8) -> Option<Rank> {
        Rank::ALL.get(index as usize).copied()
    }

    pub const fn to_char(self) -> char {
        match self {
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CardError {
    #[error("invalid card: '{0}'")]
    InvalidCard(String),
}

impl TryFrom<char> for Rank {
    type Error = CardError;
    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_uppercase() {
            '2' => Ok(Rank::Two),
            '3' => Ok(Rank::Three),
            '4' => Ok(Rank::Four),
            '5' => Ok(Rank::Five),
            '6' => Ok(Rank::Six),
            '7' => Ok(Rank::Seven),
            '8' => Ok(Rank::Eight),
            '9' => Ok(Rank::Nine),
            'T' => Ok(Rank::Ten),
            'J' => Ok(Rank::Jack),
            'Q' => Ok(Rank::Queen),
            'K' => Ok(Rank::King),
            'A' => Ok(Rank::Ace),
            _ => Err(CardError::InvalidCard(c.to_string())),
        }
    }
}

impl FromStr for Rank {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        if t == "10" {
            return Ok(Rank::Ten);
        }
        let mut chars = t.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Rank::try_from(c),
            _ => Err(CardError::InvalidCard(s.to_string())),
        }
    }
}

/// Four suits, each a single bit in the encoded card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Suit {
    Spades = 1,
    Hearts = 2,
    Diamonds = 4,
    Clubs = 8,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

    /// One-hot suit mask.
    pub const fn mask(self) -> u8 {
        self as u8
    }

    pub fn from_mask(mask: u8) -> Option<Suit> {
        match mask {
            1 => Some(Suit::Spades),
            2 => Some(Suit::Hearts),
            4 => Some(Suit::Diamonds),
            8 => Some(Suit::Clubs),
            _ => None,
        }
    }

    pub const fn to_char(self) -> char {
        match self {
            Suit::Spades => 's',
            Suit::Hearts => 'h',
            Suit::Diamonds => 'd',
            Suit::Clubs => 'c',
        }
    }

    pub const fn symbol(self) -> char {
        match self {
            Suit::Spades => '♠',
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

impl TryFrom<char> for Suit {
    type Error = CardError;
    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            's' | 'S' | '♠' => Ok(Suit::Spades),
            'h' | 'H' | '♥' | '❤' => Ok(Suit::Hearts),
            'd' | 'D' | '♦' => Ok(Suit::Diamonds),
            'c' | 'C' | '♣' => Ok(Suit::Clubs),
            _ => Err(CardError::InvalidCard(c.to_string())),
        }
    }
}

impl FromStr for Suit {
    type Err = CardError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        let mut chars = t.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Suit::try_from(c);
        }
        match t.to_ascii_lowercase().as_str() {
            "spades" => Ok(Suit::Spades),
            "hearts" => Ok(Suit::Hearts),
            "diamonds" => Ok(Suit::Diamonds),
            "clubs" => Ok(Suit::Clubs),
            _ => Err(CardError::InvalidCard(s.to_string())),
        }
    }
}

/// A playing card packed into a `u32`.
///
/// ```
/// use poker_arena::cards::{Card, Rank, Suit};
///
/// let card = Card::new(Rank::Ace, Suit::Spades);
/// assert_eq!(card.to_string(), "As");
/// assert_eq!(card.prime(), 41);
/// assert_eq!(card.rank_bit(), 1 << 12);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Card(u32);

impl Card {
    /// Encode a rank and suit.
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        let r = rank as u32;
        Self(PRIMES[r as usize] | (r << 8) | ((suit as u32) << 12) | (1 << (16 + r)))
    }

    /// Decode a raw integer, rejecting anything that is not one of the 52 encodings.
    pub fn from_u32(raw: u32) -> Result<Self, CardError> {
        let invalid = || CardError::InvalidCard(format!("0x{raw:08x}"));
        let rank = Rank::from_index(((raw >> 8) & 0xf) as u8).ok_or_else(invalid)?;
        let suit = Suit::from_mask(((raw >> 12) & 0xf) as u8).ok_or_else(invalid)?;
        let card = Card::new(rank, suit);
        if card.0 != raw {
            return Err(invalid());
        }
        Ok(card)
    }

    /// The raw encoding.
    pub const fn to_u32(self) -> u32 {
        self.0
    }

    pub fn rank(self) -> Rank {
        // The constructor only ever stores indices 0..=12.
        Rank::ALL[((self.0 >> 8) & 0xf) as usize % 13]
    }

    pub fn suit(self) -> Suit {
        Suit::from_mask(self.suit_mask()).unwrap_or(Suit::Spades)
    }

    pub const fn suit_mask(self) -> u8 {
        ((self.0 >> 12) & 0xf) as u8
    }

    /// The single rank bit, in `0..1 << 13`.
    pub const fn rank_bit(self) -> u32 {
        (self.0 >> 16) & 0x1fff
    }

    pub const fn prime(self) -> u32 {
        self.0 & 0x3f
    }

    pub fn to_tuple(self) -> (Rank, Suit) {
        (self.rank(), self.suit())
    }

    /// Rank followed by the unicode suit symbol, e.g. `A♠`.
    pub fn pretty(self) -> String {
        format!("{}{}", self.rank(), self.suit().symbol())
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank(), self.suit())
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

impl FromStr for Card {
    type Err = CardError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        // Suit is the last char, rank is everything before it ("10" allowed).
        let mut chars = t.chars();
        let suit_ch = chars.next_back().ok_or_else(|| CardError::InvalidCard(s.to_string()))?;
        let rank_str = chars.as_str();
        if rank_str.is_empty() {
            return Err(CardError::InvalidCard(s.to_string()));
        }
        let rank = Rank::from_str(rank_str).map_err(|_| CardError::InvalidCard(s.to_string()))?;
        let suit = Suit::try_from(suit_ch).map_err(|_| CardError::InvalidCard(s.to_string()))?;
        Ok(Card::new(rank, suit))
    }
}

impl Serialize for Card {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Parse multiple cards separated by whitespace or commas.
///
/// ```
/// use poker_arena::cards::{parse_cards, Card, Rank, Suit};
///
/// let cards = parse_cards("As, K♦ 10c").unwrap();
/// assert_eq!(cards[0], Card::new(Rank::Ace, Suit::Spades));
/// assert_eq!(cards[1], Card::new(Rank::King, Suit::Diamonds));
/// assert_eq!(cards[2], Card::new(Rank::Ten, Suit::Clubs));
/// ```
pub fn parse_cards(input: &str) -> Result<Vec<Card>, CardError> {
    input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(Card::from_str)
        .collect()
}

/// All 52 cards, rank-major.
pub fn all_cards() -> impl Iterator<Item = Card> {
    Rank::ALL.into_iter().flat_map(|r| Suit::ALL.into_iter().map(move |s| Card::new(r, s)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn encoding_matches_bit_layout() {
        let kd = Card::new(Rank::King, Suit::Diamonds);
        assert_eq!(kd.to_u32(), 0x0800_4b25);
        let five_s = Card::new(Rank::Five, Suit::Spades);
        assert_eq!(five_s.to_u32(), 0x0008_1307);
        let jc = Card::new(Rank::Jack, Suit::Clubs);
        assert_eq!(jc.to_u32(), 0x0200_891d);
    }

    #[test]
    fn decode_round_trips_and_rejects_garbage() {
        for card in all_cards() {
            assert_eq!(Card::from_u32(card.to_u32()).unwrap(), card);
        }
        assert!(Card::from_u32(0).is_err());
        assert!(Card::from_u32(Card::new(Rank::Ace, Suit::Hearts).to_u32() | 0x8000).is_err());
        assert!(Card::from_u32(0x0000_0d00).is_err());
    }

    #[test]
    fn fifty_two_distinct_cards() {
        let set: HashSet<Card> = all_cards().collect();
        assert_eq!(set.len(), 52);
    }

    #[test]
    fn rank_display_and_from_str() {
        assert_eq!(Rank::Ace.to_string(), "A");
        assert_eq!(Rank::from_str("T").unwrap(), Rank::Ten);
        assert_eq!(Rank::from_str("10").unwrap(), Rank::Ten);
        assert!(matches!(Rank::from_str("1"), Err(CardError::InvalidCard(_))));
    }

    #[test]
    fn suit_display_and_from_str() {
        assert_eq!(Suit::Spades.to_string(), "s");
        assert_eq!(Suit::from_str("♠").unwrap(), Suit::Spades);
        assert_eq!(Suit::from_str("❤").unwrap(), Suit::Hearts);
        assert_eq!(Suit::from_str("Hearts").unwrap(), Suit::Hearts);
        assert!(Suit::from_str("x").is_err());
    }

    #[test]
    fn card_display_and_from_str() {
        let a = Card::new(Rank::Ace, Suit::Spades);
        assert_eq!(a.to_string(), "As");
        assert_eq!(a.pretty(), "A♠");
        assert_eq!(Card::from_str("As").unwrap(), a);
        assert_eq!(Card::from_str("A♠").unwrap(), a);
        assert_eq!(Card::from_str("10d").unwrap(), Card::new(Rank::Ten, Suit::Diamonds));
        assert!(matches!(Card::from_str("Zs"), Err(CardError::InvalidCard(_))));
        assert!(matches!(Card::from_str("Ax"), Err(CardError::InvalidCard(_))));
        assert!(Card::from_str("s").is_err());
    }

    #[test]
    fn serde_uses_text_form() {
        let c = Card::new(Rank::Queen, Suit::Hearts);
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, "\"Qh\"");
        let back: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn ordering_is_rank_major() {
        let ah = Card::new(Rank::Ace, Suit::Hearts);
        let kd = Card::new(Rank::King, Suit::Diamonds);
        assert!(ah > kd);
    }
}
