//! Hole cards and the shared board.

use crate::cards::{parse_cards, Card, CardError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum HandError {
    #[error("card {0} appears twice")]
    Duplicate(Card),
    #[error("a board holds at most five cards, got {0}")]
    BoardFull(usize),
    #[error("a seat holds exactly two hole cards, got {0}")]
    HoleCount(usize),
    #[error(transparent)]
    Parse(#[from] CardError),
}

/// A seat's two private cards.
///
/// ```
/// use poker_arena::hand::HoleCards;
///
/// let hole: HoleCards = "As Ks".parse().unwrap();
/// assert_eq!(hole.to_string(), "As Ks");
/// assert!("As As".parse::<HoleCards>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "[Card; 2]", into = "[Card; 2]")]
pub struct HoleCards([Card; 2]);

impl HoleCards {
    pub fn cards(&self) -> [Card; 2] {
        self.0
    }

    pub fn contains(&self, card: Card) -> bool {
        self.0.contains(&card)
    }

    pub fn from_slice(cards: &[Card]) -> Result<Self, HandError> {
        match *cards {
            [a, b] => Self::try_from([a, b]),
            _ => Err(HandError::HoleCount(cards.len())),
        }
    }
}

impl TryFrom<[Card; 2]> for HoleCards {
    type Error = HandError;

    fn try_from([a, b]: [Card; 2]) -> Result<Self, Self::Error> {
        if a == b {
            return Err(HandError::Duplicate(a));
        }
        Ok(Self([a, b]))
    }
}

impl From<HoleCards> for [Card; 2] {
    fn from(hole: HoleCards) -> Self {
        hole.0
    }
}

impl FromStr for HoleCards {
    type Err = HandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_slice(&parse_cards(s)?)
    }
}

impl std::fmt::Display for HoleCards {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.0[0], self.0[1])
    }
}

/// Community cards revealed so far. Append-only, never more than five.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Board(Vec<Card>);

impl Board {
    pub const MAX: usize = 5;

    pub fn new() -> Self {
        Self(Vec::with_capacity(Self::MAX))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[Card] {
        &self.0
    }

    /// Reveal more cards. Nothing is added unless all of them fit and are new.
    pub fn extend<I>(&mut self, cards: I) -> Result<(), HandError>
    where
        I: IntoIterator<Item = Card>,
    {
        let start = self.0.len();
        self.0.extend(cards);
        let checked = match self.0.len() {
            n if n > Self::MAX => Err(HandError::BoardFull(n)),
            _ => first_duplicate(&self.0).map_or(Ok(()), |c| Err(HandError::Duplicate(c))),
        };
        if checked.is_err() {
            self.0.truncate(start);
        }
        checked
    }
}

fn first_duplicate<'a>(cards: impl IntoIterator<Item = &'a Card>) -> Option<Card> {
    let mut seen = HashSet::new();
    cards.into_iter().copied().find(|&c| !seen.insert(c))
}

/// Hole cards plus at most five community cards, all distinct.
pub fn check_distinct(hole: &HoleCards, community: &[Card]) -> Result<(), HandError> {
    if community.len() > Board::MAX {
        return Err(HandError::BoardFull(community.len()));
    }
    first_duplicate(hole.0.iter().chain(community)).map_or(Ok(()), |c| Err(HandError::Duplicate(c)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};

    #[test]
    fn hole_cards_are_two_distinct_cards() {
        let ace = Card::new(Rank::Ace, Suit::Spades);
        assert_eq!(HoleCards::try_from([ace, ace]), Err(HandError::Duplicate(ace)));
        assert_eq!(HoleCards::from_slice(&[ace]), Err(HandError::HoleCount(1)));
        assert!(matches!("As Zz".parse::<HoleCards>(), Err(HandError::Parse(_))));
    }

    #[test]
    fn board_rejects_overflow_and_repeats_without_changing() {
        let mut board = Board::new();
        board.extend(parse_cards("2c 3c 4c 5c").unwrap()).unwrap();

        let err = board.extend(parse_cards("6c 7c").unwrap()).unwrap_err();
        assert_eq!(err, HandError::BoardFull(6));
        assert_eq!(board.len(), 4);

        let two = Card::new(Rank::Two, Suit::Clubs);
        assert_eq!(board.extend([two]), Err(HandError::Duplicate(two)));
        assert_eq!(board.as_slice(), parse_cards("2c 3c 4c 5c").unwrap());
    }

    #[test]
    fn hole_card_on_the_board_is_a_duplicate() {
        let hole: HoleCards = "As Kd".parse().unwrap();
        let community = parse_cards("2c As").unwrap();
        let ace = Card::new(Rank::Ace, Suit::Spades);
        assert_eq!(check_distinct(&hole, &community), Err(HandError::Duplicate(ace)));
        assert!(hole.contains(ace));
    }

    #[test]
    fn serializes_as_a_pair_of_cards() {
        let hole: HoleCards = "As Kd".parse().unwrap();
        assert_eq!(serde_json::to_string(&hole).unwrap(), r#"["As","Kd"]"#);
        assert!(serde_json::from_str::<HoleCards>(r#"["As","As"]"#).is_err());
    }
}
