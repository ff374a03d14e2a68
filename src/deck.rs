use crate::cards::{all_cards, Card};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DeckError {
    #[error("deck exhausted: requested {requested}, {remaining} remaining")]
    Exhausted { requested: usize, remaining: usize },
    #[error("card {0} stacked twice")]
    DuplicateCard(Card),
}

/// A standard 52-card deck, depleted by draws.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub const SIZE: usize = 52;

    /// An ordered, unshuffled deck.
    ///
    /// ```
    /// use poker_arena::deck::Deck;
    ///
    /// let deck = Deck::standard();
    /// assert_eq!(deck.len(), 52);
    /// ```
    pub fn standard() -> Self {
        Self { cards: all_cards().collect() }
    }

    /// A deck shuffled with a seeded RNG for reproducibility.
    pub fn shuffled(seed: u64) -> Self {
        let mut deck = Self::standard();
        deck.shuffle_seeded(seed);
        deck
    }

    /// A deck whose first draws are `top`, in order, followed by the rest of the
    /// cards in standard order. Used to replay or script a deal.
    ///
    /// ```
    /// use poker_arena::cards::parse_cards;
    /// use poker_arena::deck::Deck;
    ///
    /// let top = parse_cards("As Kd 2c").unwrap();
    /// let mut deck = Deck::stacked(&top).unwrap();
    /// assert_eq!(deck.draw(2).unwrap(), top[..2]);
    /// assert_eq!(deck.draw_one().unwrap(), top[2]);
    /// assert_eq!(deck.len(), 49);
    /// ```
    pub fn stacked(top: &[Card]) -> Result<Self, DeckError> {
        let mut deck = Self::standard();
        for &card in top {
            if !deck.remove(card) {
                return Err(DeckError::DuplicateCard(card));
            }
        }
        deck.cards.sort_unstable_by_key(|c| std::cmp::Reverse(c.to_u32()));
        deck.cards.extend(top.iter().rev());
        Ok(deck)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn shuffle_seeded(&mut self, seed: u64) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.cards.shuffle(&mut rng);
    }

    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Remove a known card, e.g. one already dealt elsewhere. Returns whether it was present.
    pub fn remove(&mut self, card: Card) -> bool {
        match self.cards.iter().position(|&c| c == card) {
            Some(i) => {
                self.cards.swap_remove(i);
                true
            }
            None => false,
        }
    }

    /// Draw `n` cards from the top. Fails without removing anything if fewer remain.
    pub fn draw(&mut self, n: usize) -> Result<Vec<Card>, DeckError> {
        let remaining = self.cards.len();
        if n > remaining {
            return Err(DeckError::Exhausted { requested: n, remaining });
        }
        let mut drawn = self.cards.split_off(remaining - n);
        drawn.reverse();
        Ok(drawn)
    }

    /// Draw a single card.
    pub fn draw_one(&mut self) -> Result<Card, DeckError> {
        self.cards.pop().ok_or(DeckError::Exhausted { requested: 1, remaining: 0 })
    }
}
