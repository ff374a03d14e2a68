//! One street of betting as an explicit state machine.
//!
//! The scan walks the seats in a circle from a first actor. It stops when it
//! comes back to the last aggressor (the first scanned seat until somebody
//! raises) or when fewer than two seats still contest the pot.

use crate::agents::{Decision, ProtocolViolation};
use crate::history::Street;
use crate::player::{Player, RoundStatus};

/// Seats still fighting for the highest bet: those that can act, plus all-in
/// seats that matched it.
pub fn contesting(players: &[Player], highest: u64) -> usize {
    players
        .iter()
        .filter(|p| match p.round_status {
            RoundStatus::In => true,
            RoundStatus::AllIn => p.bet == highest,
            RoundStatus::Out => false,
        })
        .count()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BettingRound {
    street: Street,
    seats: usize,
    cursor: usize,
    last_aggressor: Option<usize>,
    highest: u64,
}

impl BettingRound {
    pub fn new(street: Street, first: usize, players: &[Player]) -> Self {
        let highest = players.iter().map(|p| p.bet).max().unwrap_or(0);
        Self { street, seats: players.len(), cursor: first, last_aggressor: None, highest }
    }

    pub fn street(&self) -> Street {
        self.street
    }

    pub fn highest(&self) -> u64 {
        self.highest
    }

    pub fn last_aggressor(&self) -> Option<usize> {
        self.last_aggressor
    }

    pub fn is_closed(&self, players: &[Player]) -> bool {
        self.seats == 0
            || self.last_aggressor == Some(self.cursor)
            || contesting(players, self.highest) < 2
    }

    /// Advance to the next seat that has to act, or `None` once the street is over.
    pub fn next_actor(&mut self, players: &[Player]) -> Option<usize> {
        while !self.is_closed(players) {
            let seat = self.cursor;
            self.last_aggressor.get_or_insert(seat);
            self.cursor = (self.cursor + 1) % self.seats;
            if players[seat].round_status == RoundStatus::In {
                return Some(seat);
            }
        }
        None
    }

    /// Note the bet a seat holds after acting. A new highest bet makes it the aggressor.
    pub fn record(&mut self, seat: usize, bet: u64) {
        if bet > self.highest {
            self.highest = bet;
            self.last_aggressor = Some(seat);
        }
    }
}

/// A decision checked against a seat's bet and stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Fold,
    /// Match the highest bet (a check when nothing is owed).
    Call(u64),
    AllIn,
    /// Add this many chips, lifting the bet past the highest by at least the minimum raise.
    Raise(u64),
}

/// Resolve a decision into a legal move without touching the seat.
///
/// ```
/// use poker_arena::agents::Decision;
/// use poker_arena::betting::{resolve, Move};
///
/// let p = poker_arena::player::Player::new(0, 500);
/// // facing 20 with nothing in, minimum raise 10
/// assert_eq!(resolve(Decision::Amount(20), &p, 20, 10), Ok(Move::Call(20)));
/// assert_eq!(resolve(Decision::Amount(30), &p, 20, 10), Ok(Move::Raise(30)));
/// assert!(resolve(Decision::Amount(29), &p, 20, 10).is_err());
/// ```
pub fn resolve(
    decision: Decision,
    player: &Player,
    highest: u64,
    minimum_raise: u64,
) -> Result<Move, ProtocolViolation> {
    let owed = highest.saturating_sub(player.bet);
    match decision {
        Decision::Fold => Ok(Move::Fold),
        Decision::Call => Ok(Move::Call(owed)),
        Decision::AllIn => Ok(Move::AllIn),
        Decision::Amount(v) if v == owed => Ok(Move::Call(owed)),
        Decision::Amount(v) if v >= player.stack => Ok(Move::AllIn),
        Decision::Amount(v) if player.bet + v >= highest + minimum_raise => Ok(Move::Raise(v)),
        Decision::Amount(v) => Err(ProtocolViolation::IllegalAmount {
            seat: player.id,
            amount: v,
            owed,
            stack: player.stack,
            minimum: (highest + minimum_raise).saturating_sub(player.bet),
        }),
    }
}
