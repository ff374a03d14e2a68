//! Agents: pluggable decision makers seated at a table.
//!
//! An [`Agent`] sees an owned [`DecisionInput`] snapshot and answers with a
//! [`Decision`]. The game never calls an agent directly; every seat runs behind a
//! [`TimedAgent`] that enforces the decision timeout on a worker thread.

use crate::cards::Card;
use crate::hand::HoleCards;
use crate::history::{ActionRecord, RoundRecord, Street};
use crate::player::{PublicInfo, RoundStatus};
use crate::rules::Rules;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

mod bots;
mod timed;

pub use bots::{estimate_win_probability, CallingStation, FoldsWhenLosing, KellyStrategy, RandomAgent, Scripted};
pub use timed::{Outcome, TimedAgent};

/// What an agent wants to do on its turn.
///
/// `Amount(v)` is the number of chips added now: the exact amount owed is a call,
/// anything covering the stack is all-in, and otherwise it has to lift the seat's
/// bet to at least the highest bet plus the minimum raise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Decision {
    Fold,
    Call,
    AllIn,
    Amount(u64),
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Fold => f.write_str("fold"),
            Decision::Call => f.write_str("call"),
            Decision::AllIn => f.write_str("all in"),
            Decision::Amount(v) => write!(f, "{v}"),
        }
    }
}

/// Parse the textual decision tokens.
///
/// ```
/// use poker_arena::agents::Decision;
///
/// assert_eq!("fold".parse::<Decision>().unwrap(), Decision::Fold);
/// assert_eq!("all in".parse::<Decision>().unwrap(), Decision::AllIn);
/// assert_eq!("120".parse::<Decision>().unwrap(), Decision::Amount(120));
/// assert!("raise".parse::<Decision>().is_err());
/// ```
impl FromStr for Decision {
    type Err = ProtocolViolation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_ascii_lowercase();
        match token.as_str() {
            "fold" => Ok(Decision::Fold),
            "call" => Ok(Decision::Call),
            "all in" | "allin" | "all-in" => Ok(Decision::AllIn),
            _ => token
                .parse::<u64>()
                .map(Decision::Amount)
                .map_err(|_| ProtocolViolation::UnknownToken(s.to_string())),
        }
    }
}

/// A decision the table cannot apply. Fatal to the round.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProtocolViolation {
    #[error(
        "seat {seat} bet {amount}: must be the call value ({owed}), all in (>= {stack}) or a raise of at least {minimum}"
    )]
    IllegalAmount { seat: usize, amount: u64, owed: u64, stack: u64, minimum: u64 },
    #[error("decision must be fold, call, all in or an amount, got {0:?}")]
    UnknownToken(String),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AgentError {
    #[error("agent failed: {0}")]
    Failed(String),
    #[error("agent panicked")]
    Panicked,
    #[error(transparent)]
    InvalidDecision(#[from] ProtocolViolation),
}

/// A seat controller.
pub trait Agent: Send {
    fn name(&self) -> &str;

    fn decide(&mut self, input: &DecisionInput) -> Result<Decision, AgentError>;
}

/// Everything a seat may see when it is asked to act. Built fresh for each call.
#[derive(Debug, Clone, Serialize)]
pub struct DecisionInput {
    pub seat: usize,
    pub rules: Rules,
    pub street: Street,
    pub hand: HoleCards,
    pub community: Vec<Card>,
    /// Sum of every seat's outstanding bet.
    pub pot: u64,
    pub highest_bet: u64,
    pub minimum_raise: u64,
    /// Chips needed to match the highest bet.
    pub owed: u64,
    pub me: PublicInfo,
    pub players: Vec<PublicInfo>,
    /// Actions of the current round so far, blinds included.
    pub round_actions: Vec<ActionRecord>,
    /// Most recent completed rounds, oldest first.
    pub history: Vec<RoundRecord>,
}

impl DecisionInput {
    /// Seats besides this one that have not folded this round.
    pub fn opponents(&self) -> usize {
        self.players
            .iter()
            .filter(|p| p.id != self.seat && p.round_status != RoundStatus::Out)
            .count()
    }

    /// Chips to add for the smallest legal raise.
    pub fn min_raise_amount(&self) -> u64 {
        self.owed + self.minimum_raise
    }
}
