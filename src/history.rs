//! Game log: rule set, seated agents and one record per played round.

use crate::cards::Card;
use crate::evaluator::Strength;
use crate::hand::HoleCards;
use crate::player::{LastAction, PublicInfo};
use crate::rules::Rules;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
}

impl Street {
    pub const ALL: [Street; 4] = [Street::Preflop, Street::Flop, Street::Turn, Street::River];

    /// Community cards revealed when the street opens.
    pub const fn cards_dealt(self) -> usize {
        match self {
            Street::Preflop => 0,
            Street::Flop => 3,
            Street::Turn | Street::River => 1,
        }
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Street::Preflop => "preflop",
            Street::Flop => "flop",
            Street::Turn => "turn",
            Street::River => "river",
        };
        f.write_str(s)
    }
}

/// One applied action, with the seat's state right after it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub street: Street,
    pub seat: usize,
    pub action: LastAction,
    /// Chips moved from the stack by this action.
    pub amount: u64,
    pub stack: u64,
    pub bet: u64,
}

/// Hole cards of a seat that reached showdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShownHand {
    pub seat: usize,
    pub hole: HoleCards,
    pub strength: Strength,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub round: usize,
    pub players_in: Vec<usize>,
    pub community: Vec<Card>,
    /// Every seat's public state after the last street, before payouts.
    pub players: Vec<PublicInfo>,
    pub shown: Vec<ShownHand>,
    pub actions: Vec<ActionRecord>,
    /// Seats holding the best hand among those that did not fold.
    pub winners: Vec<usize>,
    /// Chips paid to each seat.
    pub payouts: Vec<u64>,
    pub undistributed: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub tournament_id: String,
    pub rules: Rules,
    /// Agent name per seat.
    pub agents: Vec<String>,
    pub rounds: Vec<RoundRecord>,
}

impl GameRecord {
    pub fn new(tournament_id: impl Into<String>, rules: Rules, agents: Vec<String>) -> Self {
        Self { tournament_id: tournament_id.into(), rules, agents, rounds: Vec::new() }
    }

    /// The last `n` completed rounds, oldest first.
    pub fn recent(&self, n: usize) -> &[RoundRecord] {
        let start = self.rounds.len().saturating_sub(n);
        &self.rounds[start..]
    }

    pub fn write_json<W: Write>(&self, writer: W) -> Result<(), serde_json::Error> {
        serde_json::to_writer_pretty(writer, self)
    }
}
