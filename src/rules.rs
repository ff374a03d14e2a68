//! Table rules shared by every round of a game.

use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum RulesError {
    #[error("invalid rules document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid rules: {0}")]
    Invalid(&'static str),
}

/// Blind structure, stack size and decision limits.
///
/// Missing fields fall back to the defaults when deserialized.
///
/// ```
/// use poker_arena::rules::Rules;
///
/// let rules = Rules::from_json(r#"{ "big_blind": 40, "small_blind": 20 }"#).unwrap();
/// assert_eq!(rules.big_blind, 40);
/// assert_eq!(rules.initial_stack, 1000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    pub initial_stack: u64,
    pub small_blind: u64,
    pub big_blind: u64,
    /// Fixed raise increment over the current highest bet.
    pub minimum_raise: u64,
    /// Time allowed for one decision, in milliseconds.
    pub timeout_ms: u64,
    /// Completed rounds handed to agents as game history.
    pub history_depth: usize,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            initial_stack: 1000,
            small_blind: 10,
            big_blind: 20,
            minimum_raise: 10,
            timeout_ms: 5000,
            history_depth: 10,
        }
    }
}

impl Rules {
    /// Parse and validate a JSON rules document.
    pub fn from_json(input: &str) -> Result<Self, RulesError> {
        let rules: Rules = serde_json::from_str(input)?;
        rules.validate()?;
        Ok(rules)
    }

    pub fn validate(&self) -> Result<(), RulesError> {
        if self.initial_stack == 0 {
            return Err(RulesError::Invalid("initial stack must be positive"));
        }
        if self.big_blind < self.small_blind {
            return Err(RulesError::Invalid("big blind is smaller than small blind"));
        }
        if self.minimum_raise == 0 {
            return Err(RulesError::Invalid("minimum raise must be positive"));
        }
        if self.timeout_ms == 0 {
            return Err(RulesError::Invalid("decision timeout must be positive"));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn with_initial_stack(mut self, stack: u64) -> Self {
        self.initial_stack = stack;
        self
    }

    pub fn with_blinds(mut self, small: u64, big: u64) -> Self {
        self.small_blind = small;
        self.big_blind = big;
        self
    }

    pub fn with_minimum_raise(mut self, amount: u64) -> Self {
        self.minimum_raise = amount;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = timeout.as_millis().try_into().unwrap_or(u64::MAX);
        self
    }

    pub fn with_history_depth(mut self, depth: usize) -> Self {
        self.history_depth = depth;
        self
    }
}
