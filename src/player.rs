use crate::hand::HoleCards;
use serde::{Deserialize, Serialize};

/// Tournament-scoped status. Only ever moves from `In` to `Out`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum GameStatus {
    In,
    Out,
}

/// Round-scoped status. `In` may move to `Out` (folded) or `AllIn`, never back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum RoundStatus {
    In,
    Out,
    AllIn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum LastAction {
    SmallBlind,
    BigBlind,
    Fold,
    TimedOut,
    Check,
    Call,
    Raise,
    AllIn,
}

impl LastAction {
    pub fn label(self) -> &'static str {
        match self {
            LastAction::SmallBlind => "SB",
            LastAction::BigBlind => "BB",
            LastAction::Fold => "Fold",
            LastAction::TimedOut => "Timeout",
            LastAction::Check => "Check",
            LastAction::Call => "Call",
            LastAction::Raise => "Raise",
            LastAction::AllIn => "All in",
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BetError {
    #[error("seat {seat} cannot bet while {status:?}")]
    IllegalBet { seat: usize, status: RoundStatus },
}

/// What every seat may know about another seat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicInfo {
    pub id: usize,
    pub stack: u64,
    pub bet: u64,
    pub game_status: GameStatus,
    pub round_status: RoundStatus,
    pub last_action: Option<LastAction>,
}

#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Player {
    pub(crate) id: usize,
    pub(crate) stack: u64,
    pub(crate) bet: u64,
    pub(crate) hole: Option<HoleCards>,
    pub(crate) game_status: GameStatus,
    pub(crate) round_status: RoundStatus,
    pub(crate) last_action: Option<LastAction>,
}

impl Player {
    pub fn new(id: usize, stack: u64) -> Self {
        let game_status = if stack == 0 { GameStatus::Out } else { GameStatus::In };
        Self {
            id,
            stack,
            bet: 0,
            hole: None,
            game_status,
            round_status: RoundStatus::Out,
            last_action: None,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    /// Chips not yet committed.
    pub fn stack(&self) -> u64 {
        self.stack
    }

    /// Chips committed this round, across all streets.
    pub fn bet(&self) -> u64 {
        self.bet
    }

    pub fn hole(&self) -> Option<HoleCards> {
        self.hole
    }

    pub fn game_status(&self) -> GameStatus {
        self.game_status
    }

    pub fn round_status(&self) -> RoundStatus {
        self.round_status
    }

    pub fn last_action(&self) -> Option<LastAction> {
        self.last_action
    }

    pub fn is_in_game(&self) -> bool {
        self.game_status == GameStatus::In
    }

    /// Move chips from the stack into the current bet.
    ///
    /// The amount is clamped to the stack; emptying the stack makes the seat all-in.
    /// Returns the number of chips actually moved.
    ///
    /// ```
    /// use poker_arena::player::{Player, RoundStatus};
    ///
    /// let mut p = Player::new(0, 50);
    /// p.start_round("As Kd".parse().unwrap(), 0).unwrap();
    /// assert_eq!(p.place_bet(80).unwrap(), 50);
    /// assert_eq!(p.round_status(), RoundStatus::AllIn);
    /// ```
    pub fn place_bet(&mut self, amount: u64) -> Result<u64, BetError> {
        if self.round_status != RoundStatus::In {
            return Err(BetError::IllegalBet { seat: self.id, status: self.round_status });
        }
        let paid = amount.min(self.stack);
        self.stack -= paid;
        self.bet += paid;
        if self.stack == 0 {
            self.round_status = RoundStatus::AllIn;
        }
        Ok(paid)
    }

    /// Take up to `amount` out of the current bet and return what was taken.
    pub fn settle_to_pot(&mut self, amount: u64) -> u64 {
        let moved = amount.min(self.bet);
        self.bet -= moved;
        moved
    }

    /// Reset round fields, take the hole cards and post `blind` (0 for no blind).
    pub fn start_round(&mut self, hole: HoleCards, blind: u64) -> Result<u64, BetError> {
        self.bet = 0;
        self.last_action = None;
        self.hole = Some(hole);
        self.round_status = match self.game_status {
            GameStatus::In => RoundStatus::In,
            GameStatus::Out => RoundStatus::Out,
        };
        if blind == 0 {
            return Ok(0);
        }
        self.place_bet(blind)
    }

    /// Keep an eliminated seat out of the new round.
    pub fn sit_out(&mut self) {
        self.bet = 0;
        self.hole = None;
        self.last_action = None;
        self.round_status = RoundStatus::Out;
    }

    /// Undo an unfinished round: the outstanding bet goes back to the stack.
    pub fn cancel_round(&mut self) {
        self.stack += self.bet;
        self.sit_out();
    }

    /// Leave the round; `action` says why (fold or timeout).
    pub fn fold(&mut self, action: LastAction) {
        self.round_status = RoundStatus::Out;
        self.last_action = Some(action);
    }

    pub fn win(&mut self, amount: u64) {
        self.stack += amount;
    }

    /// Close the round; a seat left without chips leaves the game for good.
    pub fn finish_round(&mut self) {
        if self.stack == 0 {
            self.game_status = GameStatus::Out;
        }
    }

    pub fn public_info(&self) -> PublicInfo {
        PublicInfo {
            id: self.id,
            stack: self.stack,
            bet: self.bet,
            game_status: self.game_status,
            round_status: self.round_status,
            last_action: self.last_action,
        }
    }
}
