//! poker-arena: hold'em tournaments between pluggable agents
//!
//! Goals:
//! - Exact hand strengths from precomputed tables, lower is better
//! - Side pots that conserve chips, with documented rounding loss
//! - Agents that can only see an owned snapshot and answer within a timeout
//!
//! ## Quick start: evaluate a hand
//! ```
//! use poker_arena::cards::parse_cards;
//! use poker_arena::evaluator::{evaluate, Category};
//! use poker_arena::hand::HoleCards;
//!
//! let hole: HoleCards = "Ah Ad".parse().unwrap();
//! let community = parse_cards("Kc Qd Jh 3s 2c").unwrap();
//!
//! let strength = evaluate(&hole, &community).unwrap();
//! assert_eq!(strength.category(), Category::Pair);
//! ```
//!
//! ## Quick start: play a game
//! ```
//! use poker_arena::agents::{Agent, CallingStation, RandomAgent};
//! use poker_arena::game::Game;
//! use poker_arena::rules::Rules;
//!
//! let agents: Vec<Box<dyn Agent>> = vec![
//!     Box::new(CallingStation::new()),
//!     Box::new(RandomAgent::new(Some(1))),
//!     Box::new(RandomAgent::new(Some(2))),
//! ];
//! let mut game = Game::new(Rules::default(), agents, 42).unwrap();
//! let record = game.play(5).unwrap();
//! assert!(record.rounds.len() <= 5);
//! ```

pub mod agents;
pub mod betting;
pub mod cards;
pub mod deck;
pub mod evaluator;
pub mod game;
pub mod hand;
pub mod history;
pub mod player;
pub mod pot;
pub mod rules;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
