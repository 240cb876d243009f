//! Dice Wars engine library.
//!
//! Exposes the board representation, rule resolution, the game state
//! machine, AI strategies and the text protocol for use by integration
//! tests and the binary entry points.

pub mod ai;
pub mod board;
pub mod config;
pub mod dice;
pub mod engine;
pub mod game;
pub mod protocol;
pub mod resolve;
pub mod results;
pub mod selection;
pub mod selfplay;

pub use game::{AiStep, EngineError, Game, GameEvent, SelectionResult};
