//! AI decision procedures.
//!
//! A strategy only ever picks territories; the game feeds its picks through
//! the same `request_selection` path a human click takes, then falls back to
//! the primary action when the strategy has nothing left to do.

pub mod greedy;

pub use greedy::GreedyAi;

use crate::board::TerritoryId;
use crate::game::Game;

/// Decides AI moves one selection at a time.
pub trait Strategy {
    /// Short name used in logs and self-play records.
    fn name(&self) -> &str;

    /// Returns true if the strategy wants to click something right now.
    fn desired_selection(&mut self, game: &Game) -> bool;

    /// The territory to click, if any.
    fn make_selection(&mut self, game: &Game) -> Option<TerritoryId>;
}
