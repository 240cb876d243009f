//! End-of-game results.

use serde::Serialize;

use crate::board::Player;
use crate::config::Configuration;

/// Snapshot taken when a game ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Results {
    /// Eliminated players, first knocked out first.
    pub closed_players: Vec<Player>,
    /// The last player standing, if any.
    pub winner: Option<Player>,
    /// Round in which the game ended.
    pub round_num: u32,
    /// The configuration the game was started from.
    pub configuration: Configuration,
}

impl Results {
    /// Configuration for a rematch with the same seats and rules.
    pub fn rematch(&self) -> Configuration {
        self.configuration.clone()
    }

    /// Players from winner down to first eliminated.
    pub fn standings(&self) -> Vec<&Player> {
        self.winner
            .iter()
            .chain(self.closed_players.iter().rev())
            .collect()
    }
}
