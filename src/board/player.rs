//! Players and their status.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::territory::FactionColor;

/// Index of a player slot in the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}", self.0)
    }
}

/// A player's relationship to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PlayerStatus {
    /// The local human player.
    You,
    /// A computer-controlled player.
    Ai,
    /// Another human sharing the device.
    Human,
    /// Eliminated or unused slot. Terminal.
    Closed,
}

impl PlayerStatus {
    /// Returns the upper-case label.
    pub const fn label(self) -> &'static str {
        match self {
            PlayerStatus::You => "YOU",
            PlayerStatus::Ai => "AI",
            PlayerStatus::Human => "HUMAN",
            PlayerStatus::Closed => "CLOSED",
        }
    }

    /// Parses a status from its label, case-insensitively.
    pub fn from_label(s: &str) -> Option<PlayerStatus> {
        match s.to_ascii_uppercase().as_str() {
            "YOU" => Some(PlayerStatus::You),
            "AI" => Some(PlayerStatus::Ai),
            "HUMAN" => Some(PlayerStatus::Human),
            "CLOSED" => Some(PlayerStatus::Closed),
            _ => None,
        }
    }
}

/// A seat at the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub status: PlayerStatus,
    pub color: FactionColor,
}

impl Player {
    pub fn new(name: impl Into<String>, status: PlayerStatus, color: FactionColor) -> Self {
        Player {
            name: name.into(),
            status,
            color,
        }
    }

    /// Returns true unless the player is closed.
    pub fn is_active(&self) -> bool {
        self.status != PlayerStatus::Closed
    }

    /// Returns true if the player's moves come from outside the engine.
    pub fn needs_input(&self) -> bool {
        matches!(self.status, PlayerStatus::You | PlayerStatus::Human)
    }
}
