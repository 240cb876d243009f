//! Game configuration.
//!
//! A `Configuration` fixes everything a game needs before it starts: the six
//! player slots, the colorless-territory and random-reinforcement flags, and
//! the board size and mode. It is validated on construction and serializes
//! to JSON as the one supported configuration snapshot.

use std::collections::HashSet;
use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::{Board, FactionColor, GridTopology, Player, PlayerId, PlayerStatus, PLAYER_COLORS};

/// Number of player slots in every configuration.
pub const MAX_PLAYERS: usize = 6;

/// Minimum number of active players for a game to make sense.
pub const MIN_ACTIVE_PLAYERS: usize = 2;

/// Errors raised by a malformed configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("expected {expected} player slots, got {found}")]
    WrongPlayerCount { expected: usize, found: usize },

    #[error("color {} is used by more than one player", .0.name())]
    DuplicateColor(FactionColor),

    #[error("player '{0}' cannot use the colorless color")]
    ColorlessPlayer(String),

    #[error("player slot {0} has an empty name")]
    EmptyName(usize),

    #[error("need at least 2 active players, got {0}")]
    TooFewPlayers(usize),

    #[error("board has {territories} territories, too few for {players} players")]
    BoardTooSmall { territories: usize, players: usize },

    #[error("invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Board size code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoardSize {
    Small,
    Medium,
    Large,
}

impl BoardSize {
    /// Grid dimensions `(rows, cols)` for this size.
    pub const fn dims(self) -> (usize, usize) {
        match self {
            BoardSize::Small => (5, 5),
            BoardSize::Medium => (6, 8),
            BoardSize::Large => (8, 10),
        }
    }

    pub const fn territory_count(self) -> usize {
        let (rows, cols) = self.dims();
        rows * cols
    }

    pub fn from_name(name: &str) -> Option<BoardSize> {
        match name {
            "small" => Some(BoardSize::Small),
            "medium" => Some(BoardSize::Medium),
            "large" => Some(BoardSize::Large),
            _ => None,
        }
    }
}

/// Board topology mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoardMode {
    /// Rectangular grid of orthogonally adjacent territories.
    #[default]
    GridText,
}

/// Immutable per-game ruleset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    players: Vec<Player>,
    colorless_territory: bool,
    random_reinforce: bool,
    board_size: BoardSize,
    #[serde(default)]
    board_mode: BoardMode,
}

impl Configuration {
    /// Builds and validates a configuration.
    pub fn new(
        players: Vec<Player>,
        colorless_territory: bool,
        random_reinforce: bool,
        board_size: BoardSize,
    ) -> Result<Self, ConfigError> {
        let config = Configuration {
            players,
            colorless_territory,
            random_reinforce,
            board_size,
            board_mode: BoardMode::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// One local player against `opponents` AI players; remaining slots closed.
    pub fn single_player(
        name: &str,
        opponents: usize,
        board_size: BoardSize,
    ) -> Result<Self, ConfigError> {
        let players = PLAYER_COLORS
            .iter()
            .enumerate()
            .map(|(i, &color)| {
                if i == 0 {
                    Player::new(name, PlayerStatus::You, color)
                } else if i <= opponents {
                    Player::new(format!("cpu{i}"), PlayerStatus::Ai, color)
                } else {
                    Player::new(format!("open{i}"), PlayerStatus::Closed, color)
                }
            })
            .collect();
        Configuration::new(players, false, true, board_size)
    }

    /// `count` AI players; remaining slots closed.
    pub fn all_ai(count: usize, board_size: BoardSize) -> Result<Self, ConfigError> {
        let players = PLAYER_COLORS
            .iter()
            .enumerate()
            .map(|(i, &color)| {
                let status = if i < count {
                    PlayerStatus::Ai
                } else {
                    PlayerStatus::Closed
                };
                Player::new(format!("cpu{i}"), status, color)
            })
            .collect();
        Configuration::new(players, false, true, board_size)
    }

    /// Parses and validates a JSON snapshot.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Configuration = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes this configuration to JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks slot count, names, colors, and that the board can seat everyone.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.players.len() != MAX_PLAYERS {
            return Err(ConfigError::WrongPlayerCount {
                expected: MAX_PLAYERS,
                found: self.players.len(),
            });
        }

        let mut colors = HashSet::new();
        for (i, p) in self.players.iter().enumerate() {
            if p.name.trim().is_empty() {
                return Err(ConfigError::EmptyName(i));
            }
            if p.color == FactionColor::Colorless {
                return Err(ConfigError::ColorlessPlayer(p.name.clone()));
            }
            if !colors.insert(p.color) {
                return Err(ConfigError::DuplicateColor(p.color));
            }
        }

        let active = self.active_players().len();
        if active < MIN_ACTIVE_PLAYERS {
            return Err(ConfigError::TooFewPlayers(active));
        }
        let territories = self.board_size.territory_count();
        if territories < active {
            return Err(ConfigError::BoardTooSmall {
                territories,
                players: active,
            });
        }
        Ok(())
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Slots whose status is not closed, in slot order.
    pub fn active_players(&self) -> Vec<PlayerId> {
        self.players
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_active())
            .map(|(i, _)| PlayerId(i as u8))
            .collect()
    }

    /// Slot index holding `color`.
    pub fn player_with_color(&self, color: FactionColor) -> Option<PlayerId> {
        self.players
            .iter()
            .position(|p| p.color == color)
            .map(|i| PlayerId(i as u8))
    }

    pub fn is_colorless_territory(&self) -> bool {
        self.colorless_territory
    }

    pub fn is_random_reinforce(&self) -> bool {
        self.random_reinforce
    }

    pub fn board_size(&self) -> BoardSize {
        self.board_size
    }

    pub fn board_mode(&self) -> BoardMode {
        self.board_mode
    }

    /// Setup-time only.
    pub fn set_colorless_territory(&mut self, colorless_territory: bool) {
        self.colorless_territory = colorless_territory;
    }

    /// Setup-time only.
    pub fn set_random_reinforce(&mut self, random_reinforce: bool) {
        self.random_reinforce = random_reinforce;
    }

    /// Setup-time only.
    pub fn set_board_mode(&mut self, board_mode: BoardMode) {
        self.board_mode = board_mode;
    }

    /// Shuffles the slot order so turn order differs between games.
    pub fn randomize_player_order(&mut self, rng: &mut impl Rng) {
        self.players.shuffle(rng);
    }

    /// Builds the blank board described by the size and mode.
    pub fn build_board(&self) -> Board {
        match self.board_mode {
            BoardMode::GridText => {
                let (rows, cols) = self.board_size.dims();
                Board::new(Arc::new(GridTopology::new(rows, cols)))
            }
        }
    }
}

impl Default for Configuration {
    fn default() -> Self {
        let players = PLAYER_COLORS
            .iter()
            .enumerate()
            .map(|(i, &color)| {
                let status = match i {
                    0 => PlayerStatus::You,
                    1..=3 => PlayerStatus::Ai,
                    _ => PlayerStatus::Closed,
                };
                let name = if i == 0 { "you".to_string() } else { format!("cpu{i}") };
                Player::new(name, status, color)
            })
            .collect();
        Configuration {
            players,
            colorless_territory: false,
            random_reinforce: true,
            board_size: BoardSize::Small,
            board_mode: BoardMode::GridText,
        }
    }
}
