//! Territories and faction colors.
//!
//! A territory is the atomic unit of ownership: an optional owner, a dice
//! stack in `[1, MAX_DICE]`, and the faction color it is painted with.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;

/// Maximum number of dice a territory can hold.
pub const MAX_DICE: u8 = 8;

/// Minimum number of dice a territory can hold.
pub const MIN_DICE: u8 = 1;

/// Index of a territory in its board's iteration order.
pub type TerritoryId = usize;

/// Color tag identifying a faction on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FactionColor {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
    Orange,
    Colorless,
}

/// The six player colors in slot order.
pub const PLAYER_COLORS: [FactionColor; 6] = [
    FactionColor::Red,
    FactionColor::Blue,
    FactionColor::Green,
    FactionColor::Yellow,
    FactionColor::Purple,
    FactionColor::Orange,
];

impl FactionColor {
    /// Returns the single-character code used in the text grid and notation.
    pub const fn code(self) -> char {
        match self {
            FactionColor::Red => 'R',
            FactionColor::Blue => 'B',
            FactionColor::Green => 'G',
            FactionColor::Yellow => 'Y',
            FactionColor::Purple => 'P',
            FactionColor::Orange => 'O',
            FactionColor::Colorless => '-',
        }
    }

    /// Parses a color from its single-character code.
    pub fn from_code(c: char) -> Option<FactionColor> {
        match c {
            'R' => Some(FactionColor::Red),
            'B' => Some(FactionColor::Blue),
            'G' => Some(FactionColor::Green),
            'Y' => Some(FactionColor::Yellow),
            'P' => Some(FactionColor::Purple),
            'O' => Some(FactionColor::Orange),
            '-' => Some(FactionColor::Colorless),
            _ => None,
        }
    }

    /// Returns the 0xRRGGBB display color for renderers.
    pub const fn hex(self) -> u32 {
        match self {
            FactionColor::Red => 0xD3_2F2F,
            FactionColor::Blue => 0x19_76D2,
            FactionColor::Green => 0x38_8E3C,
            FactionColor::Yellow => 0xFB_C02D,
            FactionColor::Purple => 0x7B_1FA2,
            FactionColor::Orange => 0xF5_7C00,
            FactionColor::Colorless => 0x9E_9E9E,
        }
    }

    /// Returns the lowercase color name.
    pub const fn name(self) -> &'static str {
        match self {
            FactionColor::Red => "red",
            FactionColor::Blue => "blue",
            FactionColor::Green => "green",
            FactionColor::Yellow => "yellow",
            FactionColor::Purple => "purple",
            FactionColor::Orange => "orange",
            FactionColor::Colorless => "colorless",
        }
    }
}

/// Per-cell game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Territory {
    owner: Option<PlayerId>,
    dice: u8,
    color: FactionColor,
}

impl Territory {
    /// Creates an unowned territory.
    pub fn colorless(dice: u8) -> Self {
        Territory {
            owner: None,
            dice: clamp_dice(dice),
            color: FactionColor::Colorless,
        }
    }

    /// Creates a territory held by `owner`.
    pub fn owned(owner: PlayerId, color: FactionColor, dice: u8) -> Self {
        Territory {
            owner: Some(owner),
            dice: clamp_dice(dice),
            color,
        }
    }

    pub fn owner(&self) -> Option<PlayerId> {
        self.owner
    }

    pub fn dice(&self) -> u8 {
        self.dice
    }

    pub fn color(&self) -> FactionColor {
        self.color
    }

    /// Returns true if `player` owns this territory.
    pub fn is_owned_by(&self, player: PlayerId) -> bool {
        self.owner == Some(player)
    }

    /// Returns true if the territory cannot take another die.
    pub fn is_full(&self) -> bool {
        self.dice >= MAX_DICE
    }

    /// Dice this territory can still absorb.
    pub fn free_capacity(&self) -> u8 {
        MAX_DICE - self.dice
    }

    pub(crate) fn set_dice(&mut self, dice: u8) {
        self.dice = clamp_dice(dice);
    }

    /// Adds one die. Returns false if the stack was already full.
    pub(crate) fn add_die(&mut self) -> bool {
        if self.is_full() {
            return false;
        }
        self.dice += 1;
        true
    }

    /// Hands the territory to a new owner with a new dice stack.
    pub(crate) fn capture(&mut self, owner: PlayerId, color: FactionColor, dice: u8) {
        self.owner = Some(owner);
        self.color = color;
        self.dice = clamp_dice(dice);
    }
}

/// Clamps a dice count into `[MIN_DICE, MAX_DICE]`.
pub fn clamp_dice(dice: u8) -> u8 {
    dice.clamp(MIN_DICE, MAX_DICE)
}
