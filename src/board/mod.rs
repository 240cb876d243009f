//! Board representation and game-state types.
//!
//! Contains the core data structures for territories, players, topology,
//! board contents, and the initial deal.

pub mod adjacency;
pub mod player;
pub mod setup;
pub mod state;
pub mod territory;

pub use adjacency::{
    coordinates_to_index, index_to_coordinates, is_adjacent, is_connected, is_symmetric,
    GridTopology, Topology,
};
pub use player::{Player, PlayerId, PlayerStatus};
pub use setup::{BalancedInitializer, Initializer, Seat};
pub use state::Board;
pub use territory::{
    clamp_dice, FactionColor, Territory, TerritoryId, MAX_DICE, MIN_DICE, PLAYER_COLORS,
};
