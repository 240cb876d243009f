//! Rule resolution.
//!
//! Combat between adjacent territories, reinforcement, turn rotation, and
//! elimination checks.

pub mod combat;
pub mod elimination;
pub mod phase;
pub mod reinforce;

pub use combat::{
    apply_outcome, decide, resolve_combat, validate_attack, CombatError, CombatOutcome,
    CombatWinner,
};
pub use elimination::{active_count, close_eliminated, is_game_over, sole_survivor};
pub use phase::{first_active_player, next_active_player, Phase, PrimaryAction, Rotation};
pub use reinforce::{
    distribute_random, place_die, placeable_pool, reinforcement_pool, Distribution,
};
