//! Phase sequencing logic.
//!
//! A turn is an attack phase followed by a reinforcement phase; turns rotate
//! through the player slots in order, skipping closed players. A round ends
//! each time the rotation wraps back past the last slot.

use std::fmt;

use crate::board::Player;

/// Phase of the current player's turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Attack,
    Reinforce,
    /// Terminal. No further transitions.
    GameEnd,
}

impl Phase {
    /// Returns the display label.
    pub const fn label(self) -> &'static str {
        match self {
            Phase::Attack => "Attack",
            Phase::Reinforce => "Reinforce",
            Phase::GameEnd => "Game Over",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What the primary action does right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimaryAction {
    /// Stop attacking and collect reinforcements.
    EndAttack,
    /// Manual placement still has dice left; the action is unavailable.
    PlaceDice { remaining: u32 },
    /// Apply reinforcements and hand over to the next player.
    EndTurn,
    /// The game is over.
    None,
}

impl PrimaryAction {
    pub const fn label(self) -> &'static str {
        match self {
            PrimaryAction::EndAttack => "End Attack",
            PrimaryAction::PlaceDice { .. } => "Place Dice",
            PrimaryAction::EndTurn => "End Turn",
            PrimaryAction::None => "Game Over",
        }
    }

    /// Returns true if triggering the action moves the game forward.
    pub const fn is_available(self) -> bool {
        matches!(self, PrimaryAction::EndAttack | PrimaryAction::EndTurn)
    }
}

/// Result of advancing the turn rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rotation {
    /// Slot index of the next player.
    pub next: usize,
    /// True if the rotation wrapped past the last slot.
    pub wrapped: bool,
}

/// Finds the next active player after slot `current`.
///
/// Closed slots are skipped but still count towards the wrap: moving from the
/// last active slot to an earlier one always starts a new round. Returns None
/// if no player is active. If `current` is the only active player, the
/// rotation comes back to it and wraps.
pub fn next_active_player(players: &[Player], current: usize) -> Option<Rotation> {
    let count = players.len();
    if count == 0 {
        return None;
    }
    (1..=count)
        .map(|step| current + step)
        .find(|&slot| players[slot % count].is_active())
        .map(|slot| Rotation {
            next: slot % count,
            wrapped: slot >= count,
        })
}

/// First active slot, used when a game starts.
pub fn first_active_player(players: &[Player]) -> Option<usize> {
    players.iter().position(Player::is_active)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{FactionColor, PlayerStatus, PLAYER_COLORS};

    fn players(statuses: &[PlayerStatus]) -> Vec<Player> {
        statuses
            .iter()
            .zip(PLAYER_COLORS)
            .enumerate()
            .map(|(i, (&s, c))| Player::new(format!("p{i}"), s, c))
            .collect()
    }

    use PlayerStatus::{Ai, Closed, You};

    #[test]
    fn rotation_skips_closed() {
        let ps = players(&[You, Closed, Ai, Closed, Ai, Closed]);
        assert_eq!(
            next_active_player(&ps, 0),
            Some(Rotation {
                next: 2,
                wrapped: false
            })
        );
        assert_eq!(
            next_active_player(&ps, 2),
            Some(Rotation {
                next: 4,
                wrapped: false
            })
        );
    }

    #[test]
    fn rotation_wraps_after_last_active() {
        let ps = players(&[Closed, Ai, Ai, Closed, Closed, Closed]);
        assert_eq!(
            next_active_player(&ps, 2),
            Some(Rotation {
                next: 1,
                wrapped: true
            })
        );
    }

    #[test]
    fn lone_player_wraps_to_self() {
        let ps = players(&[Closed, Closed, Ai, Closed, Closed, Closed]);
        assert_eq!(
            next_active_player(&ps, 2),
            Some(Rotation {
                next: 2,
                wrapped: true
            })
        );
    }

    #[test]
    fn nobody_active() {
        let ps = players(&[Closed; 6]);
        assert_eq!(next_active_player(&ps, 0), None);
        assert_eq!(first_active_player(&ps), None);
        assert_eq!(next_active_player(&[], 0), None);
    }

    #[test]
    fn first_active_skips_leading_closed() {
        let ps = players(&[Closed, Closed, Ai, You, Closed, Closed]);
        assert_eq!(first_active_player(&ps), Some(2));
        assert_eq!(ps[2].color, FactionColor::Green);
    }

    #[test]
    fn primary_action_availability() {
        assert!(PrimaryAction::EndAttack.is_available());
        assert!(PrimaryAction::EndTurn.is_available());
        assert!(!PrimaryAction::PlaceDice { remaining: 2 }.is_available());
        assert!(!PrimaryAction::None.is_available());
        assert_eq!(Phase::Reinforce.to_string(), "Reinforce");
    }
}
