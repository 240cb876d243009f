//! Reinforcement.
//!
//! At the end of an attack phase a player earns one die per territory in
//! their largest contiguous cluster. Dice are placed either by hand, one
//! click at a time, or at random across non-full owned territories. Dice
//! that do not fit anywhere are dropped.

use crate::board::setup::spread_dice;
use crate::board::{Board, PlayerId, TerritoryId};
use crate::dice::DiceRoller;

/// Outcome of a random distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Distribution {
    pub placed: u32,
    pub dropped: u32,
}

/// Dice earned this turn: the largest contiguous cluster.
pub fn reinforcement_pool(board: &Board, player: PlayerId) -> u32 {
    board.largest_cluster(player) as u32
}

/// Pool actually placeable: the earned dice clamped to free capacity.
pub fn placeable_pool(board: &Board, player: PlayerId) -> u32 {
    reinforcement_pool(board, player).min(board.free_capacity(player))
}

/// Adds one die to `id` if `player` owns it and it has room.
pub fn place_die(board: &mut Board, player: PlayerId, id: TerritoryId) -> bool {
    match board.territory_mut(id) {
        Some(t) if t.is_owned_by(player) => t.add_die(),
        _ => false,
    }
}

/// Spreads `pool` dice one at a time over random non-full territories.
pub fn distribute_random(
    board: &mut Board,
    player: PlayerId,
    pool: u32,
    dice: &mut dyn DiceRoller,
) -> Distribution {
    let placed = spread_dice(board, player, pool as usize, dice) as u32;
    Distribution {
        placed,
        dropped: pool - placed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{FactionColor, GridTopology, Territory, MAX_DICE};
    use crate::dice::RandomDice;
    use std::sync::Arc;

    // 2x3:
    // R2 R7 B1
    // B3 R1 R8
    fn board() -> Board {
        let red = |d| Territory::owned(PlayerId(0), FactionColor::Red, d);
        let blue = |d| Territory::owned(PlayerId(1), FactionColor::Blue, d);
        Board::with_territories(
            Arc::new(GridTopology::new(2, 3)),
            vec![red(2), red(7), blue(1), blue(3), red(1), red(8)],
        )
        .unwrap()
    }

    #[test]
    fn pool_is_largest_cluster() {
        let b = board();
        // Red cluster 0-1-4-5 is contiguous
        assert_eq!(reinforcement_pool(&b, PlayerId(0)), 4);
        // Blue 2 and 3 are not adjacent
        assert_eq!(reinforcement_pool(&b, PlayerId(1)), 1);
        assert_eq!(reinforcement_pool(&b, PlayerId(3)), 0);
    }

    #[test]
    fn pool_is_clamped_to_capacity() {
        let mut b = board();
        for id in [0, 1, 4] {
            b.territory_mut(id).unwrap().set_dice(MAX_DICE);
        }
        assert_eq!(placeable_pool(&b, PlayerId(0)), 0);
        b.territory_mut(0).unwrap().set_dice(6);
        assert_eq!(placeable_pool(&b, PlayerId(0)), 2);
    }

    #[test]
    fn place_die_checks_owner_and_cap() {
        let mut b = board();
        assert!(place_die(&mut b, PlayerId(0), 0));
        assert_eq!(b.territory(0).unwrap().dice(), 3);
        assert!(!place_die(&mut b, PlayerId(0), 2));
        assert!(!place_die(&mut b, PlayerId(0), 5));
        assert!(!place_die(&mut b, PlayerId(0), 99));
    }

    #[test]
    fn random_distribution_respects_cap_and_drops_excess() {
        let mut b = board();
        let before = b.total_dice(PlayerId(0));
        let capacity = b.free_capacity(PlayerId(0));
        let mut dice = RandomDice::seeded(11);
        let dist = distribute_random(&mut b, PlayerId(0), 30, &mut dice);
        assert_eq!(dist.placed, capacity);
        assert_eq!(dist.dropped, 30 - capacity);
        assert_eq!(b.total_dice(PlayerId(0)), before + capacity);
        assert!(b.territories().iter().all(|t| t.dice() <= MAX_DICE));
    }

    #[test]
    fn random_distribution_places_whole_pool_when_room() {
        let mut b = board();
        let mut dice = RandomDice::seeded(2);
        let dist = distribute_random(&mut b, PlayerId(1), 4, &mut dice);
        assert_eq!(dist, Distribution { placed: 4, dropped: 0 });
        assert_eq!(b.total_dice(PlayerId(1)), 8);
    }
}
