//! Board state.
//!
//! A `Board` pairs an immutable topology with the mutable contents of every
//! territory. Territories are stored in the topology's iteration order
//! (row-major for grids) and addressed by `TerritoryId`.

use std::collections::VecDeque;
use std::sync::Arc;

use super::adjacency::{self, GridTopology, Topology};
use super::player::PlayerId;
use super::territory::{Territory, TerritoryId};

/// Complete board contents at a point in time.
///
/// Cloning is cheap on the topology side: the graph is shared, only the
/// territory vec is copied.
#[derive(Debug, Clone)]
pub struct Board {
    topology: Arc<dyn Topology>,
    territories: Vec<Territory>,
}

impl Board {
    /// Creates a board where every territory is colorless with one die.
    pub fn new(topology: Arc<dyn Topology>) -> Self {
        debug_assert_well_formed(topology.as_ref());
        let count = topology.territory_count();
        Board {
            topology,
            territories: vec![Territory::colorless(1); count],
        }
    }

    /// Creates a blank `rows` x `cols` grid board.
    pub fn grid(rows: usize, cols: usize) -> Self {
        Board::new(Arc::new(GridTopology::new(rows, cols)))
    }

    /// Creates a board from explicit contents. Returns None if the number of
    /// territories does not match the topology.
    pub fn with_territories(
        topology: Arc<dyn Topology>,
        territories: Vec<Territory>,
    ) -> Option<Self> {
        if territories.len() != topology.territory_count() {
            return None;
        }
        debug_assert_well_formed(topology.as_ref());
        Some(Board {
            topology,
            territories,
        })
    }

    pub fn topology(&self) -> &dyn Topology {
        self.topology.as_ref()
    }

    /// Grid dimensions `(rows, cols)` if the board is grid-shaped.
    pub fn grid_dims(&self) -> Option<(usize, usize)> {
        self.topology.grid_dims()
    }

    /// Number of territories.
    pub fn len(&self) -> usize {
        self.territories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.territories.is_empty()
    }

    /// All territories in stable iteration order.
    pub fn territories(&self) -> &[Territory] {
        &self.territories
    }

    pub fn territory(&self, id: TerritoryId) -> Option<&Territory> {
        self.territories.get(id)
    }

    pub(crate) fn territory_mut(&mut self, id: TerritoryId) -> Option<&mut Territory> {
        self.territories.get_mut(id)
    }

    /// Territories sharing an edge with `id`.
    pub fn territories_adjacent_to(&self, id: TerritoryId) -> &[TerritoryId] {
        self.topology.neighbors(id)
    }

    pub fn is_adjacent(&self, a: TerritoryId, b: TerritoryId) -> bool {
        adjacency::is_adjacent(self.topology.as_ref(), a, b)
    }

    /// Ids of the territories `player` owns, in iteration order.
    pub fn owned_by(&self, player: PlayerId) -> impl Iterator<Item = TerritoryId> + '_ {
        self.territories
            .iter()
            .enumerate()
            .filter(move |(_, t)| t.is_owned_by(player))
            .map(|(id, _)| id)
    }

    pub fn count_owned(&self, player: PlayerId) -> usize {
        self.territories.iter().filter(|t| t.is_owned_by(player)).count()
    }

    /// Total dice across every territory `player` owns.
    pub fn total_dice(&self, player: PlayerId) -> u32 {
        self.territories
            .iter()
            .filter(|t| t.is_owned_by(player))
            .map(|t| u32::from(t.dice()))
            .sum()
    }

    /// Dice `player` could still add before every owned territory is full.
    pub fn free_capacity(&self, player: PlayerId) -> u32 {
        self.territories
            .iter()
            .filter(|t| t.is_owned_by(player))
            .map(|t| u32::from(t.free_capacity()))
            .sum()
    }

    /// Size of the largest contiguous cluster of territories owned by `player`.
    pub fn largest_cluster(&self, player: PlayerId) -> usize {
        let mut seen = vec![false; self.territories.len()];
        let mut queue = VecDeque::new();
        let mut best = 0;

        for start in self.owned_by(player) {
            if seen[start] {
                continue;
            }
            seen[start] = true;
            queue.push_back(start);
            let mut size = 0;

            while let Some(cur) = queue.pop_front() {
                size += 1;
                for &next in self.topology.neighbors(cur) {
                    if !seen[next] && self.territories[next].is_owned_by(player) {
                        seen[next] = true;
                        queue.push_back(next);
                    }
                }
            }
            best = best.max(size);
        }

        best
    }
}

/// Boards are undirected and connected whatever their shape.
fn debug_assert_well_formed(topology: &dyn Topology) {
    debug_assert!(
        adjacency::is_symmetric(topology) && adjacency::is_connected(topology),
        "topology must be symmetric and connected"
    );
}
