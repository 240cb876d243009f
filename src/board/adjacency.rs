//! Board topologies and adjacency queries.
//!
//! A topology is an undirected, connected graph over territory indices. The
//! engine only ever asks a topology for a territory's neighbors, so new board
//! shapes plug in by implementing `Topology`. The grid variant derives its
//! edges from up/down/left/right offsets and maps coordinates row-major.

use std::collections::VecDeque;
use std::fmt;

use super::territory::TerritoryId;

/// Adjacency capability shared by every board shape.
pub trait Topology: fmt::Debug + Send + Sync {
    /// Number of territories on the board.
    fn territory_count(&self) -> usize;

    /// Territories adjacent to `id`, without duplicates.
    fn neighbors(&self, id: TerritoryId) -> &[TerritoryId];

    /// Grid dimensions `(rows, cols)` for grid-shaped boards.
    fn grid_dims(&self) -> Option<(usize, usize)> {
        None
    }
}

/// Row/column offsets of a grid cell's neighbors.
const NEIGHBOR_OFFSETS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Maps grid coordinates to a row-major territory index.
pub const fn coordinates_to_index(row: usize, col: usize, cols: usize) -> usize {
    row * cols + col
}

/// Maps a row-major territory index back to `(row, col)`.
pub const fn index_to_coordinates(index: usize, cols: usize) -> (usize, usize) {
    (index / cols, index % cols)
}

/// Rectangular grid where each cell touches its orthogonal neighbors.
///
/// Neighbor lists are computed once at construction and stored in a single
/// vec with per-territory `(start, end)` offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridTopology {
    rows: usize,
    cols: usize,
    entries: Vec<TerritoryId>,
    offsets: Vec<(u32, u32)>,
}

impl GridTopology {
    /// Builds a `rows` x `cols` grid. Zero dimensions are raised to 1.
    pub fn new(rows: usize, cols: usize) -> Self {
        let rows = rows.max(1);
        let cols = cols.max(1);
        let mut entries = Vec::with_capacity(rows * cols * 4);
        let mut offsets = Vec::with_capacity(rows * cols);

        for row in 0..rows {
            for col in 0..cols {
                let start = entries.len() as u32;
                for (dr, dc) in NEIGHBOR_OFFSETS {
                    let r = row as isize + dr;
                    let c = col as isize + dc;
                    if r < 0 || c < 0 || r >= rows as isize || c >= cols as isize {
                        continue;
                    }
                    entries.push(coordinates_to_index(r as usize, c as usize, cols));
                }
                offsets.push((start, entries.len() as u32));
            }
        }

        GridTopology {
            rows,
            cols,
            entries,
            offsets,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Index of the cell at `(row, col)`, or None when out of bounds.
    pub fn index_of(&self, row: usize, col: usize) -> Option<TerritoryId> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(coordinates_to_index(row, col, self.cols))
    }
}

impl Topology for GridTopology {
    fn territory_count(&self) -> usize {
        self.rows * self.cols
    }

    #[inline]
    fn neighbors(&self, id: TerritoryId) -> &[TerritoryId] {
        match self.offsets.get(id) {
            Some(&(start, end)) => &self.entries[start as usize..end as usize],
            None => &[],
        }
    }

    fn grid_dims(&self) -> Option<(usize, usize)> {
        Some((self.rows, self.cols))
    }
}

/// Returns true if `a` and `b` share an edge.
pub fn is_adjacent(topology: &dyn Topology, a: TerritoryId, b: TerritoryId) -> bool {
    topology.neighbors(a).contains(&b)
}

/// Returns true if every edge a->b has a matching b->a.
pub fn is_symmetric(topology: &dyn Topology) -> bool {
    (0..topology.territory_count()).all(|a| {
        topology
            .neighbors(a)
            .iter()
            .all(|&b| topology.neighbors(b).contains(&a))
    })
}

/// Returns true if every territory is reachable from territory 0.
pub fn is_connected(topology: &dyn Topology) -> bool {
    let count = topology.territory_count();
    if count == 0 {
        return true;
    }
    let mut seen = vec![false; count];
    let mut queue = VecDeque::with_capacity(count);
    seen[0] = true;
    queue.push_back(0);
    let mut reached = 1;

    while let Some(cur) = queue.pop_front() {
        for &next in topology.neighbors(cur) {
            if next < count && !seen[next] {
                seen[next] = true;
                reached += 1;
                queue.push_back(next);
            }
        }
    }

    reached == count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_major_mapping() {
        assert_eq!(coordinates_to_index(0, 0, 5), 0);
        assert_eq!(coordinates_to_index(2, 3, 5), 13);
        assert_eq!(index_to_coordinates(13, 5), (2, 3));
    }

    #[test]
    fn corner_edge_and_center_degrees() {
        let grid = GridTopology::new(3, 4);
        assert_eq!(grid.territory_count(), 12);
        assert_eq!(grid.neighbors(0).len(), 2);
        assert_eq!(grid.neighbors(1).len(), 3);
        assert_eq!(grid.neighbors(5).len(), 4);
    }

    #[test]
    fn center_neighbors_are_orthogonal() {
        let grid = GridTopology::new(3, 3);
        let mut n = grid.neighbors(4).to_vec();
        n.sort_unstable();
        assert_eq!(n, vec![1, 3, 5, 7]);
        assert!(!is_adjacent(&grid, 4, 0));
        assert!(is_adjacent(&grid, 4, 1));
    }

    #[test]
    fn rows_do_not_wrap() {
        let grid = GridTopology::new(2, 3);
        // (0,2) and (1,0) are consecutive indices but not neighbors
        assert!(!is_adjacent(&grid, 2, 3));
    }

    #[test]
    fn grids_are_symmetric_and_connected() {
        for (rows, cols) in [(1, 1), (1, 2), (5, 5), (6, 8), (8, 10)] {
            let grid = GridTopology::new(rows, cols);
            assert!(is_symmetric(&grid), "{rows}x{cols} not symmetric");
            assert!(is_connected(&grid), "{rows}x{cols} not connected");
        }
    }

    #[test]
    fn out_of_range_queries_are_empty() {
        let grid = GridTopology::new(2, 2);
        assert!(grid.neighbors(99).is_empty());
        assert_eq!(grid.index_of(2, 0), None);
        assert_eq!(grid.index_of(1, 1), Some(3));
    }

    #[test]
    fn zero_dimensions_are_raised() {
        let grid = GridTopology::new(0, 0);
        assert_eq!(grid.grid_dims(), Some((1, 1)));
    }

    /// A line graph with a missing back-edge.
    #[derive(Debug)]
    struct Broken {
        adj: Vec<Vec<TerritoryId>>,
    }

    impl Topology for Broken {
        fn territory_count(&self) -> usize {
            self.adj.len()
        }
        fn neighbors(&self, id: TerritoryId) -> &[TerritoryId] {
            &self.adj[id]
        }
    }

    #[test]
    fn detects_asymmetry_and_islands() {
        let one_way = Broken {
            adj: vec![vec![1], vec![]],
        };
        assert!(!is_symmetric(&one_way));

        let islands = Broken {
            adj: vec![vec![1], vec![0], vec![]],
        };
        assert!(is_symmetric(&islands));
        assert!(!is_connected(&islands));
    }
}
