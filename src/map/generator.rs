//! Randomized depth-first maze carving.

use std::collections::HashSet;

use glam::UVec2;
use rand::seq::IndexedRandom;
use rand::Rng;
use smallvec::SmallVec;
use tracing::trace;

use crate::constants::AGENT_START;
use crate::map::grid::{Cell, Grid, Position};

/// Builds perfect mazes of a fixed size.
///
/// Carving starts at the origin on an all-wall grid and walks depth-first. A neighbor is only
/// carved if, besides the cell being extended from, none of its own neighbors are already open.
/// Every carved cell therefore joins the open region through exactly one edge, so the result is
/// a spanning tree of the open cells: connected, with no loops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MazeGenerator {
    size: UVec2,
}

impl MazeGenerator {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: UVec2::new(width, height),
        }
    }

    pub fn size(&self) -> UVec2 {
        self.size
    }

    /// Carves a new maze. The same rng state always yields the same grid.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Grid {
        let mut grid = Grid::filled(self.size.x, self.size.y);
        if !grid.in_bounds(AGENT_START) {
            return grid;
        }

        let mut visited = HashSet::from([AGENT_START]);
        let mut stack = vec![AGENT_START];
        grid.set(AGENT_START, Cell::Open);

        while let Some(&current) = stack.last() {
            let candidates: SmallVec<[Position; 4]> = grid
                .neighbors(current)
                .filter(|n| !visited.contains(n))
                .filter(|&n| grid.open_neighbors(n).count() <= 1)
                .collect();

            match candidates.choose(rng) {
                Some(&next) => {
                    grid.set(next, Cell::Open);
                    visited.insert(next);
                    stack.push(next);
                }
                None => {
                    stack.pop();
                }
            }
        }

        trace!(
            width = self.size.x,
            height = self.size.y,
            open = grid.open_count(),
            "Maze carved"
        );
        grid
    }
}

/// Carves a `width` x `height` maze with the given rng.
pub fn generate_maze<R: Rng + ?Sized>(width: u32, height: u32, rng: &mut R) -> Grid {
    MazeGenerator::new(width, height).generate(rng)
}
