//! Reachability checks over the open cells of a grid.

use std::collections::{HashSet, VecDeque};

use crate::map::grid::{Grid, Position};

/// Whether a 4-directional path of open cells joins `start` to `end`.
///
/// Breadth-first from `start`, returning as soon as `end` is dequeued. Endpoints that are
/// walls or off-grid are never reachable.
pub fn is_reachable(grid: &Grid, start: Position, end: Position) -> bool {
    if !grid.is_open(start) || !grid.is_open(end) {
        return false;
    }

    let mut queue = VecDeque::from([start]);
    let mut visited = HashSet::from([start]);

    while let Some(position) = queue.pop_front() {
        if position == end {
            return true;
        }

        for neighbor in grid.open_neighbors(position) {
            if visited.insert(neighbor) {
                queue.push_back(neighbor);
            }
        }
    }

    false
}

/// Every open cell reachable from `start`, including `start` itself.
pub fn reachable_cells(grid: &Grid, start: Position) -> HashSet<Position> {
    let mut visited = HashSet::new();
    if !grid.is_open(start) {
        return visited;
    }

    let mut queue = VecDeque::from([start]);
    visited.insert(start);
    while let Some(position) = queue.pop_front() {
        for neighbor in grid.open_neighbors(position) {
            if visited.insert(neighbor) {
                queue.push_back(neighbor);
            }
        }
    }

    visited
}

/// Whether the open cells form a single tree containing `root`: every open cell reachable and
/// exactly `open - 1` adjacent open pairs.
pub fn is_perfect(grid: &Grid, root: Position) -> bool {
    let open = grid.open_count();
    open > 0 && reachable_cells(grid, root).len() == open && grid.open_edge_count() == open - 1
}
