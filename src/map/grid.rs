//! The cell grid a maze is carved into.

use std::fmt;

use glam::{IVec2, UVec2};

use crate::map::direction::Direction;

/// A grid coordinate, `0 <= x < width` and `0 <= y < height`.
pub type Position = UVec2;

/// The state of a single maze cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    Open,
    #[default]
    Wall,
}

impl Cell {
    pub const fn is_open(self) -> bool {
        matches!(self, Cell::Open)
    }
}

/// A fixed-size rectangle of cells, stored row-major.
///
/// Only the generator and the parser can change cells; once a grid leaves them it is read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates a grid with every cell set to [`Cell::Wall`].
    pub fn filled(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::Wall; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> UVec2 {
        UVec2::new(self.width, self.height)
    }

    /// Total number of cells, open or not.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn in_bounds(&self, position: Position) -> bool {
        position.x < self.width && position.y < self.height
    }

    fn index(&self, position: Position) -> Option<usize> {
        self.in_bounds(position)
            .then(|| position.y as usize * self.width as usize + position.x as usize)
    }

    /// Returns the cell at `position`, or `None` when off-grid.
    pub fn get(&self, position: Position) -> Option<Cell> {
        self.index(position).map(|i| self.cells[i])
    }

    /// Off-grid positions are never open.
    pub fn is_open(&self, position: Position) -> bool {
        self.get(position).is_some_and(Cell::is_open)
    }

    pub(crate) fn set(&mut self, position: Position, cell: Cell) {
        if let Some(i) = self.index(position) {
            self.cells[i] = cell;
        }
    }

    /// The in-bounds cell one step from `position` in `direction`.
    pub fn step(&self, position: Position, direction: Direction) -> Option<Position> {
        let next: IVec2 = position.as_ivec2() + direction.as_ivec2();
        if next.x < 0 || next.y < 0 {
            return None;
        }
        let next = next.as_uvec2();
        self.in_bounds(next).then_some(next)
    }

    /// The in-bounds orthogonal neighbors of `position`, open or not.
    pub fn neighbors(&self, position: Position) -> impl Iterator<Item = Position> + '_ {
        Direction::DIRECTIONS
            .into_iter()
            .filter_map(move |direction| self.step(position, direction))
    }

    /// The open orthogonal neighbors of `position`.
    pub fn open_neighbors(&self, position: Position) -> impl Iterator<Item = Position> + '_ {
        self.neighbors(position).filter(move |&n| self.is_open(n))
    }

    /// Every position on the grid, in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| UVec2::new(x, y)))
    }

    /// Every open position, in row-major order.
    pub fn open_cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.positions().filter(move |&p| self.is_open(p))
    }

    pub fn open_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_open()).count()
    }

    /// Whether `position` lies on the outer ring of the grid.
    pub fn is_boundary(&self, position: Position) -> bool {
        self.in_bounds(position)
            && (position.x == 0 || position.y == 0 || position.x == self.width - 1 || position.y == self.height - 1)
    }

    /// Every boundary position exactly once (corners are not repeated), in row-major order.
    pub fn boundary_cells(&self) -> Vec<Position> {
        self.positions().filter(|&p| self.is_boundary(p)).collect()
    }

    /// Number of orthogonally adjacent open pairs; a tree of open cells has `open_count() - 1`.
    pub fn open_edge_count(&self) -> usize {
        self.open_cells()
            .map(|p| {
                [Direction::Right, Direction::Down]
                    .into_iter()
                    .filter_map(|d| self.step(p, d))
                    .filter(|&n| self.is_open(n))
                    .count()
            })
            .sum()
    }
}

impl fmt::Display for Grid {
    /// Renders walls as `#` and open cells as `.`, one row per line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.chunks(self.width.max(1) as usize).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for cell in row {
                f.write_str(if cell.is_open() { "." } else { "#" })?;
            }
        }
        Ok(())
    }
}
