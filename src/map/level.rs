//! Level construction: a carved maze plus validated item and exit placement.

use rand::seq::SliceRandom;
use rand::Rng;
use strum_macros::AsRefStr;
use tracing::{debug, trace, warn};

use crate::config::GameConfig;
use crate::constants::AGENT_START;
use crate::error::LevelError;
use crate::map::generator::MazeGenerator;
use crate::map::grid::{Grid, Position};
use crate::map::validator::is_reachable;

/// A solvable level: the maze, the cheese, and the way out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Level {
    grid: Grid,
    item: Position,
    exit: Position,
}

impl Level {
    /// Assembles a level, checking every level invariant.
    ///
    /// # Errors
    ///
    /// Returns [`LevelError::Invalid`] if the agent start is not open, the item sits on the start
    /// or a wall, the exit is a wall or off the boundary, or the exit cannot be reached.
    pub fn new(grid: Grid, item: Position, exit: Position) -> Result<Self, LevelError> {
        if !grid.is_open(AGENT_START) {
            return Err(LevelError::Invalid("agent start is not open".to_string()));
        }
        if item == AGENT_START {
            return Err(LevelError::Invalid("item placed on the agent start".to_string()));
        }
        if !grid.is_open(item) {
            return Err(LevelError::Invalid(format!("item at {item} is not an open cell")));
        }
        if !grid.is_open(exit) {
            return Err(LevelError::Invalid(format!("exit at {exit} is not an open cell")));
        }
        if !grid.is_boundary(exit) {
            return Err(LevelError::Invalid(format!("exit at {exit} is not on the boundary")));
        }
        if !is_reachable(&grid, AGENT_START, exit) {
            return Err(LevelError::Invalid(format!("exit at {exit} is unreachable")));
        }

        Ok(Self { grid, item, exit })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn item(&self) -> Position {
        self.item
    }

    pub fn exit(&self) -> Position {
        self.exit
    }

    pub fn agent_start(&self) -> Position {
        AGENT_START
    }
}

/// Why a single build attempt was thrown away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "snake_case")]
enum RejectReason {
    NoItemCell,
    NoExitCell,
    Unreachable,
}

/// Produces solvable levels, retrying whole attempts until one validates.
#[derive(Debug, Clone)]
pub struct LevelFactory {
    generator: MazeGenerator,
    max_attempts: u32,
    max_item_samples: u32,
}

impl LevelFactory {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            generator: MazeGenerator::new(config.width, config.height),
            max_attempts: config.max_level_attempts,
            max_item_samples: config.max_item_samples,
        }
    }

    pub fn generator(&self) -> &MazeGenerator {
        &self.generator
    }

    /// Builds a level that is guaranteed solvable.
    ///
    /// # Errors
    ///
    /// Returns [`LevelError::AttemptsExhausted`] when no attempt validates within the configured
    /// ceiling, which means the grid is too small or degenerate to host a level.
    pub fn build_level<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Level, LevelError> {
        for attempt in 1..=self.max_attempts {
            match self.try_build(rng) {
                Ok(level) => {
                    debug!(
                        attempt,
                        item = %level.item,
                        exit = %level.exit,
                        open = level.grid.open_count(),
                        "Level built"
                    );
                    return Ok(level);
                }
                Err(reason) => trace!(attempt, reason = reason.as_ref(), "Level attempt rejected"),
            }
        }

        let size = self.generator.size();
        warn!(attempts = self.max_attempts, width = size.x, height = size.y, "Level generation gave up");
        Err(LevelError::AttemptsExhausted {
            attempts: self.max_attempts,
            width: size.x,
            height: size.y,
        })
    }

    fn try_build<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Level, RejectReason> {
        let grid = self.generator.generate(rng);
        let item = self.place_item(&grid, rng).ok_or(RejectReason::NoItemCell)?;
        let exit = place_exit(&grid, rng).ok_or(RejectReason::NoExitCell)?;
        if !is_reachable(&grid, AGENT_START, exit) {
            return Err(RejectReason::Unreachable);
        }

        Ok(Level { grid, item, exit })
    }

    /// Picks a uniformly random open cell other than the agent start.
    ///
    /// Sampling is bounded; once the draws run out the first qualifying cell in row-major order
    /// is used instead. Returns `None` only if no such cell exists.
    pub fn place_item<R: Rng + ?Sized>(&self, grid: &Grid, rng: &mut R) -> Option<Position> {
        if grid.cell_count() == 0 {
            return None;
        }

        for _ in 0..self.max_item_samples {
            let candidate = Position::new(rng.random_range(0..grid.width()), rng.random_range(0..grid.height()));
            if candidate != AGENT_START && grid.is_open(candidate) {
                return Some(candidate);
            }
        }

        grid.open_cells().find(|&p| p != AGENT_START)
    }
}

/// Shuffles the boundary and returns the first open cell that is not the agent start.
///
/// The start is skipped so that no level can be completed on its first frame.
pub fn place_exit<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> Option<Position> {
    let mut boundary = grid.boundary_cells();
    boundary.shuffle(rng);
    boundary
        .into_iter()
        .find(|&p| p != AGENT_START && grid.is_open(p))
}
