//! This module contains all the constants used in the game.

use std::time::Duration;

use glam::UVec2;

/// The host loop runs at 10 frames per second, which also paces held-key movement.
pub const LOOP_TIME: Duration = Duration::from_millis(100);

/// The size of the maze, in cells.
pub const MAZE_SIZE: UVec2 = UVec2::new(20, 15);

/// The cell the agent starts every level on.
pub const AGENT_START: UVec2 = UVec2::ZERO;

/// Half-period of the blinking start arrow and "PAUSED" label.
pub const FLASH_PERIOD: Duration = Duration::from_millis(500);

/// Scoring rules for a single level.
pub mod scoring {
    /// The level score at the moment a level starts.
    pub const STARTING_LEVEL_SCORE: u32 = 1000;
    /// Points lost per whole second of unpaused play.
    pub const DECAY_PER_SECOND: u32 = 10;
    /// Bonus added to the total score when the cheese is eaten.
    pub const ITEM_BONUS: u32 = 250;
}

/// Bounds on the level factory's retry loops.
pub mod generation {
    /// Whole-level attempts before the grid is declared degenerate.
    pub const MAX_LEVEL_ATTEMPTS: u32 = 1000;
    /// Random draws for the item before falling back to a scan.
    pub const MAX_ITEM_SAMPLES: u32 = 1000;
    /// Largest accepted width or height, in cells.
    pub const MAX_DIMENSION: u32 = 1024;
}
