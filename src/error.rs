//! Centralized error types for the maze game.
//!
//! The core is deterministic and bounded, so the taxonomy is narrow: invalid
//! moves and out-of-phase inputs are not errors at all. What remains are
//! configuration problems, which includes a grid too degenerate to ever yield a
//! solvable level.

/// Main error type for the maze game.
///
/// This is the primary error type that should be used in public APIs.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("Level error: {0}")]
    Level(#[from] LevelError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Grid parsing error: {0}")]
    Parse(#[from] ParseError),
}

/// Errors raised while building or validating a level.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LevelError {
    /// The factory ran out of attempts; the grid is too small or degenerate.
    #[error("No solvable level after {attempts} attempts on a {width}x{height} grid")]
    AttemptsExhausted { attempts: u32, width: u32, height: u32 },

    #[error("Invalid level: {0}")]
    Invalid(String),
}

/// Errors related to configuration loading and validation.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error(
        "Grid dimensions must be between 1 and {max} cells, got {width}x{height}",
        max = crate::constants::generation::MAX_DIMENSION
    )]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Invalid configuration value for `{field}`: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("Failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),
}

/// Error type for ASCII grid and key script parsing.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown character in grid: {0}")]
    UnknownCharacter(char),
    #[error("Row {row} has {found} cells, expected {expected}")]
    RaggedRow { row: usize, expected: usize, found: usize },
    #[error("Grid has no cells")]
    Empty,
    #[error("Unknown key `{token}` on line {line}")]
    UnknownKey { line: usize, token: String },
}

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;
