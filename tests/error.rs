use mouse_maze::error::{ConfigError, GameError, GameResult, LevelError, ParseError};
use speculoos::prelude::*;

#[test]
fn test_game_error_from_level_error() {
    let level_error = LevelError::AttemptsExhausted {
        attempts: 1000,
        width: 1,
        height: 1,
    };
    let game_error: GameError = level_error.into();
    assert!(matches!(game_error, GameError::Level(_)));
    assert_that(&game_error.to_string())
        .is_equal_to("Level error: No solvable level after 1000 attempts on a 1x1 grid".to_string());
}

#[test]
fn test_game_error_from_config_error() {
    let game_error: GameError = ConfigError::InvalidDimensions { width: 0, height: 15 }.into();
    assert!(matches!(game_error, GameError::Config(_)));
    assert_that(&game_error.to_string())
        .is_equal_to("Configuration error: Grid dimensions must be between 1 and 1024 cells, got 0x15".to_string());
}

#[test]
fn test_game_error_from_parse_error() {
    let game_error: GameError = ParseError::UnknownCharacter('Z').into();
    assert!(matches!(game_error, GameError::Parse(ParseError::UnknownCharacter('Z'))));
}

#[test]
fn test_error_display() {
    assert_that(&LevelError::Invalid("exit at [0, 1] is unreachable".to_string()).to_string())
        .is_equal_to("Invalid level: exit at [0, 1] is unreachable".to_string());
    assert_that(
        &ConfigError::InvalidValue {
            field: "max_level_attempts",
            reason: "at least one attempt is required".to_string(),
        }
        .to_string(),
    )
    .is_equal_to("Invalid configuration value for `max_level_attempts`: at least one attempt is required".to_string());
    assert_that(
        &ParseError::RaggedRow {
            row: 2,
            expected: 5,
            found: 4,
        }
        .to_string(),
    )
    .is_equal_to("Row 2 has 4 cells, expected 5".to_string());
    assert_that(&ParseError::Empty.to_string()).is_equal_to("Grid has no cells".to_string());
}

#[test]
fn test_game_result_propagates() {
    fn inner() -> Result<(), LevelError> {
        Err(LevelError::Invalid("bad".to_string()))
    }
    fn outer() -> GameResult<()> {
        inner()?;
        Ok(())
    }
    assert!(matches!(outer(), Err(GameError::Level(LevelError::Invalid(_)))));
}
