use figment::providers::{Env, Serialized};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::constants::{generation, scoring, MAZE_SIZE};
use crate::error::ConfigError;

/// Prefix for environment overrides, e.g. `MAZE_SEED=42`.
pub const ENV_PREFIX: &str = "MAZE_";

/// Tunable game parameters.
///
/// Every field has a default; any of them can be overridden from the environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Maze width, in cells
    pub width: u32,
    /// Maze height, in cells
    pub height: u32,
    /// Seed for level generation. `None` seeds from the operating system.
    pub seed: Option<u64>,
    /// Whole-level attempts before generation is declared impossible
    pub max_level_attempts: u32,
    /// Random item draws before falling back to a deterministic scan
    pub max_item_samples: u32,
    pub starting_level_score: u32,
    pub decay_per_second: u32,
    pub item_bonus: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: MAZE_SIZE.x,
            height: MAZE_SIZE.y,
            seed: None,
            max_level_attempts: generation::MAX_LEVEL_ATTEMPTS,
            max_item_samples: generation::MAX_ITEM_SAMPLES,
            starting_level_score: scoring::STARTING_LEVEL_SCORE,
            decay_per_second: scoring::DECAY_PER_SECOND,
            item_bonus: scoring::ITEM_BONUS,
        }
    }
}

impl GameConfig {
    /// Defaults layered under `MAZE_*` environment variables.
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(GameConfig::default())).merge(Env::prefixed(ENV_PREFIX))
    }

    /// Loads the configuration from the environment and validates it.
    pub fn load() -> Result<Self, ConfigError> {
        let config: GameConfig = Self::figment().extract().map_err(Box::new)?;
        config.validate()?;
        Ok(config)
    }

    /// A default configuration with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Checks the values that would otherwise make the game loop misbehave.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let dimensions = 1..=generation::MAX_DIMENSION;
        if !dimensions.contains(&self.width) || !dimensions.contains(&self.height) {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.max_level_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_level_attempts",
                reason: "at least one attempt is required".to_string(),
            });
        }
        if self.starting_level_score == 0 {
            return Err(ConfigError::InvalidValue {
                field: "starting_level_score",
                reason: "a level cannot start already timed out".to_string(),
            });
        }
        Ok(())
    }
}
