//! Per-run gameplay state: where the mouse is, what it has eaten, and how the score is draining.

use std::time::Duration;

use tracing::{debug, info, trace};

use crate::config::GameConfig;
use crate::constants::scoring;
use crate::map::direction::{Direction, Facing};
use crate::map::grid::Position;
use crate::map::level::Level;

/// Scoring parameters, copied out of the configuration once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreRules {
    pub starting_level_score: u32,
    pub decay_per_second: u32,
    pub item_bonus: u32,
}

impl Default for ScoreRules {
    fn default() -> Self {
        Self {
            starting_level_score: scoring::STARTING_LEVEL_SCORE,
            decay_per_second: scoring::DECAY_PER_SECOND,
            item_bonus: scoring::ITEM_BONUS,
        }
    }
}

impl From<&GameConfig> for ScoreRules {
    fn from(config: &GameConfig) -> Self {
        Self {
            starting_level_score: config.starting_level_score,
            decay_per_second: config.decay_per_second,
            item_bonus: config.item_bonus,
        }
    }
}

impl ScoreRules {
    /// The level score after `elapsed` of unpaused play. Only whole seconds count.
    pub fn level_score_after(&self, elapsed: Duration) -> u32 {
        let decay = u64::from(self.decay_per_second).saturating_mul(elapsed.as_secs());
        // The result is bounded by the starting score, which fits in a u32.
        u64::from(self.starting_level_score).saturating_sub(decay) as u32
    }
}

/// The observable state of a running session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub agent: Position,
    pub facing: Facing,
    pub item_collected: bool,
    /// Points still available for finishing the current level
    pub level_score: u32,
    /// Points banked across every finished level and eaten item
    pub total_score: u64,
    /// Unpaused time spent on the current level
    pub elapsed: Duration,
    pub alive: bool,
    /// The 1-based number of the level being played
    pub level: u32,
}

/// Result of advancing the session clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickStatus {
    Running,
    /// The level score has drained to zero; the agent is no longer alive.
    TimedOut,
}

/// A single run of the game, from the first level until the game ends.
#[derive(Debug, Clone)]
pub struct GameSession {
    level: Level,
    rules: ScoreRules,
    state: SessionState,
    level_started_at: Duration,
    paused_total: Duration,
    exit_credited: bool,
}

impl GameSession {
    /// Starts a session on `level`, with the level clock starting at `now`.
    pub fn new(level: Level, rules: ScoreRules, now: Duration) -> Self {
        let state = SessionState {
            agent: level.agent_start(),
            facing: Facing::default(),
            item_collected: false,
            level_score: rules.starting_level_score,
            total_score: 0,
            elapsed: Duration::ZERO,
            alive: true,
            level: 1,
        };

        Self {
            level,
            rules,
            state,
            level_started_at: now,
            paused_total: Duration::ZERO,
            exit_credited: false,
        }
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn rules(&self) -> &ScoreRules {
        &self.rules
    }

    /// Moves the agent one cell in `direction`.
    ///
    /// Returns `false` and leaves the agent in place when the target is off-grid or a wall, or
    /// when the agent is no longer alive. Horizontal moves update the facing even when blocked.
    pub fn move_agent(&mut self, direction: Direction) -> bool {
        if !self.state.alive {
            return false;
        }

        if let Some(facing) = Facing::from_direction(direction) {
            self.state.facing = facing;
        }

        match self.level.grid().step(self.state.agent, direction) {
            Some(target) if self.level.grid().is_open(target) => {
                trace!(from = %self.state.agent, to = %target, direction = direction.as_ref(), "Agent moved");
                self.state.agent = target;
                true
            }
            _ => false,
        }
    }

    /// Recomputes the elapsed time and level score at `now`.
    ///
    /// Time spent paused (see [`GameSession::exclude_pause`]) does not count. Once the level score
    /// reaches zero the agent dies and every later tick reports [`TickStatus::TimedOut`].
    pub fn tick(&mut self, now: Duration) -> TickStatus {
        if !self.state.alive {
            return TickStatus::TimedOut;
        }

        self.state.elapsed = now
            .saturating_sub(self.level_started_at)
            .saturating_sub(self.paused_total);
        self.state.level_score = self.rules.level_score_after(self.state.elapsed);

        if self.state.level_score == 0 {
            self.state.alive = false;
            info!(level = self.state.level, elapsed = ?self.state.elapsed, "Level timed out");
            return TickStatus::TimedOut;
        }

        TickStatus::Running
    }

    /// Eats the item if the agent is standing on it and it has not been eaten yet.
    pub fn collect_item_if_present(&mut self) -> bool {
        if !self.state.alive || self.state.item_collected || self.state.agent != self.level.item() {
            return false;
        }

        self.state.item_collected = true;
        self.state.total_score += u64::from(self.rules.item_bonus);
        debug!(total_score = self.state.total_score, "Item collected");
        true
    }

    /// Banks the level score if the agent is standing on the exit.
    ///
    /// Credits at most once per level; the caller is expected to [`advance`](GameSession::advance)
    /// to a fresh level afterwards.
    pub fn check_exit(&mut self) -> bool {
        if !self.state.alive || self.exit_credited || self.state.agent != self.level.exit() {
            return false;
        }

        self.exit_credited = true;
        self.state.total_score += u64::from(self.state.level_score);
        info!(
            level = self.state.level,
            level_score = self.state.level_score,
            total_score = self.state.total_score,
            "Level complete"
        );
        true
    }

    /// Replaces the finished level with `level`, resetting every per-level value.
    ///
    /// The total score carries over and the level counter increments.
    pub fn advance(&mut self, level: Level, now: Duration) {
        self.state.agent = level.agent_start();
        self.state.facing = Facing::default();
        self.state.item_collected = false;
        self.state.level_score = self.rules.starting_level_score;
        self.state.elapsed = Duration::ZERO;
        self.state.alive = true;
        self.state.level += 1;

        self.level = level;
        self.level_started_at = now;
        self.paused_total = Duration::ZERO;
        self.exit_credited = false;
    }

    /// Removes `paused` from the current level's elapsed time.
    pub fn exclude_pause(&mut self, paused: Duration) {
        self.paused_total += paused;
    }

    /// Ends the run early: the remaining level score is banked and then zeroed.
    pub fn end_game(&mut self) {
        if self.state.alive {
            self.state.total_score += u64::from(self.state.level_score);
        }
        self.state.level_score = 0;
        self.state.alive = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_score_after() {
        let rules = ScoreRules::default();
        assert_eq!(rules.level_score_after(Duration::ZERO), 1000);
        assert_eq!(rules.level_score_after(Duration::from_millis(999)), 1000);
        assert_eq!(rules.level_score_after(Duration::from_millis(1500)), 990);
        assert_eq!(rules.level_score_after(Duration::from_secs(99)), 10);
        assert_eq!(rules.level_score_after(Duration::from_secs(100)), 0);
        assert_eq!(rules.level_score_after(Duration::from_secs(u64::MAX)), 0);
    }

    #[test]
    fn test_rules_from_config() {
        let config = GameConfig {
            starting_level_score: 500,
            decay_per_second: 5,
            item_bonus: 100,
            ..GameConfig::default()
        };
        let rules = ScoreRules::from(&config);
        assert_eq!(rules.starting_level_score, 500);
        assert_eq!(rules.decay_per_second, 5);
        assert_eq!(rules.item_bonus, 100);
    }
}
