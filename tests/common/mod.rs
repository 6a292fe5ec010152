#![allow(dead_code)]

use std::time::Duration;

use mouse_maze::config::GameConfig;
use mouse_maze::events::{GameEvent, Intent};
use mouse_maze::game::{GameSession, GameStateMachine, ScoreRules};
use mouse_maze::map::{Direction, Grid, Level, Position};

/// An 8x7 maze: a corridor down the left edge, then right along row 5 to (5, 5), with a wall at (6, 5).
pub const ELBOW: [&str; 7] = [
    ".#######", //
    ".#######", //
    ".#######", //
    ".#######", //
    ".#######", //
    "......##", //
    "########", //
];

pub fn grid(rows: &[&str]) -> Grid {
    Grid::parse(rows).expect("test grid should parse")
}

pub fn pos(x: u32, y: u32) -> Position {
    Position::new(x, y)
}

pub fn secs(seconds: u64) -> Duration {
    Duration::from_secs(seconds)
}

pub fn level(rows: &[&str], item: Position, exit: Position) -> Level {
    Level::new(grid(rows), item, exit).expect("test level should be valid")
}

/// The elbow maze with the item at (3, 5) and the exit at (0, 3).
pub fn elbow_level() -> Level {
    level(&ELBOW, pos(3, 5), pos(0, 3))
}

/// A session on `level` that started at t = 0 with the default scoring rules.
pub fn session(level: Level) -> GameSession {
    GameSession::new(level, ScoreRules::default(), Duration::ZERO)
}

/// Applies each move in order, asserting every one of them succeeds.
pub fn walk(session: &mut GameSession, moves: &[(Direction, usize)]) {
    for &(direction, count) in moves {
        for _ in 0..count {
            assert!(session.move_agent(direction), "move {direction:?} from {} was blocked", session.state().agent);
        }
    }
}

pub fn machine(seed: u64) -> GameStateMachine {
    GameStateMachine::new(&GameConfig::seeded(seed)).expect("default config should be valid")
}

/// A seeded machine that has already left the start screen at t = 0.
pub fn playing_machine(seed: u64) -> GameStateMachine {
    let mut machine = machine(seed);
    machine
        .update(&[Intent::ConfirmSelect], Duration::ZERO)
        .expect("first level should build");
    machine
}

pub fn has_event(events: &[GameEvent], event: GameEvent) -> bool {
    events.contains(&event)
}
