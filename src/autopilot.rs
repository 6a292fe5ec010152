//! A shortest-path player used by the headless host.

use pathfinding::prelude::bfs;
use tracing::error;

use crate::events::Intent;
use crate::game::snapshot::{BoardView, Snapshot};
use crate::game::state::PhaseKind;
use crate::map::direction::Direction;
use crate::map::grid::Position;

/// Where the autopilot is heading: the cheese while it is uncollected, then the exit.
pub fn target(board: &BoardView<'_>) -> Position {
    if board.item_collected {
        board.exit
    } else {
        board.item
    }
}

/// Finds the shortest open path from the agent to `goal`, both ends included.
pub fn find_path(board: &BoardView<'_>, goal: Position) -> Option<Vec<Position>> {
    bfs(
        &board.agent,
        |&position| board.grid.open_neighbors(position).collect::<Vec<_>>(),
        |&position| position == goal,
    )
}

/// The next movement that brings the agent one step closer to its target.
///
/// Returns `None` outside of play, or when the agent already stands on the target.
pub fn next_intent(snapshot: &Snapshot<'_>) -> Option<Intent> {
    if snapshot.phase != PhaseKind::Playing {
        return None;
    }
    let board = snapshot.board.as_ref()?;
    let goal = target(board);

    let Some(path) = find_path(board, goal) else {
        error!(agent = %board.agent, goal = %goal, "No path to the autopilot target");
        return None;
    };

    let next = *path.get(1)?;
    Direction::DIRECTIONS
        .into_iter()
        .find(|&direction| board.grid.step(board.agent, direction) == Some(next))
        .map(Intent::from)
}
