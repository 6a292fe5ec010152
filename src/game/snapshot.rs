//! Read-only views handed to renderers.

use std::fmt;
use std::time::Duration;

use strum::IntoEnumIterator;

use crate::game::clock::flash_visible;
use crate::game::session::GameSession;
use crate::game::state::{GameOverChoice, MenuSelection, PauseChoice, Phase, PhaseKind};
use crate::map::direction::Facing;
use crate::map::grid::{Grid, Position};

/// The maze and everything standing in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardView<'a> {
    pub grid: &'a Grid,
    pub agent: Position,
    pub facing: Facing,
    pub item: Position,
    pub item_collected: bool,
    pub exit: Position,
}

impl BoardView<'_> {
    /// The character drawn at `position`. Later layers win: wall or floor, exit, item, agent.
    pub fn glyph(&self, position: Position) -> char {
        if position == self.agent {
            match self.facing {
                Facing::Left => '<',
                Facing::Right => '>',
            }
        } else if position == self.item && !self.item_collected {
            '%'
        } else if position == self.exit {
            'X'
        } else if self.grid.is_open(position) {
            '.'
        } else {
            '#'
        }
    }
}

/// Everything needed to draw one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot<'a> {
    pub phase: PhaseKind,
    /// Present while playing or paused
    pub board: Option<BoardView<'a>>,
    pub level_score: u32,
    pub total_score: u64,
    /// 0 until the first run starts
    pub level: u32,
    pub menu: Option<MenuSelection>,
    /// Whether blinking elements (start arrow, pause label) are lit this frame
    pub flash: bool,
}

impl<'a> Snapshot<'a> {
    pub fn capture(phase: &Phase, session: Option<&'a GameSession>, now: Duration) -> Self {
        let kind = phase.kind();
        let board = session
            .filter(|_| matches!(kind, PhaseKind::Playing | PhaseKind::Paused))
            .map(|session| {
                let state = session.state();
                let level = session.level();
                BoardView {
                    grid: level.grid(),
                    agent: state.agent,
                    facing: state.facing,
                    item: level.item(),
                    item_collected: state.item_collected,
                    exit: level.exit(),
                }
            });

        Self {
            phase: kind,
            board,
            level_score: session.map_or(0, |s| s.state().level_score),
            total_score: session.map_or(0, |s| s.state().total_score),
            level: session.map_or(0, |s| s.state().level),
            menu: phase.menu(),
            flash: flash_visible(now),
        }
    }
}

fn write_board(f: &mut fmt::Formatter<'_>, board: &BoardView<'_>) -> fmt::Result {
    for y in 0..board.grid.height() {
        writeln!(f)?;
        for x in 0..board.grid.width() {
            write!(f, "{}", board.glyph(Position::new(x, y)))?;
        }
    }
    Ok(())
}

fn write_choice(f: &mut fmt::Formatter<'_>, label: &str, highlighted: bool) -> fmt::Result {
    if highlighted {
        write!(f, "[{label}]")
    } else {
        write!(f, " {label} ")
    }
}

impl fmt::Display for Snapshot<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.phase == PhaseKind::Start {
            let arrow = if self.flash { ">" } else { " " };
            return write!(f, "MOUSE MAZE\n{arrow} Press Enter to start");
        }

        write!(
            f,
            "Level {}  Score {}  Total {}",
            self.level, self.level_score, self.total_score
        )?;

        if let Some(board) = &self.board {
            write_board(f, board)?;
        }

        match self.menu {
            Some(MenuSelection::Pause(selection)) => {
                write!(f, "\n{}\n", if self.flash { "PAUSED" } else { "" })?;
                for choice in PauseChoice::iter() {
                    write_choice(f, choice.as_ref(), choice == selection)?;
                }
            }
            Some(MenuSelection::GameOver(selection)) => {
                write!(f, "\nGAME OVER\n")?;
                for choice in GameOverChoice::iter() {
                    write_choice(f, choice.as_ref(), choice == selection)?;
                }
            }
            None => {}
        }

        Ok(())
    }
}
