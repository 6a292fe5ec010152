use strum_macros::AsRefStr;

use crate::game::state::PhaseKind;
use crate::map::direction::Direction;

/// A discrete player intent, already decoded from whatever device produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, AsRefStr)]
pub enum Intent {
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    PauseToggle,
    ConfirmSelect,
    NavigatePrev,
    NavigateNext,
    Quit,
}

impl Intent {
    /// The movement direction this intent carries, if any.
    pub const fn direction(self) -> Option<Direction> {
        match self {
            Intent::MoveLeft => Some(Direction::Left),
            Intent::MoveRight => Some(Direction::Right),
            Intent::MoveUp => Some(Direction::Up),
            Intent::MoveDown => Some(Direction::Down),
            _ => None,
        }
    }
}

impl From<Direction> for Intent {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Left => Intent::MoveLeft,
            Direction::Right => Intent::MoveRight,
            Direction::Up => Intent::MoveUp,
            Direction::Down => Intent::MoveDown,
        }
    }
}

/// Fire-and-forget cues for the audio collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, AsRefStr)]
pub enum AudioCue {
    ItemCollected,
    LevelComplete,
    GameOver,
}

/// Everything a single update reports back to the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Audio(AudioCue),
    PhaseChanged { from: PhaseKind, to: PhaseKind },
    LevelStarted { level: u32 },
    /// The host should stop its loop and exit.
    Exit,
}

impl From<AudioCue> for GameEvent {
    fn from(cue: AudioCue) -> Self {
        GameEvent::Audio(cue)
    }
}
