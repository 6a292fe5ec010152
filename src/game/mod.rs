//! Gameplay: the session, the phase machine around it, and the views it exposes.

pub mod clock;
pub mod session;
pub mod snapshot;
pub mod state;

pub use clock::{flash_visible, Clock, ManualClock, SystemClock};
pub use session::{GameSession, ScoreRules, SessionState, TickStatus};
pub use snapshot::{BoardView, Snapshot};
pub use state::{GameOverChoice, GameStateMachine, MenuSelection, PauseChoice, Phase, PhaseKind};
