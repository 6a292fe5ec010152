//! The top-level phase machine that owns the session and turns intents into gameplay.

use std::time::Duration;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use smallvec::SmallVec;
use strum_macros::{AsRefStr, EnumDiscriminants, EnumIter};
use tracing::{debug, info};

use crate::config::GameConfig;
use crate::error::GameResult;
use crate::events::{AudioCue, GameEvent, Intent};
use crate::game::session::{GameSession, ScoreRules, TickStatus};
use crate::game::snapshot::Snapshot;
use crate::map::level::LevelFactory;

/// The events a single update can produce. Four covers every realistic frame without spilling.
pub type FrameEvents = SmallVec<[GameEvent; 4]>;

/// Entries of the pause menu, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, AsRefStr, EnumIter)]
pub enum PauseChoice {
    #[default]
    Resume,
    #[strum(serialize = "End Game")]
    EndGame,
}

impl PauseChoice {
    pub const fn toggle(self) -> Self {
        match self {
            PauseChoice::Resume => PauseChoice::EndGame,
            PauseChoice::EndGame => PauseChoice::Resume,
        }
    }
}

/// Entries of the game-over menu, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, AsRefStr, EnumIter)]
pub enum GameOverChoice {
    #[default]
    Restart,
    Quit,
}

impl GameOverChoice {
    pub const fn toggle(self) -> Self {
        match self {
            GameOverChoice::Restart => GameOverChoice::Quit,
            GameOverChoice::Quit => GameOverChoice::Restart,
        }
    }
}

/// The highlighted entry of whichever menu is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuSelection {
    Pause(PauseChoice),
    GameOver(GameOverChoice),
}

/// The overall stage of the game from a high-level perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumDiscriminants)]
#[strum_discriminants(name(PhaseKind), derive(Hash, AsRefStr))]
pub enum Phase {
    /// The title screen, waiting for the player to confirm.
    Start,
    /// The mouse is in the maze and the level score is draining.
    Playing,
    /// Gameplay is frozen; `paused_at` is when the freeze began.
    Paused { selection: PauseChoice, paused_at: Duration },
    /// The run has ended. The last session stays around so its score can be shown.
    GameOver { selection: GameOverChoice },
}

impl Default for Phase {
    fn default() -> Self {
        Phase::Start
    }
}

impl Phase {
    pub fn kind(&self) -> PhaseKind {
        self.into()
    }

    pub fn menu(&self) -> Option<MenuSelection> {
        match *self {
            Phase::Paused { selection, .. } => Some(MenuSelection::Pause(selection)),
            Phase::GameOver { selection } => Some(MenuSelection::GameOver(selection)),
            Phase::Start | Phase::Playing => None,
        }
    }
}

/// Drives a whole game: phases, menus, the current session and level generation.
///
/// The host calls [`update`](GameStateMachine::update) once per frame with that frame's intents
/// and a single clock sample, then dispatches the returned events and renders a
/// [`snapshot`](GameStateMachine::snapshot).
#[derive(Debug)]
pub struct GameStateMachine {
    phase: Phase,
    session: Option<GameSession>,
    factory: LevelFactory,
    rules: ScoreRules,
    rng: SmallRng,
    exit_requested: bool,
}

impl GameStateMachine {
    /// Creates a machine on the start screen.
    ///
    /// A configured seed makes every level of the run reproducible; otherwise the generator is
    /// seeded from the operating system.
    pub fn new(config: &GameConfig) -> GameResult<Self> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        info!(width = config.width, height = config.height, seed = ?config.seed, "Game created");

        Ok(Self {
            phase: Phase::default(),
            session: None,
            factory: LevelFactory::new(config),
            rules: ScoreRules::from(config),
            rng,
            exit_requested: false,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The current session, if a run has been started. Kept after game over.
    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    /// Whether the player has asked to leave the game.
    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    /// A read-only view of everything a renderer needs at `now`.
    pub fn snapshot(&self, now: Duration) -> Snapshot<'_> {
        Snapshot::capture(&self.phase, self.session.as_ref(), now)
    }

    /// Applies one frame.
    ///
    /// Intents are handled in order against the phase current at that point, so a frame can both
    /// start a run and move in it. While playing, the frame then advances the clock, collects the
    /// item and checks the exit, in that order; a time-out ends the game within the same update.
    ///
    /// # Errors
    ///
    /// Fails only when a new level cannot be generated, which is a configuration problem.
    pub fn update(&mut self, intents: &[Intent], now: Duration) -> GameResult<FrameEvents> {
        let mut events = FrameEvents::new();
        if self.exit_requested {
            return Ok(events);
        }

        for &intent in intents {
            self.handle_intent(intent, now, &mut events)?;
            if self.exit_requested {
                return Ok(events);
            }
        }

        if self.phase == Phase::Playing {
            self.play_frame(now, &mut events)?;
        }

        Ok(events)
    }

    fn handle_intent(&mut self, intent: Intent, now: Duration, events: &mut FrameEvents) -> GameResult<()> {
        match (self.phase, intent) {
            (Phase::Start, Intent::ConfirmSelect) => self.start_run(now, events)?,
            (Phase::Start | Phase::Playing, Intent::Quit) => self.request_exit(events),

            (Phase::Playing, Intent::PauseToggle) => {
                let paused = Phase::Paused {
                    selection: PauseChoice::default(),
                    paused_at: now,
                };
                self.set_phase(paused, events);
            }
            (Phase::Playing, intent) => {
                if let (Some(direction), Some(session)) = (intent.direction(), self.session.as_mut()) {
                    session.move_agent(direction);
                }
            }

            (Phase::Paused { paused_at, .. }, Intent::PauseToggle)
            | (
                Phase::Paused {
                    selection: PauseChoice::Resume,
                    paused_at,
                },
                Intent::ConfirmSelect,
            ) => self.resume(paused_at, now, events),
            (
                Phase::Paused {
                    selection: PauseChoice::EndGame,
                    ..
                },
                Intent::ConfirmSelect,
            )
            | (Phase::Paused { .. }, Intent::Quit) => self.end_game(events),
            (
                Phase::Paused { selection, paused_at },
                Intent::NavigatePrev | Intent::NavigateNext | Intent::MoveUp | Intent::MoveDown,
            ) => {
                self.phase = Phase::Paused {
                    selection: selection.toggle(),
                    paused_at,
                };
            }

            (
                Phase::GameOver {
                    selection: GameOverChoice::Restart,
                },
                Intent::ConfirmSelect,
            ) => self.start_run(now, events)?,
            (
                Phase::GameOver {
                    selection: GameOverChoice::Quit,
                },
                Intent::ConfirmSelect,
            )
            | (Phase::GameOver { .. }, Intent::Quit) => self.request_exit(events),
            (
                Phase::GameOver { selection },
                Intent::NavigatePrev | Intent::NavigateNext | Intent::MoveLeft | Intent::MoveRight,
            ) => {
                self.phase = Phase::GameOver {
                    selection: selection.toggle(),
                };
            }

            // Anything else is meaningless in the current phase
            _ => {}
        }

        Ok(())
    }

    /// Builds the first level of a fresh run and starts playing it.
    fn start_run(&mut self, now: Duration, events: &mut FrameEvents) -> GameResult<()> {
        let level = self.factory.build_level(&mut self.rng)?;
        self.session = Some(GameSession::new(level, self.rules, now));
        events.push(GameEvent::LevelStarted { level: 1 });
        self.set_phase(Phase::Playing, events);
        Ok(())
    }

    fn play_frame(&mut self, now: Duration, events: &mut FrameEvents) -> GameResult<()> {
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };

        if session.tick(now) == TickStatus::TimedOut {
            self.end_game(events);
            return Ok(());
        }

        if session.collect_item_if_present() {
            events.push(AudioCue::ItemCollected.into());
        }

        if session.check_exit() {
            events.push(AudioCue::LevelComplete.into());
            let level = self.factory.build_level(&mut self.rng)?;
            session.advance(level, now);
            events.push(GameEvent::LevelStarted {
                level: session.state().level,
            });
        }

        Ok(())
    }

    fn resume(&mut self, paused_at: Duration, now: Duration, events: &mut FrameEvents) {
        if let Some(session) = self.session.as_mut() {
            session.exclude_pause(now.saturating_sub(paused_at));
        }
        self.set_phase(Phase::Playing, events);
    }

    fn end_game(&mut self, events: &mut FrameEvents) {
        if let Some(session) = self.session.as_mut() {
            session.end_game();
            info!(
                level = session.state().level,
                total_score = session.state().total_score,
                "Game over"
            );
        }
        events.push(AudioCue::GameOver.into());
        self.set_phase(
            Phase::GameOver {
                selection: GameOverChoice::default(),
            },
            events,
        );
    }

    fn request_exit(&mut self, events: &mut FrameEvents) {
        info!(phase = self.phase.kind().as_ref(), "Exit requested");
        self.exit_requested = true;
        events.push(GameEvent::Exit);
    }

    fn set_phase(&mut self, new_phase: Phase, events: &mut FrameEvents) {
        let old_state = self.phase.kind();
        let new_state = new_phase.kind();
        self.phase = new_phase;

        if old_state != new_state {
            debug!(old_state = ?old_state, new_state = ?new_state, "Game stage transition");
            events.push(GameEvent::PhaseChanged {
                from: old_state,
                to: new_state,
            });
        }
    }
}
