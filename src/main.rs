#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(coverage_nightly, coverage(off))]

use std::path::PathBuf;
use std::time::Duration;
use std::{env, fs};

use anyhow::{bail, Context};
use mouse_maze::autopilot;
use mouse_maze::config::GameConfig;
use mouse_maze::constants::LOOP_TIME;
use mouse_maze::events::{AudioCue, GameEvent, Intent};
use mouse_maze::formatter::increment_tick;
use mouse_maze::game::{
    Clock, GameOverChoice, GameStateMachine, ManualClock, MenuSelection, PauseChoice, Phase, PhaseKind,
};
use mouse_maze::input::{parse_script, Bindings, KeyEvent};
use mouse_maze::logging::setup_logging;
use smallvec::SmallVec;
use thousands::Separable;
use tracing::{debug, info};

/// Levels the autopilot clears when `--levels` is not given.
const DEFAULT_LEVELS: u32 = 3;

/// Where each frame's key events come from.
enum Driver {
    /// The autopilot plays until `levels_left` reaches zero, then ends the run through the menus.
    Autopilot { levels_left: u32, max_frames: u64 },
    /// A recorded key script, one frame per line. The run stops when the script does.
    Script(std::vec::IntoIter<Vec<KeyEvent>>),
}

fn flag_value<'a>(args: &'a [String], long: &str, short: &str) -> anyhow::Result<Option<&'a String>> {
    match args.iter().position(|arg| arg == long || arg == short) {
        Some(i) => args.get(i + 1).map(Some).with_context(|| format!("{long} needs a value")),
        None => Ok(None),
    }
}

fn parse_levels(args: &[String]) -> anyhow::Result<u32> {
    match flag_value(args, "--levels", "-l")? {
        Some(value) => value.parse().with_context(|| format!("Invalid level count: {value}")),
        None => Ok(DEFAULT_LEVELS),
    }
}

fn load_script(path: PathBuf) -> anyhow::Result<Vec<Vec<KeyEvent>>> {
    let text = fs::read_to_string(&path).with_context(|| format!("Could not read key script {}", path.display()))?;
    let frames = parse_script(&text).with_context(|| format!("Invalid key script {}", path.display()))?;
    info!(path = %path.display(), frames = frames.len(), "Loaded key script");
    Ok(frames)
}

/// Picks this frame's input: the autopilot while levels remain, then the menus to end the run.
fn choose_intents(game: &GameStateMachine, now: Duration, levels_left: u32) -> SmallVec<[Intent; 4]> {
    let snapshot = game.snapshot(now);
    let intent = match (snapshot.phase, snapshot.menu) {
        (PhaseKind::Start, _) => Some(Intent::ConfirmSelect),
        (PhaseKind::Playing, _) if levels_left == 0 => Some(Intent::PauseToggle),
        (PhaseKind::Playing, _) => autopilot::next_intent(&snapshot),
        (_, Some(MenuSelection::Pause(PauseChoice::Resume))) => Some(Intent::NavigateNext),
        (_, Some(MenuSelection::GameOver(GameOverChoice::Restart))) => Some(Intent::NavigateNext),
        (_, Some(_)) => Some(Intent::ConfirmSelect),
        (_, None) => None,
    };
    intent.into_iter().collect()
}

/// Types the autopilot's intents on the keyboard, one tap per intent.
fn autopilot_keys(bindings: &Bindings, intents: &[Intent]) -> Vec<KeyEvent> {
    intents
        .iter()
        .filter_map(|&intent| {
            let key = bindings.key_for(intent);
            if key.is_none() {
                debug!(intent = intent.as_ref(), "No key bound for autopilot intent");
            }
            key
        })
        .flat_map(KeyEvent::tap)
        .collect()
}

/// Runs a headless game on a simulated clock, driven by the autopilot or a recorded key script.
pub fn main() -> anyhow::Result<()> {
    setup_logging();

    let args: Vec<String> = env::args().collect();
    let levels = parse_levels(&args)?;
    let script = flag_value(&args, "--keys", "-k")?.map(PathBuf::from);

    let config = GameConfig::load().context("Could not load configuration")?;
    let mut game = GameStateMachine::new(&config)?;
    let mut bindings = Bindings::default();
    let clock = ManualClock::default();

    let mut driver = match script {
        Some(path) => Driver::Script(load_script(path)?.into_iter()),
        None => {
            // Each level must finish before its score drains; a few spare frames cover the menus.
            let seconds_per_level = config.starting_level_score / config.decay_per_second.max(1);
            let frames_per_level = u64::from(seconds_per_level.max(1)) * (1000 / LOOP_TIME.as_millis() as u64);
            Driver::Autopilot {
                levels_left: levels,
                max_frames: frames_per_level * u64::from(levels.max(1)) + 100,
            }
        }
    };

    info!(loop_time = ?LOOP_TIME, scripted = matches!(driver, Driver::Script(_)), "Starting headless game loop");

    let mut frame: u64 = 0;
    'frames: loop {
        frame += 1;
        increment_tick();
        clock.advance(LOOP_TIME);
        let now = clock.now();

        let key_events = match &mut driver {
            Driver::Autopilot { levels_left, max_frames } => {
                if frame > *max_frames {
                    bail!("Autopilot did not finish {levels} levels within {max_frames} frames");
                }
                autopilot_keys(&bindings, &choose_intents(&game, now, *levels_left))
            }
            Driver::Script(frames) => match frames.next() {
                Some(events) => events,
                None => break 'frames,
            },
        };

        // Held arrows only walk the mouse; in menus they would cycle the selection every frame.
        let intents = bindings.process(&key_events, game.phase() == Phase::Playing);

        for event in game.update(&intents, now)? {
            match event {
                GameEvent::Audio(cue) => {
                    debug!(cue = cue.as_ref(), "Audio cue");
                    if let (AudioCue::LevelComplete, Driver::Autopilot { levels_left, .. }) = (cue, &mut driver) {
                        *levels_left = levels_left.saturating_sub(1);
                    }
                }
                GameEvent::LevelStarted { level } => {
                    info!(level, "Level started");
                    println!("{}\n", game.snapshot(now));
                }
                GameEvent::PhaseChanged { to: PhaseKind::GameOver, .. } => {
                    println!("{}\n", game.snapshot(now));
                }
                GameEvent::PhaseChanged { .. } => {}
                GameEvent::Exit => break 'frames,
            }
        }
    }

    let total = game.session().map_or(0, |session| session.state().total_score);
    info!(frames = frame, total_score = total, "Game finished");
    println!("Final score: {}", total.separate_with_commas());

    Ok(())
}
