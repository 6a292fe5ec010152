//! Keyboard bindings: turns key events from the host into [`Intent`]s.

use std::collections::{HashMap, HashSet};

use smallvec::SmallVec;
use tracing::trace;

use crate::error::ParseError;
use crate::events::Intent;

/// A key, independent of the windowing library that reported it.
///
/// The variant order decides which key [`Bindings::key_for`] prefers when several share an intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Escape,
    Tab,
    Space,
    /// A printable key. Letters are matched case-insensitively.
    Char(char),
}

impl Key {
    /// Looks a key up by name: `up`, `enter`, `esc`, ... or a single printable character.
    pub fn from_name(name: &str) -> Option<Self> {
        let key = match name.to_ascii_lowercase().as_str() {
            "up" => Key::Up,
            "down" => Key::Down,
            "left" => Key::Left,
            "right" => Key::Right,
            "enter" | "return" => Key::Enter,
            "escape" | "esc" => Key::Escape,
            "tab" => Key::Tab,
            "space" => Key::Space,
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if !c.is_whitespace() => Key::Char(c),
                    _ => return None,
                }
            }
        };
        Some(key.normalized())
    }

    fn normalized(self) -> Self {
        match self {
            Key::Char(c) => Key::Char(c.to_ascii_lowercase()),
            other => other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    Down(Key),
    Up(Key),
}

impl KeyEvent {
    /// Pressing and releasing `key` within one frame.
    pub fn tap(key: Key) -> [KeyEvent; 2] {
        [KeyEvent::Down(key), KeyEvent::Up(key)]
    }
}

/// Parses a recorded key script into per-frame key events.
///
/// Each line is one frame of whitespace-separated tokens: `+key` presses and holds a key, `-key`
/// releases it and a bare `key` taps it. Blank lines are idle frames.
pub fn parse_script(script: &str) -> Result<Vec<Vec<KeyEvent>>, ParseError> {
    script
        .lines()
        .enumerate()
        .map(|(i, line)| -> Result<Vec<KeyEvent>, ParseError> {
            let mut frame = Vec::new();
            for token in line.split_whitespace() {
                let unknown = || ParseError::UnknownKey {
                    line: i + 1,
                    token: token.to_string(),
                };
                if let Some(name) = token.strip_prefix('+').filter(|name| !name.is_empty()) {
                    frame.push(KeyEvent::Down(Key::from_name(name).ok_or_else(unknown)?));
                } else if let Some(name) = token.strip_prefix('-').filter(|name| !name.is_empty()) {
                    frame.push(KeyEvent::Up(Key::from_name(name).ok_or_else(unknown)?));
                } else {
                    frame.extend(KeyEvent::tap(Key::from_name(token).ok_or_else(unknown)?));
                }
            }
            Ok(frame)
        })
        .collect()
}

/// Intents decoded from one frame of key events.
pub type FrameIntents = SmallVec<[Intent; 4]>;

/// Held movement intents repeat in this order, matching the order moves are applied in.
const MOVEMENT_ORDER: [Intent; 4] = [Intent::MoveLeft, Intent::MoveRight, Intent::MoveUp, Intent::MoveDown];

/// Maps keys to intents and remembers which movement keys are held down.
#[derive(Debug, Clone)]
pub struct Bindings {
    key_bindings: HashMap<Key, Intent>,
    held: HashSet<Key>,
}

impl Default for Bindings {
    fn default() -> Self {
        let mut key_bindings = HashMap::new();

        // Agent movement
        key_bindings.insert(Key::Up, Intent::MoveUp);
        key_bindings.insert(Key::Char('w'), Intent::MoveUp);
        key_bindings.insert(Key::Down, Intent::MoveDown);
        key_bindings.insert(Key::Char('s'), Intent::MoveDown);
        key_bindings.insert(Key::Left, Intent::MoveLeft);
        key_bindings.insert(Key::Char('a'), Intent::MoveLeft);
        key_bindings.insert(Key::Right, Intent::MoveRight);
        key_bindings.insert(Key::Char('d'), Intent::MoveRight);

        // Game actions
        key_bindings.insert(Key::Char('p'), Intent::PauseToggle);
        key_bindings.insert(Key::Enter, Intent::ConfirmSelect);
        key_bindings.insert(Key::Space, Intent::ConfirmSelect);
        key_bindings.insert(Key::Tab, Intent::NavigateNext);
        key_bindings.insert(Key::Escape, Intent::Quit);
        key_bindings.insert(Key::Char('q'), Intent::Quit);

        Self {
            key_bindings,
            held: HashSet::new(),
        }
    }
}

impl Bindings {
    /// The intent bound to `key`, if any.
    pub fn intent(&self, key: Key) -> Option<Intent> {
        self.key_bindings.get(&key.normalized()).copied()
    }

    /// A key that produces `intent`, preferring named keys over letters.
    pub fn key_for(&self, intent: Intent) -> Option<Key> {
        self.key_bindings
            .iter()
            .filter(|&(_, &bound)| bound == intent)
            .map(|(&key, _)| key)
            .min()
    }

    /// Binds `key` to `intent`, replacing any previous binding for that key.
    pub fn bind(&mut self, key: Key, intent: Intent) {
        self.key_bindings.insert(key.normalized(), intent);
    }

    fn is_movement(&self, key: Key) -> bool {
        self.intent(key).and_then(Intent::direction).is_some()
    }

    /// Decodes one frame of key events.
    ///
    /// Every bound key emits its intent when pressed. With `repeat_held` set, movement keys held
    /// down from earlier frames emit their intents again, once per direction, so the agent keeps
    /// walking; hosts only enable it while playing so menus do not cycle on a held arrow.
    ///
    /// Repeats come first: they continue the previous frame, so a pause pressed this frame cannot
    /// hand a held arrow to the pause menu.
    pub fn process(&mut self, events: &[KeyEvent], repeat_held: bool) -> FrameIntents {
        let mut pressed = FrameIntents::new();
        let mut pressed_now = HashSet::new();

        for &event in events {
            match event {
                KeyEvent::Down(key) => {
                    let key = key.normalized();
                    if let Some(intent) = self.intent(key) {
                        trace!(?key, intent = intent.as_ref(), "Key pressed");
                        pressed.push(intent);
                    }
                    if self.is_movement(key) {
                        self.held.insert(key);
                        pressed_now.insert(key);
                    }
                }
                KeyEvent::Up(key) => {
                    self.held.remove(&key.normalized());
                }
            }
        }

        if !repeat_held {
            return pressed;
        }

        let repeating: HashSet<Intent> = self
            .held
            .iter()
            .filter(|key| !pressed_now.contains(*key))
            .filter_map(|&key| self.intent(key))
            .filter(|intent| !pressed.contains(intent))
            .collect();
        let mut intents: FrameIntents = MOVEMENT_ORDER
            .into_iter()
            .filter(|intent| repeating.contains(intent))
            .collect();
        intents.extend(pressed);
        intents
    }

    /// Forgets every held key, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        self.held.clear();
    }
}
