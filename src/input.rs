use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

/// How long a key counts as held after its last press or repeat event when
/// the terminal never reports releases
const HOLD_WINDOW: Duration = Duration::from_millis(250);

/// Logical game keys that can be queried for their held state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    W,
    A,
    S,
    D,
    Space,
}

impl Key {
    fn from_code(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::Up => Some(Key::Up),
            KeyCode::Down => Some(Key::Down),
            KeyCode::Left => Some(Key::Left),
            KeyCode::Right => Some(Key::Right),
            KeyCode::Char('w') | KeyCode::Char('W') => Some(Key::W),
            KeyCode::Char('a') | KeyCode::Char('A') => Some(Key::A),
            KeyCode::Char('s') | KeyCode::Char('S') => Some(Key::S),
            KeyCode::Char('d') | KeyCode::Char('D') => Some(Key::D),
            KeyCode::Char(' ') => Some(Key::Space),
            _ => None,
        }
    }
}

/// Anything that can answer "is this key held right now"
pub trait KeySource {
    fn is_down(&self, key: Key) -> bool;
}

/// A fixed set of held keys
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeldKeys(HashSet<Key>);

impl HeldKeys {
    pub fn press(&mut self, key: Key) {
        self.0.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.0.remove(&key);
    }
}

impl KeySource for HeldKeys {
    fn is_down(&self, key: Key) -> bool {
        self.0.contains(&key)
    }
}

impl<const N: usize> From<[Key; N]> for HeldKeys {
    fn from(keys: [Key; N]) -> Self {
        Self(keys.into_iter().collect())
    }
}

impl FromIterator<Key> for HeldKeys {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Host-level commands that are not part of the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    PlayAgain,
    Quit,
}

/// Tracks held keys from crossterm events and collects host commands
pub struct InputManager {
    /// Last press (or repeat) time per held key
    held: HashMap<Key, Instant>,
    /// Whether the terminal reports key release events
    reports_release: bool,
    oneshot_actions: Vec<InputAction>,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new(false)
    }
}

impl InputManager {
    pub fn new(reports_release: bool) -> Self {
        Self {
            held: HashMap::new(),
            reports_release,
            oneshot_actions: Vec::new(),
        }
    }

    /// Drains pending terminal events without blocking.
    /// Should be called once per frame before the update step.
    pub fn poll_events(&mut self, game_over: bool) -> color_eyre::Result<()> {
        self.oneshot_actions.clear();

        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(key_event) => self.handle_key_event(key_event, game_over, Instant::now()),
                Event::FocusLost => {
                    log::debug!("Focus lost, clearing held keys");
                    self.clear();
                }
                _ => {}
            }
        }

        Ok(())
    }

    /// Processes a key event observed at `now`
    pub fn handle_key_event(&mut self, key_event: KeyEvent, game_over: bool, now: Instant) {
        match key_event.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                self.handle_key_press(key_event, game_over, now)
            }
            KeyEventKind::Release => {
                if let Some(key) = Key::from_code(key_event.code) {
                    self.held.remove(&key);
                }
            }
        }
    }

    fn handle_key_press(&mut self, key_event: KeyEvent, game_over: bool, now: Instant) {
        if matches!(
            key_event.code,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
        ) || (key_event.code == KeyCode::Char('c')
            && key_event.modifiers.contains(KeyModifiers::CONTROL))
        {
            self.oneshot_actions.push(InputAction::Quit);
            return;
        }

        if game_over
            && matches!(
                key_event.code,
                KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter
            )
        {
            self.oneshot_actions.push(InputAction::PlayAgain);
            return;
        }

        if let Some(key) = Key::from_code(key_event.code) {
            self.held.insert(key, now);
        }
    }

    /// Forgets every held key
    pub fn clear(&mut self) {
        self.held.clear();
    }

    /// Host commands collected by the last poll
    pub fn actions(&self) -> &[InputAction] {
        &self.oneshot_actions
    }

    /// Held state of `key` as of `now`
    pub fn is_down_at(&self, key: Key, now: Instant) -> bool {
        match self.held.get(&key) {
            Some(_) if self.reports_release => true,
            Some(last) => now.saturating_duration_since(*last) < HOLD_WINDOW,
            None => false,
        }
    }
}

impl KeySource for InputManager {
    fn is_down(&self, key: Key) -> bool {
        self.is_down_at(key, Instant::now())
    }
}
