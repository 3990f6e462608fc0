use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Action, Direction};

/// Playback speed presets for the agent terminal mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackSpeed {
    /// 2 Hz
    Slow,
    /// The configured tick interval
    Normal,
    /// 50 Hz
    Fast,
    /// ~250 Hz, as fast as the terminal keeps up
    Turbo,
}

impl PlaybackSpeed {
    /// Tick interval in milliseconds, given the configured normal interval
    pub fn interval_ms(&self, normal_ms: u64) -> u64 {
        match self {
            Self::Slow => 500,
            Self::Normal => normal_ms,
            Self::Fast => 20,
            Self::Turbo => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Slow => "Slow",
            Self::Normal => "Normal",
            Self::Fast => "Fast",
            Self::Turbo => "Turbo",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    GameAction(Action),
    Restart,
    TogglePause,
    SetSpeed(PlaybackSpeed),
    Quit,
    None,
}

/// Which set of key bindings is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputContext {
    /// Keyboard steering with arrows or WASD
    Manual,
    /// Watching the agent: pause, speed and restart only
    Agent,
}

pub struct InputHandler {
    context: InputContext,
}

impl InputHandler {
    pub fn new(context: InputContext) -> Self {
        Self { context }
    }

    pub fn manual() -> Self {
        Self::new(InputContext::Manual)
    }

    pub fn agent() -> Self {
        Self::new(InputContext::Agent)
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return KeyAction::Quit,
            KeyCode::Char('r') | KeyCode::Char('R') => return KeyAction::Restart,
            _ => {}
        }

        match self.context {
            InputContext::Manual => Self::manual_key(key.code),
            InputContext::Agent => Self::agent_key(key.code),
        }
    }

    fn manual_key(code: KeyCode) -> KeyAction {
        let direction = match code {
            KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Direction::Up,
            KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Direction::Down,
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Direction::Left,
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Direction::Right,
            _ => return KeyAction::None,
        };
        KeyAction::GameAction(Action::Move(direction))
    }

    fn agent_key(code: KeyCode) -> KeyAction {
        match code {
            KeyCode::Char(' ') => KeyAction::TogglePause,
            KeyCode::Char('1') => KeyAction::SetSpeed(PlaybackSpeed::Slow),
            KeyCode::Char('2') => KeyAction::SetSpeed(PlaybackSpeed::Normal),
            KeyCode::Char('3') => KeyAction::SetSpeed(PlaybackSpeed::Fast),
            KeyCode::Char('4') => KeyAction::SetSpeed(PlaybackSpeed::Turbo),
            _ => KeyAction::None,
        }
    }
}
