//! Key chords, panel actions, and the binding table.
//!
//! Key events are resolved through an explicit chord-to-action map built
//! once at startup. Dispatch happens on [`KeyAction`] values matched in
//! the handler; there is no name-based method lookup.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// A physical key identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// Escape key.
    Escape,
    /// Function key F1.
    F1,
    /// Function key F2.
    F2,
    /// Function key F5.
    F5,
    /// Home key.
    Home,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Page up.
    PageUp,
    /// Page down.
    PageDown,
    /// Return/enter.
    Return,
    /// Backspace.
    Backspace,
    /// A printable character.
    Char(char),
}

/// A key code plus modifier state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyChord {
    /// The key code.
    pub code: KeyCode,
    /// Shift held.
    pub shift: bool,
    /// Control held.
    pub ctrl: bool,
}

impl KeyChord {
    /// A chord with no modifiers
    pub fn plain(code: KeyCode) -> Self {
        Self {
            code,
            shift: false,
            ctrl: false,
        }
    }
}

/// A key event delivered by the hosting window system
#[derive(Debug, Clone)]
pub struct KeyEvent {
    /// The key code.
    pub code: KeyCode,
    /// True on press, false on release.
    pub pressed: bool,
    /// Shift held.
    pub shift: bool,
    /// Control held.
    pub ctrl: bool,
    /// Name of the widget holding input focus, if any.
    pub receiver: Option<String>,
}

impl KeyEvent {
    /// A press event without modifiers, aimed at the given receiver
    pub fn press(code: KeyCode, receiver: Option<&str>) -> Self {
        Self {
            code,
            pressed: true,
            shift: false,
            ctrl: false,
            receiver: receiver.map(str::to_string),
        }
    }

    /// The release counterpart of [`press`](KeyEvent::press)
    pub fn release(code: KeyCode, receiver: Option<&str>) -> Self {
        Self {
            pressed: false,
            ..Self::press(code, receiver)
        }
    }

    /// The chord carried by this event
    pub fn chord(&self) -> KeyChord {
        KeyChord {
            code: self.code,
            shift: self.shift,
            ctrl: self.ctrl,
        }
    }
}

/// A panel action bound to a key chord
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Abort motion, or close the panel when idle.
    Abort,
    /// Toggle emergency stop.
    Estop,
    /// Toggle machine power.
    Power,
    /// Home the machine.
    Home,
    /// Run the loaded program.
    Run,
    /// Pause or resume the running program.
    Pause,
    /// Jog X positive.
    JogXPos,
    /// Jog X negative.
    JogXNeg,
    /// Jog Y positive.
    JogYPos,
    /// Jog Y negative.
    JogYNeg,
    /// Jog Z positive.
    JogZPos,
    /// Jog Z negative.
    JogZNeg,
}

static DEFAULT_BINDINGS: Lazy<Vec<(KeyChord, KeyAction)>> = Lazy::new(|| {
    vec![
        (KeyChord::plain(KeyCode::Escape), KeyAction::Abort),
        (KeyChord::plain(KeyCode::F1), KeyAction::Estop),
        (KeyChord::plain(KeyCode::F2), KeyAction::Power),
        (KeyChord::plain(KeyCode::Home), KeyAction::Home),
        (KeyChord::plain(KeyCode::F5), KeyAction::Run),
        (KeyChord::plain(KeyCode::Right), KeyAction::JogXPos),
        (KeyChord::plain(KeyCode::Left), KeyAction::JogXNeg),
        (KeyChord::plain(KeyCode::Up), KeyAction::JogYPos),
        (KeyChord::plain(KeyCode::Down), KeyAction::JogYNeg),
        (KeyChord::plain(KeyCode::PageUp), KeyAction::JogZPos),
        (KeyChord::plain(KeyCode::PageDown), KeyAction::JogZNeg),
    ]
});

/// Chord-to-action binding table
#[derive(Debug, Clone)]
pub struct Keymap {
    bindings: HashMap<KeyChord, KeyAction>,
}

impl Keymap {
    /// An empty keymap
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// The default binding table
    pub fn with_defaults() -> Self {
        Self {
            bindings: DEFAULT_BINDINGS.iter().copied().collect(),
        }
    }

    /// Bind a chord to an action, replacing any existing binding
    pub fn bind(&mut self, chord: KeyChord, action: KeyAction) {
        self.bindings.insert(chord, action);
    }

    /// Look up the action bound to a chord
    pub fn lookup(&self, chord: &KeyChord) -> Option<KeyAction> {
        self.bindings.get(chord).copied()
    }

    /// Number of bindings
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether the keymap has no bindings
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::with_defaults()
    }
}
