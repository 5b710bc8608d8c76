//! Centralized shortcut and action system.
//!
//! Maps key events on the main screen to [`Action`]s, and supplies the help
//! line shown in the status bar from the same table.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Actions available while no binding editor is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Move focus to the nearest key above
    NavigateUp,
    /// Move focus to the nearest key below
    NavigateDown,
    /// Move focus to the nearest key on the left
    NavigateLeft,
    /// Move focus to the nearest key on the right
    NavigateRight,
    /// Move focus to the same slot on the other half
    SwitchHalf,
    /// Open the binding editor on the focused key
    SelectKey,
    /// Copy both array literals to the system clipboard
    CopyOutput,
    /// Save bindings to disk
    Save,
    /// Quit (asks first when there are unsaved changes)
    Quit,
    /// Clear the status line
    Cancel,
}

impl Action {
    /// Short label used in the help line.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::NavigateUp | Self::NavigateDown | Self::NavigateLeft | Self::NavigateRight => {
                "Move"
            }
            Self::SwitchHalf => "Other half",
            Self::SelectKey => "Edit key",
            Self::CopyOutput => "Copy arrays",
            Self::Save => "Save",
            Self::Quit => "Quit",
            Self::Cancel => "Clear",
        }
    }
}

/// A key plus modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    /// Key code
    pub code: KeyCode,
    /// Required modifiers
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    /// Creates a binding.
    #[must_use]
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Binding matching a key event exactly.
    #[must_use]
    pub const fn from_event(event: KeyEvent) -> Self {
        Self {
            code: event.code,
            modifiers: event.modifiers,
        }
    }
}

/// Keys advertised in the help line, one entry per action.
const HELP_KEYS: &[(&str, Action)] = &[
    ("←↑↓→/hjkl", Action::NavigateUp),
    ("Tab", Action::SwitchHalf),
    ("Enter/Click", Action::SelectKey),
    ("y", Action::CopyOutput),
    ("Ctrl+S", Action::Save),
    ("q", Action::Quit),
];

/// Lookup table from key bindings to actions.
pub struct ShortcutRegistry {
    bindings: HashMap<KeyBinding, Action>,
}

impl ShortcutRegistry {
    /// Builds the registry with the default main-screen shortcuts.
    #[must_use]
    pub fn new() -> Self {
        use KeyCode as K;
        use KeyModifiers as M;

        let mut registry = Self {
            bindings: HashMap::new(),
        };

        registry.register(K::Up, M::NONE, Action::NavigateUp);
        registry.register(K::Down, M::NONE, Action::NavigateDown);
        registry.register(K::Left, M::NONE, Action::NavigateLeft);
        registry.register(K::Right, M::NONE, Action::NavigateRight);
        registry.register(K::Char('k'), M::NONE, Action::NavigateUp);
        registry.register(K::Char('j'), M::NONE, Action::NavigateDown);
        registry.register(K::Char('h'), M::NONE, Action::NavigateLeft);
        registry.register(K::Char('l'), M::NONE, Action::NavigateRight);

        registry.register(K::Tab, M::NONE, Action::SwitchHalf);
        registry.register(K::BackTab, M::SHIFT, Action::SwitchHalf);

        registry.register(K::Enter, M::NONE, Action::SelectKey);
        registry.register(K::Char(' '), M::NONE, Action::SelectKey);

        registry.register(K::Char('y'), M::NONE, Action::CopyOutput);
        registry.register(K::Char('s'), M::CONTROL, Action::Save);
        registry.register(K::Char('q'), M::NONE, Action::Quit);
        registry.register(K::Char('q'), M::CONTROL, Action::Quit);
        registry.register(K::Esc, M::NONE, Action::Cancel);

        registry
    }

    fn register(&mut self, code: KeyCode, modifiers: KeyModifiers, action: Action) {
        self.bindings.insert(KeyBinding::new(code, modifiers), action);
    }

    /// Action bound to `event`, if any.
    #[must_use]
    pub fn lookup(&self, event: KeyEvent) -> Option<Action> {
        self.bindings.get(&KeyBinding::from_event(event)).copied()
    }

    /// `(keys, description)` pairs for the status bar help line.
    #[must_use]
    pub fn help_entries() -> Vec<(&'static str, &'static str)> {
        HELP_KEYS
            .iter()
            .map(|(keys, action)| (*keys, action.description()))
            .collect()
    }
}

impl Default for ShortcutRegistry {
    fn default() -> Self {
        Self::new()
    }
}
