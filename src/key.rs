//! Type-safe key bindings.
//!
//! A [`Binding`] groups the key presses that trigger one action together with
//! the text shown for it in the help line. Components expose their bindings
//! through the [`KeyMap`] trait so a [`crate::help::Model`] can render them.
//!
//! ```rust
//! use binary_pomodoro::key::Binding;
//! use bubbletea_rs::KeyMsg;
//! use crossterm::event::{KeyCode, KeyModifiers};
//!
//! let quit = Binding::new(vec![KeyCode::Char('q'), KeyCode::Esc]).with_help("q", "quit");
//! let force = Binding::new(vec![(KeyCode::Char('c'), KeyModifiers::CONTROL)]);
//!
//! let msg = KeyMsg { key: KeyCode::Char('q'), modifiers: KeyModifiers::NONE };
//! assert!(quit.matches(&msg));
//! assert!(!force.matches(&msg));
//! ```

use bubbletea_rs::KeyMsg;
use crossterm::event::{KeyCode, KeyModifiers};

/// A key code plus the modifiers that must be held with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    /// The key.
    pub code: KeyCode,
    /// Modifiers that must be held.
    pub modifiers: KeyModifiers,
}

impl From<KeyCode> for KeyPress {
    fn from(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }
}

impl From<(KeyCode, KeyModifiers)> for KeyPress {
    fn from((code, modifiers): (KeyCode, KeyModifiers)) -> Self {
        Self { code, modifiers }
    }
}

/// Help text for a binding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Help {
    /// Short key label, e.g. `"space"`.
    pub key: String,
    /// What the key does, e.g. `"start/pause"`.
    pub desc: String,
}

/// A set of key presses bound to one action.
#[derive(Debug, Clone)]
pub struct Binding {
    keys: Vec<KeyPress>,
    help: Help,
    enabled: bool,
}

impl Binding {
    /// Creates an enabled binding for the given key presses.
    pub fn new<K, I>(keys: I) -> Self
    where
        K: Into<KeyPress>,
        I: IntoIterator<Item = K>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            help: Help::default(),
            enabled: true,
        }
    }

    /// Sets the help label and description.
    pub fn with_help(mut self, key: impl Into<String>, desc: impl Into<String>) -> Self {
        self.help = Help {
            key: key.into(),
            desc: desc.into(),
        };
        self
    }

    /// The key presses of this binding.
    pub fn keys(&self) -> &[KeyPress] {
        &self.keys
    }

    /// The help text of this binding.
    pub fn help(&self) -> &Help {
        &self.help
    }

    /// Whether the binding currently reacts to input.
    pub fn enabled(&self) -> bool {
        self.enabled && !self.keys.is_empty()
    }

    /// Enables or disables the binding.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Whether `key_msg` triggers this binding. Extra modifiers held on top
    /// of the required ones (shift for `+`, say) do not prevent a match.
    pub fn matches(&self, key_msg: &KeyMsg) -> bool {
        self.enabled()
            && self
                .keys
                .iter()
                .any(|k| k.code == key_msg.key && key_msg.modifiers.contains(k.modifiers))
    }
}

/// Components that can describe their bindings for the help line.
pub trait KeyMap {
    /// Bindings for the single-line help view.
    fn short_help(&self) -> Vec<&Binding>;
    /// Bindings grouped into columns for the expanded help view.
    fn full_help(&self) -> Vec<Vec<&Binding>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyMsg {
        KeyMsg { key: code, modifiers }
    }

    #[test]
    fn test_matches_any_listed_key() {
        let binding = Binding::new(vec![KeyCode::Char('+'), KeyCode::Up]);

        assert!(binding.matches(&key(KeyCode::Char('+'), KeyModifiers::NONE)));
        assert!(binding.matches(&key(KeyCode::Up, KeyModifiers::NONE)));
        assert!(!binding.matches(&key(KeyCode::Down, KeyModifiers::NONE)));
    }

    #[test]
    fn test_extra_modifiers_still_match() {
        let binding = Binding::new(vec![KeyCode::Char('+')]);
        assert!(binding.matches(&key(KeyCode::Char('+'), KeyModifiers::SHIFT)));
    }

    #[test]
    fn test_required_modifiers() {
        let binding = Binding::new(vec![(KeyCode::Char('c'), KeyModifiers::CONTROL)]);

        assert!(binding.matches(&key(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!binding.matches(&key(KeyCode::Char('c'), KeyModifiers::NONE)));
    }

    #[test]
    fn test_disabled_binding_never_matches() {
        let mut binding = Binding::new(vec![KeyCode::Enter]).with_help("enter", "toggle");
        binding.set_enabled(false);

        assert!(!binding.enabled());
        assert!(!binding.matches(&key(KeyCode::Enter, KeyModifiers::NONE)));
    }

    #[test]
    fn test_empty_binding_is_disabled() {
        let binding = Binding::new(Vec::<KeyCode>::new());
        assert!(!binding.enabled());
    }

    #[test]
    fn test_with_help() {
        let binding = Binding::new(vec![KeyCode::Char(' ')]).with_help("space", "start/pause");

        assert_eq!(binding.help().key, "space");
        assert_eq!(binding.help().desc, "start/pause");
        assert_eq!(binding.keys().len(), 1);
    }
}
