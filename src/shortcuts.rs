//! Key binding configuration.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// All key bindings, loaded from `shortcut.toml` when present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shortcuts {
    pub main: MainShortcuts,
    pub input_box: InputBoxShortcuts,
}

/// Bindings for the main view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MainShortcuts {
    pub quit: Vec<String>,
    pub import: Vec<String>,
    pub delete: Vec<String>,
    pub prev_screen: Vec<String>,
    pub next_screen: Vec<String>,
    pub up: Vec<String>,
    pub down: Vec<String>,
    pub press: Vec<String>,
}

/// Bindings inside the input box popup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputBoxShortcuts {
    pub confirm: Vec<String>,
    pub cancel: Vec<String>,
    pub backspace: Vec<String>,
    pub delete: Vec<String>,
    pub left: Vec<String>,
    pub right: Vec<String>,
    pub home: Vec<String>,
    pub end: Vec<String>,
    pub clear_line: Vec<String>,
}

impl Shortcuts {
    /// Load from TOML, falling back to defaults when the file is missing.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }
}

impl Default for Shortcuts {
    fn default() -> Self {
        Self {
            main: MainShortcuts {
                quit: vec!["q".into()],
                import: vec!["i".into()],
                delete: vec!["d".into()],
                prev_screen: vec!["Left".into(), "h".into()],
                next_screen: vec!["Right".into(), "l".into(), "Tab".into()],
                up: vec!["Up".into(), "k".into()],
                down: vec!["Down".into(), "j".into()],
                press: vec!["Enter".into()],
            },
            input_box: InputBoxShortcuts {
                confirm: vec!["Enter".into()],
                cancel: vec!["Esc".into()],
                backspace: vec!["Backspace".into()],
                delete: vec!["Delete".into()],
                left: vec!["Left".into()],
                right: vec!["Right".into()],
                home: vec!["Home".into()],
                end: vec!["End".into()],
                clear_line: vec!["Ctrl+u".into()],
            },
        }
    }
}

/// Whether a key event matches any of the given shortcut specs.
pub fn matches_shortcut(key: &KeyEvent, shortcuts: &[String]) -> bool {
    shortcuts
        .iter()
        .filter_map(|s| parse_key_spec(s))
        .any(|(modifiers, code)| key.modifiers == modifiers && key.code == code)
}

/// Parse a spec like "a", "Enter", or "Ctrl+u" into modifiers plus a key
/// code. Unknown specs yield `None` and simply never match.
fn parse_key_spec(spec: &str) -> Option<(KeyModifiers, KeyCode)> {
    let mut parts = spec.split('+').rev();
    let key = parts.next()?;

    let mut modifiers = KeyModifiers::empty();
    for modifier in parts {
        match modifier.to_ascii_lowercase().as_str() {
            "ctrl" => modifiers |= KeyModifiers::CONTROL,
            "alt" => modifiers |= KeyModifiers::ALT,
            "shift" => modifiers |= KeyModifiers::SHIFT,
            _ => return None,
        }
    }

    let code = match key.to_ascii_lowercase().as_str() {
        "enter" => KeyCode::Enter,
        "esc" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "backspace" => KeyCode::Backspace,
        "delete" => KeyCode::Delete,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        _ => {
            let mut chars = key.chars();
            let c = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            KeyCode::Char(c)
        }
    };

    Some((modifiers, code))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_simple_char() {
        let key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::empty());
        assert!(matches_shortcut(&key, &[String::from("q")]));
        assert!(!matches_shortcut(&key, &[String::from("w")]));
    }

    #[test]
    fn test_matches_special_key() {
        let key = KeyEvent::new(KeyCode::Enter, KeyModifiers::empty());
        assert!(matches_shortcut(&key, &[String::from("Enter")]));
        assert!(!matches_shortcut(&key, &[String::from("Esc")]));
    }

    #[test]
    fn test_modifier_must_match_exactly() {
        let key = KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL);
        assert!(matches_shortcut(&key, &[String::from("Ctrl+u")]));
        assert!(!matches_shortcut(&key, &[String::from("u")]));

        let plain = KeyEvent::new(KeyCode::Char('u'), KeyModifiers::empty());
        assert!(!matches_shortcut(&plain, &[String::from("Ctrl+u")]));
    }

    #[test]
    fn test_alternate_bindings() {
        let key_left = KeyEvent::new(KeyCode::Left, KeyModifiers::empty());
        let key_h = KeyEvent::new(KeyCode::Char('h'), KeyModifiers::empty());
        let specs = vec![String::from("Left"), String::from("h")];
        assert!(matches_shortcut(&key_left, &specs));
        assert!(matches_shortcut(&key_h, &specs));
        assert!(!matches_shortcut(
            &KeyEvent::new(KeyCode::Right, KeyModifiers::empty()),
            &specs
        ));
    }

    #[test]
    fn test_unknown_spec_never_matches() {
        let key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::empty());
        assert!(!matches_shortcut(&key, &[String::from("Hyper+q")]));
        assert!(!matches_shortcut(&key, &[String::from("qq")]));
    }
}
