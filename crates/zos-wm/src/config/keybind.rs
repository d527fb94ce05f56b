//! Keybind parsing (`"super+shift+h"`)

use std::str::FromStr;

use crate::error::ConfigError;
use super::Action;

/// Modifier state carried by a key event
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub logo: bool,
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    /// No modifiers held
    pub const NONE: Modifiers = Modifiers {
        logo: false,
        shift: false,
        ctrl: false,
        alt: false,
    };

    /// Only the logo (super) key held
    pub const LOGO: Modifiers = Modifiers {
        logo: true,
        shift: false,
        ctrl: false,
        alt: false,
    };

    /// Logo and shift held
    pub const LOGO_SHIFT: Modifiers = Modifiers {
        logo: true,
        shift: true,
        ctrl: false,
        alt: false,
    };
}

/// A modifier set plus a key name, compared case-insensitively
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    pub modifiers: Modifiers,
    pub key: String,
}

impl KeyCombo {
    /// Create a combo; the key name is normalised to lowercase
    pub fn new(modifiers: Modifiers, key: &str) -> Self {
        Self {
            modifiers,
            key: key.to_ascii_lowercase(),
        }
    }

    /// Check a key event against this combo
    pub fn matches(&self, modifiers: Modifiers, key: &str) -> bool {
        self.modifiers == modifiers && self.key.eq_ignore_ascii_case(key)
    }
}

impl FromStr for KeyCombo {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidKeybind(s.to_string());
        let mut modifiers = Modifiers::NONE;
        let mut key: Option<&str> = None;

        for part in s.split('+').map(str::trim) {
            if part.is_empty() {
                return Err(invalid());
            }
            match part.to_ascii_lowercase().as_str() {
                "super" | "logo" | "mod4" => modifiers.logo = true,
                "shift" => modifiers.shift = true,
                "ctrl" | "control" => modifiers.ctrl = true,
                "alt" | "mod1" => modifiers.alt = true,
                _ => {
                    // Exactly one non-modifier key per combo
                    if key.replace(part).is_some() {
                        return Err(invalid());
                    }
                }
            }
        }

        key.map(|k| KeyCombo::new(modifiers, k)).ok_or_else(invalid)
    }
}

/// A parsed keybind
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Keybind {
    pub combo: KeyCombo,
    pub action: Action,
}
