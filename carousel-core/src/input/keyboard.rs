//! Keyboard navigator
//!
//! Only reacts while focus is inside the carousel container.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Keys the carousel cares about. Everything else is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    Space,
    Other,
}

impl FromStr for Key {
    type Err = UnknownKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" | "arrowleft" | "arrow-left" => Ok(Self::ArrowLeft),
            "right" | "arrowright" | "arrow-right" => Ok(Self::ArrowRight),
            "home" => Ok(Self::Home),
            "end" => Ok(Self::End),
            "space" => Ok(Self::Space),
            _ => Err(UnknownKey(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown key `{0}` (expected left, right, home, end or space)")]
pub struct UnknownKey(pub String);

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ArrowLeft => "left",
            Self::ArrowRight => "right",
            Self::Home => "home",
            Self::End => "end",
            Self::Space => "space",
            Self::Other => "other",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCommand {
    Prev,
    Next,
    First,
    Last,
    ToggleAutoplay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyboardNavigator {
    enabled: bool,
}

impl KeyboardNavigator {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn interpret(&self, key: Key, focus_within: bool) -> Option<KeyCommand> {
        if !self.enabled || !focus_within {
            return None;
        }
        match key {
            Key::ArrowLeft => Some(KeyCommand::Prev),
            Key::ArrowRight => Some(KeyCommand::Next),
            Key::Home => Some(KeyCommand::First),
            Key::End => Some(KeyCommand::Last),
            Key::Space => Some(KeyCommand::ToggleAutoplay),
            Key::Other => None,
        }
    }
}
