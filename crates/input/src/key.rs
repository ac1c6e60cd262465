use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InputError;

/// The keys (and mouse button) the sandbox reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Key {
    W,
    A,
    S,
    D,
    Space,
    R,
    /// Left mouse button.
    Fire,
}

impl Key {
    pub const ALL: [Key; 7] = [Key::W, Key::A, Key::S, Key::D, Key::Space, Key::R, Key::Fire];

    pub fn name(self) -> &'static str {
        match self {
            Key::W => "w",
            Key::A => "a",
            Key::S => "s",
            Key::D => "d",
            Key::Space => "space",
            Key::R => "r",
            Key::Fire => "fire",
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Key {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "w" => Ok(Key::W),
            "a" => Ok(Key::A),
            "s" => Ok(Key::S),
            "d" => Ok(Key::D),
            "space" => Ok(Key::Space),
            "r" => Ok(Key::R),
            "fire" | "mouse1" | "lmb" => Ok(Key::Fire),
            _ => Err(InputError::UnknownKey(s.to_string())),
        }
    }
}

/// A raw event from the host, already stripped of OS specifics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    Pressed(Key),
    Released(Key),
    MouseMotion { dx: f32, dy: f32 },
}

impl FromStr for InputEvent {
    type Err = InputError;

    /// Parses the script forms `press <key>`, `release <key>` and
    /// `look <dx> <dy>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || InputError::Malformed(s.to_string());
        let mut parts = s.split_whitespace();
        let verb = parts.next().ok_or_else(malformed)?;
        let event = match verb.to_ascii_lowercase().as_str() {
            "press" => InputEvent::Pressed(parts.next().ok_or_else(malformed)?.parse()?),
            "release" => InputEvent::Released(parts.next().ok_or_else(malformed)?.parse()?),
            "look" => {
                let mut axis = || -> Result<f32, InputError> {
                    parts.next().ok_or_else(malformed)?.parse().map_err(|_| malformed())
                };
                let dx = axis()?;
                let dy = axis()?;
                InputEvent::MouseMotion { dx, dy }
            }
            _ => return Err(malformed()),
        };
        if parts.next().is_some() {
            return Err(malformed());
        }
        Ok(event)
    }
}
