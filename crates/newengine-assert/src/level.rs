use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Severity of a failed check.
///
/// Levels are plain integers ordered by magnitude. The four standard values leave gaps so
/// that project-specific severities can be slotted in between them; the default policy only
/// ever compares levels, so a custom `Level::custom(100)` behaves like `DEBUG` and anything at
/// or above `FATAL` aborts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Level(i32);

impl Level {
    pub const WARNING: Level = Level(32);
    pub const DEBUG: Level = Level(64);
    pub const ERROR: Level = Level(128);
    pub const FATAL: Level = Level(256);

    #[inline]
    pub const fn custom(value: i32) -> Self {
        Self(value)
    }

    #[inline]
    pub const fn value(self) -> i32 {
        self.0
    }

    /// Label for the standard levels, `None` for custom ones.
    pub const fn label(self) -> Option<&'static str> {
        match self.0 {
            32 => Some("WARNING"),
            64 => Some("DEBUG"),
            128 => Some("ERROR"),
            256 => Some("FATAL"),
            _ => None,
        }
    }

    #[inline]
    pub fn is_standard(self) -> bool {
        self.label().is_some()
    }
}

impl From<i32> for Level {
    #[inline]
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.label() {
            Some(label) => f.write_str(label),
            None => write!(f, "level = {}", self.0),
        }
    }
}

impl FromStr for Level {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        match raw.to_ascii_lowercase().as_str() {
            "warning" | "warn" => Ok(Self::WARNING),
            "debug" => Ok(Self::DEBUG),
            "error" => Ok(Self::ERROR),
            "fatal" => Ok(Self::FATAL),
            other => other
                .parse::<i32>()
                .map(Self)
                .map_err(|_| ConfigError::InvalidLevel(raw.to_owned())),
        }
    }
}
