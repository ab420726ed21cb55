//! Levels that gate which messages reach the queue.
//!
//! The order is declaration order, not severity: `Info < Debug < Warn < Error`.
//! A message passes when the configured minimum is `<=` its level, so `Info` is the
//! most permissive minimum and `Error` the most restrictive.

use std::fmt;
use std::str::FromStr;

/// Derives `Ord` so the logger can compare a message's level against the configured minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum Level {
    /// Normal operational milestones.
    Info = 0,
    /// Diagnostic detail. Sorts above `Info`, so a `Debug` minimum hides `Info`.
    Debug = 1,
    /// Non-fatal anomalies that may need attention.
    Warn = 2,
    /// Failures. The default minimum, so a fresh logger only records errors.
    #[default]
    Error = 3,
}

impl Level {
    /// Lowercase because config files use lowercase level strings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    /// Uppercase label written between brackets on every log line.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Debug => "DEBUG",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }

    /// Numeric code, matching the declaration order.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Inverse of [`Level::as_u8`]; `None` for codes above 3.
    #[must_use]
    pub const fn from_u8(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Info),
            1 => Some(Self::Debug),
            2 => Some(Self::Warn),
            3 => Some(Self::Error),
            _ => None,
        }
    }

    /// Whether a message at `level` passes when `self` is the configured minimum.
    #[must_use]
    pub fn permits(self, level: Self) -> bool {
        self <= level
    }

    /// All levels in declaration order.
    #[must_use]
    pub const fn all() -> [Self; 4] {
        [Self::Info, Self::Debug, Self::Warn, Self::Error]
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned by `FromStr` so callers can distinguish "unknown level" from other parse failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLevelError(String);

impl fmt::Display for ParseLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown log level: '{}'", self.0)
    }
}

impl std::error::Error for ParseLevelError {}

impl From<ParseLevelError> for crate::Error {
    fn from(e: ParseLevelError) -> Self {
        Self::InvalidLevel(e.0)
    }
}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "info" | "0" => Ok(Self::Info),
            "debug" | "1" => Ok(Self::Debug),
            "warn" | "warning" | "2" => Ok(Self::Warn),
            "error" | "err" | "3" => Ok(Self::Error),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}
