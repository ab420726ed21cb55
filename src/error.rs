//! Unified error type for all daylog operations.

use std::path::PathBuf;

/// Error type for daylog operations.
#[derive(Debug)]
pub enum Error {
    /// I/O error (thread spawn, file sync).
    Io(std::io::Error),
    /// A dated log file could not be opened or created.
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    /// TOML config parsing error.
    ConfigParse(toml::de::Error),
    /// A builder or config value is out of range.
    InvalidConfig(String),
    /// Invalid log level string.
    InvalidLevel(String),
    /// The logger has been closed and no longer accepts messages.
    Closed,
    /// A background thread terminated by panicking.
    TaskPanicked(&'static str),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Open { path, source } => {
                write!(f, "cannot open log file {}: {source}", path.display())
            }
            Self::ConfigParse(e) => write!(f, "parse error: {e}"),
            Self::InvalidConfig(s) => write!(f, "invalid config: {s}"),
            Self::InvalidLevel(level) => write!(f, "invalid level: {level}"),
            Self::Closed => write!(f, "logger is closed"),
            Self::TaskPanicked(task) => write!(f, "{task} thread panicked"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) | Self::Open { source: e, .. } => Some(e),
            Self::ConfigParse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Self::ConfigParse(e)
    }
}
