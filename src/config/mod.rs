//! TOML configuration for building a [`Logger`](crate::Logger) without code changes.
//!
//! Every field has a default, so an empty file yields a working configuration: the
//! current directory, base name `app`, minimum level `error`.

mod structs;

pub use structs::{FileConfig, GeneralConfig, QueueConfig, RotationConfig};

use crate::internal;
use crate::level::Level;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Top-level configuration document.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Minimum level.
    pub general: GeneralConfig,
    /// Where the dated files live and what they are called.
    pub file: FileConfig,
    /// Queue sizing.
    pub queue: QueueConfig,
    /// How often the date is checked.
    pub rotation: RotationConfig,
}

impl Config {
    /// Parses a TOML document.
    ///
    /// # Errors
    /// Returns [`crate::Error::ConfigParse`] on TOML syntax or type errors.
    pub fn parse(content: &str) -> Result<Self, crate::Error> {
        Ok(toml::from_str(content)?)
    }

    /// Reads and parses a TOML file.
    ///
    /// # Errors
    /// Returns an I/O error if the file cannot be read, or a parse error.
    pub fn load_from(path: &Path) -> Result<Self, crate::Error> {
        internal::debug("CONFIG", &format!("Loading {}", path.display()));
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Config stores level as a string for TOML ergonomics. Unknown strings fall back
    /// to `error`, the most restrictive minimum.
    #[must_use]
    pub fn parse_level(&self) -> Level {
        self.general.level.parse().unwrap_or_else(|e| {
            internal::warn("CONFIG", &format!("{e}, using error"));
            Level::Error
        })
    }

    /// Directory with a leading `~` expanded to the home directory.
    #[must_use]
    pub fn resolved_directory(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.file.directory).as_ref())
    }

    #[must_use]
    pub const fn scan_interval(&self) -> Duration {
        Duration::from_secs(self.rotation.scan_interval_secs)
    }
}
