//! Configuration struct definitions.

use crate::logger::{DEFAULT_QUEUE_CAPACITY, DEFAULT_SCAN_INTERVAL};
use serde::Deserialize;

/// General configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Minimum log level (`info`, `debug`, `warn`, `error`, or `0`..`3`).
    pub level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            level: "error".to_string(),
        }
    }
}

/// Output file configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Directory holding the dated files. Must already exist.
    pub directory: String,
    /// File name before the `.<YYYY-MM-DD>` suffix.
    pub base_name: String,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            directory: ".".to_string(),
            base_name: "app".to_string(),
        }
    }
}

/// Message queue configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct QueueConfig {
    /// Lines buffered before producers block.
    pub capacity: usize,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

/// Rotation monitor configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RotationConfig {
    /// Seconds between date checks.
    pub scan_interval_secs: u64,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            scan_interval_secs: DEFAULT_SCAN_INTERVAL.as_secs(),
        }
    }
}
