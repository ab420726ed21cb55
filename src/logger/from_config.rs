//! Logger construction from a [`Config`].

use super::{Logger, LoggerBuilder};
use crate::config::Config;
use crate::{Error, internal};

impl Logger {
    /// Builds a logger from a parsed config file.
    ///
    /// # Errors
    /// Same as [`LoggerBuilder::build`].
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        Self::builder_from_config(config).build()
    }

    /// Starts from a config but leaves room for further overrides (e.g. a test clock).
    #[must_use]
    pub fn builder_from_config(config: &Config) -> LoggerBuilder {
        let directory = config.resolved_directory();
        internal::debug(
            "LOGGER",
            &format!(
                "Config: directory={} base_name={} level={}",
                directory.display(),
                config.file.base_name,
                config.general.level
            ),
        );

        LoggerBuilder::new(directory, &config.file.base_name)
            .level(config.parse_level())
            .queue_capacity(config.queue.capacity)
            .scan_interval(config.scan_interval())
    }
}
