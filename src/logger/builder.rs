//! Stepwise construction so optional knobs (capacity, interval, clock) don't turn
//! `Logger::new` into a long positional argument list.

use super::{DEFAULT_QUEUE_CAPACITY, DEFAULT_SCAN_INTERVAL, Logger, Tasks};
use crate::clock::{Clock, SystemClock};
use crate::diagnostics::Diagnostics;
use crate::level::Level;
use crate::queue::MessageQueue;
use crate::rotation::{Rotator, monitor};
use crate::{Error, internal, writer};
use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicU8;
use std::thread;
use std::time::Duration;

/// Collects settings, then opens the file and starts the background threads.
pub struct LoggerBuilder {
    directory: PathBuf,
    base_name: String,
    min_level: Level,
    queue_capacity: usize,
    scan_interval: Duration,
    clock: Arc<dyn Clock>,
}

impl LoggerBuilder {
    /// `Error` is the default minimum; everything else must be opted into.
    #[must_use]
    pub fn new(directory: impl Into<PathBuf>, base_name: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            base_name: base_name.into(),
            min_level: Level::default(),
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            scan_interval: DEFAULT_SCAN_INTERVAL,
            clock: Arc::new(SystemClock),
        }
    }

    #[must_use]
    pub const fn level(mut self, level: Level) -> Self {
        self.min_level = level;
        self
    }

    /// Lines buffered before producers block. Must be non-zero.
    #[must_use]
    pub const fn queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    /// How often the rotation monitor compares dates. Must be non-zero.
    #[must_use]
    pub const fn scan_interval(mut self, interval: Duration) -> Self {
        self.scan_interval = interval;
        self
    }

    /// Replaces the system clock, mainly so tests can move the date.
    #[must_use]
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Opens today's file and starts the writer and rotation monitor threads.
    ///
    /// # Errors
    /// - [`Error::InvalidConfig`] for a zero queue capacity or scan interval.
    /// - [`Error::Open`] if the dated file cannot be opened.
    /// - [`Error::Io`] if a thread cannot be spawned.
    pub fn build(self) -> Result<Logger, Error> {
        if self.scan_interval.is_zero() {
            return Err(Error::InvalidConfig(
                "scan interval must be non-zero".to_string(),
            ));
        }
        let (queue, receiver) = MessageQueue::bounded(self.queue_capacity)?;
        let rotator = Arc::new(Rotator::open(
            self.directory,
            self.base_name,
            self.clock,
        )?);
        let diagnostics = Arc::new(Diagnostics::default());

        // If the monitor fails to spawn, dropping `queue` on the error path disconnects
        // the receiver and the writer exits on its own.
        let writer = {
            let rotator = Arc::clone(&rotator);
            let diagnostics = Arc::clone(&diagnostics);
            thread::Builder::new()
                .name("daylog-writer".to_string())
                .spawn(move || writer::run(&receiver, &rotator, &diagnostics))?
        };

        let (shutdown, shutdown_rx) = crossbeam_channel::bounded::<()>(0);
        let monitor = {
            let rotator = Arc::clone(&rotator);
            let diagnostics = Arc::clone(&diagnostics);
            let interval = self.scan_interval;
            thread::Builder::new()
                .name("daylog-monitor".to_string())
                .spawn(move || monitor::run(&rotator, &diagnostics, interval, &shutdown_rx))?
        };

        internal::debug(
            "LOGGER",
            &format!(
                "Logging to {} (min level {}, capacity {})",
                rotator.current_path().display(),
                self.min_level,
                queue.capacity()
            ),
        );

        Ok(Logger {
            min_level: AtomicU8::new(self.min_level.as_u8()),
            queue,
            rotator,
            diagnostics,
            tasks: Mutex::new(Some(Tasks {
                writer,
                monitor,
                shutdown,
            })),
        })
    }
}
