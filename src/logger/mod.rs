//! The logger handle: producer entry points, level control, and shutdown.
//!
//! Producers format on their own thread and hand a finished line to the queue; the
//! writer thread is the only code that touches the file.

mod builder;
mod from_config;

pub use builder::LoggerBuilder;

use crate::caller::CallSite;
use crate::diagnostics::{Diagnostics, DiagnosticsSnapshot};
use crate::level::Level;
use crate::queue::MessageQueue;
use crate::rotation::Rotator;
use crate::{Error, internal};
use chrono::NaiveDate;
use crossbeam_channel::Sender;
use parking_lot::Mutex;
use std::fmt::{self, Write as _};
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};
use std::thread::JoinHandle;
use std::time::Duration;

/// Lines buffered before producers block.
pub const DEFAULT_QUEUE_CAPACITY: usize = 500;

/// Interval between rotation checks.
pub const DEFAULT_SCAN_INTERVAL: Duration = Duration::from_secs(300);

/// Appended when a `Display` impl inside the message reports an error.
const FORMAT_ERROR_MARKER: &str = "<format error>";

/// Background threads owned by a live logger.
struct Tasks {
    writer: JoinHandle<()>,
    monitor: JoinHandle<()>,
    /// Never sent on; dropping it stops the monitor.
    shutdown: Sender<()>,
}

/// Asynchronous logger writing to `<directory>/<base_name>.<YYYY-MM-DD>`.
///
/// Share it across threads by reference or `Arc`; every method takes `&self`.
pub struct Logger {
    min_level: AtomicU8,
    queue: MessageQueue,
    rotator: Arc<Rotator>,
    diagnostics: Arc<Diagnostics>,
    tasks: Mutex<Option<Tasks>>,
}

impl Logger {
    /// Opens today's file in `directory` with default settings.
    ///
    /// # Errors
    /// [`Error::Open`] if the file cannot be opened; the directory is never created.
    pub fn new(directory: impl Into<PathBuf>, base_name: impl Into<String>) -> Result<Self, Error> {
        Self::builder(directory, base_name).build()
    }

    #[must_use]
    pub fn builder(directory: impl Into<PathBuf>, base_name: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder::new(directory, base_name)
    }

    /// Changes the minimum level for messages submitted from now on.
    pub fn set_log_level(&self, level: Level) {
        self.min_level.store(level.as_u8(), Ordering::Relaxed);
    }

    #[must_use]
    pub fn min_level(&self) -> Level {
        Level::from_u8(self.min_level.load(Ordering::Relaxed)).unwrap_or_default()
    }

    /// Whether a message at `level` would currently be queued.
    #[must_use]
    pub fn enabled(&self, level: Level) -> bool {
        self.min_level().permits(level)
    }

    /// Formats and queues a message at `level`; blocks only while the queue is full.
    ///
    /// A `Display` impl that panics is caught here. The line is still queued with a
    /// `<format panic: ..>` marker in place of the message.
    #[track_caller]
    pub fn log(&self, level: Level, args: fmt::Arguments<'_>) {
        let site = CallSite::capture();
        if !self.enabled(level) {
            return;
        }
        let line = panic::catch_unwind(AssertUnwindSafe(|| format_line(site, level, args)))
            .unwrap_or_else(|payload| {
                let reason = internal::panic_message(payload.as_ref());
                self.diagnostics.record_panic();
                internal::warn(
                    "LOGGER",
                    &format!("Recovered panic while formatting message at {site}: {reason}"),
                );
                format!("{site}[{}] <format panic: {reason}>", level.tag())
            });
        self.enqueue(line);
    }

    #[track_caller]
    pub fn info(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Info, args);
    }

    #[track_caller]
    pub fn debug(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Debug, args);
    }

    #[track_caller]
    pub fn warn(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Warn, args);
    }

    #[track_caller]
    pub fn error(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Error, args);
    }

    fn enqueue(&self, line: String) {
        match self.queue.push(line) {
            Ok(()) => self.diagnostics.record_enqueued(),
            Err(_) => {
                self.diagnostics.record_rejected();
                internal::warn("LOGGER", "Message submitted after close was dropped");
            }
        }
    }

    /// Runs the rotation check immediately instead of waiting for the next tick.
    ///
    /// # Errors
    /// [`Error::Open`] if the new file cannot be opened; the current file stays active.
    pub fn check_rotation(&self) -> Result<bool, Error> {
        let rotated = self.rotator.check();
        match &rotated {
            Ok(true) => self.diagnostics.record_rotation(),
            Ok(false) => {}
            Err(_) => self.diagnostics.record_rotation_error(),
        }
        rotated
    }

    /// Stops accepting messages, drains the queue, stops both threads and syncs the file.
    ///
    /// Messages logged after this are dropped and counted as rejected. Calling it
    /// again is a no-op.
    ///
    /// # Errors
    /// [`Error::TaskPanicked`] if a thread died, or the I/O error from syncing the file.
    pub fn close(&self) -> Result<(), Error> {
        let Some(tasks) = self.tasks.lock().take() else {
            return Ok(());
        };
        internal::info("LOGGER", "Closing");

        self.queue.close();
        drop(tasks.shutdown);
        let writer = tasks.writer.join();
        let monitor = tasks.monitor.join();
        writer.map_err(|_| Error::TaskPanicked("writer"))?;
        monitor.map_err(|_| Error::TaskPanicked("monitor"))?;

        self.rotator.sync()?;
        internal::info("LOGGER", "Closed");
        Ok(())
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.tasks.lock().is_none()
    }

    /// Path of the file currently receiving lines.
    #[must_use]
    pub fn current_path(&self) -> PathBuf {
        self.rotator.current_path()
    }

    /// Date embedded in the current file name.
    #[must_use]
    pub fn current_date(&self) -> NaiveDate {
        self.rotator.current_date()
    }

    #[must_use]
    pub fn directory(&self) -> &Path {
        self.rotator.directory()
    }

    #[must_use]
    pub fn base_name(&self) -> &str {
        self.rotator.base_name()
    }

    #[must_use]
    pub const fn queue_capacity(&self) -> usize {
        self.queue.capacity()
    }

    /// Lines queued but not yet picked up by the writer.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn diagnostics(&self) -> DiagnosticsSnapshot {
        self.diagnostics.snapshot()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            internal::error("LOGGER", &format!("Close on drop failed: {e}"));
        }
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("min_level", &self.min_level())
            .field("rotator", &self.rotator)
            .field("queue", &self.queue)
            .finish_non_exhaustive()
    }
}

/// `[file:line][LEVEL] message`. Never panics on a failing `Display` impl.
pub(crate) fn format_line(site: CallSite, level: Level, args: fmt::Arguments<'_>) -> String {
    let mut line = String::with_capacity(64);
    let _ = write!(line, "{site}[{}] ", level.tag());
    if line.write_fmt(args).is_err() {
        line.push_str(FORMAT_ERROR_MARKER);
    }
    line
}
