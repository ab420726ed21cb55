//! Per-logger counters so failures in the background threads stay observable.

use std::sync::atomic::{AtomicU64, Ordering};

/// Live counters shared between a `Logger` and its threads.
#[derive(Debug, Default)]
pub struct Diagnostics {
    enqueued: AtomicU64,
    written: AtomicU64,
    rejected: AtomicU64,
    write_errors: AtomicU64,
    rotations: AtomicU64,
    rotation_errors: AtomicU64,
    recovered_panics: AtomicU64,
}

/// Point-in-time copy of [`Diagnostics`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DiagnosticsSnapshot {
    /// Lines accepted into the queue.
    pub enqueued: u64,
    /// Lines appended to a log file.
    pub written: u64,
    /// Lines refused because the logger was already closed.
    pub rejected: u64,
    /// Lines the writer failed to append.
    pub write_errors: u64,
    /// Completed date rotations.
    pub rotations: u64,
    /// Rotation attempts that failed to open the new file.
    pub rotation_errors: u64,
    /// Panics caught inside the writer or monitor loops.
    pub recovered_panics: u64,
}

impl Diagnostics {
    pub(crate) fn record_enqueued(&self) {
        self.enqueued.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_written(&self) {
        self.written.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_rejected(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_write_error(&self) {
        self.write_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_rotation(&self) {
        self.rotations.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_rotation_error(&self) {
        self.rotation_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_panic(&self) {
        self.recovered_panics.fetch_add(1, Ordering::Relaxed);
    }

    #[must_use]
    pub fn snapshot(&self) -> DiagnosticsSnapshot {
        DiagnosticsSnapshot {
            enqueued: self.enqueued.load(Ordering::Relaxed),
            written: self.written.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
            write_errors: self.write_errors.load(Ordering::Relaxed),
            rotations: self.rotations.load(Ordering::Relaxed),
            rotation_errors: self.rotation_errors.load(Ordering::Relaxed),
            recovered_panics: self.recovered_panics.load(Ordering::Relaxed),
        }
    }
}

impl DiagnosticsSnapshot {
    /// Total failures of any kind.
    #[must_use]
    pub const fn failures(&self) -> u64 {
        self.rejected + self.write_errors + self.rotation_errors + self.recovered_panics
    }
}
