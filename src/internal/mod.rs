//! Daylog's own diagnostic channel.
//!
//! Background threads report failures here instead of through a `Logger`, so a broken
//! log file can never recurse into the code that is trying to report it. Output goes
//! straight to stderr and write failures are ignored.

use crate::level::Level;
use std::io::Write;
use std::sync::atomic::{AtomicU8, Ordering};

static MIN_LEVEL: AtomicU8 = AtomicU8::new(Level::Warn.as_u8());

/// Sets the minimum level for internal diagnostics. Process-wide.
///
/// Gating follows [`Level`]'s declaration order, so `Info` is the most verbose
/// setting: `Debug` shows file lifecycle events while hiding thread chatter.
pub fn set_level(level: Level) {
    MIN_LEVEL.store(level.as_u8(), Ordering::Relaxed);
}

/// Current minimum level for internal diagnostics.
#[must_use]
pub fn min_level() -> Level {
    Level::from_u8(MIN_LEVEL.load(Ordering::Relaxed)).unwrap_or_default()
}

fn enabled(level: Level) -> bool {
    min_level().permits(level)
}

fn log(level: Level, scope: &str, msg: &str) {
    if !enabled(level) {
        return;
    }
    let mut stderr = std::io::stderr().lock();
    let _ = writeln!(stderr, "daylog: [{}] {scope:<8} {msg}", level.tag());
}

/// Thread start and stop, close progress.
pub fn info(scope: &str, msg: &str) {
    log(Level::Info, scope, msg);
}

/// File lifecycle: logger opened, files opened, rotations performed.
pub fn debug(scope: &str, msg: &str) {
    log(Level::Debug, scope, msg);
}

/// Messages rejected after close, recovered panics.
pub fn warn(scope: &str, msg: &str) {
    log(Level::Warn, scope, msg);
}

/// Write and rotation I/O failures.
pub fn error(scope: &str, msg: &str) {
    log(Level::Error, scope, msg);
}

/// Best-effort text for a `catch_unwind` payload.
#[must_use]
pub fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(ToString::to_string)
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "non-string panic payload".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    // One test owns the process-wide minimum so parallel tests never race on it.
    #[test]
    fn set_level_gates_in_declaration_order() {
        let previous = min_level();

        set_level(Level::Debug);
        assert_eq!(min_level(), Level::Debug);
        assert!(enabled(Level::Debug));
        assert!(!enabled(Level::Info));

        set_level(Level::Info);
        assert!(Level::all().iter().all(|&level| enabled(level)));

        set_level(Level::Error);
        assert!(!enabled(Level::Warn));
        assert!(enabled(Level::Error));

        set_level(previous);
    }

    #[test]
    fn panic_message_extracts_str_and_string() {
        let payload = std::panic::catch_unwind(|| panic!("boom")).unwrap_err();
        assert_eq!(panic_message(payload.as_ref()), "boom");

        let payload = std::panic::catch_unwind(|| panic!("{}", String::from("formatted"))).unwrap_err();
        assert_eq!(panic_message(payload.as_ref()), "formatted");
    }
}
