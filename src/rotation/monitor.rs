//! Periodic date check that drives rotation.

use super::Rotator;
use crate::diagnostics::Diagnostics;
use crate::internal;
use crossbeam_channel::{Receiver, select, tick};
use std::panic::{self, AssertUnwindSafe};
use std::time::Duration;

/// Wakes every `interval` and rotates if the date moved forward.
///
/// Nothing is ever sent on `shutdown`; the loop ends when its sender is dropped.
pub(crate) fn run(
    rotator: &Rotator,
    diagnostics: &Diagnostics,
    interval: Duration,
    shutdown: &Receiver<()>,
) {
    internal::info(
        "MONITOR",
        &format!("Checking {} every {interval:?}", rotator.base_name()),
    );
    let ticker = tick(interval);

    loop {
        let stop = select! {
            recv(shutdown) -> _ => true,
            recv(ticker) -> _ => {
                check_once(rotator, diagnostics);
                false
            }
        };
        if stop {
            break;
        }
    }

    internal::info("MONITOR", "Rotation monitor stopped");
}

/// One tick; failures and panics are reported, never propagated.
pub(crate) fn check_once(rotator: &Rotator, diagnostics: &Diagnostics) {
    match panic::catch_unwind(AssertUnwindSafe(|| rotator.check())) {
        Ok(Ok(true)) => diagnostics.record_rotation(),
        Ok(Ok(false)) => {}
        Ok(Err(e)) => {
            diagnostics.record_rotation_error();
            internal::error("MONITOR", &format!("Rotation failed, will retry: {e}"));
        }
        Err(payload) => {
            diagnostics.record_panic();
            internal::warn(
                "MONITOR",
                &format!(
                    "Recovered panic during rotation check: {}",
                    internal::panic_message(payload.as_ref())
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{Clock, ManualClock};
    use chrono::{NaiveDate, NaiveDateTime};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tempfile::TempDir;

    struct FlakyClock {
        inner: ManualClock,
        armed: AtomicBool,
    }

    impl Clock for FlakyClock {
        fn now(&self) -> NaiveDateTime {
            assert!(!self.armed.swap(false, Ordering::SeqCst), "clock unavailable");
            self.inner.now()
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn panicking_check_is_counted_and_next_tick_rotates() {
        let tmp = TempDir::new().unwrap();
        let clock = Arc::new(FlakyClock {
            inner: ManualClock::on(date(2024, 1, 1)),
            armed: AtomicBool::new(false),
        });
        let rotator = Rotator::open(tmp.path(), "app", clock.clone()).unwrap();
        let diagnostics = Diagnostics::default();

        clock.inner.set_date(date(2024, 1, 2));
        clock.armed.store(true, Ordering::SeqCst);
        check_once(&rotator, &diagnostics);

        let stats = diagnostics.snapshot();
        assert_eq!(stats.recovered_panics, 1);
        assert_eq!(stats.rotations, 0);
        assert_eq!(rotator.current_date(), date(2024, 1, 1));

        check_once(&rotator, &diagnostics);
        let stats = diagnostics.snapshot();
        assert_eq!(stats.rotations, 1);
        assert_eq!(rotator.current_date(), date(2024, 1, 2));
        assert!(tmp.path().join("app.2024-01-02").exists());
    }

    #[test]
    fn run_exits_when_shutdown_sender_drops() {
        let tmp = TempDir::new().unwrap();
        let clock = Arc::new(ManualClock::on(date(2024, 1, 1)));
        let rotator = Rotator::open(tmp.path(), "app", clock).unwrap();
        let diagnostics = Diagnostics::default();
        let (tx, rx) = crossbeam_channel::bounded::<()>(0);

        std::thread::scope(|s| {
            let handle = s.spawn(|| run(&rotator, &diagnostics, Duration::from_secs(60), &rx));
            drop(tx);
            handle.join().unwrap();
        });
    }
}
