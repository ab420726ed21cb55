#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use daylog::{Clock, Level, Logger, ManualClock};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Logger on a manual clock, minimum level `Info`, long scan interval.
pub fn manual_logger(dir: &Path, base: &str, start: NaiveDate) -> (Logger, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::on(start));
    let logger = Logger::builder(dir, base)
        .level(Level::Info)
        .clock(clock.clone())
        .build()
        .unwrap();
    (logger, clock)
}

/// Polls `cond` until it holds or five seconds pass.
pub fn wait_until(mut cond: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        if cond() {
            return true;
        }
        thread::sleep(Duration::from_millis(5));
    }
    cond()
}

/// Waits until the writer has appended `count` lines.
pub fn wait_written(logger: &Logger, count: u64) {
    assert!(
        wait_until(|| logger.diagnostics().written >= count),
        "writer did not reach {count} lines: {:?}",
        logger.diagnostics()
    );
}

/// Message part of each line (after `[LEVEL] `).
pub fn messages(content: &str) -> Vec<String> {
    content
        .lines()
        .map(|line| {
            let (_, msg) = line.split_once("] ").unwrap();
            msg.to_string()
        })
        .collect()
}

/// Manual clock whose next `now()` panics once armed.
pub struct FlakyClock {
    inner: ManualClock,
    armed: AtomicBool,
}

impl FlakyClock {
    pub fn on(start: NaiveDate) -> Self {
        Self {
            inner: ManualClock::on(start),
            armed: AtomicBool::new(false),
        }
    }

    pub fn fail_next(&self) {
        self.armed.store(true, Ordering::SeqCst);
    }

    pub fn set_date(&self, date: NaiveDate) {
        self.inner.set_date(date);
    }
}

impl Clock for FlakyClock {
    fn now(&self) -> NaiveDateTime {
        assert!(!self.armed.swap(false, Ordering::SeqCst), "clock unavailable");
        self.inner.now()
    }
}
