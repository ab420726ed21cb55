//! Dated output file and the lock that keeps rotation and writes apart.
//!
//! Writers take the shared side of the lock for one line; rotation takes the exclusive
//! side for the whole close-open-swap, so a line is never split across two files.

pub(crate) mod monitor;

use crate::clock::Clock;
use crate::{Error, internal};
use chrono::NaiveDate;
use parking_lot::RwLock;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// strftime pattern for the date suffix of every log file.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// strftime pattern for the timestamp that prefixes every line.
pub const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S%.6f";

/// `<base_name>.<YYYY-MM-DD>`.
#[must_use]
pub fn dated_file_name(base_name: &str, date: NaiveDate) -> String {
    format!("{base_name}.{}", date.format(DATE_FORMAT))
}

/// Full path of the file for `date` inside `directory`.
#[must_use]
pub fn dated_path(directory: &Path, base_name: &str, date: NaiveDate) -> PathBuf {
    directory.join(dated_file_name(base_name, date))
}

/// Opens for append, creating the file if needed. Never creates directories.
fn open_append(path: &Path) -> Result<File, Error> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| Error::Open {
            path: path.to_path_buf(),
            source,
        })
}

/// State swapped as a unit during rotation.
#[derive(Debug)]
struct RotationState {
    date: NaiveDate,
    path: PathBuf,
    file: File,
}

/// Owns the current output file and rotates it when the date advances.
pub struct Rotator {
    directory: PathBuf,
    base_name: String,
    clock: Arc<dyn Clock>,
    state: RwLock<RotationState>,
}

impl Rotator {
    /// Opens today's file.
    ///
    /// # Errors
    /// [`Error::Open`] if the file cannot be opened, e.g. the directory is missing.
    pub fn open(
        directory: impl Into<PathBuf>,
        base_name: impl Into<String>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, Error> {
        let directory = directory.into();
        let base_name = base_name.into();
        let date = clock.today();
        let path = dated_path(&directory, &base_name, date);
        let file = open_append(&path)?;
        internal::debug("ROTATION", &format!("Opened {}", path.display()));

        Ok(Self {
            directory,
            base_name,
            clock,
            state: RwLock::new(RotationState { date, path, file }),
        })
    }

    /// Appends one timestamped line under the shared lock. A trailing newline is added
    /// unless the line already ends with one.
    ///
    /// # Errors
    /// I/O errors from the underlying file.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let state = self.state.read();
        let mut buf = String::with_capacity(line.len() + 28);
        buf.push_str(&self.clock.now().format(TIMESTAMP_FORMAT).to_string());
        buf.push(' ');
        buf.push_str(line);
        if !line.ends_with('\n') {
            buf.push('\n');
        }
        (&state.file).write_all(buf.as_bytes())
    }

    /// Rotates if today is strictly later than the stored date.
    ///
    /// Returns `Ok(true)` when a new file was opened. When the new file cannot be
    /// opened the current file and date are kept, so the next check retries.
    ///
    /// # Errors
    /// [`Error::Open`] if the new file cannot be opened.
    pub fn check(&self) -> Result<bool, Error> {
        let today = self.clock.today();
        if today <= self.state.read().date {
            return Ok(false);
        }

        let mut state = self.state.write();
        // Another check may have won the race between the read and write locks.
        if today <= state.date {
            return Ok(false);
        }

        let path = dated_path(&self.directory, &self.base_name, today);
        let file = open_append(&path)?;
        let previous = std::mem::replace(&mut state.path, path);
        state.file = file;
        state.date = today;
        internal::debug(
            "ROTATION",
            &format!(
                "Rotated {} -> {}",
                previous.display(),
                state.path.display()
            ),
        );
        Ok(true)
    }

    /// Flushes file contents and metadata to disk.
    ///
    /// # Errors
    /// I/O errors from `fsync`.
    pub fn sync(&self) -> io::Result<()> {
        self.state.read().file.sync_all()
    }

    #[must_use]
    pub fn current_date(&self) -> NaiveDate {
        self.state.read().date
    }

    #[must_use]
    pub fn current_path(&self) -> PathBuf {
        self.state.read().path.clone()
    }

    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    #[must_use]
    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    /// Holds the exclusive lock so tests can stall the writer.
    #[cfg(test)]
    pub(crate) fn lock_exclusive(&self) -> parking_lot::RwLockWriteGuard<'_, impl Sized> {
        self.state.write()
    }
}

impl std::fmt::Debug for Rotator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rotator")
            .field("directory", &self.directory)
            .field("base_name", &self.base_name)
            .field("current_date", &self.state.try_read().map(|state| state.date))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use std::fs;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn file_name_has_single_date_suffix() {
        assert_eq!(dated_file_name("app", date(2024, 1, 1)), "app.2024-01-01");
        assert_eq!(dated_file_name("svc.log", date(2023, 12, 31)), "svc.log.2023-12-31");
    }

    #[test]
    fn open_fails_when_directory_is_missing() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nope");
        let clock = Arc::new(ManualClock::on(date(2024, 1, 1)));

        let err = Rotator::open(&missing, "app", clock).unwrap_err();
        assert!(matches!(err, Error::Open { .. }));
        assert!(!missing.exists());
    }

    #[test]
    fn rotation_recomputes_name_from_base() {
        let tmp = TempDir::new().unwrap();
        let clock = Arc::new(ManualClock::on(date(2024, 1, 1)));
        let rotator = Rotator::open(tmp.path(), "app", clock.clone()).unwrap();

        clock.set_date(date(2024, 1, 2));
        assert!(rotator.check().unwrap());
        clock.set_date(date(2024, 1, 3));
        assert!(rotator.check().unwrap());

        assert_eq!(rotator.current_path(), tmp.path().join("app.2024-01-03"));
        assert_eq!(rotator.current_date(), date(2024, 1, 3));
    }

    #[test]
    fn backward_clock_does_not_rotate() {
        let tmp = TempDir::new().unwrap();
        let clock = Arc::new(ManualClock::on(date(2024, 5, 10)));
        let rotator = Rotator::open(tmp.path(), "app", clock.clone()).unwrap();

        clock.set_date(date(2024, 5, 9));
        assert!(!rotator.check().unwrap());
        assert_eq!(rotator.current_date(), date(2024, 5, 10));
    }

    #[test]
    fn reopening_existing_file_appends() {
        let tmp = TempDir::new().unwrap();
        let existing = tmp.path().join("app.2024-01-02");
        fs::write(&existing, "earlier\n").unwrap();

        let clock = Arc::new(ManualClock::on(date(2024, 1, 1)));
        let rotator = Rotator::open(tmp.path(), "app", clock.clone()).unwrap();
        clock.set_date(date(2024, 1, 2));
        rotator.check().unwrap();
        rotator.write_line("later").unwrap();

        let content = fs::read_to_string(existing).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "earlier");
        assert!(lines[1].ends_with(" later"));
    }

    #[test]
    fn failed_rotation_keeps_current_file() {
        let tmp = TempDir::new().unwrap();
        let clock = Arc::new(ManualClock::on(date(2024, 1, 1)));
        let rotator = Rotator::open(tmp.path(), "app", clock.clone()).unwrap();
        // A directory squatting on the next file name makes the open fail.
        fs::create_dir(tmp.path().join("app.2024-01-02")).unwrap();

        clock.set_date(date(2024, 1, 2));
        assert!(rotator.check().is_err());
        assert_eq!(rotator.current_date(), date(2024, 1, 1));

        rotator.write_line("still here").unwrap();
        let content = fs::read_to_string(tmp.path().join("app.2024-01-01")).unwrap();
        assert!(content.contains("still here"));
    }

    #[test]
    fn line_carries_microsecond_timestamp() {
        let tmp = TempDir::new().unwrap();
        let clock = Arc::new(ManualClock::new(
            date(2024, 1, 1).and_hms_micro_opt(8, 30, 5, 123_456).unwrap(),
        ));
        let rotator = Rotator::open(tmp.path(), "app", clock).unwrap();
        rotator.write_line("[main.rs:1][INFO] hi").unwrap();

        let content = fs::read_to_string(tmp.path().join("app.2024-01-01")).unwrap();
        assert_eq!(content, "2024/01/01 08:30:05.123456 [main.rs:1][INFO] hi\n");
    }
}
