//! `daylog` - asynchronous file logger with daily rotation.
//!
//! Producers format a line and push it onto a bounded queue; a dedicated writer thread
//! appends each line to `<directory>/<base_name>.<YYYY-MM-DD>`. A second thread checks
//! the date on a fixed interval and switches to a new file once the day changes.
//!
//! # Example
//!
//! ```no_run
//! use daylog::{Level, Logger};
//!
//! let logger = Logger::new("/var/log/myapp", "app")?;
//! logger.set_log_level(Level::Info);
//!
//! daylog::info!(logger, "listening on {}", 8080);
//! daylog::error!(logger, "failed: {}", 42);
//!
//! logger.close()?;
//! # Ok::<(), daylog::Error>(())
//! ```
//!
//! # Levels
//!
//! Levels are ordered `Info < Debug < Warn < Error` and a message is written when the
//! configured minimum is `<=` its level. The default minimum is `Error`.

mod macros;

pub mod caller;
pub mod clock;
pub mod config;
pub mod diagnostics;
pub mod internal;
pub mod level;
pub mod logger;
pub mod queue;
pub mod rotation;
mod writer;

mod error;

pub use caller::CallSite;
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::Config;
pub use diagnostics::DiagnosticsSnapshot;
pub use error::Error;
pub use level::{Level, ParseLevelError};
pub use logger::{DEFAULT_QUEUE_CAPACITY, DEFAULT_SCAN_INTERVAL, Logger, LoggerBuilder};
pub use rotation::{dated_file_name, dated_path};
