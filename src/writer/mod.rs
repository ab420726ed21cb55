//! The single thread that turns queued lines into file appends.

use crate::diagnostics::Diagnostics;
use crate::internal;
use crate::rotation::Rotator;
use crossbeam_channel::Receiver;
use std::panic::{self, AssertUnwindSafe};

/// Drains `receiver` in arrival order until the queue is closed and empty.
pub(crate) fn run(receiver: &Receiver<String>, rotator: &Rotator, diagnostics: &Diagnostics) {
    internal::info("WRITER", "Writer started");

    for line in receiver {
        write_one(&line, rotator, diagnostics);
    }

    internal::info("WRITER", "Queue closed and drained, writer stopped");
}

fn write_one(line: &str, rotator: &Rotator, diagnostics: &Diagnostics) {
    match panic::catch_unwind(AssertUnwindSafe(|| rotator.write_line(line))) {
        Ok(Ok(())) => diagnostics.record_written(),
        Ok(Err(e)) => {
            diagnostics.record_write_error();
            internal::error(
                "WRITER",
                &format!("Write to {} failed: {e}", rotator.current_path().display()),
            );
        }
        Err(payload) => {
            diagnostics.record_panic();
            internal::warn(
                "WRITER",
                &format!(
                    "Recovered panic while writing: {}",
                    internal::panic_message(payload.as_ref())
                ),
            );
        }
    }
}
