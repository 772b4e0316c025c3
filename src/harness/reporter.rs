//! Live console reporting through the test hooks.

use std::io::{self, Write};

use tinyunit_core::{ResultRecord, TestHooks};

use super::config::{HarnessConfig, Progress};

pub const STATUS_PASSED: &str = "Passed";
pub const STATUS_FAILED: &str = "FAIL!";

/// Prints one aligned line per completed test (and, in verbose mode, one per started test).
///
/// Hooks cannot return errors, so the first write error is kept and handed back by [`ConsoleReporter::finish`];
/// later writes are skipped.
pub struct ConsoleReporter<W: Write> {
    out: W,
    name_width: usize,
    progress: Progress,
    error: Option<io::Error>,
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W, config: &HarnessConfig) -> Self {
        Self {
            out,
            name_width: config.name_width,
            progress: config.progress,
            error: None,
        }
    }

    /// Return the writer, or the first error hit while reporting.
    pub fn finish(self) -> io::Result<W> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.out),
        }
    }

    fn emit(&mut self, line: std::fmt::Arguments<'_>) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = self.out.write_fmt(line).and_then(|()| self.out.write_all(b"\n")) {
            self.error = Some(err);
        }
    }
}

impl<W: Write> TestHooks for ConsoleReporter<W> {
    fn test_started(&mut self, name: &str) {
        if self.progress == Progress::Verbose {
            self.emit(format_args!("starting {name}"));
        }
    }

    fn test_completed(&mut self, record: &ResultRecord) {
        if self.progress == Progress::Quiet {
            return;
        }
        let status = if record.success() { STATUS_PASSED } else { STATUS_FAILED };
        let width = self.name_width;
        self.emit(format_args!("{:<width$} {}", record.name(), status));
    }
}
