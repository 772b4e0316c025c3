//! Final summary report and exit-code policy.

use std::fmt;
use std::io::{self, Write};

use tinyunit_core::{ResultRecord, ResultStore};

use crate::cli::ExitCode;

/// The end-of-run summary: either the all-passed line, or the failure count followed by details for each failed test
/// in run order.
pub struct Summary<'a>(pub &'a ResultStore);

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let store = self.0;
        writeln!(f)?;
        if store.all_passed() {
            return writeln!(f, "All {} tests passed", store.count());
        }

        writeln!(
            f,
            "{} of {} tests failed. See details below",
            store.failed_count(),
            store.count()
        )?;
        for record in store.failed() {
            write_failure_details(record, f)?;
        }
        Ok(())
    }
}

fn write_failure_details(record: &ResultRecord, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f)?;
    writeln!(f, "{}", record.name())?;
    match record.line() {
        Some(line) => writeln!(f, "  at line {line}")?,
        None => writeln!(f, "  at line -")?,
    }
    writeln!(f, "  ({})", record.condition())
}

/// Write the summary report to `out`.
pub fn write_report<W: Write>(store: &ResultStore, out: &mut W) -> io::Result<()> {
    write!(out, "{}", Summary(store))
}

/// Render the summary report into a `String`.
pub fn render_report(store: &ResultStore) -> String {
    Summary(store).to_string()
}

/// `SUCCESS` when nothing failed, `FAILURE` otherwise.
pub fn exit_code(store: &ResultStore) -> ExitCode {
    if store.all_passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tinyunit_core::QuietProgress;

    fn store_of(records: Vec<ResultRecord>) -> ResultStore {
        let mut store = ResultStore::new();
        for record in records {
            store.register_result(record, &mut QuietProgress);
        }
        store
    }

    #[test]
    fn test_all_passed_report() {
        let store = store_of(vec![ResultRecord::passed("a"), ResultRecord::passed("b")]);
        assert_eq!(render_report(&store), "\nAll 2 tests passed\n");
        assert_eq!(exit_code(&store), ExitCode::SUCCESS);
    }

    #[test]
    fn test_empty_run_passes() {
        let store = ResultStore::new();
        assert_eq!(render_report(&store), "\nAll 0 tests passed\n");
        assert_eq!(exit_code(&store), ExitCode::SUCCESS);
    }

    #[test]
    fn test_failure_details() {
        let store = store_of(vec![
            ResultRecord::passed("ok"),
            ResultRecord::failed("must_fail", "x * x == x", 17),
            ResultRecord::unexpected("boom"),
        ]);
        let expected = "\n2 of 3 tests failed. See details below\n\
                        \nmust_fail\n  at line 17\n  (x * x == x)\n\
                        \nboom\n  at line -\n  (Unexpected exception)\n";
        assert_eq!(render_report(&store), expected);
        assert_eq!(exit_code(&store), ExitCode::FAILURE);
    }

    #[test]
    fn test_write_report_matches_rendered_report() {
        let store = store_of(vec![ResultRecord::failed("must_fail", "x * x == x", 17)]);
        let mut out = Vec::new();
        write_report(&store, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), render_report(&store));
    }

    #[test]
    fn test_write_report_propagates_io_errors() {
        struct Closed;

        impl Write for Closed {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let store = store_of(vec![ResultRecord::passed("a")]);
        let err = write_report(&store, &mut Closed).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
