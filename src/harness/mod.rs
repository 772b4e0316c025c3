//! Console test harness
//!
//! The harness drives a [`Registry`] through a [`ConsoleReporter`], then prints the summary report:
//!
//! ```text
//! integer_multiplication                                       Passed
//! must_fail                                                    FAIL!
//!
//! 1 of 2 tests failed. See details below
//!
//! must_fail
//!   at line 14
//!   (x * x == x)
//! ```
//!
//! ## Modules
//!
//! - `config` - [`HarnessConfig`] and [`Progress`]
//! - `reporter` - [`ConsoleReporter`], the live `TestHooks` implementation
//! - `report` - the final summary and the exit-code policy

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod config;
pub mod report;
pub mod reporter;

use std::io::{self, Write};

use thiserror::Error;
use tinyunit_core::{Registry, ResultStore};
use tracing::info;

pub use config::{HarnessConfig, Progress};
pub use report::{Summary, exit_code, render_report, write_report};
pub use reporter::ConsoleReporter;

/// Errors that occur while running the harness
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("failed to write test progress: {0}")]
    Progress(#[source] io::Error),

    #[error("failed to write test report: {0}")]
    Report(#[source] io::Error),
}

/// Run `registry` with live progress and the final report written to `out`.
///
/// Applies `config.filter` before running. Returns the filled result store so the caller can choose an exit code.
pub fn run_registry<W: Write>(
    mut registry: Registry,
    config: &HarnessConfig,
    out: &mut W,
) -> Result<ResultStore, HarnessError> {
    if let Some(keyword) = &config.filter {
        registry.retain_matching(keyword);
    }
    info!(tests = registry.len(), "starting test run");

    let mut store = ResultStore::new();
    let mut reporter = ConsoleReporter::new(&mut *out, config);
    registry.run_into(&mut store, &mut reporter);
    reporter.finish().map_err(HarnessError::Progress)?;

    write_report(&store, out).map_err(HarnessError::Report)?;
    out.flush().map_err(HarnessError::Report)?;

    info!(
        total = store.count(),
        failed = store.failed_count(),
        "test run complete"
    );
    Ok(store)
}

/// Run every `#[unit_test]` linked into the binary.
pub fn run_declared<W: Write>(config: &HarnessConfig, out: &mut W) -> Result<ResultStore, HarnessError> {
    run_registry(Registry::declared(), config, out)
}
