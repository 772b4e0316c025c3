//! CLI module for tinyunit test binaries
//!
//! Every test binary (the `tinyunit-demo` binary, or one generated by `harness_main!`) accepts the same flags:
//!
//! - `-q/--quiet` - suppress per-test progress lines
//! - `-v/--verbose` - also print a line when each test starts
//! - `--name-width N` - width of the test name column
//! - `-k EXPR` - only run tests whose name contains `EXPR`
//! - `--list` - list the declared tests in run order and exit
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use std::fmt;
use std::io::{self, Write};
use std::process;

use clap::Parser;
use tinyunit_core::Registry;

use crate::harness::{self, HarnessConfig, Progress};

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<harness::HarnessError> for CliError {
    fn from(err: harness::HarnessError) -> Self {
        Self::failure(err.to_string())
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Run the unit tests linked into this binary
#[derive(Parser, Debug)]
#[command(name = "tinyunit")]
#[command(version)]
#[command(about = "Run the unit tests linked into this binary", long_about = None)]
pub struct Cli {
    /// Suppress per-test progress lines
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Also print a line when each test starts
    #[arg(short, long)]
    pub verbose: bool,

    /// Width of the test name column
    #[arg(long = "name-width", value_name = "N", default_value_t = 60)]
    pub name_width: usize,

    /// Only run tests whose name contains this keyword
    #[arg(short = 'k', value_name = "EXPR")]
    pub filter: Option<String>,

    /// List declared tests in run order without running them
    #[arg(long)]
    pub list: bool,
}

impl Cli {
    /// Harness configuration described by the flags.
    pub fn config(&self) -> HarnessConfig {
        let progress = if self.quiet {
            Progress::Quiet
        } else if self.verbose {
            Progress::Verbose
        } else {
            Progress::Completed
        };

        let config = HarnessConfig::new()
            .with_name_width(self.name_width)
            .with_progress(progress);
        match &self.filter {
            Some(keyword) => config.with_filter(keyword.clone()),
            None => config,
        }
    }
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    let config = cli.config();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if cli.list {
        return list_tests(&config, &mut out);
    }

    let store = harness::run_declared(&config, &mut out)?;
    Ok(harness::exit_code(&store))
}

/// Print the names of the tests that would run, one per line.
fn list_tests<W: Write>(config: &HarnessConfig, out: &mut W) -> CliResult<ExitCode> {
    let mut registry = Registry::declared();
    if let Some(keyword) = &config.filter {
        registry.retain_matching(keyword);
    }
    for name in registry.names() {
        writeln!(out, "{name}").map_err(|e| CliError::failure(format!("Error writing test list: {e}")))?;
    }
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// Tests
// ============================================================================
