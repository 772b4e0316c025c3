#![forbid(unsafe_code)]
//! tinyunit: a tiny self-registering unit test framework.
//!
//! Tests are declared with `#[unit_test]`, checked with `check!`, collected at link time, and run by a harness binary
//! that reports each outcome as it completes and prints failure details at the end.
//!
//! ```ignore
//! use tinyunit::{CheckResult, check, unit_test};
//!
//! #[unit_test]
//! fn integer_multiplication() {
//!     check!(7 * 8 == 56);
//! }
//!
//! fn square_is(x: i32, y: i32) -> CheckResult {
//!     check!(x * x == y);
//!     Ok(())
//! }
//!
//! #[unit_test]
//! fn squares() -> CheckResult {
//!     square_is(2, 4)?;
//!     square_is(5, 25)?;
//!     Ok(())
//! }
//!
//! tinyunit::harness_main!();
//! ```
//!
//! ## Crates
//!
//! - `tinyunit_core` - registry, result store, hooks and the test boundary (re-exported here)
//! - `tinyunit_macros` - the `#[unit_test]` attribute (re-exported here)
//! - this crate - the console harness (`harness`) and its command line (`cli`)
//!
//! ## Panic Policy
//!
//! Library code returns `Result` and propagates with `?`. The `cli` and `harness` modules enforce
//! `#![deny(clippy::unwrap_used)]`. Test code may `.unwrap()`.

pub mod cli;
pub mod harness;

pub use tinyunit_core::{
    AssertionFailure, CheckResult, DECLARED_TESTS, Failure, FnHooks, QuietProgress, Registry, ResultRecord,
    ResultStore, TestCase, TestDecl, TestHooks, TestState, UNEXPECTED_FAILURE, check, from_fns,
};
pub use tinyunit_core::{case, failure, hooks, record, registry, store};
pub use tinyunit_macros::unit_test;

pub use harness::{ConsoleReporter, HarnessConfig, Progress};

#[doc(hidden)]
pub use tinyunit_core::__private;

/// Initialize structured logging with an env-based filter, defaulting to `warn` so logs stay out of the report.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .try_init();
}

/// Generate a `main` that runs every `#[unit_test]` linked into the binary through the console harness.
#[macro_export]
macro_rules! harness_main {
    () => {
        fn main() {
            $crate::init_tracing();
            $crate::cli::run();
        }
    };
}
