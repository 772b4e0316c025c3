//! Core engine of the tinyunit test framework.
//!
//! This crate owns test registration, execution and result aggregation. It never prints and never exits the process;
//! reporting is delegated to a harness through [`TestHooks`].
//!
//! ## Layout
//!
//! - `record` - immutable [`ResultRecord`] per test
//! - `store` - [`ResultStore`], the ordered aggregator
//! - `failure` - [`AssertionFailure`], [`Failure`], [`CheckResult`] and the `check!` macro
//! - `case` - [`TestCase`], [`TestDecl`] and the test boundary
//! - `registry` - [`Registry`] and the declaration-time [`DECLARED_TESTS`] slice
//! - `hooks` - the [`TestHooks`] contract

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod case;
pub mod failure;
pub mod hooks;
pub mod record;
pub mod registry;
pub mod store;

pub use case::{TestCase, TestDecl, TestState};
pub use failure::{AssertionFailure, CheckResult, Failure};
pub use hooks::{FnHooks, QuietProgress, TestHooks, from_fns};
pub use record::{ResultRecord, UNEXPECTED_FAILURE};
pub use registry::{DECLARED_TESTS, Registry};
pub use store::ResultStore;

#[doc(hidden)]
pub mod __private {
    pub use linkme;
}
