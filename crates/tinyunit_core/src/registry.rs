//! Ordered test registry and the runner loop.
//!
//! Tests enter a [`Registry`] in two ways:
//!
//! - explicitly, via [`Registry::register`] / [`Registry::add`], in call order;
//! - at declaration time, via `#[unit_test]`, which places a [`TestDecl`] into the [`DECLARED_TESTS`] distributed
//!   slice. [`Registry::declared`] collects them ordered by source file, then declaration line.
//!
//! Running a registry consumes it: every unit runs exactly once, sequentially, in registry order.

use std::borrow::Cow;

use linkme::distributed_slice;
use tracing::debug;

use crate::case::{TestCase, TestDecl, TestState};
use crate::failure::CheckResult;
use crate::hooks::TestHooks;
use crate::store::ResultStore;

/// Every test declared with `#[unit_test]` in the final binary, in link order.
#[distributed_slice]
pub static DECLARED_TESTS: [TestDecl] = [..];

/// An ordered list of tests waiting to run.
#[derive(Debug, Default)]
pub struct Registry {
    cases: Vec<TestCase>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// All `#[unit_test]` declarations linked into this binary.
    ///
    /// Link order is platform-defined, so declarations are sorted by `(file, line)`: tests in one file run in the order
    /// they are written, and files run in path order.
    pub fn declared() -> Self {
        Self::from_decls(DECLARED_TESTS.iter())
    }

    /// Build a registry from a set of declarations, ordered by `(file, line)`.
    pub fn from_decls<'a>(decls: impl IntoIterator<Item = &'a TestDecl>) -> Self {
        let mut decls: Vec<&TestDecl> = decls.into_iter().collect();
        decls.sort_by_key(|d| (d.file(), d.line()));
        debug!(count = decls.len(), "collected declared tests");

        Self {
            cases: decls.into_iter().map(TestCase::from).collect(),
        }
    }

    /// Append a test built from a name and a body closure.
    pub fn register<F>(&mut self, name: impl Into<Cow<'static, str>>, body: F) -> &mut Self
    where
        F: FnOnce() -> CheckResult + 'static,
    {
        self.add(TestCase::new(name, body))
    }

    pub fn add(&mut self, case: TestCase) -> &mut Self {
        self.cases.push(case);
        self
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Test names in run order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.cases.iter().map(TestCase::name)
    }

    /// Keep only tests whose name contains `keyword`.
    pub fn retain_matching(&mut self, keyword: &str) {
        self.cases.retain(|case| case.name().contains(keyword));
    }

    /// Run every test once, in order, registering each outcome in `store`.
    pub fn run_into<H>(self, store: &mut ResultStore, hooks: &mut H)
    where
        H: TestHooks + ?Sized,
    {
        debug!(count = self.cases.len(), "running tests");
        for case in self.cases {
            let state = case.run(store, hooks);
            debug_assert!(state.is_terminal());
        }
    }

    /// Run every test into a fresh store and return it.
    pub fn run<H>(self, hooks: &mut H) -> ResultStore
    where
        H: TestHooks + ?Sized,
    {
        let mut store = ResultStore::new();
        self.run_into(&mut store, hooks);
        store
    }

    /// Like [`run_into`](Self::run_into), but returns the terminal state of each test alongside its name.
    pub fn run_with_states<H>(self, store: &mut ResultStore, hooks: &mut H) -> Vec<(String, TestState)>
    where
        H: TestHooks + ?Sized,
    {
        self.cases
            .into_iter()
            .map(|case| {
                let name = case.name().to_string();
                (name, case.run(store, hooks))
            })
            .collect()
    }
}
