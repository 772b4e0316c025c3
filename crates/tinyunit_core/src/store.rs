//! Result aggregation.
//!
//! The store is an ordinary owned value: whoever runs the registry constructs it, lends it mutably to the run, and then
//! hands it by shared reference to the reporting harness. Records are kept in completion order.

use std::slice;

use tracing::trace;

use crate::hooks::TestHooks;
use crate::record::ResultRecord;

/// Ordered collection of test outcomes with a running failure count.
#[derive(Debug, Default, Clone)]
pub struct ResultStore {
    results: Vec<ResultRecord>,
    failed_count: usize,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `record`, update the failure count, then notify `hooks` that the test completed.
    pub fn register_result<H>(&mut self, record: ResultRecord, hooks: &mut H)
    where
        H: TestHooks + ?Sized,
    {
        if !record.success() {
            self.failed_count += 1;
        }
        trace!(test = record.name(), success = record.success(), "recording result");
        self.results.push(record);

        if let Some(record) = self.results.last() {
            hooks.test_completed(record);
        }
    }

    /// Total number of results registered so far.
    pub fn count(&self) -> usize {
        self.results.len()
    }

    /// Number of failed results registered so far.
    pub fn failed_count(&self) -> usize {
        self.failed_count
    }

    pub fn passed_count(&self) -> usize {
        self.count() - self.failed_count
    }

    pub fn all_passed(&self) -> bool {
        self.failed_count == 0
    }

    /// Iterate every result in registration order. Each call starts a fresh pass.
    pub fn iter(&self) -> slice::Iter<'_, ResultRecord> {
        self.results.iter()
    }

    /// Iterate only the failed results, in registration order.
    pub fn failed(&self) -> impl Iterator<Item = &ResultRecord> + '_ {
        self.results.iter().filter(|r| !r.success())
    }

    /// Call `visitor` once per failed result, in registration order.
    pub fn for_each_failed<F>(&self, visitor: F)
    where
        F: FnMut(&ResultRecord),
    {
        self.failed().for_each(visitor);
    }
}

impl<'a> IntoIterator for &'a ResultStore {
    type Item = &'a ResultRecord;
    type IntoIter = slice::Iter<'a, ResultRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
