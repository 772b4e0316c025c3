//! Notification hooks implemented by the reporting harness.
//!
//! The core calls these synchronously but never implements them itself: both methods are required, so a harness that
//! forgets one fails to compile. Use [`QuietProgress`] (or an empty method body) to opt out of notifications.

use crate::record::ResultRecord;

/// Callbacks driven by a test run.
pub trait TestHooks {
    /// Called once per test, before its body runs.
    fn test_started(&mut self, name: &str);

    /// Called once per test, after its outcome is known, from within
    /// [`ResultStore::register_result`](crate::store::ResultStore::register_result).
    fn test_completed(&mut self, record: &ResultRecord);
}

impl<H: TestHooks + ?Sized> TestHooks for &mut H {
    fn test_started(&mut self, name: &str) {
        (**self).test_started(name);
    }

    fn test_completed(&mut self, record: &ResultRecord) {
        (**self).test_completed(record);
    }
}

/// Hooks that ignore both notifications.
#[derive(Debug, Default, Clone, Copy)]
pub struct QuietProgress;

impl TestHooks for QuietProgress {
    fn test_started(&mut self, _name: &str) {}

    fn test_completed(&mut self, _record: &ResultRecord) {}
}

/// Hooks built from a pair of closures. See [`from_fns`].
pub struct FnHooks<S, C> {
    on_start: S,
    on_complete: C,
}

/// Build hooks from two closures. Both are mandatory; pass `|_| {}` to ignore one.
pub fn from_fns<S, C>(on_start: S, on_complete: C) -> FnHooks<S, C>
where
    S: FnMut(&str),
    C: FnMut(&ResultRecord),
{
    FnHooks { on_start, on_complete }
}

impl<S, C> TestHooks for FnHooks<S, C>
where
    S: FnMut(&str),
    C: FnMut(&ResultRecord),
{
    fn test_started(&mut self, name: &str) {
        (self.on_start)(name)
    }

    fn test_completed(&mut self, record: &ResultRecord) {
        (self.on_complete)(record)
    }
}
