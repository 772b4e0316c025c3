//! Panics inside test bodies must not reach the process panic hook; panics elsewhere still must.
//!
//! Kept in its own test binary: the panic hook is process-wide, so this must be the only test installing one.

use std::panic;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tinyunit_core::{CheckResult, QuietProgress, Registry, ResultRecord};

#[test]
fn panic_hook_only_sees_panics_outside_test_bodies() {
    let hook_calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&hook_calls);
    panic::set_hook(Box::new(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    }));

    let mut registry = Registry::new();
    registry
        .register("panics", || -> CheckResult { panic!("boom inside a test") })
        .register("passes", || Ok(()));
    let store = registry.run(&mut QuietProgress);

    assert_eq!(hook_calls.load(Ordering::SeqCst), 0);
    assert_eq!(store.count(), 2);
    assert_eq!(store.iter().next(), Some(&ResultRecord::unexpected("panics")));

    let outside = panic::catch_unwind(|| -> u8 { panic!("boom outside a test") });
    assert!(outside.is_err());
    assert_eq!(hook_calls.load(Ordering::SeqCst), 1);

    drop(panic::take_hook());
}
