//! Test case units and the test boundary.
//!
//! A [`TestCase`] owns a name and a body. Running it consumes the unit, so each unit produces exactly one
//! [`ResultRecord`]. Everything the body can do wrong is contained here: failed checks, propagated errors, and panics
//! all become a failed record and control returns normally to the caller.
//!
//! Panics raised inside a running body bypass the process panic hook: the outcome reaches the caller only through
//! the hooks, the store and a `warn!` event. Panics raised anywhere else still reach the previously installed hook.

use std::any::Any;
use std::borrow::Cow;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;

use tracing::{debug, warn};

use crate::failure::{CheckResult, Failure};
use crate::hooks::TestHooks;
use crate::record::ResultRecord;
use crate::store::ResultStore;

/// Compile-time declaration of a test, as emitted by `#[unit_test]`.
#[derive(Debug, Clone, Copy)]
pub struct TestDecl {
    name: &'static str,
    file: &'static str,
    line: u32,
    body: fn() -> CheckResult,
}

impl TestDecl {
    pub const fn new(name: &'static str, file: &'static str, line: u32, body: fn() -> CheckResult) -> Self {
        Self { name, file, line, body }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Source file of the declaration.
    pub fn file(&self) -> &'static str {
        self.file
    }

    /// Source line of the declaration.
    pub fn line(&self) -> u32 {
        self.line
    }
}

/// Lifecycle of a test unit. `Passed`, `FailedAssertion` and `FailedUnexpected` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestState {
    Unstarted,
    Running,
    Passed,
    FailedAssertion,
    FailedUnexpected,
}

impl TestState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            TestState::Passed | TestState::FailedAssertion | TestState::FailedUnexpected
        )
    }
}

enum TestBody {
    Static(fn() -> CheckResult),
    Boxed(Box<dyn FnOnce() -> CheckResult>),
}

impl TestBody {
    fn call(self) -> CheckResult {
        match self {
            TestBody::Static(f) => f(),
            TestBody::Boxed(f) => f(),
        }
    }
}

/// One named, independently runnable test.
pub struct TestCase {
    name: Cow<'static, str>,
    body: TestBody,
}

impl TestCase {
    /// A test from a name and a body closure.
    pub fn new<F>(name: impl Into<Cow<'static, str>>, body: F) -> Self
    where
        F: FnOnce() -> CheckResult + 'static,
    {
        Self {
            name: name.into(),
            body: TestBody::Boxed(Box::new(body)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the body once, contain any failure, and register exactly one record in `store`.
    ///
    /// Calls `hooks.test_started` before the body and, through the store, `hooks.test_completed` after it. Returns the
    /// terminal state.
    pub fn run<H>(self, store: &mut ResultStore, hooks: &mut H) -> TestState
    where
        H: TestHooks + ?Sized,
    {
        hooks.test_started(&self.name);
        debug!(test = %self.name, state = ?TestState::Running, "test started");

        install_panic_filter();
        let outcome = {
            let _guard = BodyGuard::enter();
            panic::catch_unwind(AssertUnwindSafe(move || self.body.call()))
        };
        let name = self.name.into_owned();

        let (state, record) = match outcome {
            Ok(Ok(())) => (TestState::Passed, ResultRecord::passed(name)),
            Ok(Err(Failure::Assertion(failure))) => (
                TestState::FailedAssertion,
                ResultRecord::failed(name, failure.condition(), failure.line()),
            ),
            Ok(Err(Failure::Unexpected(err))) => {
                warn!(test = %name, error = %err, "test returned an unexpected error");
                (TestState::FailedUnexpected, ResultRecord::unexpected(name))
            }
            Err(payload) => {
                let location = PANIC_LOCATION.with(|l| l.borrow_mut().take()).unwrap_or_default();
                warn!(test = %name, panic = %panic_message(payload.as_ref()), %location, "test panicked");
                (TestState::FailedUnexpected, ResultRecord::unexpected(name))
            }
        };

        debug!(test = record.name(), ?state, "test finished");
        store.register_result(record, hooks);
        state
    }
}

impl From<&TestDecl> for TestCase {
    fn from(decl: &TestDecl) -> Self {
        Self {
            name: Cow::Borrowed(decl.name),
            body: TestBody::Static(decl.body),
        }
    }
}

impl fmt::Debug for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestCase")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

thread_local! {
    static IN_TEST_BODY: Cell<bool> = const { Cell::new(false) };
    static PANIC_LOCATION: RefCell<Option<String>> = const { RefCell::new(None) };
}

static PANIC_FILTER: Once = Once::new();

/// Wrap the current panic hook, once per process, so it stays silent for panics raised inside a test body.
fn install_panic_filter() {
    PANIC_FILTER.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if IN_TEST_BODY.with(Cell::get) {
                let location = info.location().map(ToString::to_string);
                PANIC_LOCATION.with(|l| *l.borrow_mut() = location);
            } else {
                previous(info);
            }
        }));
    });
}

/// Marks the current thread as running a test body until dropped.
struct BodyGuard {
    was_in_body: bool,
}

impl BodyGuard {
    fn enter() -> Self {
        let was_in_body = IN_TEST_BODY.with(|flag| flag.replace(true));
        PANIC_LOCATION.with(|l| l.borrow_mut().take());
        Self { was_in_body }
    }
}

impl Drop for BodyGuard {
    fn drop(&mut self) {
        IN_TEST_BODY.with(|flag| flag.set(self.was_in_body));
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "<non-string panic payload>"
    }
}
