//! Failure signals raised inside test bodies.
//!
//! A failed `check!` returns early with an [`AssertionFailure`] wrapped in [`Failure`]. Helpers that contain checks
//! return [`CheckResult`] and are called with `?`, so the first failing check unwinds to the enclosing test boundary
//! and no later check in that body runs.
//!
//! Any other `std::error::Error` propagated with `?` becomes [`Failure::Unexpected`].

use std::error::Error as StdError;
use std::fmt;

use thiserror::Error;

/// Result type of test bodies and helper routines that perform checks.
pub type CheckResult = Result<(), Failure>;

/// A `check!` whose condition evaluated to false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("check failed at line {line}: {condition}")]
pub struct AssertionFailure {
    condition: &'static str,
    line: u32,
}

impl AssertionFailure {
    pub const fn new(condition: &'static str, line: u32) -> Self {
        Self { condition, line }
    }

    /// Literal source text of the failed condition.
    pub fn condition(&self) -> &'static str {
        self.condition
    }

    pub fn line(&self) -> u32 {
        self.line
    }
}

/// Why a test body stopped early.
///
/// Not an `Error` itself: any error type converts into it with `?`.
pub enum Failure {
    Assertion(AssertionFailure),
    Unexpected(Box<dyn StdError + Send + Sync + 'static>),
}

impl Failure {
    pub fn is_assertion(&self) -> bool {
        matches!(self, Failure::Assertion(_))
    }
}

impl<E> From<E> for Failure
where
    E: StdError + Send + Sync + 'static,
{
    fn from(err: E) -> Self {
        let boxed: Box<dyn StdError + Send + Sync + 'static> = Box::new(err);
        match boxed.downcast::<AssertionFailure>() {
            Ok(assertion) => Failure::Assertion(*assertion),
            Err(other) => Failure::Unexpected(other),
        }
    }
}

impl fmt::Debug for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::Assertion(a) => f.debug_tuple("Assertion").field(a).finish(),
            Failure::Unexpected(e) => f.debug_tuple("Unexpected").field(e).finish(),
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::Assertion(a) => write!(f, "{a}"),
            Failure::Unexpected(e) => write!(f, "unexpected error: {e}"),
        }
    }
}

/// Check a boolean condition inside a test body or helper.
///
/// On `false`, returns early from the enclosing function with an [`AssertionFailure`] carrying the literal condition
/// text and the current line. The enclosing function must return [`CheckResult`].
///
/// ```ignore
/// fn square_is(x: i32, y: i32) -> CheckResult {
///     check!(x * x == y);
///     Ok(())
/// }
/// ```
#[macro_export]
macro_rules! check {
    ($cond:expr $(,)?) => {
        if !($cond) {
            return ::core::result::Result::Err(::core::convert::From::from(
                $crate::failure::AssertionFailure::new(::core::stringify!($cond), ::core::line!()),
            ));
        }
    };
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io;

    fn square_is(x: i32, y: i32) -> CheckResult {
        check!(x * x == y);
        Ok(())
    }

    #[test]
    fn test_check_passes_silently() {
        assert!(square_is(3, 9).is_ok());
        assert!(square_is(3, 10).is_err());
    }

    #[test]
    fn test_check_captures_literal_condition() {
        let body = |x: i32| -> CheckResult {
            check!(x * x == x);
            Ok(())
        };
        let expected_line = line!() - 3;
        match body(5) {
            Err(Failure::Assertion(a)) => {
                assert_eq!(a.condition(), "x * x == x");
                assert_eq!(a.line(), expected_line);
            }
            other => panic!("expected assertion failure, got {other:?}"),
        }
    }

    #[test]
    fn test_first_failing_check_stops_the_body() {
        let mut reached = false;
        let mut body = || -> CheckResult {
            check!(1 + 1 == 3);
            reached = true;
            check!(true);
            Ok(())
        };
        let result = body();
        assert!(result.is_err());
        assert!(!reached);
    }

    #[test]
    fn test_io_error_converts_to_unexpected() {
        let body = || -> CheckResult {
            Err::<(), _>(io::Error::other("disk on fire"))?;
            Ok(())
        };
        let failure = body().unwrap_err();
        assert!(!failure.is_assertion());
        assert_eq!(failure.to_string(), "unexpected error: disk on fire");
    }

    #[test]
    fn test_assertion_failure_through_question_mark_stays_assertion() {
        let body = || -> CheckResult {
            Err::<(), _>(AssertionFailure::new("a < b", 9))?;
            Ok(())
        };
        assert!(matches!(body(), Err(Failure::Assertion(a)) if a.line() == 9));
    }
}
