//! Immutable outcome of a single test.
//!
//! A [`ResultRecord`] is produced exactly once per test unit, at the test boundary, and copied into the
//! [`ResultStore`](crate::store::ResultStore). It has no identity beyond its fields.

use std::fmt;

/// Condition text recorded for failures that did not come from a `check!`.
pub const UNEXPECTED_FAILURE: &str = "Unexpected exception";

/// Outcome of one test: name, success flag, failing condition text and source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRecord {
    name: String,
    success: bool,
    condition: String,
    line: Option<u32>,
}

impl ResultRecord {
    /// A passing record: empty condition, no line.
    pub fn passed(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            success: true,
            condition: String::new(),
            line: None,
        }
    }

    /// A record for a failed `check!`, carrying its literal condition text and line.
    pub fn failed(name: impl Into<String>, condition: impl Into<String>, line: u32) -> Self {
        Self {
            name: name.into(),
            success: false,
            condition: condition.into(),
            line: Some(line),
        }
    }

    /// A record for a failure that escaped the body without a `check!` (an error or a panic).
    pub fn unexpected(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            success: false,
            condition: UNEXPECTED_FAILURE.to_string(),
            line: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn success(&self) -> bool {
        self.success
    }

    /// Failing condition text; empty for passing records.
    pub fn condition(&self) -> &str {
        &self.condition
    }

    /// Source line of the failing check, if there was one.
    pub fn line(&self) -> Option<u32> {
        self.line
    }

    /// The line as a signed integer, `-1` when absent.
    pub fn line_or_sentinel(&self) -> i64 {
        self.line.map_or(-1, i64::from)
    }
}

impl fmt::Display for ResultRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.success {
            return write!(f, "{}: passed", self.name);
        }
        match self.line {
            Some(line) => write!(f, "{}: failed at line {} ({})", self.name, line, self.condition),
            None => write!(f, "{}: failed ({})", self.name, self.condition),
        }
    }
}
