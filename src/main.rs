//! tinyunit demo harness: runs the tests declared in `demo` through the console reporter.
//!
//! Expected outcome: four tests, one failure (`must_fail`), exit code 1.

mod demo;

tinyunit::harness_main!();
