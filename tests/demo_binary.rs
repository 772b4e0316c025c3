//! End-to-end tests for the `tinyunit-demo` binary: declared tests, the console report, `--list`, `-k` and the exit
//! status.

use std::process::{Command, Output};

const DEMO_SOURCE: &str = include_str!("../src/demo.rs");

/// 1-based line number of the first line of `src/demo.rs` containing `needle`.
fn demo_line_of(needle: &str) -> usize {
    DEMO_SOURCE
        .lines()
        .position(|line| line.contains(needle))
        .unwrap_or_else(|| panic!("`{needle}` not found in src/demo.rs"))
        + 1
}

fn run_demo(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tinyunit-demo"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run tinyunit-demo")
}

#[test]
fn demo_reports_one_failure_and_exits_with_failure() {
    let output = run_demo(&[]);
    assert_eq!(output.status.code(), Some(1));

    let expected = format!(
        "{:<60} Passed\n\
         {:<60} Passed\n\
         {:<60} FAIL!\n\
         {:<60} Passed\n\
         \n1 of 4 tests failed. See details below\n\
         \nmust_fail\n  at line {}\n  (x * x == x)\n",
        "integer_multiplication",
        "integer_addition",
        "must_fail",
        "complicated",
        demo_line_of("check!(x * x == x);"),
    );
    assert_eq!(String::from_utf8_lossy(&output.stdout), expected);
    assert!(
        output.stderr.is_empty(),
        "unexpected stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn list_prints_declared_names_in_run_order() {
    let output = run_demo(&["--list"]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "integer_multiplication\ninteger_addition\nmust_fail\ncomplicated\n"
    );
}

#[test]
fn filter_applies_to_list_and_run() {
    let listed = run_demo(&["--list", "-k", "integer"]);
    assert!(listed.status.success());
    assert_eq!(
        String::from_utf8_lossy(&listed.stdout),
        "integer_multiplication\ninteger_addition\n"
    );

    let run = run_demo(&["-q", "-k", "integer"]);
    assert!(run.status.success());
    assert_eq!(String::from_utf8_lossy(&run.stdout), "\nAll 2 tests passed\n");
}

#[test]
fn conflicting_flags_are_rejected() {
    let output = run_demo(&["-q", "-v"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
}
