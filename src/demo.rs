//! Demo tests: how to declare tests, check conditions and use helper routines.

use tinyunit::{CheckResult, check, unit_test};

#[unit_test]
fn integer_multiplication() {
    check!(7 * 8 == 56);
}

#[unit_test]
fn integer_addition() {
    let x = 9;
    let y = 4;
    check!(x + y == 13);
}

#[unit_test]
fn must_fail() {
    let x = 5;
    check!(x * x == x);
}

/// Checks inside a helper are attributed to the calling test, with the helper's line.
fn square_is(x: i32, y: i32) -> CheckResult {
    check!(x * x == y);
    Ok(())
}

#[unit_test]
fn complicated() -> CheckResult {
    square_is(2, 4)?;
    square_is(3, 9)?;
    square_is(5, 25)?;
    Ok(())
}
