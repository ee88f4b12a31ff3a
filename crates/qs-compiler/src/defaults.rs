//! Values applied when a test declaration omits a field.

/// `expected` when the field is omitted.
pub const EXPECTED_DEFAULT: bool = true;

/// `independent` when the flag is written without a value.
pub const FLAGGED_INDEPENDENT_DEFAULT: bool = true;

/// `independent` when the flag is not written at all.
pub const INDEPENDENT_DEFAULT: bool = false;

pub const DEFAULT_FAILURE_MESSAGE: &str =
    "Test '%s' on condition '%s' failed. Expected '%s', but was '%s'";
pub const DEFAULT_SUCCESS_MESSAGE: &str = "Test '%s' on condition '%s' succeeded.";
pub const SKIP_MESSAGE: &str = "Test '%s' skipped due to profile missing.";

/// Values offered to the failure template: test, condition, expected, actual.
pub const FAILURE_ARITY: usize = 4;
/// Values offered to the success template: test, condition.
pub const SUCCESS_ARITY: usize = 2;
/// Values offered to the skip template: test.
pub const SKIP_ARITY: usize = 1;
