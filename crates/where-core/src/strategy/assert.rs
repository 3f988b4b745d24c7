//! `assert_eq!`-style wording.

use crate::error::Failure;
use crate::value::Value;

use super::{Raised, Strategy};

/// Reports failures the way the standard assertion macros do.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssertStrategy;

impl AssertStrategy {
    pub const NAME: &'static str = "assert";

    fn mismatch(op: &str, actual: &Value, expected: &Value) -> Failure {
        Failure::Assertion {
            message: format!(
                "assertion `left {op} right` failed (left: {}, right: {})",
                actual.inspect(),
                expected.inspect()
            ),
            actual: actual.clone(),
            expected: expected.clone(),
        }
    }
}

impl Strategy for AssertStrategy {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn assert(&self, actual: &Value, expected: &Value) -> Result<(), Failure> {
        if actual == expected {
            Ok(())
        } else {
            Err(Self::mismatch("==", actual, expected))
        }
    }

    fn assert_not(&self, actual: &Value, expected: &Value) -> Result<(), Failure> {
        if actual == expected {
            Err(Self::mismatch("!=", actual, expected))
        } else {
            Ok(())
        }
    }

    // Panics from assert!/assert_eq! already carry std wording.
    fn describe(&self, raised: &Raised) -> String {
        match raised {
            Raised::Failure(failure) => failure.to_string(),
            Raised::Panic(_) => raised
                .panic_message()
                .unwrap_or("explicit panic")
                .to_string(),
        }
    }

    fn pass_detail(&self) -> String {
        "ok".to_string()
    }
}
