//! `expect(actual).to_be(expected)` wording.

use crate::error::Failure;
use crate::value::Value;

use super::{Raised, Strategy};

/// Default strategy; reports `Expected 8 to be 7.`
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpectStrategy;

impl ExpectStrategy {
    pub const NAME: &'static str = "expect";
}

impl Strategy for ExpectStrategy {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn assert(&self, actual: &Value, expected: &Value) -> Result<(), Failure> {
        if actual == expected {
            return Ok(());
        }
        Err(Failure::Assertion {
            message: format!(
                "Expected {} to be {}.",
                actual.inspect(),
                expected.inspect()
            ),
            actual: actual.clone(),
            expected: expected.clone(),
        })
    }

    fn assert_not(&self, actual: &Value, expected: &Value) -> Result<(), Failure> {
        if actual != expected {
            return Ok(());
        }
        Err(Failure::Assertion {
            message: format!(
                "Expected {} not to be {}.",
                actual.inspect(),
                expected.inspect()
            ),
            actual: actual.clone(),
            expected: expected.clone(),
        })
    }

    fn describe(&self, raised: &Raised) -> String {
        match raised {
            Raised::Failure(failure) => failure.to_string(),
            Raised::Panic(_) => format!(
                "Error: {}",
                raised.panic_message().unwrap_or("row callback panicked")
            ),
        }
    }
}
