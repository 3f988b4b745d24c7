//! Assertion strategies and the process-wide strategy registry.
//!
//! A [`Strategy`] teaches the engine how to assert and how to read a raised
//! failure back as text. Strategies are registered by name; a run resolves
//! its strategy from the `strategy` option or the registry default.
//!
//! # Built-in Strategies
//!
//! | Name | Failure wording | Pass detail |
//! |------|-----------------|-------------|
//! | `expect` (default) | `Expected 8 to be 7.` | `Passed` |
//! | `assert` | assertion `left == right` failed (left: 8, right: 7) | `ok` |
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use where_core::strategy;
//!
//! strategy::register("mine", Arc::new(MyStrategy));
//! assert!(strategy::list().contains(&"mine".to_string()));
//! strategy::unregister("mine");
//! ```

mod assert;
mod expect;
mod registry;

use std::any::Any;
use std::fmt;

use crate::error::Failure;
use crate::value::Value;

pub use assert::AssertStrategy;
pub use expect::ExpectStrategy;
pub use registry::{
    StrategyRegistry, default_name, list, lookup, register, set_default, unregister,
};

pub(crate) use registry::resolve;

/// Something a row callback raised: a returned failure or a caught panic.
pub enum Raised {
    Failure(Failure),
    Panic(Box<dyn Any + Send>),
}

impl Raised {
    /// Text carried by a panic payload, when it is a string.
    pub fn panic_message(&self) -> Option<&str> {
        let Self::Panic(payload) = self else {
            return None;
        };
        payload
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
    }
}

impl fmt::Debug for Raised {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Failure(failure) => f.debug_tuple("Failure").field(failure).finish(),
            Self::Panic(_) => f
                .debug_tuple("Panic")
                .field(&self.panic_message().unwrap_or("<non-string payload>"))
                .finish(),
        }
    }
}

/// Adapter between the engine and an assertion style.
///
/// # Implementing a Strategy
///
/// ```ignore
/// struct Loose;
///
/// impl Strategy for Loose {
///     fn name(&self) -> &str {
///         "loose"
///     }
///
///     fn assert(&self, actual: &Value, expected: &Value) -> Result<(), Failure> {
///         if actual.to_string() == expected.to_string() {
///             Ok(())
///         } else {
///             Err(Failure::custom(format!("{actual} != {expected}")))
///         }
///     }
/// }
/// ```
pub trait Strategy: Send + Sync {
    /// Name the strategy reports inside a callback's scope.
    fn name(&self) -> &str;

    /// Checks that `actual` equals `expected`.
    fn assert(&self, actual: &Value, expected: &Value) -> Result<(), Failure>;

    /// Checks that `actual` differs from `expected`.
    fn assert_not(&self, actual: &Value, expected: &Value) -> Result<(), Failure> {
        if actual == expected {
            Err(Failure::custom(format!(
                "Expected {} not to be {}.",
                actual.inspect(),
                expected.inspect()
            )))
        } else {
            Ok(())
        }
    }

    /// Human-readable text for a raised failure.
    fn describe(&self, raised: &Raised) -> String {
        match raised {
            Raised::Failure(failure) => failure.to_string(),
            Raised::Panic(_) => raised
                .panic_message()
                .unwrap_or("row callback panicked")
                .to_string(),
        }
    }

    /// Detail appended to the message of a passing row.
    fn pass_detail(&self) -> String {
        "Passed".to_string()
    }
}
