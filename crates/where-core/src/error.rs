//! Error types for table parsing and row execution.

use thiserror::Error;

use crate::value::Value;

/// Errors that end a run before any results are produced.
#[derive(Debug, Error)]
pub enum WhereError {
    // === Extraction Errors ===
    /// Source text has neither a `/*** ... ***/` block nor a multi-line string literal.
    #[error("no data table found: expected a /*** ... ***/ comment or a \\n-separated string literal")]
    NoTableFound,

    // === Structural Errors ===
    /// A line breaks delimiter, border or label rules.
    #[error("malformed row at line {line}: {reason}")]
    MalformedRow { line: usize, reason: String },

    /// Fewer than a label row plus one data row.
    #[error("table should contain at least 2 rows but has {found}")]
    InsufficientRows { found: usize },

    /// Two columns share a label.
    #[error("duplicate label '{label}'")]
    DuplicateLabel { label: String },

    /// A data row does not have one value per label.
    #[error("row {row} has {found} values but the table has {expected} labels")]
    ColumnMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    // === Execution Errors ===
    /// Requested strategy is not registered.
    #[error("unknown strategy '{name}'")]
    UnknownStrategy { name: String },

    /// A row failed while interception was off.
    #[error("row {row} failed:{message}")]
    Assertion { row: usize, message: String },
}

impl WhereError {
    /// Returns true for errors raised while reading the table itself.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::NoTableFound
                | Self::MalformedRow { .. }
                | Self::InsufficientRows { .. }
                | Self::DuplicateLabel { .. }
                | Self::ColumnMismatch { .. }
        )
    }
}

/// A failure raised by a callback for one row.
///
/// Returning one of these from the row callback marks the row as failing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Failure {
    /// A strategy assertion did not hold; `message` is the strategy's wording.
    #[error("{message}")]
    Assertion {
        message: String,
        actual: Value,
        expected: Value,
    },

    /// The callback read a name that is neither a label nor a context key.
    #[error("'{name}' is not defined")]
    Unbound { name: String },

    /// The callback asked for a number but the binding holds something else.
    #[error("'{name}' is not a number: {value}")]
    NotANumber { name: String, value: Value },

    /// Free-form failure raised by the callback.
    #[error("{0}")]
    Custom(String),
}

impl Failure {
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom(message.into())
    }
}

/// Result type for table operations.
pub type Result<T> = std::result::Result<T, WhereError>;
