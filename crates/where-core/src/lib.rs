//! Table-driven test data.
//!
//! Embeds a data table in source text, parses it, and runs a callback once
//! per row with the row's values bound by column label.
//!
//! # Features
//!
//! - **Extraction**: `/*** ... ***/` comment blocks or `\n`-joined string literals
//! - **Parsing**: optional borders, line comments, blank lines, padding
//! - **Coercion**: numbers, booleans, `null`, `undefined`, quoted and bare strings
//! - **Execution**: abort on first failure, or intercept and keep going
//! - **Strategies**: pluggable assertion wording through a named registry
//!
//! # Example
//!
//! ```ignore
//! use where_core::{Options, run};
//!
//! let source = r#"
//!     /***
//!       | a | b | c |
//!       | 1 | 1 | 1 |
//!       | 4 | 8 | 7 |
//!     ***/
//! "#;
//!
//! let results = run(source, &Options::new().with_intercept(true), |scope| {
//!     let max = scope.number("a")?.max(scope.number("b")?);
//!     scope.expect(max).to_be(scope.value("c")?)
//! })?;
//!
//! assert_eq!(results.passing.len(), 1);
//! assert!(results.failing[0].message.contains("[4 | 8 | 7]"));
//! ```

mod coerce;
mod error;
mod executor;
mod extract;
mod filter;
mod options;
mod pipeline;
mod results;
mod scope;
mod table;
mod tokenize;
mod value;

pub mod strategy;

// === Error Types ===
pub use error::{Failure, Result, WhereError};

// === Entry Points ===
pub use pipeline::{parse_raw, parse_table, run};

// === Parsing Stages ===
pub use coerce::{coerce, is_numeric, is_quoted, parse_numeric};
pub use extract::{RawTable, SurfaceForm, extract_all, extract_table};
pub use filter::{Line, filter_lines, strip_comment};
pub use table::{ParsedTable, validate};
pub use tokenize::{DELIMITER, TokenizedTable, is_valid_label, split_line, tokenize};

// === Values ===
pub use value::{Value, to_precision};

// === Execution ===
pub use options::{INTERCEPT_KEY, LOG_KEY, Options, STRATEGY_KEY};
pub use results::{Outcome, Results};
pub use scope::{Expectation, Scope};
pub use strategy::{Raised, Strategy};
