//! Entry points: source text in, table or results out.

use crate::coerce::coerce;
use crate::error::{Failure, Result};
use crate::executor::execute;
use crate::extract::{RawTable, extract_table};
use crate::filter::filter_lines;
use crate::options::Options;
use crate::results::Results;
use crate::scope::Scope;
use crate::strategy;
use crate::table::{ParsedTable, validate};
use crate::tokenize::tokenize;

/// Parses the first table in `source` without running anything.
///
/// # Errors
///
/// Any structural error: no table, malformed rows, too few rows, duplicate
/// labels.
pub fn parse_table(source: &str) -> Result<ParsedTable> {
    let raw = extract_table(source)?;
    parse_raw(&raw)
}

/// Parses already-extracted table text.
///
/// # Errors
///
/// Same as [`parse_table`] minus extraction.
pub fn parse_raw(raw: &RawTable) -> Result<ParsedTable> {
    let lines = filter_lines(raw);
    let tokens = tokenize(&lines)?;
    let values = tokens
        .rows
        .iter()
        .map(|cells| cells.iter().map(|cell| coerce(cell)).collect())
        .collect();
    let table = validate(tokens.labels, values, tokens.line_count)?;

    tracing::debug!(
        labels = ?table.labels,
        rows = table.len(),
        form = ?raw.form,
        "parsed data table"
    );
    Ok(table)
}

/// Parses the table in `source` and runs `body` once per data row.
///
/// Each row's labels are bound in the [`Scope`] passed to `body`, alongside
/// every option entry. Assertions go through the strategy named by the
/// `strategy` option, or the registry default.
///
/// # Errors
///
/// - structural errors from [`parse_table`]
/// - [`WhereError::UnknownStrategy`](crate::WhereError::UnknownStrategy)
/// - [`WhereError::Assertion`](crate::WhereError::Assertion) for the first
///   failing row when `intercept` is not set
///
/// # Example
///
/// ```ignore
/// let results = where_core::run(
///     r#"
///     /***
///       a | b | c
///       1 | 2 | 2
///       4 | 3 | 4
///     ***/
///     "#,
///     &Options::new(),
///     |scope| scope.expect(scope.number("a")?.max(scope.number("b")?)).to_be(scope.value("c")?),
/// )?;
/// assert_eq!(results.passing.len(), 2);
/// ```
pub fn run<F>(source: &str, options: &Options, body: F) -> Result<Results>
where
    F: FnMut(&Scope<'_>) -> std::result::Result<(), Failure>,
{
    let table = parse_table(source)?;
    let strategy = strategy::resolve(options.strategy())?;
    execute(table, options, strategy.as_ref(), body)
}
