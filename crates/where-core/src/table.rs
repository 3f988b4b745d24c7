//! Validated tables.

use std::collections::HashSet;

use serde::Serialize;

use crate::error::{Result, WhereError};
use crate::value::Value;

/// A validated data table: ordered labels and one value per label per row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedTable {
    pub labels: Vec<String>,
    pub values: Vec<Vec<Value>>,
}

impl ParsedTable {
    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false for a validated table; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Index of a label.
    pub fn column(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    /// Values of one column, top to bottom.
    pub fn column_values(&self, label: &str) -> Option<Vec<&Value>> {
        let idx = self.column(label)?;
        Some(self.values.iter().map(|row| &row[idx]).collect())
    }

    /// Printed width of each column: the widest of the label and every value.
    pub fn column_widths(&self) -> Vec<usize> {
        self.labels
            .iter()
            .enumerate()
            .map(|(idx, label)| {
                self.values
                    .iter()
                    .map(|row| display_width(&row[idx]))
                    .fold(label.chars().count(), usize::max)
            })
            .collect()
    }
}

pub(crate) fn display_width(value: &Value) -> usize {
    value.to_string().chars().count()
}

/// Validates labels and coerced rows.
///
/// `line_count` is the number of table lines seen (label row included) and
/// is reported when the table is too small.
///
/// # Errors
///
/// - [`WhereError::InsufficientRows`] without labels or data rows
/// - [`WhereError::DuplicateLabel`] when a label repeats
/// - [`WhereError::ColumnMismatch`] when a row's width differs from the labels
pub fn validate(
    labels: Vec<String>,
    values: Vec<Vec<Value>>,
    line_count: usize,
) -> Result<ParsedTable> {
    if labels.is_empty() || values.is_empty() {
        return Err(WhereError::InsufficientRows { found: line_count });
    }

    let mut seen = HashSet::with_capacity(labels.len());
    for label in &labels {
        if !seen.insert(label.as_str()) {
            return Err(WhereError::DuplicateLabel {
                label: label.clone(),
            });
        }
    }

    if let Some((idx, row)) = values
        .iter()
        .enumerate()
        .find(|(_, row)| row.len() != labels.len())
    {
        return Err(WhereError::ColumnMismatch {
            row: idx + 1,
            expected: labels.len(),
            found: row.len(),
        });
    }

    Ok(ParsedTable { labels, values })
}
