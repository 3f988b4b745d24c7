//! Splitting table lines into cells.

use crate::error::{Result, WhereError};
use crate::filter::Line;

/// Column delimiter.
pub const DELIMITER: char = '|';

/// Label row plus untyped data rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizedTable {
    /// Column names in order.
    pub labels: Vec<String>,
    /// Raw cells per data row.
    pub rows: Vec<Vec<String>>,
    /// Number of non-empty lines seen, label row included.
    pub line_count: usize,
}

/// Normalizes a cell by trimming whitespace.
pub fn normalize_cell(value: &str) -> String {
    value.trim().to_string()
}

/// Splits one line into cells, discarding a balanced pair of borders.
///
/// `| a | b |` and `a | b` both give `["a", "b"]`; `| | x |` keeps the empty
/// leading cell. A border on only one side is rejected.
pub fn split_line(line: &Line) -> Result<Vec<String>> {
    let text = line.text.trim();
    if !text.contains(DELIMITER) {
        return Ok(vec![normalize_cell(text)]);
    }

    let leading = text.strip_prefix(DELIMITER);
    let inner = match leading.map(|rest| rest.strip_suffix(DELIMITER)) {
        Some(Some(inner)) => inner,
        None if !text.ends_with(DELIMITER) => text,
        _ => {
            return Err(WhereError::MalformedRow {
                line: line.number,
                reason: format!("borders are not balanced in '{}'", line.text),
            });
        }
    };

    Ok(inner.split(DELIMITER).map(normalize_cell).collect())
}

/// Returns true if the cell can serve as a binding name.
pub fn is_valid_label(label: &str) -> bool {
    let mut chars = label.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '_' || first == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Tokenizes filtered lines; the first becomes the label row.
///
/// An empty input yields an empty table so that the validator can report the
/// row count.
pub fn tokenize(lines: &[Line]) -> Result<TokenizedTable> {
    let Some((first, rest)) = lines.split_first() else {
        return Ok(TokenizedTable {
            labels: Vec::new(),
            rows: Vec::new(),
            line_count: 0,
        });
    };

    let separated = lines.iter().any(|line| line.text.contains(DELIMITER));
    if separated
        && let Some(bare) = lines.iter().find(|line| !line.text.contains(DELIMITER))
    {
        return Err(WhereError::MalformedRow {
            line: bare.number,
            reason: format!("missing '{DELIMITER}' separator in '{}'", bare.text),
        });
    }

    let labels = split_line(first)?;
    if let Some(bad) = labels.iter().find(|label| !is_valid_label(label)) {
        return Err(WhereError::MalformedRow {
            line: first.number,
            reason: format!("'{bad}' is not a valid label"),
        });
    }

    let mut rows = Vec::with_capacity(rest.len());
    for line in rest {
        let cells = split_line(line)?;
        if cells.len() != labels.len() {
            return Err(WhereError::MalformedRow {
                line: line.number,
                reason: format!(
                    "expected {} cells but found {} in '{}'",
                    labels.len(),
                    cells.len(),
                    line.text
                ),
            });
        }
        rows.push(cells);
    }

    tracing::trace!(labels = labels.len(), rows = rows.len(), "tokenized table");
    Ok(TokenizedTable {
        labels,
        rows,
        line_count: lines.len(),
    })
}
