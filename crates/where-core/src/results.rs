//! Row outcomes and their column-aligned messages.

use serde::Serialize;

use crate::table::ParsedTable;
use crate::value::Value;

/// Result of running one row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome {
    /// Zero-based row index within `data.values`.
    pub index: usize,
    pub row: Vec<Value>,
    /// Aligned header, row and strategy detail.
    pub message: String,
    /// Strategy description of the failure, for failing rows.
    pub error: Option<String>,
}

/// Everything a run produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Results {
    pub data: ParsedTable,
    pub passing: Vec<Outcome>,
    pub failing: Vec<Outcome>,
}

impl Results {
    /// True when no row failed.
    pub fn is_success(&self) -> bool {
        self.failing.is_empty()
    }

    /// Number of rows executed.
    pub fn total(&self) -> usize {
        self.passing.len() + self.failing.len()
    }
}

/// Builds outcomes for one run, sharing column widths across every row.
pub(crate) struct Aggregator {
    widths: Vec<usize>,
    passing: Vec<Outcome>,
    failing: Vec<Outcome>,
}

impl Aggregator {
    pub(crate) fn new(table: &ParsedTable) -> Self {
        Self {
            widths: table.column_widths(),
            passing: Vec::new(),
            failing: Vec::new(),
        }
    }

    /// Renders the message for one row.
    ///
    /// Always four lines: empty, header, row with detail, empty. A
    /// multi-line detail is folded onto the row line.
    pub(crate) fn render(&self, labels: &[String], row: &[Value], detail: &str) -> String {
        let header = pad_cells(labels.iter().map(String::as_str), &self.widths);
        let cells: Vec<String> = row.iter().map(ToString::to_string).collect();
        let values = pad_cells(cells.iter().map(String::as_str), &self.widths);
        let detail = single_line(detail);
        format!("\n [{header}] : \n [{values}] ({detail}) \n")
    }

    pub(crate) fn pass(&mut self, outcome: Outcome) -> &Outcome {
        self.passing.push(outcome);
        &self.passing[self.passing.len() - 1]
    }

    pub(crate) fn fail(&mut self, outcome: Outcome) -> &Outcome {
        self.failing.push(outcome);
        &self.failing[self.failing.len() - 1]
    }

    pub(crate) fn finish(self, data: ParsedTable) -> Results {
        Results {
            data,
            passing: self.passing,
            failing: self.failing,
        }
    }
}

fn single_line(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn pad_cells<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(" | ")
}
