use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use where_core::{ParsedTable, SurfaceForm, Value};
use where_cli::scan::{CheckReport, TableReport, TableStatus};

/// Prints a parsed table as a grid, labels as the header.
pub fn print_parsed_table(table: &ParsedTable) {
    let mut grid = Table::new();
    grid.set_header(table.labels.iter().map(|label| header_cell(label)));
    apply_table_style(&mut grid);
    for row in &table.values {
        grid.add_row(row.iter().map(value_cell));
    }
    for (index, value) in table.values.first().into_iter().flatten().enumerate() {
        if matches!(value, Value::Number(_)) {
            align_column(&mut grid, index, CellAlignment::Right);
        }
    }
    println!("{grid}");
    println!("{} row(s)", table.len());
}

/// Prints one line per checked table, then the totals.
pub fn print_check_summary(report: &CheckReport) {
    if report.tables.is_empty() {
        println!("No tables found in {} file(s).", report.files_scanned);
        return;
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Line"),
        header_cell("Form"),
        header_cell("Labels"),
        header_cell("Rows"),
        header_cell("Status"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);

    for entry in &report.tables {
        table.add_row(report_row(entry));
    }

    let errors = report.error_count();
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        Cell::new(format!("{} file(s)", report.files_scanned)),
        Cell::new(report.tables.len()).add_attribute(Attribute::Bold),
        count_cell(errors),
    ]);
    println!("{table}");

    if errors > 0 {
        eprintln!("Errors:");
        for entry in &report.tables {
            if let TableStatus::Invalid { reason } = &entry.status {
                eprintln!("- {}:{}: {reason}", entry.path.display(), entry.line);
            }
        }
    }
}

/// Prints registered strategy names, marking the default.
pub fn print_strategies(names: &[String], default_name: &str) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Strategy"), header_cell("Default")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    for name in names {
        let marker = if name == default_name {
            Cell::new("✓")
                .fg(Color::Green)
                .add_attribute(Attribute::Bold)
        } else {
            dim_cell("-")
        };
        table.add_row(vec![Cell::new(name), marker]);
    }
    println!("{table}");
}

fn report_row(entry: &TableReport) -> Vec<Cell> {
    let form = match entry.form {
        SurfaceForm::BlockComment => "comment",
        SurfaceForm::StringLiteral => "string",
    };
    let (labels, rows, status) = match &entry.status {
        TableStatus::Valid { labels, rows } => (
            Cell::new(labels.join(", ")),
            Cell::new(rows),
            Cell::new("ok").fg(Color::Green),
        ),
        TableStatus::Invalid { reason } => (
            dim_cell("-"),
            dim_cell("-"),
            Cell::new(reason)
                .fg(Color::Red)
                .add_attribute(Attribute::Bold),
        ),
    };
    vec![
        Cell::new(entry.path.display()),
        Cell::new(entry.line),
        dim_cell(form),
        labels,
        rows,
        status,
    ]
}

fn value_cell(value: &Value) -> Cell {
    match value {
        Value::String(s) if s.is_empty() => dim_cell("''"),
        Value::Null | Value::Undefined => dim_cell(value),
        Value::Bool(_) => Cell::new(value).fg(Color::Blue),
        _ => Cell::new(value),
    }
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(format!("{count} error(s)"))
            .fg(Color::Red)
            .add_attribute(Attribute::Bold)
    } else {
        Cell::new("all valid").fg(Color::Green)
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(165);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
