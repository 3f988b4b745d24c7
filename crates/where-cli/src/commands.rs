use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use where_cli::scan::{CheckReport, check_paths, parse_extensions};
use where_core::{extract_table, parse_raw, strategy};

use crate::cli::{CheckArgs, OutputFormatArg, ParseArgs};
use crate::summary::{print_parsed_table, print_strategies};

pub fn run_parse(args: &ParseArgs) -> Result<()> {
    let source = std::fs::read_to_string(&args.file)
        .with_context(|| format!("read source file {}", args.file.display()))?;
    let raw = extract_table(&source)
        .with_context(|| format!("extract table from {}", args.file.display()))?;
    let table = parse_raw(&raw).with_context(|| {
        format!("parse table at {}:{}", args.file.display(), raw.line)
    })?;

    match args.format {
        OutputFormatArg::Table => print_parsed_table(&table),
        OutputFormatArg::Json => {
            let json = serde_json::to_string_pretty(&table).context("serialize table")?;
            println!("{json}");
        }
    }
    Ok(())
}

pub fn run_check(args: &CheckArgs) -> Result<CheckReport> {
    let span = info_span!("check", paths = args.paths.len());
    let _guard = span.enter();
    let start = Instant::now();

    let extensions = parse_extensions(&args.ext);
    let report = check_paths(&args.paths, &extensions)?;

    info!(
        files = report.files_scanned,
        tables = report.tables.len(),
        errors = report.error_count(),
        duration_ms = start.elapsed().as_millis(),
        "check complete"
    );
    Ok(report)
}

pub fn run_strategies() -> Result<()> {
    print_strategies(&strategy::list(), &strategy::default_name());
    Ok(())
}
