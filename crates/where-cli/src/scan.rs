//! Source discovery and table checking.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, trace, warn};

use where_core::{SurfaceForm, extract_all, parse_raw};

/// Extensions scanned when none are given.
pub const DEFAULT_EXTENSIONS: [&str; 4] = ["js", "ts", "coffee", "rs"];

/// Verdict for one embedded table.
#[derive(Debug, Clone, PartialEq)]
pub enum TableStatus {
    Valid { labels: Vec<String>, rows: usize },
    Invalid { reason: String },
}

/// One table found while scanning.
#[derive(Debug, Clone, PartialEq)]
pub struct TableReport {
    pub path: PathBuf,
    /// 1-based line of the opening fence.
    pub line: usize,
    pub form: SurfaceForm,
    pub status: TableStatus,
}

impl TableReport {
    pub fn is_valid(&self) -> bool {
        matches!(self.status, TableStatus::Valid { .. })
    }
}

/// Everything `check` found.
#[derive(Debug, Clone, Default)]
pub struct CheckReport {
    pub files_scanned: usize,
    pub tables: Vec<TableReport>,
}

impl CheckReport {
    pub fn error_count(&self) -> usize {
        self.tables.iter().filter(|t| !t.is_valid()).count()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }
}

/// Expands `paths` into source files, walking directories recursively.
///
/// Explicit file paths are kept whatever their extension. Files found
/// inside directories are kept when their extension matches
/// `extensions` (case-insensitive). Returns paths sorted and deduplicated.
pub fn collect_files(paths: &[PathBuf], extensions: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            walk(path, extensions, &mut files)?;
        } else if path.is_file() {
            files.push(path.clone());
        } else {
            anyhow::bail!("path not found: {}", path.display());
        }
    }
    files.sort();
    files.dedup();
    Ok(files)
}

fn walk(dir: &Path, extensions: &[String], files: &mut Vec<PathBuf>) -> Result<()> {
    let entries =
        std::fs::read_dir(dir).with_context(|| format!("read directory {}", dir.display()))?;

    for entry_result in entries {
        let entry = entry_result.with_context(|| format!("read directory {}", dir.display()))?;
        let path = entry.path();

        if path.is_dir() {
            walk(&path, extensions, files)?;
        } else if has_extension(&path, extensions) {
            trace!(path = %path.display(), "discovered source file");
            files.push(path);
        }
    }
    Ok(())
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|want| want.eq_ignore_ascii_case(ext)))
}

/// Checks every fenced table in one source text.
pub fn check_source(path: &Path, source: &str) -> Vec<TableReport> {
    extract_all(source)
        .into_iter()
        .map(|raw| {
            let status = match parse_raw(&raw) {
                Ok(table) => TableStatus::Valid {
                    rows: table.len(),
                    labels: table.labels,
                },
                Err(error) => {
                    warn!(path = %path.display(), line = raw.line, %error, "invalid table");
                    TableStatus::Invalid {
                        reason: error.to_string(),
                    }
                }
            };
            TableReport {
                path: path.to_path_buf(),
                line: raw.line,
                form: raw.form,
                status,
            }
        })
        .collect()
}

/// Discovers files under `paths` and checks every table in them.
pub fn check_paths(paths: &[PathBuf], extensions: &[String]) -> Result<CheckReport> {
    let files = collect_files(paths, extensions)?;
    let mut report = CheckReport::default();

    for path in files {
        let source = std::fs::read_to_string(&path)
            .with_context(|| format!("read source file {}", path.display()))?;
        let tables = check_source(&path, &source);
        debug!(path = %path.display(), tables = tables.len(), "checked file");
        report.files_scanned += 1;
        report.tables.extend(tables);
    }
    Ok(report)
}

/// Parses a comma-separated extension list, dropping leading dots.
pub fn parse_extensions(list: &str) -> Vec<String> {
    list.split(',')
        .map(|ext| ext.trim().trim_start_matches('.').to_string())
        .filter(|ext| !ext.is_empty())
        .collect()
}
