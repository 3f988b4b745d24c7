//! Locating the data table inside source text.
//!
//! Two surface forms are recognized:
//!
//! ```text
//! /***
//!   a | b | c
//!   1 | 2 | 3
//! ***/
//! ```
//!
//! and a string literal whose rows are joined with the `\n` escape, which is
//! what indentation-based languages emit when they compile a block string:
//!
//! ```text
//! "a | b | c\n1 | 2 | 3";
//! ```
//!
//! Block comments win when both are present.

use serde::Serialize;

use crate::error::{Result, WhereError};

/// Minimum number of `*` characters in the fence on either side.
const FENCE_STARS: usize = 3;

/// Where a raw table was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SurfaceForm {
    /// `/*** ... ***/`
    BlockComment,
    /// `"row\nrow"`
    StringLiteral,
}

/// Unparsed table text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    /// Text between the fences, or the decoded literal content.
    pub text: String,
    /// Which surface form the text came from.
    pub form: SurfaceForm,
    /// 1-based source line where the table text starts.
    pub line: usize,
}

/// Extracts the first data table from source text.
///
/// # Errors
///
/// Returns [`WhereError::NoTableFound`] when no block comment table or
/// multi-line string literal exists.
pub fn extract_table(source: &str) -> Result<RawTable> {
    if let Some((table, _)) = find_block(source, 0) {
        return Ok(table);
    }
    find_string_literal(source).ok_or(WhereError::NoTableFound)
}

/// Extracts every `/*** ... ***/` table in source order.
pub fn extract_all(source: &str) -> Vec<RawTable> {
    let mut tables = Vec::new();
    let mut from = 0;
    while let Some((table, end)) = find_block(source, from) {
        tables.push(table);
        from = end;
    }
    tables
}

/// Finds the next fenced block at or after `from`, returning it with the
/// byte offset just past its closing fence.
fn find_block(source: &str, from: usize) -> Option<(RawTable, usize)> {
    let opening = "/".to_string() + &"*".repeat(FENCE_STARS);
    let closing = "*".repeat(FENCE_STARS) + "/";

    let open = from + source[from..].find(&opening)?;
    let stars = source[open + 1..]
        .bytes()
        .take_while(|&b| b == b'*')
        .count();
    let start = open + 1 + stars;
    let close = start + source[start..].find(&closing)?;

    let text = source[start..close].trim_end_matches('*').to_string();
    let table = RawTable {
        text,
        form: SurfaceForm::BlockComment,
        line: line_at(source, start),
    };
    Some((table, close + closing.len()))
}

/// Finds the first single-line string literal containing a `\n` escape.
///
/// Comments are skipped so that apostrophes in prose do not open a literal.
fn find_string_literal(source: &str) -> Option<RawTable> {
    let bytes = source.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                i = source[i..].find('\n').map_or(bytes.len(), |n| i + n);
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i = source[i + 2..]
                    .find("*/")
                    .map_or(bytes.len(), |n| i + 2 + n + 2);
            }
            quote @ (b'"' | b'\'') => match literal_end(bytes, i + 1, quote) {
                Some(end) => {
                    let content = &source[i + 1..end];
                    if content.contains("\\n") {
                        return Some(RawTable {
                            text: unescape(content),
                            form: SurfaceForm::StringLiteral,
                            line: line_at(source, i),
                        });
                    }
                    i = end + 1;
                }
                None => i += 1,
            },
            _ => i += 1,
        }
    }
    None
}

/// Byte index of the closing quote, if it appears before the end of the line.
fn literal_end(bytes: &[u8], mut i: usize, quote: u8) -> Option<usize> {
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'\n' => return None,
            b if b == quote => return Some(i),
            _ => i += 1,
        }
    }
    None
}

fn unescape(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut chars = content.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(escaped @ ('"' | '\'' | '\\')) => out.push(escaped),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

fn line_at(source: &str, offset: usize) -> usize {
    source[..offset].matches('\n').count() + 1
}
