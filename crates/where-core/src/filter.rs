//! Comment stripping and blank-line removal.

use crate::extract::{RawTable, SurfaceForm};

/// A non-empty table line with its comments removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// 1-based line number within the raw table text.
    pub number: usize,
    /// Trimmed content.
    pub text: String,
}

/// Line-comment markers honored for a surface form.
fn comment_markers(form: SurfaceForm) -> &'static [&'static str] {
    match form {
        SurfaceForm::BlockComment => &["//"],
        SurfaceForm::StringLiteral => &["//", "#"],
    }
}

/// Strips comments and drops empty lines, preserving order.
pub fn filter_lines(raw: &RawTable) -> Vec<Line> {
    let markers = comment_markers(raw.form);
    raw.text
        .lines()
        .enumerate()
        .filter_map(|(idx, line)| {
            let text = strip_comment(line, markers).trim();
            (!text.is_empty()).then(|| Line {
                number: idx + 1,
                text: text.to_string(),
            })
        })
        .collect()
}

/// Cuts the line at the first comment marker that is not inside quotes.
///
/// A quote only hides markers when it is closed later on the same line, so a
/// lone apostrophe in bare text does not swallow a trailing comment.
pub fn strip_comment<'a>(line: &'a str, markers: &[&str]) -> &'a str {
    let mut i = 0;
    while i < line.len() {
        let rest = &line[i..];
        if markers.iter().any(|m| rest.starts_with(m)) {
            return &line[..i];
        }
        let Some(c) = rest.chars().next() else {
            break;
        };
        if (c == '\'' || c == '"')
            && let Some(close) = rest[1..].find(c)
        {
            i += close + 2;
            continue;
        }
        i += c.len_utf8();
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(text: &str) -> RawTable {
        RawTable {
            text: text.to_string(),
            form: SurfaceForm::BlockComment,
            line: 1,
        }
    }

    #[test]
    fn test_drops_commented_and_blank_lines() {
        let lines = filter_lines(&raw(
            "\n  | a | b |\n\n  | 1 | 2 | // trailing\n//| 4 | 3 |\n   ",
        ));
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "| a | b |");
        assert_eq!(lines[0].number, 2);
        assert_eq!(lines[1].text, "| 1 | 2 |");
        assert_eq!(lines[1].number, 4);
    }

    #[test]
    fn test_keeps_slashes_in_data() {
        assert_eq!(strip_comment("01/01/1970   // comment", &["//"]), "01/01/1970   ");
    }

    #[test]
    fn test_quotes_hide_markers() {
        assert_eq!(strip_comment("'a // b' | c // d", &["//"]), "'a // b' | c ");
        assert_eq!(strip_comment("\"''\" | '\"\"'", &["//"]), "\"''\" | '\"\"'");
    }

    #[test]
    fn test_unclosed_quote_is_literal() {
        assert_eq!(strip_comment("don't | x // note", &["//"]), "don't | x ");
    }

    #[test]
    fn test_hash_marker_for_string_literals() {
        let table = RawTable {
            text: "a | b | c\n# 1 | 2 | 3 # removed\n4 | 5 | 9 # note".to_string(),
            form: SurfaceForm::StringLiteral,
            line: 1,
        };
        let lines = filter_lines(&table);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].text, "4 | 5 | 9");

        let hashes = filter_lines(&raw("tag\n#1"));
        assert_eq!(hashes[1].text, "#1");
    }
}
