//! Cell coercion.
//!
//! Rules, first match wins:
//! 1. Empty cell: empty string
//! 2. `null`, `undefined`, `true`, `false`
//! 3. Quoted cell (`'...'` or `"..."`): the text verbatim, quotes kept
//! 4. Numbers: `12`, `-0.5`, `+1.1`, `08`, `1,000.67`
//! 5. Anything else: the trimmed text

use std::sync::LazyLock;

use regex::Regex;

use crate::value::Value;

/// Optional sign, comma-grouped integer part, optional fraction.
static NUMERIC_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(\d+(,\d{3})*)?(\.\d+)?$").expect("Invalid numeric regex")
});

/// Thousands separator stripped before parsing. Not locale-aware.
const THOUSANDS_SEPARATOR: char = ',';

/// Coerce a raw cell to a typed value. Never fails.
pub fn coerce(cell: &str) -> Value {
    let trimmed = cell.trim();

    match trimmed {
        "" => return Value::String(String::new()),
        "null" => return Value::Null,
        "undefined" => return Value::Undefined,
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }

    if is_quoted(trimmed) {
        return Value::String(trimmed.to_string());
    }

    if let Some(n) = parse_numeric(trimmed) {
        return Value::Number(n);
    }

    Value::String(trimmed.to_string())
}

/// True if the text is wrapped in one matching pair of quotes.
pub fn is_quoted(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() >= 2
        && matches!(bytes[0], b'\'' | b'"')
        && bytes[bytes.len() - 1] == bytes[0]
}

/// Parse a numeric-shaped string to f64.
///
/// Handles:
/// - Standard numbers: "123", "-45.67", "+1"
/// - Leading zeros: "08"
/// - Thousands separators: "1,234,567.5"
/// - Bare fractions: ".5"
///
/// Returns None for anything else, including exponents and dates.
pub fn parse_numeric(value: &str) -> Option<f64> {
    let trimmed = value.trim();

    if !trimmed.bytes().any(|b| b.is_ascii_digit()) || !NUMERIC_REGEX.is_match(trimmed) {
        return None;
    }

    let cleaned = trimmed.replace(THOUSANDS_SEPARATOR, "");
    cleaned.parse().ok()
}

/// Check if a string represents a numeric cell.
pub fn is_numeric(value: &str) -> bool {
    parse_numeric(value).is_some()
}
