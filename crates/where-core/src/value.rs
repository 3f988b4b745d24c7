//! Typed cell values.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The coerced value of one table cell.
///
/// Serializes to the obvious JSON form; `Undefined` serializes as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Number(f64),
    String(String),
    Null,
    Undefined,
}

impl Value {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Truthiness: empty strings, zero, NaN, `null`, `undefined` and `false`
    /// are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::String(s) => !s.is_empty(),
            Self::Null | Self::Undefined => false,
        }
    }

    /// Rounds a number to `digits` significant digits.
    pub fn to_precision(&self, digits: usize) -> Option<f64> {
        self.as_f64().map(|n| to_precision(n, digits))
    }

    /// Rendering used in assertion messages: strings are single-quoted.
    pub fn inspect(&self) -> String {
        match self {
            Self::String(s) => format!("'{s}'"),
            other => other.to_string(),
        }
    }
}

/// Rounds `n` to `digits` significant digits (at least one).
///
/// Comparing rounded sums against expected decimals avoids binary
/// representation noise such as `0.1 + 0.2 != 0.3`.
pub fn to_precision(n: f64, digits: usize) -> f64 {
    if !n.is_finite() {
        return n;
    }
    let digits = digits.max(1);
    format!("{:.*e}", digits - 1, n).parse().unwrap_or(n)
}

/// Magnitudes printed in positional notation; others use an exponent.
const POSITIONAL_RANGE: std::ops::Range<f64> = 1e-6..1e21;

fn format_number(n: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if n.is_nan() {
        f.write_str("NaN")
    } else if n.is_infinite() {
        f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" })
    } else if n == 0.0 {
        f.write_str("0")
    } else if POSITIONAL_RANGE.contains(&n.abs()) {
        write!(f, "{n}")
    } else {
        // `1e21` -> `1e+21`; negative exponents already carry a sign
        let text = format!("{n:e}");
        match text.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                write!(f, "{mantissa}e+{exponent}")
            }
            _ => f.write_str(&text),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => format_number(*n, f),
            Self::String(s) => f.write_str(s),
            Self::Null => f.write_str("null"),
            Self::Undefined => f.write_str("undefined"),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<i64> for Value {
    #[allow(clippy::cast_precision_loss)]
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<usize> for Value {
    #[allow(clippy::cast_precision_loss)]
    fn from(n: usize) -> Self {
        Self::Number(n as f64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&Value> for Value {
    fn from(value: &Value) -> Self {
        value.clone()
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}
