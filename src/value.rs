//! Script values and their canonical string form

use serde::Serialize;
use std::fmt;

/// A value produced by evaluating an assignment.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Number(f64),
    Text(String),
}

impl Value {
    /// The string substituted into command templates.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Value::Number(n) => format_number(*n),
            Value::Text(s) => s.clone(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Format a number with six decimals, then drop trailing zeros and a
/// dangling decimal point: `42.0` -> `42`, `3.14` -> `3.14`.
#[must_use]
pub fn format_number(value: f64) -> String {
    let fixed = format!("{value:.6}");
    if !fixed.contains('.') {
        return fixed;
    }
    let trimmed = fixed.trim_end_matches('0');
    trimmed.strip_suffix('.').unwrap_or(trimmed).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number_drops_trailing_zeros() {
        assert_eq!(format_number(3.0), "3");
        assert_eq!(format_number(3.10), "3.1");
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(42.0), "42");
        assert_eq!(format_number(100.0), "100");
        assert_eq!(format_number(2.75), "2.75");
    }

    #[test]
    fn test_format_number_rounds_to_six_decimals() {
        assert_eq!(format_number(1.0 / 3.0), "0.333333");
        assert_eq!(format_number(2.000_000_4), "2");
    }

    #[test]
    fn test_format_number_negative() {
        assert_eq!(format_number(-2.5), "-2.5");
    }

    #[test]
    fn test_text_renders_verbatim() {
        assert_eq!(Value::Text("10.0".to_string()).render(), "10.0");
    }
}
