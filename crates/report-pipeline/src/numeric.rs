//! Lenient numeric coercion for exported reporting cells
//!
//! Report extracts mix plain numbers, numeric strings and currency-formatted
//! text ("$1,234.50", "1.234.567,89₫"). Anything that cannot be read as a
//! number degrades to zero instead of failing the whole report.

use serde_json::Value;

/// Coerce a raw record field into a number.
///
/// Missing fields, `null`, empty strings and anything that parses to NaN
/// return exactly `0.0`. Booleans, arrays and objects also return `0.0`.
pub fn parse_numeric(raw: Option<&Value>) -> f64 {
    match raw {
        Some(Value::Number(n)) => n.as_f64().filter(|v| v.is_finite()).unwrap_or(0.0),
        Some(Value::String(s)) => parse_numeric_str(s),
        _ => 0.0,
    }
}

/// Strip everything except digits, `.` and `-`, then read the longest
/// leading float (`-`? digits `.`? digits).
pub fn parse_numeric_str(raw: &str) -> f64 {
    let stripped: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    let prefix = float_prefix(&stripped);
    prefix.parse::<f64>().ok().filter(|v| v.is_finite()).unwrap_or(0.0)
}

/// Longest prefix of `s` that reads as a decimal float, or "" if there is none
fn float_prefix(s: &str) -> &str {
    let bytes = s.as_bytes();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;

    if bytes.first() == Some(&b'-') {
        end = 1;
    }

    let mut valid_end = 0;
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => {
                seen_digit = true;
                end += 1;
                valid_end = end;
            }
            b'.' if !seen_dot => {
                seen_dot = true;
                end += 1;
                if seen_digit {
                    valid_end = end;
                }
            }
            _ => break,
        }
    }

    if seen_digit { &s[..valid_end] } else { "" }
}

/// The amount a record contributes to a category: the actual value once it
/// is known (strictly positive), otherwise the estimate.
pub fn resolve_total(estimated: f64, actual: f64) -> f64 {
    if actual > 0.0 { actual } else { estimated }
}
