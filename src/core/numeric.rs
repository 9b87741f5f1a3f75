//! Leading-prefix number parsing.
//!
//! Usage exporters are loose about numeric cells ("123", "123 tokens",
//! "0.04", ""). Cells are coerced by reading the longest numeric prefix and
//! ignoring the rest; a cell with no numeric prefix yields `None` and
//! callers default to zero.

/// Parse the longest decimal-integer prefix of `s`, ignoring trailing junk.
/// `"123abc"` → `Some(123)`, `"1.9"` → `Some(1)`, `"abc"` → `None`.
pub fn parse_int_prefix(s: &str) -> Option<i64> {
    let s = s.trim();
    let (sign, rest) = match s.strip_prefix('-') {
        Some(rest) => (-1i64, rest),
        None => (1i64, s.strip_prefix('+').unwrap_or(s)),
    };
    let digits: &str = {
        let end = rest
            .char_indices()
            .find(|(_, c)| !c.is_ascii_digit())
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        &rest[..end]
    };
    if digits.is_empty() {
        return None;
    }
    digits.parse::<i64>().ok().map(|n| sign * n)
}

/// Parse the longest floating-point prefix of `s`, ignoring trailing junk.
/// Accepts an optional sign, decimal point, and exponent.
/// `"1.5e3 USD"` → `Some(1500.0)`, `".5"` → `Some(0.5)`, `"abc"` → `None`.
pub fn parse_float_prefix(s: &str) -> Option<f64> {
    let s = s.trim();
    let bytes = s.as_bytes();
    let mut i = 0;

    if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
        i += 1;
    }
    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let had_int = i > int_start;
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if !had_int && i == frac_start {
            return None; // "." or "-." with no digits anywhere
        }
    } else if !had_int {
        return None;
    }

    // Exponent only counts if at least one digit follows it.
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }

    s[..i].parse::<f64>().ok()
}
