//! Display formatting, pinned to en-US conventions.
//!
//! All functions are pure and total. Upstream quirks are carried on
//! purpose: an unparsable currency/number cell renders as `$NaN`/`NaN`,
//! and an unparsable date renders as `Invalid Date`.

use crate::core::dates::parse_event_datetime;
use crate::core::numeric::parse_float_prefix;

/// Insert en-US thousands separators into a digit string.
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let offset = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - offset) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Render as USD with exactly two fraction digits: `1234.5` → `"$1,234.50"`.
/// NaN renders as `"$NaN"`.
pub fn format_currency(value: f64) -> String {
    if value.is_nan() {
        return "$NaN".to_string();
    }
    let sign = if value.is_sign_negative() && value != 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((&fixed, "00"));
    format!("{}${}.{}", sign, group_thousands(int_part), frac_part)
}

/// Currency formatting for a raw cell; an unparsable cell is NaN.
pub fn format_currency_cell(cell: &str) -> String {
    format_currency(parse_float_prefix(cell).unwrap_or(f64::NAN))
}

/// Render with thousands separators and up to three fraction digits:
/// `1234567.0` → `"1,234,567"`, `1.25` → `"1.25"`. NaN renders as `"NaN"`.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    let sign = if value.is_sign_negative() && value != 0.0 { "-" } else { "" };
    let fixed = format!("{:.3}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((&fixed, ""));
    let frac_part = frac_part.trim_end_matches('0');
    if frac_part.is_empty() {
        format!("{}{}", sign, group_thousands(int_part))
    } else {
        format!("{}{}.{}", sign, group_thousands(int_part), frac_part)
    }
}

/// Number formatting for a raw cell; an unparsable cell is NaN.
pub fn format_number_cell(cell: &str) -> String {
    format_number(parse_float_prefix(cell).unwrap_or(f64::NAN))
}

/// Render a date cell as `"Jan 5, 2024"`; unparsable → `"Invalid Date"`.
pub fn format_date(cell: &str) -> String {
    match parse_event_datetime(cell) {
        Some(dt) => {
            let d = dt.date();
            format!("{} {}, {}", d.format("%b"), d.format("%-d"), d.format("%Y"))
        }
        None => "Invalid Date".to_string(),
    }
}
