//! CSV codec for usage exports.
//!
//! The exporter's dialect is deliberately simple: comma-separated cells,
//! values optionally wrapped in double quotes, no escaping of embedded
//! commas. Parsing is best-effort and total — any text input yields a
//! (possibly empty) row sequence, never an error. Malformed business data
//! degrades at the accessors, not here.

use crate::core::models::row::{UsageRow, COLUMNS};

/// Strip surrounding whitespace and any double quotes from a cell.
fn clean_cell(raw: &str) -> String {
    raw.replace('"', "").trim().to_string()
}

/// Parse usage-export CSV text into rows.
///
/// The first line is the header and fixes the column set for every row that
/// follows; short lines pad missing trailing cells with empty strings.
/// Lines whose every cell is empty are dropped (trailing blank lines).
/// Row order follows file order.
pub fn parse(text: &str) -> Vec<UsageRow> {
    let mut lines = text.trim().lines();
    let headers: Vec<String> = match lines.next() {
        Some(header_line) => header_line.split(',').map(clean_cell).collect(),
        None => return Vec::new(),
    };
    if headers.iter().all(String::is_empty) {
        return Vec::new();
    }

    lines
        .map(|line| {
            let mut row = UsageRow::default();
            let mut cells = line.split(',').map(clean_cell);
            for header in &headers {
                row.set(header, cells.next().unwrap_or_default());
            }
            row
        })
        .filter(|row| !row.is_blank())
        .collect()
}

/// Serialize rows back to CSV in the fixed 10-column layout.
///
/// The header line is unquoted and every data cell is double-quote-wrapped,
/// matching the upstream exporter byte for byte; residual columns are not
/// exported.
pub fn export(rows: &[UsageRow]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(COLUMNS.join(","));
    for row in rows {
        let cells: Vec<String> = COLUMNS
            .iter()
            .map(|column| format!("\"{}\"", row.get(column)))
            .collect();
        lines.push(cells.join(","));
    }
    lines.join("\n")
}
