use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::core::dates::{parse_event_date, parse_event_datetime};
use crate::core::numeric::{parse_float_prefix, parse_int_prefix};

/// Column order of the canonical usage export, also used for CSV export.
pub const COLUMNS: [&str; 10] = [
    "Date",
    "Kind",
    "Model",
    "Max Mode",
    "Input (w/ Cache Write)",
    "Input (w/o Cache Write)",
    "Cache Read",
    "Output Tokens",
    "Total Tokens",
    "Cost",
];

/// One usage event: a single line of the input CSV.
///
/// The ten canonical columns are explicit fields; columns the exporter adds
/// that we don't recognize land in `extra` so nothing is dropped on the
/// floor. All values stay as the raw cell strings; coercion happens at the
/// accessors so a bad cell degrades locally instead of failing the row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsageRow {
    #[serde(rename = "Date", default)]
    pub date: String,
    #[serde(rename = "Kind", default)]
    pub kind: String,
    #[serde(rename = "Model", default)]
    pub model: String,
    #[serde(rename = "Max Mode", default)]
    pub max_mode: String,
    #[serde(rename = "Input (w/ Cache Write)", default)]
    pub input_with_cache_write: String,
    #[serde(rename = "Input (w/o Cache Write)", default)]
    pub input_without_cache_write: String,
    #[serde(rename = "Cache Read", default)]
    pub cache_read: String,
    #[serde(rename = "Output Tokens", default)]
    pub output_tokens: String,
    #[serde(rename = "Total Tokens", default)]
    pub total_tokens: String,
    #[serde(rename = "Cost", default)]
    pub cost: String,
    /// Unrecognized columns, in header order.
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl UsageRow {
    /// Look up a cell by its column header. Unknown and unset columns
    /// resolve to the empty string.
    pub fn get(&self, column: &str) -> &str {
        match column {
            "Date" => &self.date,
            "Kind" => &self.kind,
            "Model" => &self.model,
            "Max Mode" => &self.max_mode,
            "Input (w/ Cache Write)" => &self.input_with_cache_write,
            "Input (w/o Cache Write)" => &self.input_without_cache_write,
            "Cache Read" => &self.cache_read,
            "Output Tokens" => &self.output_tokens,
            "Total Tokens" => &self.total_tokens,
            "Cost" => &self.cost,
            other => self.extra.get(other).map(String::as_str).unwrap_or(""),
        }
    }

    /// Store a cell under its column header.
    pub fn set(&mut self, column: &str, value: String) {
        match column {
            "Date" => self.date = value,
            "Kind" => self.kind = value,
            "Model" => self.model = value,
            "Max Mode" => self.max_mode = value,
            "Input (w/ Cache Write)" => self.input_with_cache_write = value,
            "Input (w/o Cache Write)" => self.input_without_cache_write = value,
            "Cache Read" => self.cache_read = value,
            "Output Tokens" => self.output_tokens = value,
            "Total Tokens" => self.total_tokens = value,
            "Cost" => self.cost = value,
            other => {
                self.extra.insert(other.to_string(), value);
            }
        }
    }

    /// All column names this row answers to: the canonical ten plus any
    /// residual columns.
    pub fn columns(&self) -> Vec<&str> {
        COLUMNS
            .iter()
            .copied()
            .chain(self.extra.keys().map(String::as_str))
            .collect()
    }

    /// True when every cell is empty (a padded blank line).
    pub fn is_blank(&self) -> bool {
        self.columns().iter().all(|c| self.get(c).is_empty())
    }

    /// `Date` parsed as a timestamp, `None` when unparsable.
    pub fn datetime(&self) -> Option<NaiveDateTime> {
        parse_event_datetime(&self.date)
    }

    /// `Date` reduced to its calendar day, `None` when unparsable.
    pub fn day(&self) -> Option<NaiveDate> {
        parse_event_date(&self.date)
    }

    /// `Total Tokens` coerced to an integer; bad cells count as 0.
    pub fn total_tokens_value(&self) -> i64 {
        parse_int_prefix(&self.total_tokens).unwrap_or(0)
    }

    /// `Cost` coerced to a decimal; bad cells count as 0.
    pub fn cost_value(&self) -> f64 {
        parse_float_prefix(&self.cost).unwrap_or(0.0)
    }
}
