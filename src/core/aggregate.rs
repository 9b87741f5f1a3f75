//! Aggregation over the (possibly filtered) row sequence.
//!
//! Both reducers are single-pass and tolerate malformed cells: an
//! unparsable `Total Tokens` or `Cost` contributes zero, and a row whose
//! `Date` does not parse still counts, grouped under the "Invalid Date"
//! bucket. No input can make aggregation fail.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};

use crate::core::models::row::UsageRow;
use crate::core::models::summary::{
    DailyUsage, DayBucket, ModelDailyUsage, UsageSummary, UsageTotals,
};

/// Bucket key for rows whose `Date` cell does not parse.
pub const INVALID_DATE_KEY: &str = "Invalid Date";

fn day_key(day: Option<NaiveDate>) -> String {
    match day {
        Some(d) => d.format("%Y-%m-%d").to_string(),
        None => INVALID_DATE_KEY.to_string(),
    }
}

fn day_label(day: Option<NaiveDate>) -> String {
    match day {
        Some(d) => format!("{} {}", d.format("%b"), d.day()),
        None => INVALID_DATE_KEY.to_string(),
    }
}

/// Per-day totals, ascending by day; the invalid-date bucket sorts last.
pub fn usage_by_day(rows: &[UsageRow]) -> DailyUsage {
    let mut buckets: HashMap<Option<NaiveDate>, UsageTotals> = HashMap::new();
    for row in rows {
        buckets
            .entry(row.day())
            .or_default()
            .add(row.total_tokens_value(), row.cost_value());
    }

    let mut days: Vec<DayBucket> = buckets
        .into_iter()
        .map(|(day, totals)| DayBucket {
            day,
            date_key: day_key(day),
            label: day_label(day),
            totals,
        })
        .collect();
    // None (invalid dates) after every valid day.
    days.sort_by_key(|b| (b.day.is_none(), b.day));
    days
}

/// Nested model → day totals. Blank models group under "Unknown".
pub fn usage_by_model_and_day(rows: &[UsageRow]) -> ModelDailyUsage {
    let mut out = ModelDailyUsage::new();
    for row in rows {
        let model = if row.model.is_empty() {
            "Unknown"
        } else {
            row.model.as_str()
        };
        out.entry(model.to_string())
            .or_default()
            .entry(day_key(row.day()))
            .or_default()
            .add(row.total_tokens_value(), row.cost_value());
    }
    out
}

/// Headline statistics over `rows`. Averages are 0 when there are no rows.
pub fn summarize(rows: &[UsageRow]) -> UsageSummary {
    let mut total_tokens = 0i64;
    let mut total_cost = 0f64;
    let mut models: Vec<String> = Vec::new();

    for row in rows {
        total_tokens += row.total_tokens_value();
        total_cost += row.cost_value();
        if !row.model.is_empty() && !models.iter().any(|m| m == &row.model) {
            models.push(row.model.clone());
        }
    }

    let total_requests = rows.len() as u64;
    let (average_tokens_per_request, average_cost_per_request) = if total_requests > 0 {
        (
            (total_tokens as f64 / total_requests as f64).round() as i64,
            total_cost / total_requests as f64,
        )
    } else {
        (0, 0.0)
    };

    UsageSummary {
        total_tokens,
        total_cost,
        total_requests,
        average_tokens_per_request,
        average_cost_per_request,
        models,
    }
}
