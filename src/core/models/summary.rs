use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Accumulated totals for one aggregation bucket.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsageTotals {
    pub total_tokens: i64,
    pub total_cost: f64,
    pub requests: u64,
}

impl UsageTotals {
    pub fn add(&mut self, tokens: i64, cost: f64) {
        self.total_tokens += tokens;
        self.total_cost += cost;
        self.requests += 1;
    }
}

/// One calendar day's totals. `day` is `None` for the "Invalid Date" bucket
/// that collects rows whose `Date` cell does not parse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayBucket {
    /// Parsed day, absent for the invalid-date bucket.
    pub day: Option<NaiveDate>,
    /// Stable bucket key: `YYYY-MM-DD`, or `"Invalid Date"`.
    pub date_key: String,
    /// Short chart label, e.g. "Jan 5".
    pub label: String,
    #[serde(flatten)]
    pub totals: UsageTotals,
}

/// Per-day aggregates, ascending by day; the invalid-date bucket (if any)
/// sorts last.
pub type DailyUsage = Vec<DayBucket>;

/// model → day key → totals. Blank models group under "Unknown".
pub type ModelDailyUsage = BTreeMap<String, BTreeMap<String, UsageTotals>>;

/// Headline statistics over a (possibly filtered) row sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageSummary {
    pub total_tokens: i64,
    pub total_cost: f64,
    pub total_requests: u64,
    /// Rounded to the nearest token; 0 when there are no requests.
    pub average_tokens_per_request: i64,
    /// 0 when there are no requests.
    pub average_cost_per_request: f64,
    /// Distinct non-blank models, in first-seen order.
    pub models: Vec<String>,
}
