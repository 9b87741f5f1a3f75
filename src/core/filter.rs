//! Date-based row selection.
//!
//! Filtering only ever removes rows; relative order is preserved and the
//! same (rows, filter) input always yields the same output. Rows whose
//! `Date` cell does not parse fail every variant except `All`.

use chrono::{Datelike, NaiveDate};

use crate::core::models::row::UsageRow;

/// A date-based row-selection rule. Rebuilt per invocation, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateFilter {
    /// Keep everything, including rows with unparsable dates.
    All,
    /// Same calendar year, month, and day.
    Day(NaiveDate),
    /// Same calendar year and month.
    Month(NaiveDate),
    /// Same calendar year.
    Year(NaiveDate),
    /// Inclusive `[start 00:00:00, end 23:59:59.999]`. A missing bound
    /// makes the filter a no-op (defined fallback, not an error).
    Range {
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },
}

impl DateFilter {
    /// Does `row` pass this filter?
    pub fn matches(&self, row: &UsageRow) -> bool {
        match self {
            DateFilter::All => true,
            DateFilter::Day(d) => row
                .day()
                .is_some_and(|row_day| row_day == *d),
            DateFilter::Month(d) => row
                .day()
                .is_some_and(|row_day| row_day.year() == d.year() && row_day.month() == d.month()),
            DateFilter::Year(d) => row.day().is_some_and(|row_day| row_day.year() == d.year()),
            DateFilter::Range { start, end } => {
                let (Some(start), Some(end)) = (start, end) else {
                    return true;
                };
                let Some(dt) = row.datetime() else {
                    return false;
                };
                let lo = start.and_hms_opt(0, 0, 0).expect("midnight is valid");
                let hi = end
                    .and_hms_milli_opt(23, 59, 59, 999)
                    .expect("end of day is valid");
                dt >= lo && dt <= hi
            }
        }
    }
}

/// Return the subsequence of `rows` matching `filter`, in input order.
pub fn filter(rows: &[UsageRow], filter: &DateFilter) -> Vec<UsageRow> {
    rows.iter()
        .filter(|row| filter.matches(row))
        .cloned()
        .collect()
}

/// Distinct valid calendar days present in the `Date` column, ascending.
/// Unparsable dates are dropped.
pub fn available_dates(rows: &[UsageRow]) -> Vec<NaiveDate> {
    let mut dates: Vec<NaiveDate> = rows.iter().filter_map(UsageRow::day).collect();
    dates.sort();
    dates.dedup();
    dates
}

/// Distinct years with data, descending (most recent first).
pub fn distinct_years(dates: &[NaiveDate]) -> Vec<i32> {
    let mut years: Vec<i32> = dates.iter().map(NaiveDate::year).collect();
    years.sort_unstable_by(|a, b| b.cmp(a));
    years.dedup();
    years
}

/// Distinct `YYYY-MM` months with data, ascending.
pub fn distinct_months(dates: &[NaiveDate]) -> Vec<String> {
    let mut months: Vec<String> = dates.iter().map(|d| d.format("%Y-%m").to_string()).collect();
    months.sort();
    months.dedup();
    months
}
