use colored::{control, Colorize};

use crate::core::formatter::{
    format_currency, format_currency_cell, format_date, format_number, format_number_cell,
};
use crate::core::models::summary::{DailyUsage, ModelDailyUsage, UsageSummary};
use crate::core::table::{TablePage, TableQuery};

/// Render the headline summary block.
///
/// Layout:
/// ```text
///  Usage Summary
///   Tokens     1,234,567 total, 1,934 avg/request
///   Cost       $45.67 total, $0.07 avg/request
///   Requests   638
///   Models     3 (gpt-4, claude-3, gemini-pro)
/// ```
pub fn render_summary(summary: &UsageSummary, use_color: bool) -> String {
    control::set_override(use_color);

    let mut lines: Vec<String> = Vec::new();
    lines.push(" Usage Summary".bold().to_string());
    lines.push(format!(
        "  {}     {} total, {} avg/request",
        "Tokens".cyan(),
        format_number(summary.total_tokens as f64),
        format_number(summary.average_tokens_per_request as f64),
    ));
    lines.push(format!(
        "  {}       {} total, {} avg/request",
        "Cost".cyan(),
        format_currency(summary.total_cost),
        format_currency(summary.average_cost_per_request),
    ));
    lines.push(format!(
        "  {}   {}",
        "Requests".cyan(),
        format_number(summary.total_requests as f64),
    ));
    let models_line = if summary.models.is_empty() {
        "0".to_string()
    } else {
        format!("{} ({})", summary.models.len(), summary.models.join(", "))
    };
    lines.push(format!("  {}     {}", "Models".cyan(), models_line));

    lines.join("\n")
}

/// Render per-day totals as an aligned table, one line per bucket.
pub fn render_daily(daily: &DailyUsage, use_color: bool) -> String {
    control::set_override(use_color);

    let mut lines: Vec<String> = Vec::new();
    lines.push(" Usage by Day".bold().to_string());
    if daily.is_empty() {
        lines.push("  (no data)".dimmed().to_string());
    }
    for bucket in daily {
        let day = format_date(&bucket.date_key);
        lines.push(format!(
            "  {:<14} {:>14} tokens  {:>10}  {:>6} requests",
            day.cyan(),
            format_number(bucket.totals.total_tokens as f64),
            format_currency(bucket.totals.total_cost),
            format_number(bucket.totals.requests as f64),
        ));
    }
    lines.join("\n")
}

/// Render the model × day breakdown: one block per model, days within.
pub fn render_models(breakdown: &ModelDailyUsage, use_color: bool) -> String {
    control::set_override(use_color);

    let mut lines: Vec<String> = Vec::new();
    lines.push(" Usage by Model".bold().to_string());
    if breakdown.is_empty() {
        lines.push("  (no data)".dimmed().to_string());
    }
    for (model, days) in breakdown {
        let total_cost: f64 = days.values().map(|t| t.total_cost).sum();
        let requests: u64 = days.values().map(|t| t.requests).sum();
        lines.push(format!(
            "  {} {} requests, {}",
            format!("{:<24}", model).cyan(),
            format_number(requests as f64),
            format_currency(total_cost),
        ));
        for (day, totals) in days {
            lines.push(format!(
                "    {:<14} {:>14} tokens  {:>10}",
                format_date(day),
                format_number(totals.total_tokens as f64),
                format_currency(totals.total_cost),
            ));
        }
    }
    lines.join("\n")
}

/// Render one page of the data table with a header row and a footer line
/// ("Page X of Y, N events").
pub fn render_table(page: &TablePage, query: &TableQuery, use_color: bool) -> String {
    control::set_override(use_color);

    let mut lines: Vec<String> = Vec::new();
    lines.push(
        format!(
            "  {:<13} {:<14} {:<24} {:<6} {:>12} {:>12} {:>12} {:>10} {:>12} {:>10}",
            "Date",
            "Kind",
            "Model",
            "Max",
            "In (w/ CW)",
            "In (w/o CW)",
            "Cache Read",
            "Output",
            "Total",
            "Cost",
        )
        .bold()
        .to_string(),
    );

    for row in &page.rows {
        lines.push(format!(
            "  {:<13} {:<14} {:<24} {:<6} {:>12} {:>12} {:>12} {:>10} {:>12} {:>10}",
            format_date(&row.date),
            row.kind,
            row.model,
            row.max_mode,
            format_number_cell(&row.input_with_cache_write),
            format_number_cell(&row.input_without_cache_write),
            format_number_cell(&row.cache_read),
            format_number_cell(&row.output_tokens),
            format_number_cell(&row.total_tokens),
            format_currency_cell(&row.cost),
        ));
    }
    if page.rows.is_empty() {
        lines.push("  (no matching events)".dimmed().to_string());
    }

    lines.push(
        format!(
            "  Page {} of {}, {} events",
            query.page,
            page.total_pages.max(1),
            page.total_count
        )
        .dimmed()
        .to_string(),
    );

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::aggregate::{summarize, usage_by_day, usage_by_model_and_day};
    use crate::core::models::row::UsageRow;
    use crate::core::table;

    fn rows() -> Vec<UsageRow> {
        vec![
            UsageRow {
                date: "2024-01-01".into(),
                kind: "Included".into(),
                model: "gpt-4".into(),
                total_tokens: "100".into(),
                cost: "0.50".into(),
                ..Default::default()
            },
            UsageRow {
                date: "2024-01-02".into(),
                kind: "Included".into(),
                model: "claude-3".into(),
                total_tokens: "200".into(),
                cost: "1.00".into(),
                ..Default::default()
            },
        ]
    }

    #[test]
    fn summary_contains_totals_and_models() {
        let out = render_summary(&summarize(&rows()), false);
        assert!(out.contains("300 total"));
        assert!(out.contains("$1.50 total"));
        assert!(out.contains("gpt-4, claude-3"));
    }

    #[test]
    fn daily_lists_each_day() {
        let out = render_daily(&usage_by_day(&rows()), false);
        assert!(out.contains("Jan 1, 2024"));
        assert!(out.contains("Jan 2, 2024"));
        assert!(out.contains("$0.50"));
    }

    #[test]
    fn daily_handles_empty_input() {
        let out = render_daily(&usage_by_day(&[]), false);
        assert!(out.contains("(no data)"));
    }

    #[test]
    fn models_block_per_model() {
        let out = render_models(&usage_by_model_and_day(&rows()), false);
        assert!(out.contains("gpt-4"));
        assert!(out.contains("claude-3"));
    }

    #[test]
    fn table_shows_formatted_cells_and_footer() {
        let query = TableQuery::default();
        let page = table::query(&rows(), &query);
        let out = render_table(&page, &query, false);
        assert!(out.contains("Jan 1, 2024"));
        assert!(out.contains("$0.50"));
        assert!(out.contains("Page 1 of 1, 2 events"));
    }

    #[test]
    fn no_ansi_when_color_false() {
        let out = render_summary(&summarize(&rows()), false);
        assert!(!out.contains('\x1b'), "output should not contain ANSI codes");
    }
}
