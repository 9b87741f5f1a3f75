use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use crate::cli::output::{OutputFormat, OutputOptions};
use crate::cli::renderer;
use crate::core::aggregate;
use crate::core::csv;
use crate::core::filter::{self, DateFilter};
use crate::core::loader;
use crate::core::models::row::UsageRow;

/// Load a usage export and apply the date filter: the front half of every
/// command's pipeline.
pub fn load_rows(
    path: &Path,
    date_filter: &DateFilter,
    opts: &OutputOptions,
) -> Result<Vec<UsageRow>> {
    let text = loader::load(path)?;
    let rows = csv::parse(&text);

    if opts.verbose {
        eprintln!("Parsed {} usage events from {}", rows.len(), path.display());
        let dates = filter::available_dates(&rows);
        if let (Some(first), Some(last)) = (dates.first(), dates.last()) {
            eprintln!(
                "Date coverage: {} to {} ({} distinct days, {} months, years: {:?})",
                first,
                last,
                dates.len(),
                filter::distinct_months(&dates).len(),
                filter::distinct_years(&dates),
            );
        }
    }

    let filtered = filter::filter(&rows, date_filter);
    if opts.verbose && *date_filter != DateFilter::All {
        eprintln!(
            "{} of {} events match the date filter",
            filtered.len(),
            rows.len()
        );
    }
    Ok(filtered)
}

pub fn print_json<T: Serialize>(value: &T, opts: &OutputOptions) -> Result<()> {
    let json = if opts.pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", json);
    Ok(())
}

/// `ulens summary`: headline totals over the filtered rows.
pub fn summary(path: &Path, date_filter: &DateFilter, opts: &OutputOptions) -> Result<()> {
    let rows = load_rows(path, date_filter, opts)?;
    let summary = aggregate::summarize(&rows);
    match opts.format {
        OutputFormat::Text => println!("{}", renderer::render_summary(&summary, opts.use_color)),
        OutputFormat::Json => print_json(&summary, opts)?,
    }
    Ok(())
}

/// `ulens daily`: per-day totals.
pub fn daily(path: &Path, date_filter: &DateFilter, opts: &OutputOptions) -> Result<()> {
    let rows = load_rows(path, date_filter, opts)?;
    let daily = aggregate::usage_by_day(&rows);
    match opts.format {
        OutputFormat::Text => println!("{}", renderer::render_daily(&daily, opts.use_color)),
        OutputFormat::Json => print_json(&daily, opts)?,
    }
    Ok(())
}

/// `ulens models`: per-model-per-day breakdown.
pub fn models(path: &Path, date_filter: &DateFilter, opts: &OutputOptions) -> Result<()> {
    let rows = load_rows(path, date_filter, opts)?;
    let breakdown = aggregate::usage_by_model_and_day(&rows);
    match opts.format {
        OutputFormat::Text => println!("{}", renderer::render_models(&breakdown, opts.use_color)),
        OutputFormat::Json => print_json(&breakdown, opts)?,
    }
    Ok(())
}
