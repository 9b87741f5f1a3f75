use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use serde::Serialize;

use crate::cli::output::{OutputFormat, OutputOptions};
use crate::cli::renderer;
use crate::cli::report_cmd::{load_rows, print_json};
use crate::core::csv;
use crate::core::filter::DateFilter;
use crate::core::models::row::UsageRow;
use crate::core::table::{self, SortDirection, SortField, TableQuery};

/// Table view parameters as they arrive from the command line.
#[derive(Debug, Clone)]
pub struct TableArgs {
    pub search: String,
    pub model: Option<String>,
    pub kind: Option<String>,
    pub sort: String,
    pub ascending: bool,
    pub page: usize,
}

#[derive(Serialize)]
struct TablePayload {
    rows: Vec<UsageRow>,
    total_count: usize,
    total_pages: usize,
    page: usize,
}

fn build_query(args: &TableArgs) -> Result<TableQuery> {
    let Some(sort_field) = SortField::from_name(&args.sort) else {
        bail!(
            "unknown sort field '{}' (one of: date, kind, model, max-mode, \
             input-with-cache-write, input-without-cache-write, cache-read, \
             output-tokens, total-tokens, cost)",
            args.sort
        );
    };
    Ok(TableQuery {
        search: args.search.clone(),
        model: args.model.clone().unwrap_or_else(|| table::FILTER_ALL.to_string()),
        kind: args.kind.clone().unwrap_or_else(|| table::FILTER_ALL.to_string()),
        sort_field,
        sort_direction: if args.ascending {
            SortDirection::Ascending
        } else {
            SortDirection::Descending
        },
        page: args.page,
    })
}

/// `ulens table`: one page of the searched/filtered/sorted view.
pub fn run(
    path: &Path,
    date_filter: &DateFilter,
    args: &TableArgs,
    opts: &OutputOptions,
) -> Result<()> {
    let rows = load_rows(path, date_filter, opts)?;
    let mut query = build_query(args)?;

    // The engine leaves out-of-range pages to the caller; clamp here so a
    // too-large --page lands on the last page instead of an empty one.
    let total_pages = table::query(&rows, &query).total_pages;
    query.page = query.page.clamp(1, total_pages.max(1));
    let page = table::query(&rows, &query);

    if opts.verbose {
        eprintln!("Models: {}", table::distinct_models(&rows).join(", "));
        eprintln!("Kinds: {}", table::distinct_kinds(&rows).join(", "));
    }

    match opts.format {
        OutputFormat::Text => {
            println!("{}", renderer::render_table(&page, &query, opts.use_color));
        }
        OutputFormat::Json => {
            let payload = TablePayload {
                rows: page.rows,
                total_count: page.total_count,
                total_pages: page.total_pages,
                page: query.page,
            };
            print_json(&payload, opts)?;
        }
    }
    Ok(())
}

/// `ulens export`: write the filtered/sorted (unpaginated) view as CSV to a
/// file, or stdout when no output path is given.
pub fn export(
    path: &Path,
    date_filter: &DateFilter,
    args: &TableArgs,
    output: Option<&PathBuf>,
    opts: &OutputOptions,
) -> Result<()> {
    let rows = load_rows(path, date_filter, opts)?;
    let query = build_query(args)?;
    let matched = table::filtered_sorted(&rows, &query);
    let content = csv::export(&matched);

    match output {
        Some(out_path) => {
            std::fs::write(out_path, &content)?;
            eprintln!("Exported {} events to {}", matched.len(), out_path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}
