mod cli;
mod core;

use std::path::PathBuf;

use anyhow::{bail, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::cli::table_cmd::TableArgs;
use crate::core::config::AppConfig;
use crate::core::filter::DateFilter;

#[derive(Parser)]
#[command(name = "ulens", about = "AI usage-event CSV analytics CLI", version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Usage export to analyze (.csv)
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true)]
    format: Option<String>,

    /// Shorthand for --format json
    #[arg(short = 'j', long = "json", global = true)]
    json: bool,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    /// Verbose logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Keep only events on this day (YYYY-MM-DD)
    #[arg(long, global = true)]
    day: Option<NaiveDate>,

    /// Keep only events in this month (YYYY-MM)
    #[arg(long, global = true)]
    month: Option<String>,

    /// Keep only events in this year
    #[arg(long, global = true)]
    year: Option<i32>,

    /// Range start (YYYY-MM-DD, inclusive); ignored without --to
    #[arg(long, global = true)]
    from: Option<NaiveDate>,

    /// Range end (YYYY-MM-DD, inclusive); ignored without --from
    #[arg(long, global = true)]
    to: Option<NaiveDate>,
}

#[derive(Subcommand)]
enum Commands {
    /// Headline totals over the (filtered) events
    Summary,
    /// Per-day totals
    Daily,
    /// Per-model per-day breakdown
    Models,
    /// Paginated table view with search, filters, and sorting
    Table {
        /// Substring match over model, kind, max mode, and date
        #[arg(short, long, default_value = "")]
        search: String,

        /// Keep only this model
        #[arg(short, long)]
        model: Option<String>,

        /// Keep only this kind / request type
        #[arg(short, long)]
        kind: Option<String>,

        /// Sort column (header name or shorthand like total-tokens)
        #[arg(long, default_value = "date")]
        sort: String,

        /// Sort ascending (default is descending)
        #[arg(long)]
        asc: bool,

        /// Page number (1-based, 20 events per page)
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },
    /// Export the filtered/sorted view as CSV
    Export {
        /// Substring match over model, kind, max mode, and date
        #[arg(short, long, default_value = "")]
        search: String,

        /// Keep only this model
        #[arg(short, long)]
        model: Option<String>,

        /// Keep only this kind / request type
        #[arg(short, long)]
        kind: Option<String>,

        /// Sort column (header name or shorthand like total-tokens)
        #[arg(long, default_value = "date")]
        sort: String,

        /// Sort ascending (default is descending)
        #[arg(long)]
        asc: bool,

        /// Write to this path instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Generate default config file
    Init,
    /// Validate config file
    Check,
}

/// Combine the date flags into one filter. Precedence: day, month, year,
/// then range; a lone --from or --to falls through to the range's defined
/// keep-all behavior.
fn build_date_filter(cli: &Cli) -> Result<DateFilter> {
    if let Some(day) = cli.day {
        return Ok(DateFilter::Day(day));
    }
    if let Some(month) = &cli.month {
        let Ok(first) = NaiveDate::parse_from_str(&format!("{}-01", month), "%Y-%m-%d") else {
            bail!("invalid --month '{}' (expected YYYY-MM)", month);
        };
        return Ok(DateFilter::Month(first));
    }
    if let Some(year) = cli.year {
        let Some(first) = NaiveDate::from_ymd_opt(year, 1, 1) else {
            bail!("invalid --year '{}'", year);
        };
        return Ok(DateFilter::Year(first));
    }
    if cli.from.is_some() || cli.to.is_some() {
        return Ok(DateFilter::Range {
            start: cli.from,
            end: cli.to,
        });
    }
    Ok(DateFilter::All)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load().unwrap_or_default();

    let format_name = if cli.json {
        "json".to_string()
    } else {
        cli.format
            .clone()
            .unwrap_or_else(|| config.settings.default_format.clone())
    };
    let color_policy = cli::output::ColorPolicy::from_name(&config.settings.color)
        .unwrap_or(cli::output::ColorPolicy::Auto);
    let output_opts = cli::output::OutputOptions {
        format: match format_name.as_str() {
            "json" => cli::output::OutputFormat::Json,
            _ => cli::output::OutputFormat::Text,
        },
        pretty: cli.pretty,
        use_color: cli::output::detect_color(color_policy, cli.no_color),
        verbose: cli.verbose,
    };

    if let Some(Commands::Config { action }) = &cli.command {
        return match action {
            ConfigAction::Init => cli::config_cmd::init(&output_opts),
            ConfigAction::Check => cli::config_cmd::check(&output_opts),
        };
    }

    let date_filter = build_date_filter(&cli)?;
    let Some(file) = cli.file.clone() else {
        eprintln!("No input file. Pass the usage export with --file <PATH.csv>.");
        std::process::exit(1);
    };

    match cli.command {
        None | Some(Commands::Summary) => {
            cli::report_cmd::summary(&file, &date_filter, &output_opts)?
        }
        Some(Commands::Daily) => cli::report_cmd::daily(&file, &date_filter, &output_opts)?,
        Some(Commands::Models) => cli::report_cmd::models(&file, &date_filter, &output_opts)?,
        Some(Commands::Table {
            search,
            model,
            kind,
            sort,
            asc,
            page,
        }) => {
            let args = TableArgs {
                search,
                model,
                kind,
                sort,
                ascending: asc,
                page,
            };
            cli::table_cmd::run(&file, &date_filter, &args, &output_opts)?;
        }
        Some(Commands::Export {
            search,
            model,
            kind,
            sort,
            asc,
            output,
        }) => {
            let args = TableArgs {
                search,
                model,
                kind,
                sort,
                ascending: asc,
                page: 1,
            };
            cli::table_cmd::export(&file, &date_filter, &args, output.as_ref(), &output_opts)?;
        }
        Some(Commands::Config { .. }) => unreachable!("handled above"),
    }

    Ok(())
}
