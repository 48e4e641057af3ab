//! Creator Commission Reporting
//!
//! Rolls a commission extract up per creator and prints one page of the
//! report, the way the admin dashboard shows it: searchable, sortable by any
//! column and paginated.

mod config;
mod constants;
mod export;
mod format;
mod logging;
mod period;
mod render;
mod source;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use report_pipeline::{Record, SortDirection, SortField, ViewState, aggregate, filter_by_search};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use config::{Config, FileConfig};
use render::ReportSummary;

/// Load the config file, or fall back to the built-in preset when the
/// default config.toml is absent
fn load_config(explicit: Option<&Path>, page_size: Option<usize>) -> Result<Config> {
    let mut config = match explicit {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!(
                    "Config file '{}' not found.\n\n\
                    To get started:\n\
                    1. Copy config.toml.example to config.toml\n\
                    2. Point report.key_field / volume_field at your extract's columns\n\n\
                    Omit --config to use the built-in creator commission layout.",
                    path.display()
                );
            }
            Config::from_file(&FileConfig::load(path)?)?
        }
        None => {
            let path = Path::new(constants::CONFIG_FILE);
            if path.exists() {
                Config::from_file(&FileConfig::load(path)?)?
            } else {
                info!("No {} found, using built-in layout", constants::CONFIG_FILE);
                Config::from_preset(&shared::CONFIG.commission_report, shared::CONFIG.page_size)
            }
        }
    };

    if let Some(size) = page_size {
        if size == 0 {
            anyhow::bail!("--page-size must be at least 1");
        }
        config.page_size = size;
    }

    Ok(config)
}

#[derive(Parser, Debug)]
#[command(name = "creator-report")]
#[command(about = "Creator commission rollup for the admin dashboard")]
struct Args {
    /// Reporting extract (.csv or .json)
    #[arg(short, long, default_value = constants::DEFAULT_INPUT, global = true)]
    input: PathBuf,

    /// Config file (default: ./config.toml, else the built-in layout)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,

    /// Case-insensitive search on the creator name
    #[arg(short, long, default_value = "", global = true)]
    search: String,

    /// Column to sort by: key, count, sum, grand_total or a category name
    #[arg(long, global = true)]
    sort: Option<String>,

    /// Sort direction (default depends on the column)
    #[arg(long, value_enum, global = true)]
    direction: Option<Direction>,

    /// Page to show (1-based, clamped into range)
    #[arg(short, long, default_value_t = 1)]
    page: usize,

    /// Rows per page (overrides the config)
    #[arg(long, global = true)]
    page_size: Option<usize>,

    /// Only include records dated in this year (e.g., 2025)
    #[arg(long, global = true)]
    year: Option<i32>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Export every matching row (all pages) to CSV
    Export {
        /// Path to output CSV file
        #[arg(default_value = constants::EXPORT_FILENAME)]
        file: PathBuf,
    },

    /// List the configured commission categories
    Categories,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Direction {
    Asc,
    Desc,
}

impl From<Direction> for SortDirection {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Asc => SortDirection::Ascending,
            Direction::Desc => SortDirection::Descending,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Table,
    Json,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::initialize(args.verbose)?;

    let config = load_config(args.config.as_deref(), args.page_size)?;

    if let Some(Command::Categories) = args.command {
        render::print_categories(&config);
        return Ok(());
    }

    let view = build_view_state(&args, &config)?;
    run_report(&args, &config, &view)
}

/// Translate CLI flags into view settings
fn build_view_state(args: &Args, config: &Config) -> Result<ViewState> {
    let mut view = ViewState::new(config.page_size);

    if let Some(name) = &args.sort {
        let field = SortField::parse(name, &config.spec.categories)?;
        view.sort_field = field;
        view.sort_direction = field.default_direction();
    }
    if let Some(direction) = args.direction {
        view.sort_direction = direction.into();
    }

    view.set_search_term(args.search.clone());
    view.set_page(args.page);

    debug!(?view, "View state");
    Ok(view)
}

/// Read the extract and apply the --year filter
fn load_snapshot(args: &Args, config: &Config) -> Result<Vec<Record>> {
    let records = source::load_records(&args.input)?;

    let Some(year) = args.year else {
        return Ok(records);
    };
    let date_field = config.date_field.as_deref().with_context(|| {
        "--year needs report.date_field in config.toml (the column holding the order date)"
    })?;
    let (kept, undated) = period::filter_by_year(records, date_field, year);
    if undated > 0 {
        eprintln!("  Warning: {} record(s) without a readable {} were skipped", undated, date_field);
    }

    Ok(kept)
}

/// Load the snapshot, roll it up and print or export the requested view
fn run_report(args: &Args, config: &Config, view: &ViewState) -> Result<()> {
    let records = load_snapshot(args, config)?;
    let rows = aggregate(&records, &config.spec);

    if let Some(Command::Export { file }) = &args.command {
        return export::export_rows(file, config, &view.select(&rows));
    }

    let page = view.apply(&rows);
    match args.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&page)?);
        }
        OutputFormat::Table => {
            render::print_report(config, &page, &view.search_term);

            let matched = filter_by_search(&rows, &view.search_term);
            let summary = ReportSummary::new(records.len(), rows.len(), &matched, config.spec.categories.len());
            render::print_summary(config, &summary, args.year);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("creator-report").chain(argv.iter().copied())).unwrap()
    }

    fn preset() -> Config {
        Config::from_preset(&shared::CONFIG.commission_report, 10)
    }

    #[test]
    fn test_default_view_is_grand_total_descending() {
        let view = build_view_state(&parse(&[]), &preset()).unwrap();
        assert_eq!(view.sort_field, SortField::GrandTotal);
        assert_eq!(view.sort_direction, SortDirection::Descending);
        assert_eq!(view.current_page, 1);
        assert_eq!(view.page_size, 10);
    }

    #[test]
    fn test_sort_flag_uses_column_default_direction() {
        let view = build_view_state(&parse(&["--sort", "key"]), &preset()).unwrap();
        assert_eq!(view.sort_field, SortField::Key);
        assert_eq!(view.sort_direction, SortDirection::Ascending);

        let view = build_view_state(&parse(&["--sort", "grand-total"]), &preset()).unwrap();
        assert_eq!(view.sort_direction, SortDirection::Descending);

        let view = build_view_state(&parse(&["--sort", "shop_ads", "--direction", "asc"]), &preset()).unwrap();
        assert_eq!(view.sort_field, SortField::Category(1));
        assert_eq!(view.sort_direction, SortDirection::Ascending);
    }

    #[test]
    fn test_search_and_page_flags() {
        let view = build_view_state(&parse(&["--search", "lan", "--page", "4"]), &preset()).unwrap();
        assert_eq!(view.search_term, "lan");
        assert_eq!(view.current_page, 4);
    }

    #[test]
    fn test_unknown_sort_field_is_an_error() {
        let err = build_view_state(&parse(&["--sort", "profit"]), &preset()).unwrap_err();
        assert!(err.to_string().contains("unknown sort field 'profit'"));
    }

    #[test]
    fn test_export_subcommand_default_file() {
        let args = parse(&["export"]);
        assert!(matches!(
            args.command,
            Some(Command::Export { ref file }) if file == Path::new(constants::EXPORT_FILENAME)
        ));
    }

    fn sample_input() -> String {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../../data/commissions.csv")
            .display()
            .to_string()
    }

    #[test]
    fn test_sample_year_report_exports_every_record() {
        let config = preset();
        let input = sample_input();
        let args = parse(&["--input", input.as_str(), "--year", "2025", "--sort", "count", "export"]);

        let records = load_snapshot(&args, &config).unwrap();
        assert!(!records.is_empty());
        assert!(records.iter().all(|record| {
            period::record_year(record.get("order_date")) == Some(2025)
        }));

        let rows = aggregate(&records, &config.spec);
        let view = build_view_state(&args, &config).unwrap();
        let mut out = Vec::new();
        export::write_rows(&mut out, &config, &view.select(&rows)).unwrap();

        let mut reader = csv::Reader::from_reader(out.as_slice());
        let headers = reader.headers().unwrap().clone();
        assert_eq!(&headers[0], "Creator");
        assert_eq!(&headers[1], "Count");
        assert_eq!(headers.len(), 3 + 3 * config.spec.categories.len() + 1);

        let counts: Vec<usize> = reader
            .records()
            .map(|record| record.unwrap()[1].parse().unwrap())
            .collect();
        assert_eq!(counts.len(), rows.len());
        assert_eq!(counts.iter().sum::<usize>(), records.len());
        assert!(counts.windows(2).all(|pair| pair[0] >= pair[1]));

        let page = view.apply(&rows);
        assert_eq!(page.total_rows, rows.len());
        assert!(page.rows.len() <= config.page_size);
    }

    #[test]
    fn test_sample_year_filter_drops_other_years() {
        let config = preset();
        let input = sample_input();
        let all = load_snapshot(&parse(&["--input", input.as_str()]), &config).unwrap();
        let year = load_snapshot(&parse(&["--input", input.as_str(), "--year", "2025"]), &config).unwrap();
        assert!(year.len() < all.len());
    }

    #[test]
    fn test_year_without_date_field_fails() {
        let mut config = preset();
        config.date_field = None;
        let input = sample_input();
        let args = parse(&["--input", input.as_str(), "--year", "2025"]);

        let err = load_snapshot(&args, &config).unwrap_err();
        assert!(err.to_string().contains("report.date_field"));
    }

    #[test]
    fn test_missing_explicit_config_fails() {
        let err = load_config(Some(Path::new("does-not-exist.toml")), None).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }
}
