//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::file_source_adapter::FileSourceAdapter;
use crate::adapters::json_report_adapter::JsonReportAdapter;
use crate::adapters::markdown_report_adapter::{render_markdown, MarkdownReportAdapter};
use crate::adapters::svg_chart_adapter::SvgChartAdapter;
use crate::domain::config_validation::{
    parse_item_list, parse_month, validate_data_path, validate_item_count, validate_tracker_config,
    validate_window,
};
use crate::domain::dataset::Dataset;
use crate::domain::date_label::{short_label, MonthYear};
use crate::domain::error::TrackerError;
use crate::domain::report::{
    ComparisonReport, ReportOptions, Selection, DEFAULT_BASKET, MAX_CHOSEN_ITEMS,
};
use crate::domain::series_math::DEFAULT_ANNUAL_RATE_PCT;
use crate::ports::config_port::ConfigPort;
use crate::ports::report_port::ReportPort;
use crate::ports::source_port::SourcePort;

/// Window used when neither the config nor the command line names one.
pub const DEFAULT_START: MonthYear = MonthYear {
    year: 2014,
    month: 11,
};
pub const DEFAULT_END: MonthYear = MonthYear {
    year: 2024,
    month: 9,
};

pub const DEFAULT_ITEMS: [&str; MAX_CHOSEN_ITEMS] = [
    "All-items (avg.)",
    "Food (avg.)",
    "Shelter (avg.)",
    "Purchase of vehicles",
    "City bus and subway transportation",
];

#[derive(Parser, Debug)]
#[command(
    name = "inflation-tracker",
    about = "Compare consumer price index changes against a steady inflation target"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build a comparison report for a date window and up to five items
    Compare {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(short, long)]
        data: Option<PathBuf>,
        /// First month of the window (YYYY-MM)
        #[arg(long, value_parser = parse_month_arg)]
        start: Option<MonthYear>,
        /// Last month of the window (YYYY-MM)
        #[arg(long, value_parser = parse_month_arg)]
        end: Option<MonthYear>,
        /// Item name; repeat for each slot
        #[arg(short, long = "item")]
        items: Vec<String>,
        /// Output file; `.json` and `.svg` pick those formats, anything else is markdown
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List items grouped by category
    Items {
        #[arg(short, long)]
        data: PathBuf,
    },
    /// Show the date range and item count of a dataset
    Info {
        #[arg(short, long)]
        data: PathBuf,
    },
}

/// Everything `compare` needs, after config and command line are merged.
#[derive(Debug, Clone, PartialEq)]
pub struct CompareConfig {
    pub data_path: Option<PathBuf>,
    pub ceiling: Option<MonthYear>,
    pub options: ReportOptions,
    pub start: MonthYear,
    pub end: MonthYear,
    pub items: Vec<String>,
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Default, Clone)]
pub struct CompareOverrides {
    pub data: Option<PathBuf>,
    pub start: Option<MonthYear>,
    pub end: Option<MonthYear>,
    pub items: Vec<String>,
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Compare {
            config,
            data,
            start,
            end,
            items,
            output,
        } => {
            let overrides = CompareOverrides {
                data,
                start,
                end,
                items,
            };
            run_compare(config.as_ref(), overrides, output.as_deref())
        }
        Command::Items { data } => run_items(&data),
        Command::Info { data } => run_info(&data),
    }
}

fn parse_month_arg(s: &str) -> Result<MonthYear, String> {
    MonthYear::parse_iso(s).ok_or_else(|| format!("invalid month '{}', expected YYYY-MM", s))
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|err| {
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

pub fn build_compare_config(config: &dyn ConfigPort) -> Result<CompareConfig, TrackerError> {
    validate_tracker_config(config)?;

    let items = match config.get_string("selection", "items") {
        Some(list) => parse_item_list(&list),
        None => DEFAULT_ITEMS.iter().map(|s| s.to_string()).collect(),
    };

    Ok(CompareConfig {
        data_path: config.get_non_empty("data", "path").map(PathBuf::from),
        ceiling: parse_month(config, "data", "ceiling")?,
        options: ReportOptions {
            annual_rate_pct: config.get_double(
                "reference",
                "annual_rate_pct",
                DEFAULT_ANNUAL_RATE_PCT,
            ),
            basket: config.get_double("report", "basket", DEFAULT_BASKET),
        },
        start: parse_month(config, "selection", "start")?.unwrap_or(DEFAULT_START),
        end: parse_month(config, "selection", "end")?.unwrap_or(DEFAULT_END),
        items,
    })
}

/// Merge command-line overrides into a config; items given on the command
/// line replace the configured list.
pub fn apply_overrides(
    mut config: CompareConfig,
    overrides: CompareOverrides,
) -> Result<CompareConfig, TrackerError> {
    if overrides.data.is_some() {
        config.data_path = overrides.data;
    }
    if let Some(start) = overrides.start {
        config.start = start;
    }
    if let Some(end) = overrides.end {
        config.end = end;
    }
    if !overrides.items.is_empty() {
        config.items = overrides.items;
    }

    validate_item_count(config.items.len())?;
    validate_window(config.start, config.end)?;
    Ok(config)
}

pub fn load_dataset(
    source: &dyn SourcePort,
    ceiling: Option<MonthYear>,
) -> Result<Dataset, TrackerError> {
    log::info!("loading {}", source.describe());
    let raw = source.load_raw()?;
    let dataset = Dataset::parse(&raw)?;
    log::info!(
        "loaded {} items over {} months",
        dataset.items().len(),
        dataset.date_count()
    );
    Ok(match ceiling {
        Some(c) => dataset.with_ceiling(c),
        None => dataset,
    })
}

/// Map item names to slots in order. Unknown names are an error.
pub fn build_selection(
    dataset: &Dataset,
    start: MonthYear,
    end: MonthYear,
    names: &[String],
) -> Result<Selection, TrackerError> {
    let indices = names
        .iter()
        .map(|name| {
            dataset
                .find_item(name)
                .ok_or_else(|| TrackerError::UnknownItem { name: name.clone() })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Selection::new(start, end).with_items(&indices))
}

pub fn build_report(
    source: &dyn SourcePort,
    config: &CompareConfig,
) -> Result<ComparisonReport, TrackerError> {
    let dataset = load_dataset(source, config.ceiling)?;
    let selection = build_selection(&dataset, config.start, config.end, &config.items)?;
    Ok(ComparisonReport::build_with(
        &dataset,
        &selection,
        &config.options,
    )?)
}

/// Report adapter for an output path, chosen by extension.
pub fn report_adapter_for(path: &Path) -> Box<dyn ReportPort> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("json") => Box::new(JsonReportAdapter),
        Some("svg") => Box::new(SvgChartAdapter),
        _ => Box::new(MarkdownReportAdapter),
    }
}

fn run_compare(
    config_path: Option<&PathBuf>,
    overrides: CompareOverrides,
    output_path: Option<&Path>,
) -> ExitCode {
    // Stage 1: Load and validate config
    let loaded = match config_path {
        Some(path) => {
            eprintln!("Loading config from {}", path.display());
            match load_config(path) {
                Ok(a) => Some(a),
                Err(code) => return code,
            }
        }
        None => None,
    };
    let empty;
    let adapter: &dyn ConfigPort = match &loaded {
        Some(a) => a,
        None => {
            empty = EmptyConfig;
            &empty
        }
    };

    let config = match build_compare_config(adapter).and_then(|c| apply_overrides(c, overrides)) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    // Stage 2: Resolve the data source
    let data_path = match validate_data_path(config.data_path.as_deref()) {
        Ok(p) => p.to_path_buf(),
        Err(e) => {
            eprintln!("error: {e} (or pass --data)");
            return (&e).into();
        }
    };
    let source = FileSourceAdapter::new(data_path);

    // Stage 3: Build the report
    let report = match build_report(&source, &config) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    eprintln!(
        "Compared {} item(s) from {} to {}",
        report.rows.len(),
        short_label(report.start_label()),
        short_label(report.end_label())
    );

    // Stage 4: Output
    match output_path {
        Some(path) => {
            if let Err(e) = report_adapter_for(path).write(&report, path) {
                eprintln!("error: {e}");
                return (&e).into();
            }
            eprintln!("Report written to {}", path.display());
        }
        None => println!("{}", render_markdown(&report)),
    }
    ExitCode::SUCCESS
}

fn run_items(data_path: &Path) -> ExitCode {
    let dataset = match load_dataset(&FileSourceAdapter::new(data_path.to_path_buf()), None) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    for group in dataset.items_by_category() {
        println!("{}", group.category);
        for (_, item) in &group.items {
            println!("  {}", item.name);
        }
    }
    ExitCode::SUCCESS
}

fn run_info(data_path: &Path) -> ExitCode {
    let dataset = match load_dataset(&FileSourceAdapter::new(data_path.to_path_buf()), None) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    println!("{}", describe_dataset(&dataset));
    ExitCode::SUCCESS
}

/// One-paragraph summary used by `info`.
pub fn describe_dataset(dataset: &Dataset) -> String {
    let first = dataset.dates().first().map(|d| short_label(d));
    let last = dataset.dates().last().map(|d| short_label(d));
    let range = match (first, last) {
        (Some(first), Some(last)) => format!("{} to {}", first, last),
        _ => "none".to_string(),
    };
    let ceiling = dataset
        .ceiling()
        .map_or_else(|| "none".to_string(), |c| c.to_string());

    format!(
        "dates: {} ({} months)\nitems: {} in {} categories\nceiling: {}",
        range,
        dataset.date_count(),
        dataset.items().len(),
        dataset.items_by_category().len(),
        ceiling
    )
}

/// Stands in for a config file when `--config` is not given.
struct EmptyConfig;

impl ConfigPort for EmptyConfig {
    fn get_string(&self, _section: &str, _key: &str) -> Option<String> {
        None
    }

    fn get_double(&self, _section: &str, _key: &str, default: f64) -> f64 {
        default
    }
}
