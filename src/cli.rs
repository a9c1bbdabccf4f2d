//! CLI definition and dispatch.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::text_report::TextReport;
use crate::domain::asof::MAX_LOOKBACK_DAYS;
use crate::domain::calendar::{DEFAULT_LOOKBACK_BUSINESS_DAYS, business_days_before, parse_date};
use crate::domain::config_validation::validate_config;
use crate::domain::error::BandsightError;
use crate::domain::indicator::{BandParams, DEFAULT_NUM_STD, DEFAULT_SPAN, DEFAULT_WINDOW};
use crate::domain::store::BandStore;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::PriceDataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(
    name = "bandsight",
    about = "Bollinger band volatility checks for daily closing prices"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Which series to load and what "today" is.
#[derive(Args, Debug, Clone)]
pub struct SeriesArgs {
    #[arg(short, long)]
    pub ticker: String,
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// First date to fetch (default: 60 business days before today)
    #[arg(long)]
    pub start: Option<String>,
    /// Last date to fetch (default: today)
    #[arg(long)]
    pub end: Option<String>,
    /// Treat this date as today instead of the local date
    #[arg(long)]
    pub today: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Say whether the close was above, below or within the bands
    Classify {
        #[command(flatten)]
        series: SeriesArgs,
        /// Date to check (default: today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Adjusted close on the last trading day on or before a date
    Price {
        #[command(flatten)]
        series: SeriesArgs,
        #[arg(long)]
        date: Option<String>,
    },
    /// Last close, maximum close and latest bands
    Summary {
        #[command(flatten)]
        series: SeriesArgs,
    },
    /// Dump the band table as CSV
    Bands {
        #[command(flatten)]
        series: SeriesArgs,
    },
    /// Show the stored data range for a ticker
    Info {
        #[arg(short, long)]
        ticker: String,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

impl Command {
    fn config_path(&self) -> Option<&PathBuf> {
        match self {
            Command::Classify { series, .. }
            | Command::Price { series, .. }
            | Command::Summary { series }
            | Command::Bands { series } => series.config.as_ref(),
            Command::Info { config, .. } => config.as_ref(),
        }
    }

    fn today_override(&self) -> Option<&str> {
        match self {
            Command::Classify { series, .. }
            | Command::Price { series, .. }
            | Command::Summary { series }
            | Command::Bands { series } => series.today.as_deref(),
            Command::Info { .. } => None,
        }
    }
}

/// Lookback settings from the `[query]` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuerySettings {
    pub max_lookback_days: u32,
    pub default_business_days: u32,
}

pub fn run(cli: Cli) -> ExitCode {
    let config = match load_config(cli.command.config_path()) {
        Ok(c) => c,
        Err(e) => return fail(&e),
    };
    if let Err(e) = validate_config(&config) {
        return fail(&e);
    }

    let today = match cli.command.today_override() {
        Some(raw) => match parse_date(raw) {
            Ok(d) => d,
            Err(e) => return fail(&e),
        },
        None => chrono::Local::now().date_naive(),
    };

    let data_port = match open_data_port(&config) {
        Ok(p) => p,
        Err(e) => return fail(&e),
    };

    match run_command(&cli.command, data_port.as_ref(), &config, today) {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => fail(&e),
    }
}

fn fail(err: &BandsightError) -> ExitCode {
    eprintln!("error: {err}");
    err.into()
}

/// Load the INI file, or an empty config when no path is given.
pub fn load_config(path: Option<&PathBuf>) -> Result<FileConfigAdapter, BandsightError> {
    match path {
        Some(p) => {
            eprintln!("Loading config from {}", p.display());
            FileConfigAdapter::from_file(p)
        }
        None => Ok(FileConfigAdapter::empty()),
    }
}

/// Integer config value converted to `T`; out-of-range values are `ConfigInvalid`.
fn config_int<T: TryFrom<i64>>(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
    default: i64,
) -> Result<T, BandsightError> {
    let raw = config.get_int(section, key, default);
    T::try_from(raw).map_err(|_| BandsightError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: format!("value {raw} is out of range"),
    })
}

pub fn build_band_params(config: &dyn ConfigPort) -> Result<BandParams, BandsightError> {
    let params = BandParams {
        window: config_int(config, "bands", "window", DEFAULT_WINDOW as i64)?,
        span: config_int(config, "bands", "span", DEFAULT_SPAN as i64)?,
        num_std: config.get_double("bands", "num_std", DEFAULT_NUM_STD),
    };
    params.validate()?;
    Ok(params)
}

pub fn build_query_settings(config: &dyn ConfigPort) -> Result<QuerySettings, BandsightError> {
    Ok(QuerySettings {
        max_lookback_days: config_int(
            config,
            "query",
            "max_lookback_days",
            i64::from(MAX_LOOKBACK_DAYS),
        )?,
        default_business_days: config_int(
            config,
            "query",
            "default_business_days",
            i64::from(DEFAULT_LOOKBACK_BUSINESS_DAYS),
        )?,
    })
}

/// Data port selected by `[data] source`.
pub fn open_data_port(config: &dyn ConfigPort) -> Result<Box<dyn PriceDataPort>, BandsightError> {
    let source = config
        .get_string("data", "source")
        .unwrap_or_else(|| "csv".to_string())
        .to_lowercase();

    match source.as_str() {
        "csv" => {
            let dir = config
                .get_string("data", "csv_dir")
                .unwrap_or_else(|| "data".to_string());
            Ok(Box::new(CsvAdapter::new(PathBuf::from(dir))))
        }
        #[cfg(feature = "sqlite")]
        "sqlite" => {
            let adapter = crate::adapters::sqlite_adapter::SqliteAdapter::from_config(config)?;
            Ok(Box::new(adapter))
        }
        other => Err(BandsightError::ConfigInvalid {
            section: "data".into(),
            key: "source".into(),
            reason: format!("unsupported data source '{other}'"),
        }),
    }
}

/// Fetch range: command line, then `[query]` config, then the defaults
/// (`default_business_days` business days before `today`, through `today`).
pub fn resolve_range(
    series: &SeriesArgs,
    config: &dyn ConfigPort,
    today: NaiveDate,
) -> Result<(NaiveDate, NaiveDate), BandsightError> {
    let settings = build_query_settings(config)?;

    let start = match series.start.as_deref() {
        Some(raw) => parse_date(raw)?,
        None => match config.get_date("query", "start_date")? {
            Some(d) => d,
            None => business_days_before(today, settings.default_business_days),
        },
    };
    let end = match series.end.as_deref() {
        Some(raw) => parse_date(raw)?,
        None => config.get_date("query", "end_date")?.unwrap_or(today),
    };
    Ok((start, end))
}

pub fn build_store(
    data_port: &dyn PriceDataPort,
    series: &SeriesArgs,
    config: &dyn ConfigPort,
    today: NaiveDate,
) -> Result<BandStore, BandsightError> {
    let (start, end) = resolve_range(series, config, today)?;
    let params = build_band_params(config)?;
    let settings = build_query_settings(config)?;

    eprintln!("Loading {} from {} to {}", series.ticker, start, end);
    let store = BandStore::build(data_port, &series.ticker.to_uppercase(), start, end, params)?
        .with_max_lookback_days(settings.max_lookback_days);
    eprintln!("  {} trading days, {}", store.trading_days(), store.params());
    Ok(store)
}

/// Execute `command` and return what goes to stdout.
pub fn run_command(
    command: &Command,
    data_port: &dyn PriceDataPort,
    config: &dyn ConfigPort,
    today: NaiveDate,
) -> Result<String, BandsightError> {
    let report = TextReport;
    match command {
        Command::Classify { series, date } => {
            let store = build_store(data_port, series, config, today)?;
            let date = query_date(date.as_deref(), today)?;
            let snapshot = store.snapshot(date)?;
            Ok(format!(
                "{}\n",
                report.render_snapshot(store.ticker(), &snapshot)
            ))
        }
        Command::Price { series, date } => {
            let store = build_store(data_port, series, config, today)?;
            let date = query_date(date.as_deref(), today)?;
            let resolved = store.resolve(date)?;
            let price = store.get_price(date)?;
            Ok(format!("{} {} {}\n", store.ticker(), resolved, price))
        }
        Command::Summary { series } => {
            let store = build_store(data_port, series, config, today)?;
            report.render_summary(&store, today)
        }
        Command::Bands { series } => {
            let store = build_store(data_port, series, config, today)?;
            render_band_csv(&store)
        }
        Command::Info { ticker, .. } => {
            let ticker = ticker.to_uppercase();
            match data_port.data_range(&ticker)? {
                Some((first, last, count)) => {
                    Ok(format!("{}: {} days, {} to {}\n", ticker, count, first, last))
                }
                None => Err(BandsightError::DataUnavailable { ticker }),
            }
        }
    }
}

fn query_date(raw: Option<&str>, today: NaiveDate) -> Result<NaiveDate, BandsightError> {
    match raw {
        Some(raw) => parse_date(raw),
        None => Ok(today),
    }
}

fn opt_cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

pub fn render_band_csv(store: &BandStore) -> Result<String, BandsightError> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record([
        "date",
        "adj_close",
        "sma",
        "ewma",
        "stddev",
        "upper_bound",
        "lower_bound",
    ])
    .map_err(std::io::Error::from)?;

    for row in store.rows() {
        wtr.write_record([
            row.date.format("%Y-%m-%d").to_string(),
            row.adjusted_close.to_string(),
            opt_cell(row.sma),
            row.ewma.to_string(),
            opt_cell(row.stddev()),
            opt_cell(row.upper_bound()),
            opt_cell(row.lower_bound()),
        ])
        .map_err(std::io::Error::from)?;
    }

    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    String::from_utf8(bytes)
        .map_err(|e| BandsightError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}
