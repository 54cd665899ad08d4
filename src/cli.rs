//! CLI definition and dispatch.

use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::config_basket_source::ConfigBasketSource;
use crate::adapters::csv_adapter::CsvHistoryAdapter;
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::basket::{Basket, BasketItem, WeightMode};
use crate::domain::config_validation::{validate_all, validate_data_config, DATA_SECTION};
use crate::domain::error::BasketError;
use crate::domain::performance::{compute_performance, PerformancePoint};
use crate::domain::price::{latest_quote, Quote, TickerSeries};
use crate::domain::range::HistoryRange;
use crate::ports::basket_port::BasketSource;
use crate::ports::config_port::ConfigPort;
use crate::ports::history_port::PriceHistoryPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "baskettrack", about = "Ticker basket performance tracker")]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute a basket's performance series
    Performance {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        basket: String,
        /// 1w, 1m, 3m, 6m, 1y or max
        #[arg(short, long)]
        range: Option<HistoryRange>,
        /// Last date of the range (YYYY-MM-DD), defaults to today
        #[arg(long)]
        as_of: Option<NaiveDate>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Latest close and daily change for each ticker in a basket
    Quotes {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        basket: String,
        /// Quote date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        as_of: Option<NaiveDate>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Search symbols available in the price directory
    Symbols {
        #[arg(short, long)]
        config: PathBuf,
        /// Case-insensitive substring to match
        query: Option<String>,
    },
    /// List configured baskets
    List {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Validate a basket configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Performance {
            config,
            basket,
            range,
            as_of,
            output,
        } => run_performance(&config, &basket, range, as_of, output.as_ref()),
        Command::Quotes {
            config,
            basket,
            as_of,
            output,
        } => run_quotes(&config, &basket, as_of, output.as_ref()),
        Command::Symbols { config, query } => run_symbols(&config, query.as_deref()),
        Command::List { config } => run_list(&config),
        Command::Validate { config } => run_validate(&config),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = BasketError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        tracing::error!("{err}");
        ExitCode::from(&err)
    })
}

/// Range from the command line, else `[data] range`, else one month.
pub fn resolve_range(range_override: Option<HistoryRange>, config: &dyn ConfigPort) -> HistoryRange {
    range_override.unwrap_or_else(|| {
        config
            .get_string(DATA_SECTION, "range")
            .map(|r| HistoryRange::parse_lenient(&r))
            .unwrap_or_default()
    })
}

pub fn load_basket(config: &dyn ConfigPort, id: &str) -> Result<Basket, BasketError> {
    ConfigBasketSource::new(config)
        .get_basket(id)?
        .ok_or_else(|| BasketError::BasketNotFound { id: id.to_string() })
}

/// Price directory from `[data] dir`.
fn csv_history_port(config: &dyn ConfigPort) -> CsvHistoryAdapter {
    let data_dir = config
        .get_string(DATA_SECTION, "dir")
        .map(PathBuf::from)
        .unwrap_or_default();
    CsvHistoryAdapter::new(data_dir)
}

/// Load the config, check `[data]` and look up `basket_id`.
fn open_basket(config_path: &PathBuf, basket_id: &str) -> Result<(FileConfigAdapter, Basket), ExitCode> {
    tracing::info!("Loading config from {}", config_path.display());
    let adapter = load_config(config_path)?;

    let basket = validate_data_config(&adapter)
        .and_then(|()| load_basket(&adapter, basket_id))
        .map_err(|e| {
            tracing::error!("{e}");
            ExitCode::from(&e)
        })?;
    Ok((adapter, basket))
}

fn run_performance(
    config_path: &PathBuf,
    basket_id: &str,
    range_override: Option<HistoryRange>,
    as_of: Option<NaiveDate>,
    output_path: Option<&PathBuf>,
) -> ExitCode {
    let (adapter, basket) = match open_basket(config_path, basket_id) {
        Ok(opened) => opened,
        Err(code) => return code,
    };

    let range = resolve_range(range_override, &adapter);
    let as_of = as_of.unwrap_or_else(|| Utc::now().date_naive());

    run_performance_pipeline(&csv_history_port(&adapter), &basket, range, as_of, output_path)
}

/// Fetch every ticker's history. Tickers that fail to load are logged and
/// left out; the engine treats them as contributing nothing.
pub fn fetch_basket_history(
    history_port: &dyn PriceHistoryPort,
    tickers: &[String],
    range: HistoryRange,
    as_of: NaiveDate,
) -> Vec<TickerSeries> {
    let start_date = range.start_date(as_of);
    let interval = range.interval();
    let mut history = Vec::with_capacity(tickers.len());

    for ticker in tickers {
        match history_port.fetch_history(ticker, start_date, as_of, interval) {
            Ok(series) => {
                match series.date_range() {
                    Some((first, last)) => tracing::debug!(
                        ticker = %ticker,
                        points = series.point_count(),
                        "loaded history {first} to {last}"
                    ),
                    None => tracing::warn!("no usable prices for {} in range", ticker),
                }
                history.push(series);
            }
            Err(e) => tracing::warn!("skipping {} ({})", ticker, e),
        }
    }
    history
}

pub fn run_performance_pipeline(
    history_port: &dyn PriceHistoryPort,
    basket: &Basket,
    range: HistoryRange,
    as_of: NaiveDate,
    output_path: Option<&PathBuf>,
) -> ExitCode {
    let config = match basket.config() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("{e}");
            return (&e).into();
        }
    };

    tracing::info!(
        "Computing {} ({}, {} tickers) over {}: {} to {} ({})",
        basket.name,
        basket.weight_mode,
        basket.items.len(),
        range,
        range.start_date(as_of),
        as_of,
        range.interval(),
    );

    let history = fetch_basket_history(history_port, &basket.tickers(), range, as_of);
    let points = compute_performance(&history, &config);

    if points.is_empty() {
        tracing::warn!("no price data in range for basket {}", basket.id);
    } else {
        log_summary(config.mode(), &points);
    }

    let report = CsvReportAdapter::new();
    let written = match output_path {
        Some(path) => {
            let result = report.write(basket, &points, &path.display().to_string());
            if result.is_ok() {
                tracing::info!("Report written to: {}", path.display());
            }
            result
        }
        None => report.write_to(io::stdout().lock(), &points),
    };

    match written {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("failed to write report: {e}");
            (&e).into()
        }
    }
}

fn log_summary(mode: WeightMode, points: &[PerformancePoint]) {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return;
    };
    let (low, high) = points.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
        (lo.min(p.value), hi.max(p.value))
    });

    match mode {
        WeightMode::Dollar => tracing::info!(
            "{} points, {} to {}: value ${:.2} (low ${:.2}, high ${:.2})",
            points.len(),
            first.date,
            last.date,
            last.value,
            low,
            high,
        ),
        WeightMode::Equal | WeightMode::Custom => tracing::info!(
            "{} points, {} to {}: return {:+.2}% (low {:+.2}%, high {:+.2}%)",
            points.len(),
            first.date,
            last.date,
            last.value,
            low,
            high,
        ),
    }
}

/// Lookback used to find the last two closes for a quote.
pub const QUOTE_RANGE: HistoryRange = HistoryRange::Month;

/// Quotes for every ticker that has at least one usable close within
/// `QUOTE_RANGE` of `as_of`.
pub fn fetch_quotes(history_port: &dyn PriceHistoryPort, tickers: &[String], as_of: NaiveDate) -> Vec<Quote> {
    fetch_basket_history(history_port, tickers, QUOTE_RANGE, as_of)
        .iter()
        .filter_map(latest_quote)
        .collect()
}

pub fn run_quotes_pipeline(
    history_port: &dyn PriceHistoryPort,
    basket: &Basket,
    as_of: NaiveDate,
    output_path: Option<&PathBuf>,
) -> ExitCode {
    let quotes = fetch_quotes(history_port, &basket.tickers(), as_of);
    tracing::info!(
        "{} of {} tickers quoted for {} as of {}",
        quotes.len(),
        basket.items.len(),
        basket.name,
        as_of
    );

    let report = CsvReportAdapter::new();
    let written = match output_path {
        Some(path) => File::create(path)
            .map_err(BasketError::from)
            .and_then(|file| report.write_quotes_to(file, &quotes)),
        None => report.write_quotes_to(io::stdout().lock(), &quotes),
    };

    match written {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("failed to write quotes: {e}");
            (&e).into()
        }
    }
}

fn run_quotes(
    config_path: &PathBuf,
    basket_id: &str,
    as_of: Option<NaiveDate>,
    output_path: Option<&PathBuf>,
) -> ExitCode {
    let (adapter, basket) = match open_basket(config_path, basket_id) {
        Ok(opened) => opened,
        Err(code) => return code,
    };
    let as_of = as_of.unwrap_or_else(|| Utc::now().date_naive());
    run_quotes_pipeline(&csv_history_port(&adapter), &basket, as_of, output_path)
}

/// Available symbols containing `query` (case-insensitive), sorted.
pub fn search_symbols(
    history_port: &dyn PriceHistoryPort,
    query: Option<&str>,
) -> Result<Vec<String>, BasketError> {
    let query = query.map(|q| q.trim().to_uppercase()).unwrap_or_default();
    let mut symbols: Vec<String> = history_port
        .list_symbols()?
        .into_iter()
        .filter(|s| s.to_uppercase().contains(&query))
        .collect();
    symbols.sort();
    Ok(symbols)
}

pub fn run_symbols(config_path: &PathBuf, query: Option<&str>) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };
    if let Err(e) = validate_data_config(&adapter) {
        tracing::error!("{e}");
        return (&e).into();
    }

    match search_symbols(&csv_history_port(&adapter), query) {
        Ok(symbols) => {
            for symbol in &symbols {
                println!("{symbol}");
            }
            tracing::info!("{} symbols found", symbols.len());
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e}");
            (&e).into()
        }
    }
}

pub fn format_item(mode: WeightMode, item: &BasketItem) -> String {
    match mode {
        WeightMode::Equal => item.ticker.clone(),
        WeightMode::Custom => format!("{}:{}", item.ticker, item.weight.unwrap_or_default()),
        WeightMode::Dollar => format!(
            "{}:${:.2}",
            item.ticker,
            item.dollar_amount.unwrap_or_default()
        ),
    }
}

pub fn run_list(config_path: &PathBuf) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let baskets = match ConfigBasketSource::new(&adapter).list_baskets() {
        Ok(b) => b,
        Err(e) => {
            tracing::error!("{e}");
            return (&e).into();
        }
    };

    if baskets.is_empty() {
        tracing::info!("No baskets configured in {}", config_path.display());
        return ExitCode::SUCCESS;
    }

    for basket in &baskets {
        let items: Vec<String> = basket
            .items
            .iter()
            .map(|item| format_item(basket.weight_mode, item))
            .collect();
        println!(
            "{}\t{}\t{}\t{}",
            basket.id,
            basket.name,
            basket.weight_mode,
            items.join(", ")
        );
    }
    tracing::info!("{} baskets found", baskets.len());
    ExitCode::SUCCESS
}

pub fn run_validate(config_path: &PathBuf) -> ExitCode {
    tracing::info!("Validating {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_all(&adapter) {
        tracing::error!("{e}");
        return (&e).into();
    }

    let baskets = match ConfigBasketSource::new(&adapter).list_baskets() {
        Ok(b) => b,
        Err(e) => {
            tracing::error!("{e}");
            return (&e).into();
        }
    };

    for basket in &baskets {
        tracing::info!(
            "  {}: {} mode, {} tickers [OK]",
            basket.id,
            basket.weight_mode,
            basket.items.len()
        );
    }
    tracing::info!("Configuration is valid ({} baskets)", baskets.len());
    ExitCode::SUCCESS
}
