//! CLI definition and dispatch.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{debug, info};

use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_report_adapter::JsonReportAdapter;
use crate::adapters::json_trade_adapter::JsonTradeAdapter;
use crate::adapters::text_report_adapter::TextReportAdapter;
use crate::adapters::tiingo_adapter::{
    TiingoAdapter, TiingoConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS,
};
use crate::domain::analyzer::{AnalyzerSettings, StockAnalyzer, DEFAULT_LOOKBACK_DAYS};
use crate::domain::calendar::offset_date;
use crate::domain::error::AnalyzerError;
use crate::domain::quote::PriceField;
use crate::ports::config_port::ConfigPort;
use crate::ports::report_port::ReportPort;

pub const TOKEN_ENV_VAR: &str = "TIINGO_TOKEN";

const MAX_LOOKBACK_DAYS: u64 = 31;
const MAX_YEARS: u64 = 100;
const MAX_CONCURRENCY: u64 = 32;

#[derive(Parser, Debug)]
#[command(
    name = "stock-analyzer",
    about = "Price lookups and annualized returns for a trade file"
)]
pub struct Cli {
    /// INI configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Csv,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PriceArg {
    Close,
    Open,
}

impl From<PriceArg> for PriceField {
    fn from(arg: PriceArg) -> Self {
        match arg {
            PriceArg::Close => PriceField::Close,
            PriceArg::Open => PriceField::Open,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the symbol of every trade, in file order
    Symbols {
        #[arg(short, long)]
        trades: PathBuf,
    },
    /// List symbols by ascending price on a date
    Sorted {
        #[arg(short, long)]
        trades: PathBuf,
        /// YYYY-MM-DD
        #[arg(short, long)]
        date: String,
        #[arg(long, value_enum, default_value_t = PriceArg::Close)]
        by: PriceArg,
    },
    /// Annualized returns up to a date, best first
    Returns {
        #[arg(short, long)]
        trades: PathBuf,
        /// YYYY-MM-DD
        #[arg(short, long)]
        date: String,
        /// Holding period in whole years, 1-100 (overrides [analyzer] years)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=MAX_YEARS as i64))]
        years: Option<u32>,
    },
    /// Print the date a number of days before another
    OffsetDate {
        #[arg(short, long)]
        date: String,
        #[arg(long, allow_hyphen_values = true)]
        days: i64,
    },
}

impl Command {
    fn needs_prices(&self) -> bool {
        matches!(self, Command::Sorted { .. } | Command::Returns { .. })
    }
}

pub fn run(cli: Cli) -> ExitCode {
    match execute(&cli) {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

/// Load configuration, wire the adapters, and render the command's output.
pub fn execute(cli: &Cli) -> Result<String, AnalyzerError> {
    if let Command::OffsetDate { date, days } = &cli.command {
        return Ok(format!("{}\n", offset_date(date, *days)?));
    }

    let config = load_config(cli.config.as_ref())?;
    let mut settings = build_analyzer_settings(&config)?;
    if let Command::Returns {
        years: Some(years), ..
    } = &cli.command
    {
        settings.years = *years;
    }
    debug!(?settings, "Analyzer settings");

    let tiingo = build_tiingo_config(&config, std::env::var(TOKEN_ENV_VAR).ok())?;
    if cli.command.needs_prices() && tiingo.token.is_none() {
        return Err(AnalyzerError::ConfigMissing {
            section: "tiingo".into(),
            key: "token".into(),
        });
    }

    let trade_port = JsonTradeAdapter::new(trades_dir(&config));
    let quote_port = TiingoAdapter::new(&tiingo)?;
    let analyzer = StockAnalyzer::new(&trade_port, &quote_port, settings);
    let report = report_for(cli.format);

    dispatch(&cli.command, &analyzer, report.as_ref())
}

/// Run one command against an already-wired analyzer.
pub fn dispatch(
    command: &Command,
    analyzer: &StockAnalyzer<'_>,
    report: &dyn ReportPort,
) -> Result<String, AnalyzerError> {
    match command {
        Command::Symbols { trades } => {
            let symbols = analyzer.list_symbols(trades)?;
            info!(count = symbols.len(), "Listed symbols");
            report.render_symbols(&symbols)
        }
        Command::Sorted { trades, date, by } => {
            let field = PriceField::from(*by);
            info!(%date, %field, "Sorting symbols by price");
            let symbols = analyzer.list_symbols_by_ascending_price(trades, date, field)?;
            report.render_symbols(&symbols)
        }
        Command::Returns { trades, date, .. } => {
            info!(%date, years = analyzer.settings().years, "Computing annualized returns");
            let returns = analyzer.compute_annualized_returns(trades, date)?;
            report.render_returns(&returns)
        }
        Command::OffsetDate { date, days } => Ok(format!("{}\n", offset_date(date, *days)?)),
    }
}

pub fn report_for(format: OutputFormat) -> Box<dyn ReportPort> {
    match format {
        OutputFormat::Text => Box::new(TextReportAdapter),
        OutputFormat::Csv => Box::new(CsvReportAdapter),
        OutputFormat::Json => Box::new(JsonReportAdapter),
    }
}

pub fn load_config(path: Option<&PathBuf>) -> Result<FileConfigAdapter, AnalyzerError> {
    match path {
        Some(path) => {
            info!(path = %path.display(), "Loading config");
            FileConfigAdapter::from_file(path).map_err(|e| AnalyzerError::ConfigParse {
                file: path.display().to_string(),
                reason: e.to_string(),
            })
        }
        None => Ok(FileConfigAdapter::empty()),
    }
}

/// Read an unsigned integer key, falling back to `default` when absent and
/// rejecting values that do not parse or fall outside `min..=max`.
fn read_bounded(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
    default: u64,
    min: u64,
    max: u64,
) -> Result<u64, AnalyzerError> {
    if !config.has_key(section, key) {
        return Ok(default);
    }
    let invalid = |reason: String| AnalyzerError::ConfigInvalid {
        section: section.into(),
        key: key.into(),
        reason,
    };
    let value = config
        .get_u64(section, key)
        .ok_or_else(|| invalid("expected a non-negative integer".into()))?;
    if value < min || value > max {
        return Err(invalid(format!("must be between {min} and {max}")));
    }
    Ok(value)
}

pub fn build_analyzer_settings(config: &dyn ConfigPort) -> Result<AnalyzerSettings, AnalyzerError> {
    let lookback_days = read_bounded(
        config,
        "analyzer",
        "lookback_days",
        u64::from(DEFAULT_LOOKBACK_DAYS),
        0,
        MAX_LOOKBACK_DAYS,
    )?;
    let years = read_bounded(config, "analyzer", "years", 1, 1, MAX_YEARS)?;
    let concurrency = read_bounded(config, "analyzer", "concurrency", 1, 1, MAX_CONCURRENCY)?;

    // Bounds above keep every value well inside u32.
    Ok(AnalyzerSettings {
        lookback_days: lookback_days as u32,
        years: years as u32,
        concurrency: concurrency as usize,
    })
}

/// `env_token` (from `TIINGO_TOKEN`) takes precedence over `[tiingo] token`.
pub fn build_tiingo_config(
    config: &dyn ConfigPort,
    env_token: Option<String>,
) -> Result<TiingoConfig, AnalyzerError> {
    let token = env_token
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .or_else(|| config.get_string("tiingo", "token"));

    let base_url = config
        .get_string("tiingo", "base_url")
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    let timeout_secs = read_bounded(
        config,
        "tiingo",
        "timeout_secs",
        DEFAULT_TIMEOUT_SECS,
        1,
        600,
    )?;

    Ok(TiingoConfig {
        base_url,
        token,
        timeout: Duration::from_secs(timeout_secs),
    })
}

pub fn trades_dir(config: &dyn ConfigPort) -> Option<PathBuf> {
    config.get_string("analyzer", "trades_dir").map(PathBuf::from)
}
