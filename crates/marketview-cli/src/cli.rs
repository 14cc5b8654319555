//! CLI argument definitions for marketview.
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `SYMBOL` | none | Security to show; omitted means "prompt" |
//! | `--market` | none | Exchange qualifier for the price lookup |
//! | `--no-macd` | shown | Hide the MACD chart |
//! | `--no-rsi` | shown | Hide the RSI chart |
//! | `--format` | `table` | Output format (table, json) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--timeout-ms` | `5000` | Per-request timeout in ms |
//!
//! ```bash
//! marketview IBM
//! marketview AAPL --market NASDAQ --no-rsi
//! marketview MSFT --format json --pretty
//! ```

use clap::{ArgAction, Parser, ValueEnum};

use marketview_core::config::DEFAULT_TIMEOUT_MS;
use marketview_core::DisplayOptions;

/// 📈 Market View - price history, MACD/RSI and fundamentals for one security
///
/// The Alpha Vantage key is read from MARKETVIEW_ALPHAVANTAGE_API_KEY
/// (environment or .env file).
#[derive(Debug, Parser)]
#[command(name = "marketview", author, version, about = "Single-security market dashboard")]
pub struct Cli {
    /// Stock symbol, e.g. AAPL, MSFT, IBM.
    pub symbol: Option<String>,

    /// Exchange qualifier appended to the price lookup, e.g. NASDAQ.
    #[arg(long)]
    pub market: Option<String>,

    /// Hide the MACD chart.
    #[arg(long = "no-macd", action = ArgAction::SetFalse)]
    pub show_macd: bool,

    /// Hide the RSI chart.
    #[arg(long = "no-rsi", action = ArgAction::SetFalse)]
    pub show_rsi: bool,

    /// Output format.
    ///
    /// - table: overview table plus a text description of each chart
    /// - json: the whole dashboard as one JSON document
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, default_value_t = false)]
    pub pretty: bool,

    /// Request timeout budget in milliseconds.
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_MS)]
    pub timeout_ms: u64,
}

impl Cli {
    pub fn display_options(&self) -> DisplayOptions {
        DisplayOptions {
            show_macd: self.show_macd,
            show_rsi: self.show_rsi,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable terminal output.
    Table,
    /// Single JSON document for an external renderer.
    Json,
}
