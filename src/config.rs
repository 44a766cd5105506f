//! Table order configuration

use std::path::PathBuf;

use clap::{Args, Parser};
use decimal_percentage::Percentage;

use crate::{
    checkout::{PartySize, TaxPolicy},
    fixtures::parse_percentage,
};

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "SNAPSEAT_LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Checkout settings.
#[derive(Debug, Args)]
pub struct CheckoutConfig {
    /// Sales tax applied at checkout ("10%" or "0.1")
    #[arg(long, env = "SNAPSEAT_TAX_RATE", default_value = "10%", value_parser = tax_rate)]
    pub tax_rate: Percentage,

    /// Split the bill between this many diners, 1 to 20 (overrides the order fixture)
    #[arg(short, long, env = "SNAPSEAT_DINERS", value_parser = party_size)]
    pub diners: Option<PartySize>,
}

impl CheckoutConfig {
    /// Tax policy for the configured rate.
    pub fn tax_policy(&self) -> TaxPolicy {
        TaxPolicy::new(self.tax_rate)
    }
}

fn tax_rate(s: &str) -> Result<Percentage, String> {
    parse_percentage(s).map_err(|err| err.to_string())
}

fn party_size(s: &str) -> Result<PartySize, String> {
    let people = s.trim().parse::<usize>().map_err(|err| err.to_string())?;

    PartySize::new(people).map_err(|err| err.to_string())
}

/// `SnapSeat` table order configuration
#[derive(Debug, Parser)]
#[command(name = "table-order", about = "Replay a SnapSeat table order", long_about = None)]
pub struct OrderConfig {
    /// Directory holding `menus/` and `orders/` fixtures
    #[arg(long, env = "SNAPSEAT_FIXTURES", default_value = "./fixtures")]
    pub fixtures: PathBuf,

    /// Order fixture to replay
    #[arg(short, long, env = "SNAPSEAT_ORDER", default_value = "dinner-for-two")]
    pub order: String,

    /// Checkout settings.
    #[command(flatten)]
    pub checkout: CheckoutConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}

impl OrderConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}
