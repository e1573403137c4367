//! Gateway configuration.
//!
//! Every setting can be passed as a flag or through the environment. Flags
//! win over environment variables, which win over the defaults.

use crate::domain::validation::SupportedCurrencies;
use crate::error::{PaymentError, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Card payment gateway", long_about = None)]
pub struct GatewayConfig {
    /// Address the HTTP API listens on
    #[arg(long, env = "PAYMENT_GATEWAY_LISTEN", default_value = "0.0.0.0:8090")]
    pub listen: SocketAddr,

    /// Base URL of the acquiring bank
    #[arg(long, env = "BANK_URL", default_value = "http://localhost:8081")]
    pub bank_url: Url,

    /// Timeout for a single authorization call, in seconds
    #[arg(long, env = "BANK_TIMEOUT_SECS", default_value_t = 10)]
    pub bank_timeout_secs: u64,

    /// Deadline for processing one payment request, in seconds
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    pub request_timeout_secs: u64,

    /// Accepted currency codes
    #[arg(
        long,
        env = "SUPPORTED_CURRENCIES",
        value_delimiter = ',',
        default_value = "USD,GBP,EUR"
    )]
    pub currencies: Vec<String>,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long, env = "PAYMENT_GATEWAY_DB_PATH")]
    pub db_path: Option<PathBuf>,
}

impl GatewayConfig {
    pub fn bank_timeout(&self) -> Duration {
        Duration::from_secs(self.bank_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// The currency allow-list for the validator. An empty list is rejected.
    pub fn supported_currencies(&self) -> Result<SupportedCurrencies> {
        let currencies = SupportedCurrencies::new(&self.currencies);
        if currencies.is_empty() {
            return Err(PaymentError::Config(
                "at least one supported currency is required".to_string(),
            ));
        }
        Ok(currencies)
    }
}
