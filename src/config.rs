use anyhow::{Context, Result};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,

    // Upstream credentials (opaque, presence-checked only)
    pub etherscan_api_key: String,
    pub tronscan_api_key: String,
    pub tether_api_key: String,
    pub tether_api_secret: String,

    // The operator's own receiving wallet
    pub wallet_address: String,

    // Upstream base URLs (overridable for staging/tests)
    pub trongrid_api_url: String,
    pub etherscan_api_url: String,
    pub tronscan_api_url: String,
    pub tether_api_url: String,

    // Deadline for every outbound upstream call
    pub upstream_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let timeout_secs: u64 = std::env::var("UPSTREAM_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .context("Invalid UPSTREAM_TIMEOUT_SECS")?;

        Ok(Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("Invalid PORT")?,

            etherscan_api_key: std::env::var("ETHERSCAN_API_KEY")
                .context("ETHERSCAN_API_KEY required")?,
            tronscan_api_key: std::env::var("TRONSCAN_API_KEY")
                .context("TRONSCAN_API_KEY required")?,
            tether_api_key: std::env::var("TETHER_API_KEY")
                .context("TETHER_API_KEY required")?,
            tether_api_secret: std::env::var("TETHER_API_SECRET")
                .context("TETHER_API_SECRET required")?,

            wallet_address: std::env::var("WALLET_ADDRESS")
                .context("WALLET_ADDRESS required")?,

            trongrid_api_url: std::env::var("TRONGRID_API_URL")
                .unwrap_or_else(|_| "https://api.trongrid.io/v1".to_string()),
            etherscan_api_url: std::env::var("ETHERSCAN_API_URL")
                .unwrap_or_else(|_| "https://api.etherscan.io/api".to_string()),
            tronscan_api_url: std::env::var("TRONSCAN_API_URL")
                .unwrap_or_else(|_| "https://apilist.tronscan.org/api".to_string()),
            tether_api_url: std::env::var("TETHER_API_URL")
                .unwrap_or_else(|_| "https://app.tether.to/api/v1".to_string()),

            upstream_timeout: Duration::from_secs(timeout_secs),
        })
    }
}
