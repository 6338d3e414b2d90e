use crate::{
    error::GatewayError,
    models::{CandidateTransaction, TransactionsQuery},
    services::matcher::{LedgerSource, ResolvedWindow},
};
use async_trait::async_trait;
use serde::Deserialize;

const UPSTREAM: &str = "Trongrid API";

/// TRC20 transfer list for an account. The window, limit, and confirmed
/// filter are all applied server-side as query parameters.
pub struct TrongridSource {
    client: reqwest::Client,
    base_url: String,
}

impl TrongridSource {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[derive(Deserialize)]
struct TransferPage {
    #[serde(default)]
    data: Vec<Trc20Transfer>,
}

// Real-world payloads omit fields; every one of these defaults instead of
// failing the request.
#[derive(Deserialize)]
struct Trc20Transfer {
    #[serde(default)]
    transaction_id: String,
    #[serde(default)]
    token_info: TokenInfo,
    #[serde(default = "zero_value")]
    value: String,
    #[serde(default)]
    from: String,
    #[serde(default)]
    to: String,
}

#[derive(Deserialize)]
struct TokenInfo {
    #[serde(default = "trc20_decimals")]
    decimals: u32,
}

impl Default for TokenInfo {
    fn default() -> Self {
        Self {
            decimals: trc20_decimals(),
        }
    }
}

fn zero_value() -> String {
    "0".to_string()
}

fn trc20_decimals() -> u32 {
    6
}

#[async_trait]
impl LedgerSource for TrongridSource {
    async fn fetch_candidates(
        &self,
        query: &TransactionsQuery,
        window: &ResolvedWindow,
    ) -> Result<Vec<CandidateTransaction>, GatewayError> {
        let url = format!(
            "{}/accounts/{}/transactions/trc20",
            self.base_url, query.to_wallet
        );

        let page: TransferPage = self
            .client
            .get(&url)
            .query(&[
                ("only_confirmed", query.only_confirmed.to_string()),
                ("limit", query.limit.to_string()),
                ("min_timestamp", window.start_millis().to_string()),
                ("max_timestamp", window.end_millis().to_string()),
            ])
            .send()
            .await
            .map_err(|e| GatewayError::from_upstream(UPSTREAM, e))?
            .error_for_status()
            .map_err(|e| GatewayError::from_upstream(UPSTREAM, e))?
            .json()
            .await
            .map_err(|e| GatewayError::from_upstream(UPSTREAM, e))?;

        Ok(page
            .data
            .into_iter()
            .map(|t| CandidateTransaction {
                id: t.transaction_id,
                from: t.from,
                to: t.to,
                raw_value: t.value,
                decimals: t.token_info.decimals,
            })
            .collect())
    }
}
