use crate::{
    error::GatewayError,
    models::{CandidateTransaction, TransactionsQuery},
    services::matcher::{LedgerSource, ResolvedWindow},
};
use async_trait::async_trait;
use serde::Deserialize;

const UPSTREAM: &str = "Etherscan API";

/// Native value transfers normalize from wei at a fixed 18 decimals.
const ETH_DECIMALS: u32 = 18;

/// Full account transaction history, unfiltered. The txlist action takes no
/// window or amount parameters, so the resolved window is accepted but not
/// forwarded; all filtering happens in the matcher's scan.
pub struct EtherscanSource {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl EtherscanSource {
    pub fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }
}

#[derive(Deserialize)]
struct TxListPage {
    #[serde(default)]
    result: Vec<AccountTx>,
}

#[derive(Deserialize)]
struct AccountTx {
    #[serde(default)]
    hash: String,
    #[serde(default)]
    from: String,
    #[serde(default)]
    to: String,
    #[serde(default = "zero_value")]
    value: String,
}

fn zero_value() -> String {
    "0".to_string()
}

#[async_trait]
impl LedgerSource for EtherscanSource {
    async fn fetch_candidates(
        &self,
        query: &TransactionsQuery,
        _window: &ResolvedWindow,
    ) -> Result<Vec<CandidateTransaction>, GatewayError> {
        let page: TxListPage = self
            .client
            .get(&self.base_url)
            .query(&[
                ("module", "account"),
                ("action", "txlist"),
                ("address", query.to_wallet.as_str()),
                ("startblock", "0"),
                ("endblock", "99999999"),
                ("sort", "asc"),
                ("apikey", self.api_key.as_str()),
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
            .result
            .into_iter()
            .map(|t| CandidateTransaction {
                id: t.hash,
                from: t.from,
                to: t.to,
                raw_value: t.value,
                decimals: ETH_DECIMALS,
            })
            .collect())
    }
}
