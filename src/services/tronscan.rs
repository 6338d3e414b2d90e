use crate::error::GatewayError;
use serde_json::{json, Value};

const UPSTREAM: &str = "Tronscan API";

/// Pass-through reads against the secondary Tron explorer. Every call
/// carries the TRON-PRO-API-KEY header.
pub struct TronscanClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl TronscanClient {
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

    pub async fn balance(&self, wallet_address: &str) -> Result<Value, GatewayError> {
        let url = format!("{}/account", self.base_url);
        let account = self
            .get(self.client.get(&url).query(&[("address", wallet_address)]))
            .await?;

        let balance = account.get("balance").cloned().unwrap_or(json!(0));
        Ok(json!({ "balance": balance }))
    }

    pub async fn transactions(&self, wallet_address: &str) -> Result<Value, GatewayError> {
        let url = format!("{}/transaction", self.base_url);
        let page = self
            .get(self.client.get(&url).query(&[
                ("sort", "-timestamp"),
                ("count", "true"),
                ("limit", "20"),
                ("start", "0"),
                ("address", wallet_address),
            ]))
            .await?;

        let transactions = page.get("data").cloned().unwrap_or(json!([]));
        Ok(json!({ "transactions": transactions }))
    }

    async fn get(&self, request: reqwest::RequestBuilder) -> Result<Value, GatewayError> {
        request
            .header("Accept", "application/json")
            .header("TRON-PRO-API-KEY", &self.api_key)
            .send()
            .await
            .map_err(|e| GatewayError::from_upstream(UPSTREAM, e))?
            .error_for_status()
            .map_err(|e| GatewayError::from_upstream(UPSTREAM, e))?
            .json()
            .await
            .map_err(|e| GatewayError::from_upstream(UPSTREAM, e))
    }
}
