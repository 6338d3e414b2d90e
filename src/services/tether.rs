use crate::error::GatewayError;
use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::Utc;
use hmac::{Hmac, Mac};
use md5::Md5;
use serde_json::Value;
use sha1::{Digest, Sha1};

type HmacSha1 = Hmac<Sha1>;

const UPSTREAM: &str = "Tether API";

/// Issuer account API client. Every request carries an APIAuth signature
/// over `VERB,Content-Type,Content-MD5,URL-path,Date`; non-success
/// responses are handed back to the caller verbatim rather than mapped
/// into the upstream taxonomy.
pub struct TetherClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    api_secret: String,
}

impl TetherClient {
    pub fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }

    pub async fn balances(&self) -> Result<Value, GatewayError> {
        self.get("/balances.json").await
    }

    pub async fn transactions(&self) -> Result<Value, GatewayError> {
        self.get("/transactions.json").await
    }

    pub async fn transactions_page(&self, page: u32) -> Result<Value, GatewayError> {
        self.get(&format!("/transactions/page/{page}.json")).await
    }

    pub async fn transaction(&self, transaction_id: u64) -> Result<Value, GatewayError> {
        self.get(&format!("/transactions/{transaction_id}.json"))
            .await
    }

    async fn get(&self, uri: &str) -> Result<Value, GatewayError> {
        let url = format!("{}{}", self.base_url, uri);
        let path = reqwest::Url::parse(&url)
            .map_err(|_| GatewayError::UpstreamOther { upstream: UPSTREAM })?
            .path()
            .to_string();

        // GET carries no body, so Content-MD5 is the digest of the empty
        // string
        let content_md5 = md5_base64_digest(b"");
        let date = Utc::now().format("%a, %d %b %Y %H:%M:%S GMT").to_string();

        let canonical =
            ["GET", "application/json", &content_md5, &path, &date].join(",");
        let signature = sign_canonical(&canonical, &self.api_secret);

        let response = self
            .client
            .get(&url)
            .header("Content-MD5", content_md5)
            .header("Date", date)
            .header("Content-Type", "application/json")
            .header(
                "Authorization",
                format!("APIAuth {}:{}", self.api_key, signature),
            )
            .send()
            .await
            .map_err(|e| GatewayError::from_upstream(UPSTREAM, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Issuer {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| GatewayError::from_upstream(UPSTREAM, e))
    }
}

pub fn md5_base64_digest(body: &[u8]) -> String {
    STANDARD.encode(Md5::digest(body))
}

pub fn sign_canonical(canonical: &str, api_secret: &str) -> String {
    // HMAC accepts keys of any length, so this cannot fail
    let mut mac = HmacSha1::new_from_slice(api_secret.as_bytes())
        .expect("HMAC key of any length is valid");
    mac.update(canonical.as_bytes());
    STANDARD.encode(mac.finalize().into_bytes())
}
