use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct QrCodeQuery {
    pub wallet: String,
}
