use crate::{error::GatewayError, handlers::AppState};
use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;

pub async fn tronscan_balance(
    State(state): State<AppState>,
    Path(wallet_address): Path<String>,
) -> Result<Json<Value>, GatewayError> {
    Ok(Json(state.tronscan.balance(&wallet_address).await?))
}

pub async fn tronscan_transactions(
    State(state): State<AppState>,
    Path(wallet_address): Path<String>,
) -> Result<Json<Value>, GatewayError> {
    Ok(Json(state.tronscan.transactions(&wallet_address).await?))
}
