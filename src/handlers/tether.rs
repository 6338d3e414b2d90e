use crate::{error::GatewayError, handlers::AppState};
use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;

pub async fn tether_balances(State(state): State<AppState>) -> Result<Json<Value>, GatewayError> {
    Ok(Json(state.tether.balances().await?))
}

pub async fn tether_transactions(
    State(state): State<AppState>,
) -> Result<Json<Value>, GatewayError> {
    Ok(Json(state.tether.transactions().await?))
}

pub async fn tether_transactions_page(
    State(state): State<AppState>,
    Path(page): Path<u32>,
) -> Result<Json<Value>, GatewayError> {
    Ok(Json(state.tether.transactions_page(page).await?))
}

pub async fn tether_transaction_by_id(
    State(state): State<AppState>,
    Path(transaction_id): Path<u64>,
) -> Result<Json<Value>, GatewayError> {
    Ok(Json(state.tether.transaction(transaction_id).await?))
}
