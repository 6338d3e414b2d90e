use crate::{
    error::GatewayError,
    handlers::AppState,
    models::{MatchAnswer, TransactionsQuery},
    services::confirm_payment,
};
use axum::{extract::State, Json};

/// Did the described TRC20 payment land in the recipient's wallet?
pub async fn tron_transactions(
    State(state): State<AppState>,
    Json(query): Json<TransactionsQuery>,
) -> Result<Json<MatchAnswer>, GatewayError> {
    let answer = confirm_payment(state.trongrid.as_ref(), &query).await?;
    tracing::debug!(
        to_wallet = %query.to_wallet,
        matched = answer.answer,
        "Tron payment lookup"
    );
    Ok(Json(answer))
}

/// Same lookup against the Ethereum account history.
pub async fn erc20_transactions(
    State(state): State<AppState>,
    Json(query): Json<TransactionsQuery>,
) -> Result<Json<MatchAnswer>, GatewayError> {
    let answer = confirm_payment(state.etherscan.as_ref(), &query).await?;
    tracing::debug!(
        to_wallet = %query.to_wallet,
        matched = answer.answer,
        "Ethereum payment lookup"
    );
    Ok(Json(answer))
}
