use crate::{error::GatewayError, models::QrCodeQuery, services::render_wallet_qr};
use axum::{
    http::header,
    response::{IntoResponse, Response},
    Json,
};

pub async fn qr_code(Json(query): Json<QrCodeQuery>) -> Result<Response, GatewayError> {
    let png = render_wallet_qr(&query.wallet)?;
    Ok(([(header::CONTENT_TYPE, "image/png")], png).into_response())
}
