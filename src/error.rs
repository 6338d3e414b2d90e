use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Amount must be a valid number")]
    InvalidAmount,

    #[error("Invalid date format. Please use 'dd-mm-yyyy HH:MM:SS'")]
    InvalidDateFormat,

    #[error("Invalid wallet address or API error")]
    UpstreamNotFound { upstream: &'static str },

    #[error("Error connecting to {upstream}")]
    UpstreamUnreachable { upstream: &'static str },

    #[error("Timeout while connecting to {upstream}")]
    UpstreamTimeout { upstream: &'static str },

    #[error("An error occurred while connecting to {upstream}")]
    UpstreamOther { upstream: &'static str },

    // Non-success issuer responses are passed through verbatim
    #[error("Issuer API returned {status}")]
    Issuer { status: u16, body: String },

    #[error("QR encoding failed: {0}")]
    QrEncoding(String),
}

impl GatewayError {
    /// Maps a transport-level failure from the single outbound call into
    /// the fixed upstream taxonomy. Never retried, never recovered.
    pub fn from_upstream(upstream: &'static str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GatewayError::UpstreamTimeout { upstream }
        } else if err.is_connect() {
            GatewayError::UpstreamUnreachable { upstream }
        } else if err.status().is_some() {
            GatewayError::UpstreamNotFound { upstream }
        } else {
            GatewayError::UpstreamOther { upstream }
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub error_code: String,
    pub timestamp: chrono::DateTime<Utc>,
    pub request_id: String,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self {
            // Issuer errors carry the upstream status and body untouched
            GatewayError::Issuer { status, body } => {
                let status = StatusCode::from_u16(*status)
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                return (status, body.clone()).into_response();
            }
            GatewayError::InvalidAmount => (StatusCode::BAD_REQUEST, "INVALID_AMOUNT"),
            GatewayError::InvalidDateFormat => (StatusCode::BAD_REQUEST, "INVALID_DATE_FORMAT"),
            GatewayError::UpstreamNotFound { .. } => (StatusCode::NOT_FOUND, "UPSTREAM_NOT_FOUND"),
            GatewayError::UpstreamUnreachable { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "UPSTREAM_UNREACHABLE")
            }
            GatewayError::UpstreamTimeout { .. } => {
                (StatusCode::GATEWAY_TIMEOUT, "UPSTREAM_TIMEOUT")
            }
            GatewayError::UpstreamOther { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "UPSTREAM_ERROR")
            }
            GatewayError::QrEncoding(_) => (StatusCode::INTERNAL_SERVER_ERROR, "QR_ENCODING"),
        };

        let body = ErrorResponse {
            success: false,
            error: self.to_string(),
            error_code: error_code.to_string(),
            timestamp: Utc::now(),
            request_id: Uuid::new_v4().to_string(),
        };

        tracing::error!(
            error = ?self,
            error_code = error_code,
            "Request failed"
        );

        (status, Json(body)).into_response()
    }
}
