use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use types::errors::ExchangeError;

/// Central error type for the Gateway application
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unknown user: {0}")]
    UnknownUser(String),

    #[error("Insufficient liquidity: {0}")]
    InsufficientLiquidity(String),
}

impl From<ExchangeError> for AppError {
    fn from(err: ExchangeError) -> Self {
        match err {
            ExchangeError::InvalidParameters(msg) => AppError::BadRequest(msg),
            ExchangeError::UnknownUser { user_id } => AppError::UnknownUser(user_id),
            ExchangeError::InsufficientLiquidity { .. } => AppError::InsufficientLiquidity(err.to_string()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // All variants are client errors
        let (error_message, code) = match self {
            AppError::BadRequest(msg) => (msg, "BAD_REQUEST"),
            AppError::UnknownUser(user_id) => (format!("Unknown user: {}", user_id), "UNKNOWN_USER"),
            AppError::InsufficientLiquidity(msg) => (msg, "INSUFFICIENT_LIQUIDITY"),
        };

        tracing::debug!(code, message = %error_message, "Request rejected");

        let body = Json(json!({
            "error": code,
            "message": error_message
        }));

        (StatusCode::BAD_REQUEST, body).into_response()
    }
}
