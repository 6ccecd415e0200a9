//! Error types for the deed API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use deed_engine::MalformedInputError;
use deed_extract::ExtractionError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Malformed deed fields: {0}")]
    MalformedInput(#[from] MalformedInputError),

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::MalformedInput(e) => (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
            ApiError::Extraction(e) => {
                tracing::warn!("Extraction error: {}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    format!("Could not extract deed fields: {}", e),
                )
            }
            ApiError::Internal(e) => {
                tracing::error!("Internal error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}
