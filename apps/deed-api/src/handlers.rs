//! HTTP handlers for the deed API

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use shared_types::ValidationReport;
use std::sync::Arc;

use crate::error::ApiError;
use crate::models::*;
use crate::state::AppState;

/// Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: "deed-validator".to_string(),
    })
}

/// Validate a deed given as OCR text or as extracted fields
pub async fn validate(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ValidateRequest>, JsonRejection>,
) -> Result<Json<ValidationReport>, ApiError> {
    let Json(req) = body.map_err(|e| ApiError::InvalidRequest(e.body_text()))?;

    let fields = match (req.ocr_text, req.fields) {
        (Some(_), Some(_)) => {
            return Err(ApiError::InvalidRequest(
                "Send either 'ocr_text' or 'fields', not both".to_string(),
            ))
        }
        (None, Some(fields)) => fields,
        (Some(text), None) if !text.trim().is_empty() => {
            tracing::debug!(
                "Extracting {} chars with the {} extractor",
                text.len(),
                state.extractor.name()
            );
            state.extractor.extract(&text).await?
        }
        _ => {
            return Err(ApiError::InvalidRequest(
                "Missing required field 'ocr_text' in request body".to_string(),
            ))
        }
    };

    let result = state.validator.validate(&fields)?;
    tracing::info!(
        "Validated deed: valid={}, violations={}",
        result.is_valid(),
        result.violations().len()
    );

    Ok(Json(result.to_report()))
}

/// List known counties and their tax rates
pub async fn counties(State(state): State<Arc<AppState>>) -> Json<CountiesResponse> {
    Json(CountiesResponse {
        counties: state.validator.config().reference().counties().to_vec(),
    })
}
