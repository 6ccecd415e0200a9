//! Request and response bodies for the deed API

use deed_engine::County;
use serde::{Deserialize, Serialize};
use shared_types::ExtractedFields;

/// Body of `POST /validate`
///
/// Exactly one of the two inputs must be given: raw OCR text to extract and
/// validate, or a field mapping that was already extracted elsewhere.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidateRequest {
    #[serde(default)]
    pub ocr_text: Option<String>,
    #[serde(default)]
    pub fields: Option<ExtractedFields>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountiesResponse {
    pub counties: Vec<County>,
}
