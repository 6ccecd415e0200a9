//! Deed field extraction
//!
//! Extraction is the untrusted half of the pipeline: it reads messy OCR text
//! and produces an [`ExtractedFields`] mapping. It never validates anything;
//! the values it copies out are checked later by `deed-engine`.
//!
//! Two extractors ship with the crate:
//! - [`LayoutExtractor`] reads the labelled recording-request layout with
//!   regular expressions and needs no network
//! - [`AnthropicExtractor`] asks the Anthropic Messages API to do the reading

pub mod anthropic;
pub mod layout;

pub use anthropic::AnthropicExtractor;
pub use layout::LayoutExtractor;

use async_trait::async_trait;
use shared_types::ExtractedFields;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("no deed fields could be read from the text")]
    NothingFound,

    #[error("extractor is not configured: {0}")]
    NotConfigured(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("extraction service returned {status}: {body}")]
    Service { status: u16, body: String },

    #[error("extraction reply was not a JSON object: {0}")]
    InvalidReply(String),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Capability to turn raw OCR text into extracted fields
#[async_trait]
pub trait Extractor: Send + Sync {
    async fn extract(&self, raw_text: &str) -> Result<ExtractedFields, ExtractionError>;

    /// Short name used in logs
    fn name(&self) -> &'static str;
}

/// Which extractor a host should construct
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExtractorKind {
    #[default]
    Layout,
    Anthropic,
}

impl fmt::Display for ExtractorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractorKind::Layout => write!(f, "layout"),
            ExtractorKind::Anthropic => write!(f, "anthropic"),
        }
    }
}

impl FromStr for ExtractorKind {
    type Err = ExtractionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "layout" => Ok(ExtractorKind::Layout),
            "anthropic" => Ok(ExtractorKind::Anthropic),
            other => Err(ExtractionError::NotConfigured(format!(
                "unknown extractor '{other}' (expected 'layout' or 'anthropic')"
            ))),
        }
    }
}

/// Build an extractor of the given kind
///
/// The Anthropic extractor reads `ANTHROPIC_API_KEY` and `ANTHROPIC_MODEL`
/// from the environment.
pub fn build_extractor(kind: ExtractorKind) -> Result<Arc<dyn Extractor>, ExtractionError> {
    match kind {
        ExtractorKind::Layout => Ok(Arc::new(LayoutExtractor::new())),
        ExtractorKind::Anthropic => Ok(Arc::new(AnthropicExtractor::from_env()?)),
    }
}
