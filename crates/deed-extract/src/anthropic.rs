//! Anthropic Messages API extractor
//!
//! The model reads the OCR text and returns the fields as JSON. Its answer is
//! parsed but never trusted: every value still goes through the engine.

use crate::{ExtractionError, Extractor};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared_types::ExtractedFields;
use std::time::Duration;
use tracing::{debug, info};

pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
const API_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 1024;

pub const EXTRACTION_PROMPT: &str = r#"Extract the following fields from this OCR-scanned deed text and return them as a JSON object.

Fields to extract:
- doc_number: The document number/ID
- county: The county name (keep abbreviations as-is, e.g., "S. Clara")
- state: The state abbreviation
- date_signed: The date the document was signed (format: YYYY-MM-DD)
- date_recorded: The date the document was recorded (format: YYYY-MM-DD)
- grantor: The grantor (seller) name
- grantee: The grantee (buyer) name(s)
- amount_numeric: The dollar amount in numeric form (e.g., "$1,250,000.00")
- amount_written: The dollar amount written in words (e.g., "One Million Two Hundred Thousand Dollars")
- apn: The Assessor's Parcel Number
- status: The document status

Return ONLY valid JSON, no markdown, no explanation. Example format:
{"doc_number": "...", "county": "...", ...}

Here is the deed text to parse:

"#;

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

/// Extractor backed by the Anthropic Messages API
pub struct AnthropicExtractor {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl std::fmt::Debug for AnthropicExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnthropicExtractor")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl AnthropicExtractor {
    pub fn new(api_key: impl Into<String>) -> Result<Self, ExtractionError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ExtractionError::NotConfigured(
                "ANTHROPIC_API_KEY is empty".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()?;

        Ok(Self {
            client,
            api_key,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Reads `ANTHROPIC_API_KEY` and, when set, `ANTHROPIC_MODEL`
    pub fn from_env() -> Result<Self, ExtractionError> {
        let api_key = std::env::var("ANTHROPIC_API_KEY").map_err(|_| {
            ExtractionError::NotConfigured("ANTHROPIC_API_KEY is not set".to_string())
        })?;
        let extractor = Self::new(api_key)?;
        Ok(match std::env::var("ANTHROPIC_MODEL") {
            Ok(model) if !model.trim().is_empty() => extractor.with_model(model),
            _ => extractor,
        })
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Point the client at another host, e.g. a proxy
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl Extractor for AnthropicExtractor {
    async fn extract(&self, raw_text: &str) -> Result<ExtractedFields, ExtractionError> {
        let url = format!("{}/v1/messages", self.base_url);
        let request = MessagesRequest {
            model: &self.model,
            max_tokens: MAX_TOKENS,
            messages: vec![Message {
                role: "user",
                content: format!("{EXTRACTION_PROMPT}{raw_text}"),
            }],
        };

        info!(model = %self.model, chars = raw_text.len(), "requesting field extraction");
        let resp = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&request)
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ExtractionError::Service {
                status: status.as_u16(),
                body,
            });
        }

        let reply: MessagesResponse = resp.json().await?;
        let text = reply
            .content
            .into_iter()
            .filter(|block| block.kind == "text")
            .find_map(|block| block.text)
            .ok_or_else(|| ExtractionError::InvalidReply("reply has no text block".to_string()))?;

        let fields = parse_reply(&text)?;
        debug!(fields = fields.len(), "model extraction finished");
        Ok(fields)
    }

    fn name(&self) -> &'static str {
        "anthropic"
    }
}

/// Remove a surrounding Markdown code fence, if there is one
pub fn strip_code_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    if !trimmed.starts_with("```") {
        return trimmed;
    }

    // Drop the opening fence line (and its language tag)
    let body = match trimmed.split_once('\n') {
        Some((_, rest)) => rest,
        None => return "",
    };
    let body = body.trim_end();
    body.strip_suffix("```").unwrap_or(body).trim()
}

/// Parse the model's answer into a field mapping
pub fn parse_reply(reply: &str) -> Result<ExtractedFields, ExtractionError> {
    match serde_json::from_str::<Value>(strip_code_fence(reply))? {
        Value::Object(map) => Ok(map.into_iter().collect()),
        other => Err(ExtractionError::InvalidReply(format!(
            "expected an object, got {}",
            match other {
                Value::Array(_) => "an array",
                Value::String(_) => "a string",
                Value::Number(_) => "a number",
                Value::Bool(_) => "a boolean",
                _ => "null",
            }
        ))),
    }
}
