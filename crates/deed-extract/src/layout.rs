// Regex reader for the labelled recording-request layout
use crate::{ExtractionError, Extractor};
use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use shared_types::{field, ExtractedFields};
use tracing::debug;

lazy_static! {
    static ref DOC_NUMBER: Regex =
        Regex::new(r"(?im)^\s*doc(?:ument)?(?:\s*(?:no\.?|number|#))?\s*:\s*(\S.*?)\s*$").unwrap();
    // "County: S. Clara | State: CA"
    static ref COUNTY: Regex =
        Regex::new(r"(?im)^\s*county\s*:\s*([^|\r\n]*?)\s*(?:\|\s*state\s*:\s*([^|\r\n]*?)\s*)?$").unwrap();
    static ref STATE: Regex = Regex::new(r"(?im)^\s*state\s*:\s*(\S.*?)\s*$").unwrap();
    static ref DATE_SIGNED: Regex =
        Regex::new(r"(?im)^\s*date\s+signed\s*:\s*(\S.*?)\s*$").unwrap();
    static ref DATE_RECORDED: Regex =
        Regex::new(r"(?im)^\s*date\s+recorded\s*:\s*(\S.*?)\s*$").unwrap();
    static ref GRANTOR: Regex = Regex::new(r"(?im)^\s*grantor\s*:\s*(\S.*?)\s*$").unwrap();
    static ref GRANTEE: Regex = Regex::new(r"(?im)^\s*grantee\s*:\s*(\S.*?)\s*$").unwrap();
    // "Amount: $1,250,000.00 (One Million Two Hundred Thousand Dollars)"
    static ref AMOUNT: Regex =
        Regex::new(r"(?im)^\s*amount\s*:\s*([^(\r\n]*?)\s*(?:\(([^)\r\n]*)\))?\s*$").unwrap();
    static ref APN: Regex = Regex::new(r"(?im)^\s*apn\s*:\s*(\S.*?)\s*$").unwrap();
    static ref STATUS: Regex = Regex::new(r"(?im)^\s*status\s*:\s*(\S.*?)\s*$").unwrap();
}

/// Deterministic extractor for recording-request cover sheets
///
/// Copies each labelled value verbatim, abbreviations and typos included.
/// Labels it cannot find are left out of the mapping.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutExtractor;

impl LayoutExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Synchronous form of [`Extractor::extract`]
    pub fn read(&self, raw_text: &str) -> Result<ExtractedFields, ExtractionError> {
        let mut fields = ExtractedFields::new();

        capture_into(&mut fields, field::DOC_NUMBER, &DOC_NUMBER, raw_text, 1);
        capture_into(&mut fields, field::COUNTY, &COUNTY, raw_text, 1);
        capture_into(&mut fields, field::STATE, &COUNTY, raw_text, 2);
        if !fields.contains(field::STATE) {
            capture_into(&mut fields, field::STATE, &STATE, raw_text, 1);
        }
        capture_into(&mut fields, field::DATE_SIGNED, &DATE_SIGNED, raw_text, 1);
        capture_into(&mut fields, field::DATE_RECORDED, &DATE_RECORDED, raw_text, 1);
        capture_into(&mut fields, field::GRANTOR, &GRANTOR, raw_text, 1);
        capture_into(&mut fields, field::GRANTEE, &GRANTEE, raw_text, 1);
        capture_into(&mut fields, field::AMOUNT_NUMERIC, &AMOUNT, raw_text, 1);
        capture_into(&mut fields, field::AMOUNT_WRITTEN, &AMOUNT, raw_text, 2);
        capture_into(&mut fields, field::APN, &APN, raw_text, 1);
        capture_into(&mut fields, field::STATUS, &STATUS, raw_text, 1);

        if fields.is_empty() {
            return Err(ExtractionError::NothingFound);
        }

        debug!(fields = fields.len(), "layout extraction finished");
        Ok(fields)
    }
}

#[async_trait]
impl Extractor for LayoutExtractor {
    async fn extract(&self, raw_text: &str) -> Result<ExtractedFields, ExtractionError> {
        self.read(raw_text)
    }

    fn name(&self) -> &'static str {
        "layout"
    }
}

/// Insert the first non-empty capture of `group` under `name`
fn capture_into(
    fields: &mut ExtractedFields,
    name: &str,
    pattern: &Regex,
    text: &str,
    group: usize,
) {
    let value = pattern
        .captures_iter(text)
        .filter_map(|caps| caps.get(group))
        .map(|m| m.as_str().trim())
        .find(|v| !v.is_empty());

    if let Some(value) = value {
        fields.insert(name, value);
    }
}
