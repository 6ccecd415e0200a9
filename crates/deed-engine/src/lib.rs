pub mod calendar;
pub mod config;
pub mod error;
pub mod extractors;
pub mod input;
pub mod jurisdiction;
pub mod patterns;
pub mod reference;
pub mod rules;

pub use config::ValidationConfig;
pub use error::{
    ConfigError, DateParseError, MalformedInputError, NameNotFoundError, NumberParseError,
    ReferenceDataError, RuleFailure,
};
pub use extractors::written::WrittenNumberParser;
pub use jurisdiction::{AliasTable, NameNormalizer};
pub use reference::{County, ReferenceData};

use input::RequiredFields;
use shared_types::{EnrichedDeed, ExtractedFields, ValidationResult, Violation};
use tracing::{debug, info};

/// DeedValidator entry point
///
/// Holds the configuration built at startup. Validation itself borrows it
/// immutably, so one validator can serve concurrent calls.
#[derive(Debug, Clone)]
pub struct DeedValidator {
    config: ValidationConfig,
}

impl DeedValidator {
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    pub fn validate(&self, fields: &ExtractedFields) -> Result<ValidationResult, MalformedInputError> {
        validate(fields, &self.config)
    }
}

/// Validate one extracted field set
///
/// Rules run in a fixed order (chronology, amount agreement, jurisdiction),
/// every rule runs, and each failure becomes one [`Violation`]. Only a
/// missing or structurally unusable required field is returned as an error.
pub fn validate(
    fields: &ExtractedFields,
    config: &ValidationConfig,
) -> Result<ValidationResult, MalformedInputError> {
    let input = RequiredFields::read(fields)?;
    let mut violations: Vec<Violation> = Vec::new();
    let mut enriched = EnrichedDeed::new(fields.clone());

    // 1. Chronology
    if let Err(failure) = rules::chronology::check_chronology(&input.date_signed, &input.date_recorded)
    {
        debug!(doc = %input.doc_number, kind = ?failure.kind(), "chronology rule failed");
        violations.push(failure.into());
    }

    // 2. Amount agreement
    enriched.amount_numeric_parsed =
        extractors::numeric::parse_numeric_amount(&input.amount_numeric).ok();
    enriched.amount_written_parsed = WrittenNumberParser::parse(&input.amount_written).ok();
    if let Err(failure) = rules::amounts::check_amounts(
        &input.amount_numeric,
        &input.amount_written,
        config.tolerance(),
    ) {
        debug!(doc = %input.doc_number, kind = ?failure.kind(), "amount rule failed");
        violations.push(failure.into());
    }

    // 3. Jurisdiction
    match rules::jurisdiction::check_jurisdiction(&input.county, config.reference()) {
        Ok(county) => {
            debug!(
                doc = %input.doc_number,
                raw = %input.county,
                county = %county.name,
                "county resolved"
            );
            enriched.county_normalized = Some(county.name.clone());
            enriched.tax_rate = Some(county.tax_rate);
        }
        Err(failure) => {
            debug!(doc = %input.doc_number, raw = %input.county, "county not resolved");
            violations.push(failure.into());
        }
    }

    enriched.closing_costs = enriched
        .amount_numeric_parsed
        .zip(enriched.tax_rate)
        .and_then(|(amount, rate)| amount.scale(rate));

    info!(
        doc = %input.doc_number,
        violations = violations.len(),
        "deed validated"
    );

    Ok(ValidationResult::new(violations, enriched))
}
