//! Error taxonomy for the validation engine
//!
//! Rule-level failures ([`RuleFailure`]) are always converted into
//! [`Violation`] records by the orchestrator. Only [`MalformedInputError`]
//! escapes a validation call.

use shared_types::{Amount, AmountParseError, Evidence, Violation, ViolationKind};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumberParseError {
    #[error("no number words found in '{0}'")]
    NoNumberWords(String),

    #[error("unrecognized word '{word}' in '{text}'")]
    UnknownWord { word: String, text: String },

    #[error("'{word}' cannot follow the preceding words in '{text}'")]
    Structure { word: String, text: String },

    #[error("scale word '{word}' repeats or reverses magnitude in '{text}'")]
    ScaleOrder { word: String, text: String },

    #[error("invalid cents in '{0}'")]
    InvalidCents(String),

    #[error("amount '{0}' is too large")]
    Overflow(String),

    #[error("'{text}' is not a numeric amount ({source})")]
    Numeric {
        text: String,
        #[source]
        source: AmountParseError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{text}' is not a recognized date (expected YYYY-MM-DD, MM/DD/YYYY or 'Month DD, YYYY')")]
pub struct DateParseError {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct NameNotFoundError {
    pub attempted: String,
    pub available: Vec<String>,
    /// Canonical names the input matched more than once; empty when nothing matched
    pub ambiguous: Vec<String>,
}

impl std::fmt::Display for NameNotFoundError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.ambiguous.is_empty() {
            write!(
                f,
                "'{}' could not be matched to any known county.",
                self.attempted
            )?;
        } else {
            write!(
                f,
                "'{}' is ambiguous between {}.",
                self.attempted,
                self.ambiguous.join(", ")
            )?;
        }
        write!(f, " Available counties: {}", self.available.join(", "))
    }
}

#[derive(Debug, Error)]
pub enum ReferenceDataError {
    #[error("invalid reference data JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("reference data contains no counties")]
    Empty,

    #[error("county at position {0} has a blank name")]
    BlankName(usize),

    #[error("county '{name}' has invalid tax rate {rate}")]
    InvalidRate { name: String, rate: f64 },

    #[error("county '{0}' is listed more than once")]
    Duplicate(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("amount tolerance must be a finite number >= 0 (got {0})")]
    InvalidTolerance(f64),
}

/// Structural problem with the extracted field set; fatal for the call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedInputError {
    #[error("required field '{0}' is missing")]
    MissingField(String),

    #[error("field '{field}' must be a string or number, found {found}")]
    UnsupportedValue { field: String, found: &'static str },
}

/// A single rule's failure, before it becomes a [`Violation`]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuleFailure {
    #[error("Document was recorded ({recorded}) BEFORE it was signed ({signed}). A deed cannot be recorded before it exists!")]
    DateLogic { signed: String, recorded: String },

    #[error("Numeric amount {numeric} does not match written amount '{written_text}' (parsed as {written}). Discrepancy: {discrepancy}")]
    AmountDiscrepancy {
        numeric: Amount,
        written: Amount,
        written_text: String,
        discrepancy: Amount,
        relative_discrepancy: Option<f64>,
    },

    #[error(transparent)]
    NameNotFound(#[from] NameNotFoundError),

    #[error("{field} is not a well-formed quantity: {source}")]
    NumberParse {
        field: &'static str,
        text: String,
        #[source]
        source: NumberParseError,
    },

    #[error("{field} {source}")]
    DateParse {
        field: &'static str,
        text: String,
        #[source]
        source: DateParseError,
    },
}

impl RuleFailure {
    pub fn kind(&self) -> ViolationKind {
        match self {
            RuleFailure::DateLogic { .. } => ViolationKind::DateLogic,
            RuleFailure::AmountDiscrepancy { .. } => ViolationKind::AmountMismatch,
            RuleFailure::NameNotFound(_) => ViolationKind::NameNotFound,
            RuleFailure::NumberParse { .. } => ViolationKind::NumberParse,
            RuleFailure::DateParse { .. } => ViolationKind::DateParse,
        }
    }
}

impl From<RuleFailure> for Violation {
    fn from(failure: RuleFailure) -> Self {
        let kind = failure.kind();
        let message = failure.to_string();
        let evidence = match failure {
            RuleFailure::DateLogic { signed, recorded } => Evidence::Dates { signed, recorded },
            RuleFailure::AmountDiscrepancy {
                numeric,
                written,
                written_text,
                discrepancy,
                relative_discrepancy,
            } => Evidence::Amounts {
                numeric,
                written,
                written_text,
                discrepancy,
                relative_discrepancy,
            },
            RuleFailure::NameNotFound(err) => Evidence::Jurisdiction {
                attempted: err.attempted,
                available: err.available,
                ambiguous: err.ambiguous,
            },
            RuleFailure::NumberParse {
                field,
                text,
                source,
            } => Evidence::Unparseable {
                field: field.to_string(),
                text,
                reason: source.to_string(),
            },
            RuleFailure::DateParse {
                field,
                text,
                source,
            } => Evidence::Unparseable {
                field: field.to_string(),
                text,
                reason: source.to_string(),
            },
        };

        Violation {
            kind,
            message,
            evidence,
        }
    }
}
