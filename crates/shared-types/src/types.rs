use crate::amount::Amount;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Wire names of the fields produced by the extraction step
pub mod field {
    pub const DOC_NUMBER: &str = "doc_number";
    pub const COUNTY: &str = "county";
    pub const STATE: &str = "state";
    pub const DATE_SIGNED: &str = "date_signed";
    pub const DATE_RECORDED: &str = "date_recorded";
    pub const GRANTOR: &str = "grantor";
    pub const GRANTEE: &str = "grantee";
    pub const AMOUNT_NUMERIC: &str = "amount_numeric";
    pub const AMOUNT_WRITTEN: &str = "amount_written";
    pub const APN: &str = "apn";
    pub const STATUS: &str = "status";

    /// Fields every validation needs; absence is a structural error
    pub const REQUIRED: &[&str] = &[
        DOC_NUMBER,
        COUNTY,
        DATE_SIGNED,
        DATE_RECORDED,
        AMOUNT_NUMERIC,
        AMOUNT_WRITTEN,
    ];

    // Derived fields added to the enriched snapshot
    pub const COUNTY_NORMALIZED: &str = "county_normalized";
    pub const TAX_RATE: &str = "tax_rate";
    pub const AMOUNT_NUMERIC_PARSED: &str = "amount_numeric_parsed";
    pub const AMOUNT_WRITTEN_PARSED: &str = "amount_written_parsed";
    pub const CLOSING_COSTS: &str = "closing_costs";
}

/// Raw field mapping handed over by the extraction step
///
/// Values are whatever the extractor produced (normally strings, sometimes
/// numbers). Nothing here is trusted until the engine has checked it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtractedFields(BTreeMap<String, Value>);

impl ExtractedFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.get(name).is_some_and(|v| !v.is_null())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<BTreeMap<String, Value>> for ExtractedFields {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Self(map)
    }
}

impl FromIterator<(String, Value)> for ExtractedFields {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// Recorded before signed
    DateLogic,
    /// Numeric and written amounts disagree beyond tolerance
    AmountMismatch,
    /// Jurisdiction could not be resolved, or resolved ambiguously
    NameNotFound,
    /// An amount field is not a well-formed quantity
    NumberParse,
    /// A date field matches none of the accepted formats
    DateParse,
}

impl ViolationKind {
    /// Headline used when the violation is rendered as a single line
    pub fn headline(&self) -> &'static str {
        match self {
            ViolationKind::DateLogic => "IMPOSSIBLE DATE SEQUENCE",
            ViolationKind::AmountMismatch => "AMOUNT MISMATCH",
            ViolationKind::NameNotFound => "COUNTY NOT FOUND",
            ViolationKind::NumberParse => "UNREADABLE AMOUNT",
            ViolationKind::DateParse => "UNREADABLE DATE",
        }
    }
}

/// Offending values attached to a violation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Evidence {
    Dates {
        signed: String,
        recorded: String,
    },
    Amounts {
        numeric: Amount,
        written: Amount,
        written_text: String,
        discrepancy: Amount,
        /// `None` when the numeric amount is zero
        relative_discrepancy: Option<f64>,
    },
    Jurisdiction {
        attempted: String,
        available: Vec<String>,
        /// Counties the input matched more than once; empty for a plain miss
        #[serde(default)]
        ambiguous: Vec<String>,
    },
    Unparseable {
        field: String,
        text: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    pub kind: ViolationKind,
    pub message: String,
    pub evidence: Evidence,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind.headline(), self.message)
    }
}

/// Extracted fields plus everything the engine derived from them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnrichedDeed {
    pub fields: ExtractedFields,
    pub county_normalized: Option<String>,
    pub tax_rate: Option<f64>,
    pub amount_numeric_parsed: Option<Amount>,
    pub amount_written_parsed: Option<Amount>,
    pub closing_costs: Option<Amount>,
}

impl EnrichedDeed {
    pub fn new(fields: ExtractedFields) -> Self {
        Self {
            fields,
            ..Self::default()
        }
    }

    /// Raw and derived values in one flat mapping
    ///
    /// Derived keys are always present (null when they could not be computed).
    pub fn to_flat_map(&self) -> BTreeMap<String, Value> {
        let mut map: BTreeMap<String, Value> = self
            .fields
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        let amount = |a: Option<Amount>| a.map_or(Value::Null, |a| a.to_decimal_string().into());

        map.insert(
            field::COUNTY_NORMALIZED.to_string(),
            self.county_normalized
                .clone()
                .map_or(Value::Null, Value::from),
        );
        map.insert(
            field::TAX_RATE.to_string(),
            self.tax_rate.map_or(Value::Null, Value::from),
        );
        map.insert(
            field::AMOUNT_NUMERIC_PARSED.to_string(),
            amount(self.amount_numeric_parsed),
        );
        map.insert(
            field::AMOUNT_WRITTEN_PARSED.to_string(),
            amount(self.amount_written_parsed),
        );
        map.insert(field::CLOSING_COSTS.to_string(), amount(self.closing_costs));
        map
    }
}

/// Outcome of validating one extracted document
///
/// `is_valid` is derived from the violation list at construction and the
/// value cannot be modified afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    is_valid: bool,
    violations: Vec<Violation>,
    enriched_data: EnrichedDeed,
}

impl ValidationResult {
    pub fn new(violations: Vec<Violation>, enriched_data: EnrichedDeed) -> Self {
        Self {
            is_valid: violations.is_empty(),
            violations,
            enriched_data,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Violations in rule evaluation order
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn enriched_data(&self) -> &EnrichedDeed {
        &self.enriched_data
    }

    pub fn errors(&self) -> Vec<String> {
        self.violations.iter().map(ToString::to_string).collect()
    }

    pub fn to_report(&self) -> ValidationReport {
        ValidationReport {
            valid: self.is_valid,
            errors: self.errors(),
            violations: self.violations.clone(),
            data: self.enriched_data.to_flat_map(),
        }
    }
}

/// Transport form of [`ValidationResult`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
    pub violations: Vec<Violation>,
    pub data: BTreeMap<String, Value>,
}
