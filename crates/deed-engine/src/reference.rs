//! County reference table (canonical names and tax rates)
//!
//! Built once by the host and shared read-only between validations. Parsing
//! lives here; reading the file is the host's job.

use crate::error::{NameNotFoundError, ReferenceDataError};
use crate::jurisdiction::{fold, NameNormalizer};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// California county table compiled into the engine
pub const BUNDLED_COUNTIES_JSON: &str = include_str!("../data/counties.json");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct County {
    pub name: String,
    pub tax_rate: f64,
}

#[derive(Debug, Clone)]
pub struct ReferenceData {
    counties: Vec<County>,
    normalizer: NameNormalizer,
}

impl ReferenceData {
    pub fn new(counties: Vec<County>) -> Result<Self, ReferenceDataError> {
        if counties.is_empty() {
            return Err(ReferenceDataError::Empty);
        }

        let mut seen = HashSet::new();
        for (idx, county) in counties.iter().enumerate() {
            if county.name.trim().is_empty() {
                return Err(ReferenceDataError::BlankName(idx));
            }
            if !county.tax_rate.is_finite() || county.tax_rate < 0.0 {
                return Err(ReferenceDataError::InvalidRate {
                    name: county.name.clone(),
                    rate: county.tax_rate,
                });
            }
            if !seen.insert(fold(&county.name)) {
                return Err(ReferenceDataError::Duplicate(county.name.clone()));
            }
        }

        let normalizer = NameNormalizer::new(counties.iter().map(|c| c.name.clone()).collect());
        Ok(Self {
            counties,
            normalizer,
        })
    }

    /// Parse a JSON array of `{"name", "tax_rate"}` objects
    pub fn from_json_str(json: &str) -> Result<Self, ReferenceDataError> {
        let counties: Vec<County> = serde_json::from_str(json)?;
        Self::new(counties)
    }

    pub fn bundled() -> Result<Self, ReferenceDataError> {
        Self::from_json_str(BUNDLED_COUNTIES_JSON)
    }

    /// Counties in reference order
    pub fn counties(&self) -> &[County] {
        &self.counties
    }

    pub fn names(&self) -> &[String] {
        self.normalizer.canonical_names()
    }

    pub fn normalizer(&self) -> &NameNormalizer {
        &self.normalizer
    }

    /// Resolve raw county text to its reference entry
    pub fn resolve(&self, raw: &str) -> Result<&County, NameNotFoundError> {
        self.normalizer
            .resolve(raw)
            .map(|idx| &self.counties[idx])
    }

    pub fn rate_for(&self, canonical: &str) -> Option<f64> {
        self.counties
            .iter()
            .find(|c| c.name == canonical)
            .map(|c| c.tax_rate)
    }
}
