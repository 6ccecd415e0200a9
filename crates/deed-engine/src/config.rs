use crate::error::ConfigError;
use crate::reference::ReferenceData;
use std::sync::Arc;

/// Per-validator settings: amount tolerance and the county reference table
#[derive(Debug, Clone)]
pub struct ValidationConfig {
    tolerance: f64,
    reference: Arc<ReferenceData>,
}

impl ValidationConfig {
    /// Exact amount matching against the given reference table
    pub fn new(reference: Arc<ReferenceData>) -> Self {
        Self {
            tolerance: 0.0,
            reference,
        }
    }

    /// Relative tolerance for the amount agreement rule
    pub fn with_tolerance(mut self, tolerance: f64) -> Result<Self, ConfigError> {
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(ConfigError::InvalidTolerance(tolerance));
        }
        self.tolerance = tolerance;
        Ok(self)
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    pub fn shared_reference(&self) -> Arc<ReferenceData> {
        Arc::clone(&self.reference)
    }
}
