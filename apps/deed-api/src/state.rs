//! Application state for the deed API

use anyhow::{Context, Result};
use deed_engine::{DeedValidator, ReferenceData, ValidationConfig};
use deed_extract::{build_extractor, Extractor, ExtractorKind};
use std::sync::Arc;
use tracing::info;

pub struct AppState {
    pub validator: DeedValidator,
    pub extractor: Arc<dyn Extractor>,
}

impl AppState {
    pub fn new(validator: DeedValidator, extractor: Arc<dyn Extractor>) -> Self {
        Self {
            validator,
            extractor,
        }
    }

    /// Build the state from `DEED_REFERENCE_PATH`, `DEED_AMOUNT_TOLERANCE`
    /// and `DEED_EXTRACTOR`
    pub fn from_env() -> Result<Self> {
        let reference = match std::env::var("DEED_REFERENCE_PATH") {
            Ok(path) => {
                info!("Loading county reference table from {}", path);
                let json = std::fs::read_to_string(&path)
                    .with_context(|| format!("reading reference table {path}"))?;
                ReferenceData::from_json_str(&json)
                    .with_context(|| format!("loading reference table {path}"))?
            }
            Err(_) => ReferenceData::bundled()?,
        };
        info!("{} counties loaded", reference.counties().len());

        let mut config = ValidationConfig::new(Arc::new(reference));
        if let Ok(raw) = std::env::var("DEED_AMOUNT_TOLERANCE") {
            let tolerance: f64 = raw
                .trim()
                .parse()
                .with_context(|| format!("DEED_AMOUNT_TOLERANCE is not a number: {raw}"))?;
            config = config.with_tolerance(tolerance)?;
        }

        let kind = match std::env::var("DEED_EXTRACTOR") {
            Ok(raw) => raw.parse::<ExtractorKind>()?,
            Err(_) => ExtractorKind::default(),
        };
        let extractor = build_extractor(kind)?;
        info!(
            "Using {} extractor, amount tolerance {}",
            extractor.name(),
            config.tolerance()
        );

        Ok(Self::new(DeedValidator::new(config), extractor))
    }
}
