// County resolution against the reference table
use crate::error::RuleFailure;
use crate::reference::{County, ReferenceData};

/// Resolves the raw county text to a reference entry (canonical name and rate)
pub fn check_jurisdiction<'a>(
    raw: &str,
    reference: &'a ReferenceData,
) -> Result<&'a County, RuleFailure> {
    reference.resolve(raw).map_err(RuleFailure::from)
}
