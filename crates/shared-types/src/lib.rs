pub mod amount;
pub mod types;

pub use amount::{Amount, AmountParseError};
pub use types::{
    field, EnrichedDeed, Evidence, ExtractedFields, ValidationReport, ValidationResult, Violation,
    ViolationKind,
};
