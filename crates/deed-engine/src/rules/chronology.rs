// Recording must not precede signing
use crate::calendar::parse_date;
use crate::error::RuleFailure;
use shared_types::field;

/// Checks that the recording date is on or after the signing date
///
/// Same-day signing and recording is valid. An unreadable date is reported
/// instead of the comparison; if both are unreadable the signing date is
/// reported.
pub fn check_chronology(signed_text: &str, recorded_text: &str) -> Result<(), RuleFailure> {
    let signed = parse_date(signed_text).map_err(|source| RuleFailure::DateParse {
        field: field::DATE_SIGNED,
        text: signed_text.to_string(),
        source,
    })?;
    let recorded = parse_date(recorded_text).map_err(|source| RuleFailure::DateParse {
        field: field::DATE_RECORDED,
        text: recorded_text.to_string(),
        source,
    })?;

    if recorded < signed {
        return Err(RuleFailure::DateLogic {
            signed: signed_text.trim().to_string(),
            recorded: recorded_text.trim().to_string(),
        });
    }

    Ok(())
}
