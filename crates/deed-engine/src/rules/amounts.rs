// Numeric and written amounts must agree
use crate::error::RuleFailure;
use crate::extractors::numeric::parse_numeric_amount;
use crate::extractors::written::WrittenNumberParser;
use shared_types::field;

/// Checks that the figure and the words state the same price
///
/// Fails when `|numeric - written| / numeric` exceeds `tolerance`. With the
/// default tolerance of zero the amounts must match to the cent. A zero
/// numeric amount only matches a zero written amount.
pub fn check_amounts(
    numeric_text: &str,
    written_text: &str,
    tolerance: f64,
) -> Result<(), RuleFailure> {
    let numeric = parse_numeric_amount(numeric_text).map_err(|source| RuleFailure::NumberParse {
        field: field::AMOUNT_NUMERIC,
        text: numeric_text.to_string(),
        source,
    })?;
    let written =
        WrittenNumberParser::parse(written_text).map_err(|source| RuleFailure::NumberParse {
            field: field::AMOUNT_WRITTEN,
            text: written_text.to_string(),
            source,
        })?;

    let relative = numeric.relative_difference(written);
    if relative > tolerance {
        return Err(RuleFailure::AmountDiscrepancy {
            numeric,
            written,
            written_text: written_text.trim().to_string(),
            discrepancy: numeric.abs_diff(written),
            relative_discrepancy: relative.is_finite().then_some(relative),
        });
    }

    Ok(())
}
