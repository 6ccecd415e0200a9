// Numeric amount parsing ("$1,250,000.00" and friends)
use crate::error::NumberParseError;
use lazy_static::lazy_static;
use regex::Regex;
use shared_types::Amount;

lazy_static! {
    /// Currency markers and separators that carry no value
    static ref CURRENCY_NOISE: Regex = Regex::new(r"(?i)usd|[$,\s]").unwrap();
}

/// Parses a figure-form amount exactly, to the cent
///
/// Currency symbols, a `USD` marker, thousands separators and whitespace are
/// stripped; what remains must be digits with at most two decimal places.
pub fn parse_numeric_amount(text: &str) -> Result<Amount, NumberParseError> {
    let cleaned = CURRENCY_NOISE.replace_all(text, "");
    cleaned
        .parse::<Amount>()
        .map_err(|source| NumberParseError::Numeric {
            text: text.to_string(),
            source,
        })
}
