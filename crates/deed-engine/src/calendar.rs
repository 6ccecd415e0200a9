use crate::error::DateParseError;
use chrono::NaiveDate;

/// Date layouts seen on recording requests, tried in order
///
/// `MM/DD/YYYY` is tried before `DD/MM/YYYY`, so an ambiguous slash date is
/// read the US way.
pub const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%d/%m/%Y", "%B %d, %Y", "%b %d, %Y"];

/// Parse a calendar date (no time, no timezone)
pub fn parse_date(text: &str) -> Result<NaiveDate, DateParseError> {
    let trimmed = text.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| DateParseError {
            text: text.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_iso_dates() {
        assert_eq!(parse_date("2024-01-15"), Ok(ymd(2024, 1, 15)));
        assert_eq!(parse_date("  2024-01-10 "), Ok(ymd(2024, 1, 10)));
    }

    #[test]
    fn test_us_and_day_first_slash_dates() {
        assert_eq!(parse_date("01/15/2024"), Ok(ymd(2024, 1, 15)));
        // Day 15 cannot be a month, so the day-first layout applies
        assert_eq!(parse_date("15/01/2024"), Ok(ymd(2024, 1, 15)));
        // Ambiguous: read month first
        assert_eq!(parse_date("02/03/2024"), Ok(ymd(2024, 2, 3)));
    }

    #[test]
    fn test_month_name_dates() {
        assert_eq!(parse_date("January 15, 2024"), Ok(ymd(2024, 1, 15)));
        assert_eq!(parse_date("Jan 15, 2024"), Ok(ymd(2024, 1, 15)));
    }

    #[test]
    fn test_rejects_impossible_or_unknown_dates() {
        assert!(parse_date("2024-02-30").is_err());
        assert!(parse_date("sometime in 2024").is_err());
        assert!(parse_date("").is_err());
    }
}
