//! Date parsing and duration derivation.
//!
//! The three portals disagree on date formats: NYCHA exports US-style
//! `MM/DD/YYYY`, USAspending and GSA CALC ship ISO `YYYY-MM-DD`. Both are
//! accepted everywhere; anything else is a parse failure handled by the
//! normalizer's fallback path.

use chrono::NaiveDate;

use harmon_model::HarmonError;

const FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%m/%d/%y"];

/// Parse a calendar date, returning `None` for blank or unparseable input.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    // Timestamps like "2024-01-01T00:00:00" reduce to their date part.
    let date_part = trimmed.split(['T', ' ']).next().unwrap_or(trimmed);
    FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(date_part, format).ok())
}

/// Duration between creation and completion in whole days.
///
/// A completion preceding creation is an [`HarmonError::InvalidDateRange`];
/// callers recover by nulling the duration and counting the occurrence.
pub fn duration_days(created: NaiveDate, completed: NaiveDate) -> Result<i64, HarmonError> {
    if completed < created {
        return Err(HarmonError::InvalidDateRange { created, completed });
    }
    Ok((completed - created).num_days())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_iso_and_us_formats() {
        assert_eq!(parse_date("2024-01-03"), Some(date(2024, 1, 3)));
        assert_eq!(parse_date("01/03/2024"), Some(date(2024, 1, 3)));
        assert_eq!(parse_date(" 2024-01-03 "), Some(date(2024, 1, 3)));
    }

    #[test]
    fn strips_time_component() {
        assert_eq!(parse_date("2024-01-03T10:30:00"), Some(date(2024, 1, 3)));
        assert_eq!(parse_date("2024-01-03 10:30:00"), Some(date(2024, 1, 3)));
    }

    #[test]
    fn blank_and_garbage_are_none() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("   "), None);
        assert_eq!(parse_date("not a date"), None);
        assert_eq!(parse_date("2024-13-45"), None);
    }

    #[test]
    fn duration_counts_whole_days() {
        assert_eq!(duration_days(date(2024, 1, 1), date(2024, 1, 3)).unwrap(), 2);
        assert_eq!(duration_days(date(2024, 1, 1), date(2024, 1, 1)).unwrap(), 0);
    }

    #[test]
    fn reversed_range_is_an_error() {
        let error = duration_days(date(2024, 1, 3), date(2024, 1, 1)).unwrap_err();
        assert!(matches!(error, HarmonError::InvalidDateRange { .. }));
    }
}
