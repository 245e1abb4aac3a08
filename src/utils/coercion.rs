use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Datetime layouts seen in station exports, tried after the plain ISO date
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Date layouts seen in station exports
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d/%m/%Y", "%Y%m%d"];

/// Parse a date from any of the layouts station exports use
///
/// Returns `None` for anything unparseable; a bad value in one record must
/// never abort the batch.
///
/// # Examples
/// ```
/// use aq_stations::utils::parse_date_lenient;
/// use chrono::NaiveDate;
///
/// let date = parse_date_lenient("2012-01-01T00:00:00+01:00");
/// assert_eq!(date, NaiveDate::from_ymd_opt(2012, 1, 1));
/// ```
pub fn parse_date_lenient(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }

    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(datetime.date());
        }
    }

    // Offset-bearing timestamps, e.g. "2012-01-01T00:00:00+01:00"
    if let Ok(datetime) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(datetime.date_naive());
    }

    None
}

/// Parse a floating point value, coercing failures to `None`
///
/// A literal `NaN` token counts as absent, never as a present value.
pub fn parse_float_lenient(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|parsed| !parsed.is_nan())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_iso_date() {
        assert_eq!(
            parse_date_lenient("1998-03-15"),
            NaiveDate::from_ymd_opt(1998, 3, 15)
        );
    }

    #[test]
    fn test_parse_datetime_with_offset() {
        assert_eq!(
            parse_date_lenient("2012-01-01T00:00:00+01:00"),
            NaiveDate::from_ymd_opt(2012, 1, 1)
        );
    }

    #[test]
    fn test_parse_datetime_without_offset() {
        assert_eq!(
            parse_date_lenient("2005-06-30T23:59:00"),
            NaiveDate::from_ymd_opt(2005, 6, 30)
        );
        assert_eq!(
            parse_date_lenient("2005-06-30 23:59:00"),
            NaiveDate::from_ymd_opt(2005, 6, 30)
        );
    }

    #[test]
    fn test_parse_slash_and_compact_dates() {
        assert_eq!(
            parse_date_lenient("15/03/1998"),
            NaiveDate::from_ymd_opt(1998, 3, 15)
        );
        assert_eq!(
            parse_date_lenient("19980315"),
            NaiveDate::from_ymd_opt(1998, 3, 15)
        );
    }

    #[test]
    fn test_parse_date_garbage() {
        assert_eq!(parse_date_lenient("not a date"), None);
        assert_eq!(parse_date_lenient(""), None);
        assert_eq!(parse_date_lenient("   "), None);
        assert_eq!(parse_date_lenient("2012-13-40"), None);
    }

    #[test]
    fn test_parse_float() {
        assert_eq!(parse_float_lenient("48.8566"), Some(48.8566));
        assert_eq!(parse_float_lenient(" -0.5 "), Some(-0.5));
        assert_eq!(parse_float_lenient("12"), Some(12.0));
    }

    #[test]
    fn test_parse_float_garbage() {
        assert_eq!(parse_float_lenient("n/a"), None);
        assert_eq!(parse_float_lenient(""), None);
        assert_eq!(parse_float_lenient("12,5"), None);
    }

    #[test]
    fn test_parse_float_nan_is_absent() {
        assert_eq!(parse_float_lenient("NaN"), None);
        assert_eq!(parse_float_lenient("nan"), None);
        assert_eq!(parse_float_lenient("-NaN"), None);
        assert_eq!(parse_float_lenient("inf"), Some(f64::INFINITY));
    }
}
