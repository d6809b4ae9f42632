// Due-date validation and display formatting

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};

/// Parse a user-supplied due date.
///
/// Accepts only the exact `YYYY-MM-DD` form, and only when it names a real
/// calendar date. Returns the date normalized to midnight UTC, matching the
/// stored timestamp format. `None` means the input is invalid.
pub fn parse_due_date(input: &str) -> Option<DateTime<Utc>> {
    if !matches_date_pattern(input) {
        return None;
    }

    let date = NaiveDate::parse_from_str(input, "%Y-%m-%d").ok()?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc())
}

/// Exact `\d{4}-\d{2}-\d{2}` shape check. Chrono's parser is laxer than the
/// accepted input format (it takes single-digit months), so shape is checked
/// separately.
fn matches_date_pattern(input: &str) -> bool {
    let bytes = input.as_bytes();
    bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit())
}

/// Render a stored due date as `DD/MM/YYYY` using the local timezone's
/// calendar fields. Midnight UTC can therefore display as the previous day in
/// timezones west of UTC; this matches the behavior users already rely on.
pub fn format_due_date(due: &DateTime<Utc>) -> String {
    format_in(due, &Local)
}

fn format_in<Tz: TimeZone>(due: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    due.with_timezone(tz).format("%d/%m/%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn test_parse_valid_date() {
        let due = parse_due_date("2024-03-15").unwrap();
        assert_eq!(due, Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_leap_day() {
        assert!(parse_due_date("2024-02-29").is_some());
        assert!(parse_due_date("2023-02-29").is_none());
    }

    #[test]
    fn test_parse_rejects_wrong_shape() {
        assert!(parse_due_date("").is_none());
        assert!(parse_due_date("not-a-date").is_none());
        assert!(parse_due_date("2024-3-5").is_none());
        assert!(parse_due_date("15-03-2024").is_none());
        assert!(parse_due_date("2024/03/15").is_none());
        assert!(parse_due_date("2024-03-15T00:00:00Z").is_none());
    }

    #[test]
    fn test_parse_rejects_impossible_dates() {
        assert!(parse_due_date("2024-02-30").is_none());
        assert!(parse_due_date("2024-13-01").is_none());
        assert!(parse_due_date("2024-00-10").is_none());
    }

    #[test]
    fn test_format_in_utc() {
        let due = parse_due_date("2024-03-15").unwrap();
        assert_eq!(format_in(&due, &Utc), "15/03/2024");
    }

    #[test]
    fn test_format_shifts_day_west_of_utc() {
        // Midnight UTC is still the previous evening one hour west
        let due = parse_due_date("2024-03-15").unwrap();
        let west = FixedOffset::west_opt(3600).unwrap();
        assert_eq!(format_in(&due, &west), "14/03/2024");
    }

    #[test]
    fn test_format_pads_single_digits() {
        let due = parse_due_date("2024-01-05").unwrap();
        assert_eq!(format_in(&due, &Utc), "05/01/2024");
    }
}
