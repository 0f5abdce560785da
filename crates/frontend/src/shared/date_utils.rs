/// Utilities for date parsing and formatting
///
/// Picker values are normalized to `NaiveDate` before they reach the
/// network layer; the wire format is produced only here.
use chrono::NaiveDate;

/// Formats the date picker is known to emit
const PICKER_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Parse a raw date picker value.
///
/// Blank input clears the date. Accepts `yyyy-MM-dd`, `yyyy/MM/dd` and ISO
/// datetimes (time part ignored).
pub fn parse_picker_date(raw: &str) -> Result<Option<NaiveDate>, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let date_part = trimmed
        .split(['T', ' '])
        .next()
        .unwrap_or(trimmed);

    PICKER_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(date_part, fmt).ok())
        .map(Some)
        .ok_or_else(|| format!("Invalid date: {}", raw))
}

/// Midnight timestamp expected by the compute and report endpoints,
/// percent-encoded: `2024-09-30%2000%3A00%3A00`
pub fn api_datetime_param(date: NaiveDate) -> String {
    let stamp = format!("{} 00:00:00", date.format("%Y-%m-%d"));
    urlencoding::encode(&stamp).into_owned()
}

/// Format date to DD.MM.YYYY for display
/// Example: 2024-03-15 -> "15.03.2024"
pub fn format_display_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

/// Format an inclusive range for widget titles
pub fn format_range(start: NaiveDate, end: NaiveDate) -> String {
    format!("{} – {}", format_display_date(start), format_display_date(end))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_picker_date() {
        assert_eq!(parse_picker_date("2024-03-15"), Ok(Some(date(2024, 3, 15))));
        assert_eq!(parse_picker_date("2024/03/15"), Ok(Some(date(2024, 3, 15))));
        assert_eq!(
            parse_picker_date("2024-03-15T14:02:26.123Z"),
            Ok(Some(date(2024, 3, 15)))
        );
        assert_eq!(parse_picker_date("  "), Ok(None));
    }

    #[test]
    fn test_invalid_format() {
        assert!(parse_picker_date("15.03.2024").is_err());
        assert!(parse_picker_date("2024-02-30").is_err());
    }

    #[test]
    fn test_api_datetime_param() {
        assert_eq!(
            api_datetime_param(date(2024, 9, 30)),
            "2024-09-30%2000%3A00%3A00"
        );
    }

    #[test]
    fn test_format_display_date() {
        assert_eq!(format_display_date(date(2024, 3, 15)), "15.03.2024");
        assert_eq!(
            format_range(date(2024, 3, 1), date(2024, 3, 31)),
            "01.03.2024 – 31.03.2024"
        );
    }
}
