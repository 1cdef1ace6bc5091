// ==========================================
// Aid Registry - date normalizer
// ==========================================
// Cell value (serial number / date cell / text) → ISO `YYYY-MM-DD`.
// Never fails loudly: `None` means "unparseable", the caller turns it
// into a row-level error.
// ==========================================

use crate::domain::import::CellValue;
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Lower bound of the spreadsheet serial range (exclusive)
pub const SERIAL_MIN: f64 = 1.0;
/// Upper bound of the spreadsheet serial range (exclusive)
pub const SERIAL_MAX: f64 = 100_000.0;

pub const DEFAULT_YEAR_MIN: i32 = 2020;
pub const DEFAULT_YEAR_MAX: i32 = 2030;

/// 1899-12-30: serial 1 lands on 1900-01-01 and the 1900 leap-year bug is kept.
pub fn spreadsheet_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1899, 12, 30).unwrap_or(NaiveDate::MIN)
}

// ==========================================
// DateWindow - accepted years for textual patterns
// ==========================================
// Only the fallback patterns are bounded; ISO text and serials are not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub min_year: i32,
    pub max_year: i32,
}

impl DateWindow {
    pub fn new(min_year: i32, max_year: i32) -> Self {
        Self { min_year, max_year }
    }

    pub fn contains(&self, year: i32) -> bool {
        year >= self.min_year && year <= self.max_year
    }
}

impl Default for DateWindow {
    fn default() -> Self {
        Self::new(DEFAULT_YEAR_MIN, DEFAULT_YEAR_MAX)
    }
}

#[derive(Debug, Clone, Copy)]
enum FieldOrder {
    YearFirst,
    DayFirst,
}

/// Fallback text patterns, tried in order.
/// `YYYY-M-D` and `YYYY/M/D` share one entry.
const TEXT_PATTERNS: &[(&[char], FieldOrder)] = &[
    (&['-', '/'], FieldOrder::YearFirst),
    (&['/', '-'], FieldOrder::DayFirst),
    (&['.'], FieldOrder::DayFirst),
    (&['.'], FieldOrder::YearFirst),
];

// ==========================================
// DateNormalizer
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct DateNormalizer {
    window: DateWindow,
}

impl DateNormalizer {
    pub fn new(window: DateWindow) -> Self {
        Self { window }
    }

    pub fn window(&self) -> DateWindow {
        self.window
    }

    /// Normalize to an ISO date string
    pub fn parse_date(&self, value: &CellValue) -> Option<String> {
        self.parse_naive_date(value)
            .map(|d| d.format("%Y-%m-%d").to_string())
    }

    /// Normalize to a calendar date
    pub fn parse_naive_date(&self, value: &CellValue) -> Option<NaiveDate> {
        match value {
            CellValue::Number(serial) => from_serial(*serial),
            CellValue::Date(dt) => Some(dt.date()),
            CellValue::Text(text) => self.parse_text(text),
            CellValue::Empty | CellValue::Bool(_) => None,
        }
    }

    /// Text input: general parse first, then the fixed patterns.
    pub fn parse_text(&self, text: &str) -> Option<NaiveDate> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        if let Some(date) = parse_general(text) {
            return Some(date);
        }

        TEXT_PATTERNS
            .iter()
            .find_map(|(separators, order)| self.match_pattern(text, separators, *order))
    }

    fn match_pattern(&self, text: &str, separators: &[char], order: FieldOrder) -> Option<NaiveDate> {
        let parts: Vec<&str> = text.split(|c| separators.contains(&c)).collect();
        if parts.len() != 3 || !parts.iter().all(|p| is_digits(p)) {
            return None;
        }

        let (year, month, day) = match order {
            FieldOrder::YearFirst => (parts[0], parts[1], parts[2]),
            FieldOrder::DayFirst => (parts[2], parts[1], parts[0]),
        };
        if year.len() != 4 || month.len() > 2 || day.len() > 2 {
            return None;
        }

        let year: i32 = year.parse().ok()?;
        let month: u32 = month.parse().ok()?;
        let day: u32 = day.parse().ok()?;

        if !self.window.contains(year) || !(1..=12).contains(&month) || !(1..=31).contains(&day) {
            return None;
        }

        // 31/2/2024 passes the range check but is not a calendar date
        NaiveDate::from_ymd_opt(year, month, day)
    }
}

/// Free-function form with the default year window
pub fn parse_date(value: &CellValue) -> Option<String> {
    DateNormalizer::default().parse_date(value)
}

/// Serial day count since 1899-12-30; the time-of-day fraction is dropped.
pub fn from_serial(serial: f64) -> Option<NaiveDate> {
    if !(serial > SERIAL_MIN && serial < SERIAL_MAX) {
        return None;
    }
    spreadsheet_epoch().checked_add_signed(Duration::days(serial.floor() as i64))
}

/// Unambiguous machine formats: ISO date, ISO date-time, RFC 3339.
fn parse_general(text: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        // reject non-padded input here; the pattern pass handles it with the window
        if text.len() == 10 {
            return Some(date);
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.date_naive());
    }
    for fmt in [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, fmt) {
            return Some(dt.date());
        }
    }
    None
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    #[test]
    fn test_iso_round_trip() {
        for d in ["2024-01-31", "2020-02-29", "1995-07-04", "2031-12-01"] {
            assert_eq!(parse_date(&text(d)).as_deref(), Some(d));
        }
    }

    #[test]
    fn test_serial_dates() {
        // 45292 = 2024-01-01 in a spreadsheet application
        assert_eq!(parse_date(&CellValue::Number(45292.0)).as_deref(), Some("2024-01-01"));
        assert_eq!(parse_date(&CellValue::Number(43831.0)).as_deref(), Some("2020-01-01"));
        assert_eq!(parse_date(&CellValue::Number(2.0)).as_deref(), Some("1900-01-01"));
        // time fraction ignored
        assert_eq!(parse_date(&CellValue::Number(45292.75)).as_deref(), Some("2024-01-01"));
    }

    #[test]
    fn test_serial_out_of_range() {
        assert_eq!(parse_date(&CellValue::Number(1.0)), None);
        assert_eq!(parse_date(&CellValue::Number(0.0)), None);
        assert_eq!(parse_date(&CellValue::Number(100_000.0)), None);
    }

    #[test]
    fn test_iso_date_time_without_seconds() {
        assert_eq!(parse_date(&text("2024-01-15 10:30")).as_deref(), Some("2024-01-15"));
        assert_eq!(parse_date(&text("2024-01-15T10:30")).as_deref(), Some("2024-01-15"));
        assert_eq!(parse_date(&text("2024-01-15 10:30:45")).as_deref(), Some("2024-01-15"));
    }

    #[test]
    fn test_serial_leap_day() {
        // 60 is the fictitious 1900-02-29; 61 is 1900-03-01 as displayed
        assert_eq!(parse_date(&CellValue::Number(61.0)).as_deref(), Some("1900-03-01"));
    }

    #[test]
    fn test_text_patterns() {
        assert_eq!(parse_date(&text("2024-3-5")).as_deref(), Some("2024-03-05"));
        assert_eq!(parse_date(&text("5/3/2024")).as_deref(), Some("2024-03-05"));
        assert_eq!(parse_date(&text("5-3-2024")).as_deref(), Some("2024-03-05"));
        assert_eq!(parse_date(&text("2024/3/5")).as_deref(), Some("2024-03-05"));
        assert_eq!(parse_date(&text("05.03.2024")).as_deref(), Some("2024-03-05"));
        assert_eq!(parse_date(&text("2024.03.05")).as_deref(), Some("2024-03-05"));
    }

    #[test]
    fn test_text_pattern_year_window() {
        assert_eq!(parse_date(&text("5/3/2019")), None);
        assert_eq!(parse_date(&text("5/3/2031")), None);

        let wide = DateNormalizer::new(DateWindow::new(1990, 2040));
        assert_eq!(wide.parse_date(&text("5/3/2019")).as_deref(), Some("2019-03-05"));
    }

    #[test]
    fn test_invalid_text() {
        assert_eq!(parse_date(&text("32/13/2024")), None);
        assert_eq!(parse_date(&text("31/2/2024")), None);
        assert_eq!(parse_date(&text("yesterday")), None);
        assert_eq!(parse_date(&text("")), None);
        assert_eq!(parse_date(&CellValue::Empty), None);
    }

    #[test]
    fn test_date_cell() {
        let dt = NaiveDate::from_ymd_opt(2023, 10, 7)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        assert_eq!(parse_date(&CellValue::Date(dt)).as_deref(), Some("2023-10-07"));
    }

    #[test]
    fn test_rfc3339_text() {
        assert_eq!(
            parse_date(&text("2024-02-10T00:00:00Z")).as_deref(),
            Some("2024-02-10")
        );
    }
}
