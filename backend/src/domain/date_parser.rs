//! Indonesian free-text date parsing.
//!
//! Press releases and content rows store their dates as free text typed by
//! editors ("3 Januari 2025", "Senin, 3 Januari 2025", "Januari 3, 2025").
//! Every date-based view goes through [`parse`] so the interpretation lives
//! in one place. Dates are plain calendar dates: no time of day and no
//! timezone, so the literal day number is always preserved.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Month names as written in the source data, January first
pub const MONTH_NAMES: [&str; 12] = [
    "Januari", "Februari", "Maret", "April", "Mei", "Juni",
    "Juli", "Agustus", "September", "Oktober", "November", "Desember",
];

/// Weekday names, Sunday first (matches `num_days_from_sunday`)
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Minggu", "Senin", "Selasa", "Rabu", "Kamis", "Jumat", "Sabtu",
];

/// Calendar coordinates extracted from a free-text date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndonesianDate {
    pub day: u32,
    /// 0 = Januari
    pub month_index: u32,
    pub year: i32,
}

impl IndonesianDate {
    /// Convert to a calendar date. Returns None for days that do not exist
    /// in the month (e.g. 31 Februari).
    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month_index + 1, self.day)
    }

    /// Canonical `YYYY-MM-DD` key, only for dates that exist
    pub fn iso_key(&self) -> Option<String> {
        self.to_naive_date().map(format_iso)
    }

    pub fn is_in_month(&self, year: i32, month_index: u32) -> bool {
        self.year == year && self.month_index == month_index
    }
}

impl From<NaiveDate> for IndonesianDate {
    fn from(date: NaiveDate) -> Self {
        Self {
            day: date.day(),
            month_index: date.month0(),
            year: date.year(),
        }
    }
}

/// Parse a loosely formatted Indonesian date.
///
/// Returns None when the text has no recognizable date. Callers treat None
/// as "leave this item out of date-based views", never as an error.
pub fn parse(raw: &str) -> Option<IndonesianDate> {
    let tokens: Vec<&str> = raw
        .split_whitespace()
        .map(|token| token.trim_end_matches(','))
        .filter(|token| !token.is_empty())
        .collect();

    if tokens.len() >= 3 {
        let leading = &tokens[..3];
        let trailing = &tokens[tokens.len() - 3..];

        // "3 Januari 2025" first, then a weekday or other prefix
        // ("Senin, 3 Januari 2025"), then the "Januari 3, 2025" shape.
        let parsed = parse_day_month_year(leading)
            .or_else(|| parse_day_month_year(trailing))
            .or_else(|| parse_month_day_year(leading))
            .or_else(|| parse_month_day_year(trailing));
        if parsed.is_some() {
            return parsed;
        }
    }

    parse_iso(raw.trim())
}

fn parse_day_month_year(tokens: &[&str]) -> Option<IndonesianDate> {
    let day = parse_day(tokens[0])?;
    let month_index = month_index(tokens[1])?;
    let year = tokens[2].parse::<i32>().ok()?;
    Some(IndonesianDate { day, month_index, year })
}

fn parse_month_day_year(tokens: &[&str]) -> Option<IndonesianDate> {
    let month_index = month_index(tokens[0])?;
    let day = parse_day(tokens[1])?;
    let year = tokens[2].parse::<i32>().ok()?;
    Some(IndonesianDate { day, month_index, year })
}

/// Machine-written dates from form date inputs: `YYYY-MM-DD[T...]`
fn parse_iso(raw: &str) -> Option<IndonesianDate> {
    let date_part = raw.split('T').next()?;
    let parts: Vec<&str> = date_part.split('-').collect();
    if parts.len() != 3 || parts[0].len() != 4 {
        return None;
    }

    let year = parts[0].parse::<i32>().ok()?;
    let month = parts[1].parse::<u32>().ok()?;
    let day = parse_day(parts[2])?;
    if !(1..=12).contains(&month) {
        return None;
    }

    Some(IndonesianDate {
        day,
        month_index: month - 1,
        year,
    })
}

fn parse_day(token: &str) -> Option<u32> {
    token.parse::<u32>().ok().filter(|day| (1..=31).contains(day))
}

/// Case-sensitive lookup of a full Indonesian month name
pub fn month_index(name: &str) -> Option<u32> {
    MONTH_NAMES
        .iter()
        .position(|candidate| *candidate == name)
        .map(|index| index as u32)
}

pub fn month_name(month_index: u32) -> Option<&'static str> {
    MONTH_NAMES.get(month_index as usize).copied()
}

/// "15 Maret 2025"
pub fn format_indonesian(date: NaiveDate) -> String {
    format!("{} {} {}", date.day(), MONTH_NAMES[date.month0() as usize], date.year())
}

/// "Sabtu, 15 Maret 2025"
pub fn format_indonesian_with_weekday(date: NaiveDate) -> String {
    let weekday = WEEKDAY_NAMES[date.weekday().num_days_from_sunday() as usize];
    format!("{}, {}", weekday, format_indonesian(date))
}

pub fn format_iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32, month_index: u32, year: i32) -> Option<IndonesianDate> {
        Some(IndonesianDate { day, month_index, year })
    }

    #[test]
    fn test_parse_every_month_name() {
        for (index, name) in MONTH_NAMES.iter().enumerate() {
            for day in [1, 15, 31] {
                let raw = format!("{} {} 2025", day, name);
                assert_eq!(parse(&raw), date(day, index as u32, 2025), "input: {}", raw);
            }
        }
    }

    #[test]
    fn test_parse_weekday_prefix() {
        assert_eq!(parse("Senin, 3 Januari 2025"), date(3, 0, 2025));
        assert_eq!(parse("Jumat 14 Februari 2025"), date(14, 1, 2025));
    }

    #[test]
    fn test_parse_month_first_shape() {
        assert_eq!(parse("Januari 3, 2025"), date(3, 0, 2025));
        assert_eq!(parse("Kamis, Juli 17, 2025"), date(17, 6, 2025));
    }

    #[test]
    fn test_parse_trailing_text_after_date() {
        assert_eq!(parse("3 Januari 2025 pukul 10.00"), date(3, 0, 2025));
    }

    #[test]
    fn test_parse_iso_fallback() {
        assert_eq!(parse("2025-03-15"), date(15, 2, 2025));
        assert_eq!(parse("2025-03-15T09:00:00+07:00"), date(15, 2, 2025));
        assert_eq!(parse("2025-13-15"), None);
    }

    #[test]
    fn test_parse_malformed_inputs() {
        assert_eq!(parse(""), None);
        assert_eq!(parse("   "), None);
        assert_eq!(parse("15 2025"), None);
        assert_eq!(parse("lima Maret 2025"), None);
        assert_eq!(parse("15 Maret duaribu"), None);
        assert_eq!(parse("15 March 2025"), None);
        assert_eq!(parse("15 Mar 2025"), None);
        assert_eq!(parse("0 Maret 2025"), None);
        assert_eq!(parse("32 Maret 2025"), None);
    }

    #[test]
    fn test_month_names_are_case_sensitive() {
        assert_eq!(parse("15 maret 2025"), None);
        assert_eq!(parse("15 MARET 2025"), None);
    }

    #[test]
    fn test_impossible_day_parses_but_has_no_calendar_date() {
        let parsed = parse("31 Februari 2025").unwrap();
        assert_eq!(parsed, IndonesianDate { day: 31, month_index: 1, year: 2025 });
        assert_eq!(parsed.to_naive_date(), None);
        assert_eq!(parsed.iso_key(), None);
    }

    #[test]
    fn test_literal_day_is_preserved() {
        let parsed = parse("1 Januari 2025").unwrap();
        assert_eq!(parsed.iso_key().as_deref(), Some("2025-01-01"));

        let parsed = parse("31 Desember 2024").unwrap();
        assert_eq!(parsed.iso_key().as_deref(), Some("2024-12-31"));
    }

    #[test]
    fn test_formatting() {
        let d = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
        assert_eq!(format_indonesian(d), "15 Maret 2025");
        assert_eq!(format_indonesian_with_weekday(d), "Sabtu, 15 Maret 2025");
        assert_eq!(format_iso(d), "2025-03-15");
        assert_eq!(parse(&format_indonesian(d)).and_then(|p| p.to_naive_date()), Some(d));
    }

    #[test]
    fn test_month_lookup() {
        assert_eq!(month_index("Mei"), Some(4));
        assert_eq!(month_index("Desember"), Some(11));
        assert_eq!(month_index("Dec"), None);
        assert_eq!(month_name(2), Some("Maret"));
        assert_eq!(month_name(12), None);
    }
}
