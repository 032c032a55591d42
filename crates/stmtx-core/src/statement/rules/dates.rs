//! Free-form date parsing for statement date fields.
//!
//! Statement dates are printed in many human formats ("15 Jan 2024",
//! "January 15, 2024", "15th of January 2024", "15Jan2024", "01/15/2024",
//! "2024-01-15").
//! The whole input must be understood for a parse to succeed: a range such as
//! "01 Jan 2024 to 31 Jan 2024" or any unknown word yields `None`.

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NUMERIC_YMD: Regex = Regex::new(
        r"^(\d{4})[./\-](\d{1,2})[./\-](\d{1,2})$"
    ).unwrap();

    static ref NUMERIC_MDY: Regex = Regex::new(
        r"^(\d{1,2})[./\-](\d{1,2})[./\-](\d{4})$"
    ).unwrap();

    /// Digit runs (with an optional ordinal suffix) and letter runs.
    static ref TOKEN_PIECE: Regex = Regex::new(
        r"\d+(?:st|nd|rd|th)?|[a-z]+"
    ).unwrap();
}

/// Words that carry no date information.
const FILLER_WORDS: [&str; 3] = ["of", "on", "the"];

/// Parse free-form date text into a calendar date.
pub fn parse_free_form_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Some(caps) = NUMERIC_YMD.captures(text) {
        let year: i32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let day: u32 = caps[3].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    if let Some(caps) = NUMERIC_MDY.captures(text) {
        let first: u32 = caps[1].parse().ok()?;
        let second: u32 = caps[2].parse().ok()?;
        let year: i32 = caps[3].parse().ok()?;
        let (month, day) = month_first(first, second);
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    parse_tokens(text)
}

/// Normalize date text to `YYYY-MM-DD`, or `None` when it does not parse.
pub fn normalize_date(text: &str) -> Option<String> {
    parse_free_form_date(text).map(|date| date.to_string())
}

/// Month-first unless the first number cannot be a month.
fn month_first(first: u32, second: u32) -> (u32, u32) {
    if first > 12 { (second, first) } else { (first, second) }
}

fn parse_tokens(text: &str) -> Option<NaiveDate> {
    let mut year: Option<i32> = None;
    let mut month: Option<u32> = None;
    let mut ordinal_day: Option<u32> = None;
    let mut numbers: Vec<u32> = Vec::new();

    let tokens = text
        .split(|c: char| c.is_whitespace() || matches!(c, ',' | '-' | '/' | '.'))
        .filter(|t| !t.is_empty());

    for token in tokens {
        let lower = token.to_lowercase();
        if !lower.chars().all(|c| c.is_ascii_alphanumeric()) {
            return None;
        }

        // "15jan2024" and "jan15" carry several parts in one token
        for piece in TOKEN_PIECE.find_iter(&lower) {
            let piece = piece.as_str();

            if piece.chars().all(|c| c.is_ascii_digit()) {
                match piece.len() {
                    4 if year.is_none() => year = Some(piece.parse().ok()?),
                    1 | 2 => numbers.push(piece.parse().ok()?),
                    _ => return None,
                }
            } else if let Some(day) = ordinal(piece) {
                if ordinal_day.replace(day).is_some() {
                    return None;
                }
            } else if let Some(m) = month_from_name(piece) {
                if month.replace(m).is_some() {
                    return None;
                }
            } else if is_weekday(piece) || FILLER_WORDS.contains(&piece) {
                continue;
            } else {
                return None;
            }
        }
    }

    let year = year?;
    let (month, day) = match (month, ordinal_day, numbers.as_slice()) {
        (Some(m), Some(d), []) => (m, d),
        (Some(m), None, [d]) => (m, *d),
        (Some(m), None, []) => (m, 1),
        (None, Some(d), [m]) => (*m, d),
        (None, None, [a, b]) => month_first(*a, *b),
        _ => return None,
    };

    NaiveDate::from_ymd_opt(year, month, day)
}

/// "1st", "22nd", "3rd", "15th" -> day number.
fn ordinal(token: &str) -> Option<u32> {
    let digits = token
        .strip_suffix("st")
        .or_else(|| token.strip_suffix("nd"))
        .or_else(|| token.strip_suffix("rd"))
        .or_else(|| token.strip_suffix("th"))?;
    if digits.is_empty() || digits.len() > 2 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

fn month_from_name(name: &str) -> Option<u32> {
    let month = match name {
        "january" | "jan" => 1,
        "february" | "feb" => 2,
        "march" | "mar" => 3,
        "april" | "apr" => 4,
        "may" => 5,
        "june" | "jun" => 6,
        "july" | "jul" => 7,
        "august" | "aug" => 8,
        "september" | "sep" | "sept" => 9,
        "october" | "oct" => 10,
        "november" | "nov" => 11,
        "december" | "dec" => 12,
        _ => return None,
    };
    Some(month)
}

fn is_weekday(name: &str) -> bool {
    matches!(
        name,
        "monday" | "mon"
            | "tuesday" | "tue" | "tues"
            | "wednesday" | "wed"
            | "thursday" | "thu" | "thur" | "thurs"
            | "friday" | "fri"
            | "saturday" | "sat"
            | "sunday" | "sun"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn test_day_month_name_year() {
        assert_eq!(parse_free_form_date("15 Jan 2024"), ymd(2024, 1, 15));
        assert_eq!(parse_free_form_date("15-JAN-2024"), ymd(2024, 1, 15));
        assert_eq!(parse_free_form_date("15 January, 2024"), ymd(2024, 1, 15));
    }

    #[test]
    fn test_month_name_day_year() {
        assert_eq!(parse_free_form_date("January 15, 2024"), ymd(2024, 1, 15));
        assert_eq!(parse_free_form_date("Sept. 3 2023"), ymd(2023, 9, 3));
    }

    #[test]
    fn test_ordinals_weekdays_and_filler() {
        assert_eq!(parse_free_form_date("15th of January 2024"), ymd(2024, 1, 15));
        assert_eq!(parse_free_form_date("Mon, 15 Jan 2024"), ymd(2024, 1, 15));
        assert_eq!(parse_free_form_date("on the 1st of March 2024"), ymd(2024, 3, 1));
    }

    #[test]
    fn test_numeric_forms() {
        assert_eq!(parse_free_form_date("2024-01-15"), ymd(2024, 1, 15));
        assert_eq!(parse_free_form_date("2024/1/5"), ymd(2024, 1, 5));
        assert_eq!(parse_free_form_date("15/01/2024"), ymd(2024, 1, 15));
        // Month-first when ambiguous
        assert_eq!(parse_free_form_date("05/02/2024"), ymd(2024, 5, 2));
        assert_eq!(parse_free_form_date("05 02 2024"), ymd(2024, 5, 2));
    }

    #[test]
    fn test_compact_token_without_spaces() {
        assert_eq!(parse_free_form_date("15Jan2024"), ymd(2024, 1, 15));
        assert_eq!(parse_free_form_date("Jan15,2024"), ymd(2024, 1, 15));
        assert_eq!(parse_free_form_date("15thJanuary2024"), ymd(2024, 1, 15));
        assert_eq!(parse_free_form_date("Mon,15Jan 2024"), ymd(2024, 1, 15));
        assert_eq!(normalize_date("05FEB2024").as_deref(), Some("2024-02-05"));
    }

    #[test]
    fn test_compact_token_still_rejects_unknown_words() {
        assert_eq!(parse_free_form_date("15Jan2024to31Jan2024"), None);
        assert_eq!(parse_free_form_date("15Jan2024)"), None);
        assert_eq!(parse_free_form_date("20240115"), None);
    }

    #[test]
    fn test_month_and_year_only() {
        assert_eq!(parse_free_form_date("March 2024"), ymd(2024, 3, 1));
    }

    #[test]
    fn test_rejects_unparsable() {
        assert_eq!(parse_free_form_date("NOT FOUND"), None);
        assert_eq!(parse_free_form_date(""), None);
        assert_eq!(parse_free_form_date("01 Jan 2024 to 31 Jan 2024"), None);
        assert_eq!(parse_free_form_date("Jan Feb 2024"), None);
        assert_eq!(parse_free_form_date("31 Feb 2024"), None);
        assert_eq!(parse_free_form_date("15 Jan"), None);
        assert_eq!(parse_free_form_date("13/13/2024"), None);
    }

    #[test]
    fn test_normalize_date() {
        assert_eq!(normalize_date(" 15 Jan 2024 ").as_deref(), Some("2024-01-15"));
        assert_eq!(normalize_date("soon 2024"), None);
    }
}
