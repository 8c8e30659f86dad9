use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

/// Year, separator, month, separator, day. The trailing 日 is not required.
static DATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([0-9]{4})[-/.年]([0-9]{1,2})[-/.月]([0-9]{1,2})").expect("date pattern compiles")
});

/// Finds the first year-month-day in `text` and returns it at UTC midnight.
///
/// Whitespace is removed and full-width digits are folded to ASCII before
/// matching, so `2024 年 3 月 5 日` and `２０２４年３月５日` both parse.
/// Returns `None` when there is no match or the match is not a real
/// calendar date.
pub fn parse_date(text: &str) -> Option<DateTime<Utc>> {
    let compact: String = text
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(fold_fullwidth_digit)
        .collect();
    if compact.is_empty() {
        return None;
    }

    let caps = DATE_PATTERN.captures(&compact)?;
    let year: i32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let day: u32 = caps[3].parse().ok()?;

    NaiveDate::from_ymd_opt(year, month, day)?
        .and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc())
}

fn fold_fullwidth_digit(c: char) -> char {
    match c {
        '\u{FF10}'..='\u{FF19}' => char::from(b'0' + (c as u32 - 0xFF10) as u8),
        _ => c,
    }
}
