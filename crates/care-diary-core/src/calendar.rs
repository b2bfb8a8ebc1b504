//! Era-year and weekday labels
//!
//! Record pages show the year in the Reiwa era: era-year = calendar year - 2018.
//! Only this single fixed offset is supported.

use chrono::{Datelike, NaiveDate};
use lazy_regex::regex_captures;

/// Calendar year that precedes era-year 1
pub const ERA_EPOCH: i32 = 2018;

/// Era name printed before the era-year
pub const ERA_NAME: &str = "令和";

/// Weekday symbols, Monday first
pub const WEEKDAY_SYMBOLS: [&str; 7] = ["月", "火", "水", "木", "金", "土", "日"];

/// Era-year of a calendar year
pub fn era_year(year: i32) -> i32 {
    year - ERA_EPOCH
}

/// Era-year of a date
pub fn era_year_of(date: NaiveDate) -> i32 {
    era_year(date.year())
}

/// Header label for an era-year, e.g. `令和7年`
pub fn era_label(era_year: i32) -> String {
    format!("{ERA_NAME}{era_year}年")
}

/// Extract the era-year from a header label
///
/// Returns `None` when the text holds no `令和N年`; callers decide the fallback.
///
/// ```
/// use care_diary_core::calendar::parse_era_label;
///
/// assert_eq!(parse_era_label("令和7年"), Some(7));
/// assert_eq!(parse_era_label("　令和12年度"), Some(12));
/// assert_eq!(parse_era_label("2025"), None);
/// ```
pub fn parse_era_label(text: &str) -> Option<i32> {
    let (_, digits) = regex_captures!(r"令和(\d+)年", text)?;
    digits.parse().ok()
}

/// Content of the synthetic row inserted when a page changes year
pub fn year_marker_label(era_year: i32) -> String {
    format!("ここから{}", era_label(era_year))
}

/// Weekday symbol of a date
pub fn weekday_label(date: NaiveDate) -> &'static str {
    WEEKDAY_SYMBOLS[date.weekday().num_days_from_monday() as usize]
}

/// Month/day label written on the first row of an entry, e.g. `5/1`
pub fn month_day_label(date: NaiveDate) -> String {
    format!("{}/{}", date.month(), date.day())
}
