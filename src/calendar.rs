//! Calendar helpers.
//!
//! Resolves the dates of a run (a single date or every Sunday of a month)
//! and renders date placeholders for schedule headers. Month and day names
//! are Indonesian, matching the roster sheets.
//!
//! # Placeholders
//!
//! | Token | Example |
//! |-------|---------|
//! | `{Day}` | Minggu |
//! | `{dd}` | 03 |
//! | `{MMM}`, `{MMMM}` | Agustus |
//! | `{yyyy}` | 2025 |

use chrono::{Datelike, NaiveDate, Weekday};

use crate::error::{Result, RosterError};

const MONTHS: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// Parses a month given as `1..=12` or an Indonesian month name.
pub fn parse_month(value: &str) -> Result<u32> {
    let trimmed = value.trim();
    let lower = trimmed.to_lowercase();
    if let Some(pos) = MONTHS.iter().position(|m| m.to_lowercase() == lower) {
        return Ok(pos as u32 + 1);
    }
    match trimmed.parse::<u32>() {
        Ok(m @ 1..=12) => Ok(m),
        _ => Err(RosterError::calendar(format!("invalid month: {value}"))),
    }
}

/// Indonesian month name (`"?"` outside 1..=12).
pub fn month_name(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|i| MONTHS.get(i as usize))
        .copied()
        .unwrap_or("?")
}

/// Indonesian day name.
pub fn day_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Senin",
        Weekday::Tue => "Selasa",
        Weekday::Wed => "Rabu",
        Weekday::Thu => "Kamis",
        Weekday::Fri => "Jumat",
        Weekday::Sat => "Sabtu",
        Weekday::Sun => "Minggu",
    }
}

/// A single date, failing when it does not exist in the month.
pub fn date_in_month(year: i32, month: u32, day: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        RosterError::calendar(format!("{day} {} {year} does not exist", month_name(month)))
    })
}

/// Every Sunday of the month, in order.
pub fn sundays_in_month(year: i32, month: u32) -> Result<Vec<NaiveDate>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| RosterError::calendar(format!("invalid month {month}/{year}")))?;
    let sundays: Vec<NaiveDate> = first
        .iter_days()
        .take_while(|d| d.month() == month)
        .filter(|d| d.weekday() == Weekday::Sun)
        .collect();
    if sundays.is_empty() {
        return Err(RosterError::calendar(format!(
            "no Sundays in {} {year}",
            month_name(month)
        )));
    }
    Ok(sundays)
}

/// Replaces date placeholders in a header cell.
pub fn render_placeholders(text: &str, date: NaiveDate) -> String {
    let month = month_name(date.month());
    text.replace("{Day}", day_name(date.weekday()))
        .replace("{dd}", &format!("{:02}", date.day()))
        .replace("{MMMM}", month)
        .replace("{MMM}", month)
        .replace("{yyyy}", &format!("{:04}", date.year()))
}
