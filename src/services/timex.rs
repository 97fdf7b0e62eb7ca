//! Date recognition for travel dates.
//!
//! Recognized dates are normalized to a timex string: `YYYY-MM-DD` when the
//! input names a day, month and year, or a partial form (`XXXX-MM-DD`,
//! `YYYY-MM`) when something is missing. Only the full form is definite.

use chrono::{Datelike, NaiveDate};

const FULL_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
    "%d %B, %Y",
];

const NO_YEAR_FORMATS: &[&str] = &["%B %d", "%d %B", "%m/%d"];

const NO_DAY_FORMATS: &[&str] = &["%Y-%m", "%B %Y"];

// Leap year, so "February 29" still parses without a year.
const PLACEHOLDER_YEAR: i32 = 2000;

/// Turns free text into a timex, or `None` when no date is recognized.
pub fn recognize(text: &str) -> Option<String> {
    let text = strip_time(text.trim().trim_end_matches('.'));
    if text.is_empty() {
        return None;
    }

    for format in FULL_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Some(date.format("%Y-%m-%d").to_string());
        }
    }

    for format in NO_YEAR_FORMATS {
        let padded = format!("{text} {PLACEHOLDER_YEAR}");
        if let Ok(date) = NaiveDate::parse_from_str(&padded, &format!("{format} %Y")) {
            return Some(format!("XXXX-{:02}-{:02}", date.month(), date.day()));
        }
    }

    for format in NO_DAY_FORMATS {
        let padded = format!("{text} 1");
        if let Ok(date) = NaiveDate::parse_from_str(&padded, &format!("{format} %d")) {
            return Some(format!("{}-{:02}", date.year(), date.month()));
        }
    }

    if is_partial_timex(text) {
        return Some(text.to_string());
    }

    None
}

/// True when the timex pins down a single calendar day.
pub fn is_definite(timex: &str) -> bool {
    let date = strip_time(timex.trim());
    date.len() == 10 && NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok()
}

pub fn is_ambiguous(timex: &str) -> bool {
    !is_definite(timex)
}

/// Drops the time part of a timex such as `2023-01-01T10`.
fn strip_time(text: &str) -> &str {
    match text.split_once('T') {
        Some((date, _))
            if date.len() == 10
                && date.chars().all(|c| c.is_ascii_digit() || c == '-' || c == 'X') =>
        {
            date
        }
        _ => text,
    }
}

fn is_partial_timex(text: &str) -> bool {
    let parts: Vec<&str> = text.split('-').collect();
    parts.len() == 3
        && parts[0] == "XXXX"
        && parts[1..]
            .iter()
            .all(|p| p.len() == 2 && p.chars().all(|c| c.is_ascii_digit()))
}
