//! Date utility functions
//!
//! This module provides date parsing and human-readable formatting for due
//! dates (e.g. "yesterday", "today", "in 3 days").

use chrono::{Datelike, NaiveDate, Utc};

/// Standard date format used throughout the application
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a date string in YYYY-MM-DD format to NaiveDate
pub fn parse_date(date_str: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(date_str, DATE_FORMAT)
}

/// Format a NaiveDate to YYYY-MM-DD string
pub fn format_ymd(d: NaiveDate) -> String {
    d.format(DATE_FORMAT).to_string()
}

/// Current UTC date; the reference "today" for due-date bucketing
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Format a date relative to a reference date in human-readable form
pub fn format_relative(date: NaiveDate, today: NaiveDate) -> String {
    let days_diff = (date - today).num_days();

    match days_diff {
        -1 => "yesterday".to_string(),
        0 => "today".to_string(),
        1 => "tomorrow".to_string(),
        diff if diff > 1 && diff <= 30 => format!("in {} days", diff),
        diff if (-30..-1).contains(&diff) => format!("{} days ago", -diff),
        _ => {
            // For dates further out, show the actual date,
            // with the year only when it differs from the current one
            if date.year() == today.year() {
                date.format("%b %d").to_string()
            } else {
                date.format("%b %d, %Y").to_string()
            }
        }
    }
}
