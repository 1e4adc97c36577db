use anyhow::Result;
use chrono::{NaiveDate, Utc};
use chrono_english::{parse_date_string, Dialect};

/// Parses a window boundary: strict ISO first, then human-friendly forms
/// ("today", "next friday"). The engine itself only ever sees `NaiveDate`s.
pub fn parse_date(date_str: &str) -> Result<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(date_str, "%Y-%m-%d") {
        return Ok(date);
    }
    parse_date_string(date_str, Utc::now(), Dialect::Us)
        .map(|dt| dt.date_naive())
        .map_err(|e| anyhow::anyhow!("Failed to parse date '{}': {}", date_str, e))
}

pub fn parse_date_or_today(date_str: Option<&str>) -> Result<NaiveDate> {
    match date_str {
        Some(s) => parse_date(s),
        None => Ok(Utc::now().date_naive()),
    }
}
