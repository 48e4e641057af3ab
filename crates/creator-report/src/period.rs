//! Restricting the record snapshot to one calendar year

use chrono::{DateTime, Datelike, NaiveDate};
use report_pipeline::Record;
use serde_json::Value;
use tracing::debug;

use crate::constants;

/// Year of a date cell: `YYYY-MM-DD`, an RFC 3339 timestamp, or any text
/// starting with `YYYY-MM-DD`.
pub fn record_year(value: Option<&Value>) -> Option<i32> {
    let Some(Value::String(raw)) = value else {
        return None;
    };
    let raw = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(raw, constants::DATE_FORMAT) {
        return Some(date.year());
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.date_naive().year());
    }

    raw.get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, constants::DATE_FORMAT).ok())
        .map(|date| date.year())
}

/// Keep the records dated in `year`. Records without a readable date are
/// dropped; the count of those is returned alongside.
pub fn filter_by_year(records: Vec<Record>, date_field: &str, year: i32) -> (Vec<Record>, usize) {
    let mut undated = 0;
    let kept: Vec<Record> = records
        .into_iter()
        .filter(|record| match record_year(record.get(date_field)) {
            Some(y) => y == year,
            None => {
                undated += 1;
                false
            }
        })
        .collect();

    if undated > 0 {
        debug!(undated, field = date_field, "Dropped records without a readable date");
    }

    (kept, undated)
}
