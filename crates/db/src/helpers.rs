use chrono::{DateTime, Datelike, SecondsFormat, Utc};
use rusqlite::Row;
use revisent_core::{DetectionEvent, DetectionFilter};

use crate::error::Result;

/// Stored timestamps are fixed-width UTC strings so SQL string comparison
/// orders them chronologically.
pub(crate) fn format_ts(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub(crate) fn is_storable_ts(value: &DateTime<Utc>) -> bool {
    (0..=9999).contains(&value.year())
}

pub(crate) fn parse_ts(value: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(value)?.with_timezone(&Utc))
}

pub(crate) fn row_to_detection(row: &Row<'_>) -> Result<DetectionEvent> {
    let ts: String = row.get(1)?;
    Ok(DetectionEvent {
        id: row.get(0)?,
        timestamp: parse_ts(&ts)?,
        category: row.get(2)?,
        item_name: row.get(3)?,
        device_id: row.get(4)?,
    })
}

/// `WHERE` clause and positional values for a detection filter, or `None`
/// when the filter can match nothing.
pub(crate) fn filter_clause(filter: &DetectionFilter) -> Option<(String, Vec<String>)> {
    let mut clause = String::from("WHERE 1 = 1");
    let mut values = Vec::new();
    if let Some(start) = filter.start_time {
        values.push(format_ts(&start));
        clause.push_str(&format!(" AND ts >= ?{}", values.len()));
    }
    if let Some(end) = filter.end_time {
        values.push(format_ts(&end));
        clause.push_str(&format!(" AND ts <= ?{}", values.len()));
    }
    if let Some(device_ids) = &filter.device_ids {
        if device_ids.is_empty() {
            return None;
        }
        let mut placeholders = Vec::with_capacity(device_ids.len());
        for device_id in device_ids {
            values.push(device_id.clone());
            placeholders.push(format!("?{}", values.len()));
        }
        clause.push_str(&format!(" AND device_id IN ({})", placeholders.join(", ")));
    }
    Some((clause, values))
}
