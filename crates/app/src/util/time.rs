use chrono::{DateTime, Utc};
use revisent_core::TimeFrame;

use crate::config::RangeParams;
use crate::error::{AppError, Result};

/// Maps a request's frame name onto a [`TimeFrame`]. Custom bounds are
/// passed through untouched; an incomplete range rolls up to nothing rather
/// than failing here.
pub fn resolve_frame(params: &RangeParams) -> Result<TimeFrame> {
    let name = params
        .frame
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or("week")
        .to_ascii_lowercase();
    match name.as_str() {
        "day" | "today" => Ok(TimeFrame::Day),
        "week" => Ok(TimeFrame::Week),
        "month" => Ok(TimeFrame::Month),
        "ytd" | "year_to_date" => Ok(TimeFrame::YearToDate),
        "custom" => Ok(TimeFrame::Custom {
            start: params.start.clone().unwrap_or_default(),
            end: params.end.clone().unwrap_or_default(),
        }),
        value => Err(AppError::InvalidInput(format!(
            "unsupported frame {}",
            value
        ))),
    }
}

pub fn parse_rfc3339_utc(value: &str) -> Result<DateTime<Utc>> {
    let parsed = DateTime::parse_from_rfc3339(value)
        .map_err(|err| AppError::InvalidInput(format!("invalid datetime: {}", err)))?;
    Ok(parsed.with_timezone(&Utc))
}
