mod export;
mod impact;
mod rollup;

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

pub use export::{CsvOptions, rollup_to_csv};
pub use impact::{ImpactEstimate, ImpactFactor, estimate_impact};
pub use rollup::{TOP_ITEM_LIMIT, UNKNOWN_ITEM, frame_span, rollup};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Trash,
    Recycle,
    Compost,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Trash, Category::Recycle, Category::Compost];

    /// Case-insensitive match against the labels the sorting hardware writes.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("trash") {
            Some(Self::Trash)
        } else if value.eq_ignore_ascii_case("recycle") {
            Some(Self::Recycle)
        } else if value.eq_ignore_ascii_case("compost") {
            Some(Self::Compost)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trash => "trash",
            Self::Recycle => "recycle",
            Self::Compost => "compost",
        }
    }

    pub fn is_diverted(&self) -> bool {
        matches!(self, Self::Recycle | Self::Compost)
    }
}

/// A single sorted item as reported by a station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionEvent {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    /// Raw category string; see [`Category::parse`].
    pub category: String,
    pub item_name: Option<String>,
    pub device_id: String,
}

impl DetectionEvent {
    pub fn category(&self) -> Option<Category> {
        Category::parse(&self.category)
    }

    pub fn item_name_or_unknown(&self) -> &str {
        self.item_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(UNKNOWN_ITEM)
    }
}

/// Snapshot query over stored detections. `None` fields do not filter;
/// an empty `device_ids` list matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectionFilter {
    pub device_ids: Option<Vec<String>>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TimeFrame {
    Day,
    Week,
    Month,
    YearToDate,
    /// Dates as supplied by the caller (`YYYY-MM-DD`); left unparsed so an
    /// incomplete range picker can still be rolled up into an empty result.
    Custom { start: String, end: String },
}

/// Inclusive instant bounds of a resolved frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSpan {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeSpan {
    pub fn contains(&self, instant: &DateTime<Utc>) -> bool {
        self.start <= *instant && *instant <= self.end
    }

    pub fn to_filter(&self, device_ids: Option<Vec<String>>) -> DetectionFilter {
        DetectionFilter {
            device_ids,
            start_time: Some(self.start),
            end_time: Some(self.end),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketTotals {
    pub total: u64,
    pub trash: u64,
    pub recycle: u64,
    pub compost: u64,
}

impl BucketTotals {
    /// Counts one detection. Unknown categories only move `total`.
    pub fn record(&mut self, category: Option<Category>) {
        self.total += 1;
        match category {
            Some(Category::Trash) => self.trash += 1,
            Some(Category::Recycle) => self.recycle += 1,
            Some(Category::Compost) => self.compost += 1,
            None => {}
        }
    }

    pub fn count(&self, category: Category) -> u64 {
        match category {
            Category::Trash => self.trash,
            Category::Recycle => self.recycle,
            Category::Compost => self.compost,
        }
    }

    pub fn diverted(&self) -> u64 {
        self.recycle + self.compost
    }

    /// Percentage of detections that were recycled or composted.
    pub fn diversion_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.diverted() as f64 / self.total as f64) * 100.0
    }

    pub fn merge(&mut self, other: &BucketTotals) {
        self.total += other.total;
        self.trash += other.trash;
        self.recycle += other.recycle;
        self.compost += other.compost;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    pub start: DateTime<FixedOffset>,
    /// Inclusive; the last bucket of a span may end early.
    pub end: DateTime<FixedOffset>,
    pub label: String,
    pub totals: BucketTotals,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopItem {
    pub name: String,
    pub count: u64,
    pub dominant_category: Option<Category>,
    /// Share of in-span detections, `0.0..=1.0`.
    pub percentage_of_total: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rollup {
    pub buckets: Vec<Bucket>,
    pub top_items: Vec<TopItem>,
}

impl Rollup {
    pub fn totals(&self) -> BucketTotals {
        let mut totals = BucketTotals::default();
        for bucket in &self.buckets {
            totals.merge(&bucket.totals);
        }
        totals
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionSummary {
    pub span: Option<TimeSpan>,
    pub totals: BucketTotals,
    pub diversion_rate: f64,
    pub impact: ImpactEstimate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationStatus {
    pub device_id: String,
    pub last_seen: DateTime<Utc>,
    pub detection_count: u64,
    pub online: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parse_is_case_insensitive() {
        assert_eq!(Category::parse("Recycle"), Some(Category::Recycle));
        assert_eq!(Category::parse(" COMPOST "), Some(Category::Compost));
        assert_eq!(Category::parse("trash"), Some(Category::Trash));
        assert_eq!(Category::parse("landfill"), None);
        assert_eq!(Category::parse(""), None);
    }

    #[test]
    fn unknown_category_only_counts_toward_total() {
        let mut totals = BucketTotals::default();
        totals.record(Some(Category::Recycle));
        totals.record(None);
        assert_eq!(totals.total, 2);
        assert_eq!(totals.recycle, 1);
        assert_eq!(totals.trash + totals.compost, 0);
    }

    #[test]
    fn diversion_rate_handles_empty_totals() {
        assert_eq!(BucketTotals::default().diversion_rate(), 0.0);
        let totals = BucketTotals {
            total: 4,
            trash: 1,
            recycle: 2,
            compost: 1,
        };
        assert!((totals.diversion_rate() - 75.0).abs() < 1e-9);
    }

    #[test]
    fn time_frame_serializes_with_kind_tag() {
        let frame = TimeFrame::Custom {
            start: "2025-01-01".to_string(),
            end: "2025-01-10".to_string(),
        };
        let json = serde_json::to_value(&frame).expect("serialize");
        assert_eq!(json["kind"], "custom");
        assert_eq!(json["start"], "2025-01-01");
        let ytd: TimeFrame =
            serde_json::from_str(r#"{"kind":"year_to_date"}"#).expect("deserialize");
        assert_eq!(ytd, TimeFrame::YearToDate);
    }
}
