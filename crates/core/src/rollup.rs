use std::collections::HashMap;

use chrono::{
    DateTime, Datelike, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone,
    Timelike, Utc,
};
use tracing::debug;

use crate::{
    Bucket, BucketTotals, Category, DetectionEvent, Rollup, TimeFrame, TimeSpan, TopItem,
};

pub const TOP_ITEM_LIMIT: usize = 5;
pub const UNKNOWN_ITEM: &str = "Unknown Item";

const DAY_FIRST_HOUR: u32 = 7;
const DAY_LAST_HOUR: u32 = 18;
const CUSTOM_DAILY_MAX_DAYS: i64 = 60;
const CUSTOM_DENSE_LABEL_MAX_DAYS: i64 = 14;
const CUSTOM_MAX_LABELS: usize = 10;
/// Stored timestamps are four-digit-year UTC strings; custom dates keep a
/// year of margin on each side so span bounds stay in that range under any
/// UTC offset.
const CUSTOM_MIN_YEAR: i32 = 1;
const CUSTOM_MAX_YEAR: i32 = 9998;
/// Longest custom range (in days) that still produces buckets.
const CUSTOM_MAX_DAYS: i64 = 366 * 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Resolution {
    Hour,
    Day,
    Week,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LabelStyle {
    Hour,
    Weekday,
    AlternateMonthDay,
    MonthStart,
    MonthDay { every: usize },
}

/// Calendar layout of a frame relative to a given local date. Span bounds
/// are computed once in [`Plan::resolve`] so later arithmetic cannot overflow.
#[derive(Debug, Clone, Copy)]
struct Plan {
    first_day: NaiveDate,
    last_day: NaiveDate,
    resolution: Resolution,
    labels: LabelStyle,
    span_start: NaiveDateTime,
    span_end: NaiveDateTime,
}

impl Plan {
    fn resolve(frame: &TimeFrame, today: NaiveDate) -> Option<Self> {
        let (first_day, last_day, resolution, labels) = match frame {
            TimeFrame::Day => (today, today, Resolution::Hour, LabelStyle::Hour),
            TimeFrame::Week => (
                today.checked_sub_signed(Duration::days(6))?,
                today,
                Resolution::Day,
                LabelStyle::Weekday,
            ),
            TimeFrame::Month => (
                today.checked_sub_signed(Duration::days(29))?,
                today,
                Resolution::Day,
                LabelStyle::AlternateMonthDay,
            ),
            TimeFrame::YearToDate => (
                NaiveDate::from_ymd_opt(today.year(), 1, 1)?,
                today,
                Resolution::Week,
                LabelStyle::MonthStart,
            ),
            TimeFrame::Custom { start, end } => {
                let first_day = parse_day(start)?;
                let last_day = parse_day(end)?;
                if last_day < first_day {
                    return None;
                }
                let days = (last_day - first_day).num_days() + 1;
                if days > CUSTOM_MAX_DAYS {
                    return None;
                }
                let resolution = if days <= CUSTOM_DAILY_MAX_DAYS {
                    Resolution::Day
                } else {
                    Resolution::Week
                };
                let bucket_count = match resolution {
                    Resolution::Week => (days as usize).div_ceil(7),
                    _ => days as usize,
                };
                let every = if days <= CUSTOM_DENSE_LABEL_MAX_DAYS {
                    1
                } else {
                    bucket_count.div_ceil(CUSTOM_MAX_LABELS).max(1)
                };
                (
                    first_day,
                    last_day,
                    resolution,
                    LabelStyle::MonthDay { every },
                )
            }
        };
        let (span_start, span_end_exclusive) = match resolution {
            Resolution::Hour => (
                start_of_day(first_day)
                    .checked_add_signed(Duration::hours(DAY_FIRST_HOUR.into()))?,
                start_of_day(last_day)
                    .checked_add_signed(Duration::hours((DAY_LAST_HOUR + 1).into()))?,
            ),
            Resolution::Day | Resolution::Week => (
                start_of_day(first_day),
                start_of_day(last_day).checked_add_signed(Duration::days(1))?,
            ),
        };
        Some(Self {
            first_day,
            last_day,
            resolution,
            labels,
            span_start,
            span_end: span_end_exclusive.checked_sub_signed(Duration::milliseconds(1))?,
        })
    }

    fn bucket_starts(&self) -> Vec<NaiveDateTime> {
        let step = match self.resolution {
            Resolution::Hour => Duration::hours(1),
            Resolution::Day => Duration::days(1),
            Resolution::Week => Duration::days(7),
        };
        let mut starts = Vec::new();
        let mut cursor = Some(self.span_start);
        while let Some(start) = cursor.filter(|start| *start <= self.span_end) {
            starts.push(start);
            cursor = start.checked_add_signed(step);
        }
        starts
    }

    fn label(&self, index: usize, start: NaiveDateTime, previous: Option<NaiveDate>) -> String {
        let day = start.date();
        match self.labels {
            LabelStyle::Hour => hour_label(start.hour()),
            LabelStyle::Weekday => day.format("%a").to_string(),
            LabelStyle::AlternateMonthDay => {
                if index % 2 == 0 {
                    month_day_label(day)
                } else {
                    String::new()
                }
            }
            LabelStyle::MonthStart => {
                if previous.is_none_or(|prev| prev.month() != day.month()) {
                    day.format("%b").to_string()
                } else {
                    String::new()
                }
            }
            LabelStyle::MonthDay { every } => {
                if index % every == 0 {
                    month_day_label(day)
                } else {
                    String::new()
                }
            }
        }
    }
}

/// Instant bounds a frame covers when evaluated at `now`, or `None` when the
/// frame cannot be resolved (incomplete or inverted custom range).
pub fn frame_span<Tz: TimeZone>(frame: &TimeFrame, now: &DateTime<Tz>) -> Option<TimeSpan> {
    let plan = Plan::resolve(frame, now.date_naive())?;
    let tz = now.timezone();
    Some(TimeSpan {
        start: localize(&tz, plan.span_start).with_timezone(&Utc),
        end: localize(&tz, plan.span_end).with_timezone(&Utc),
    })
}

/// Buckets `events` over the span `frame` selects around `now` and ranks the
/// most frequent item names. Calendar math happens in the timezone of `now`.
pub fn rollup<Tz: TimeZone>(
    events: &[DetectionEvent],
    frame: &TimeFrame,
    now: &DateTime<Tz>,
) -> Rollup {
    let Some(plan) = Plan::resolve(frame, now.date_naive()) else {
        debug!(?frame, "time frame not resolvable; returning empty rollup");
        return Rollup::default();
    };
    let tz = now.timezone();
    let mut buckets = seed_buckets(&plan, &tz);
    let mut in_span = Vec::new();
    for event in events {
        let Some(index) = bucket_index(&plan, &event.timestamp, &tz) else {
            continue;
        };
        buckets[index].totals.record(event.category());
        in_span.push(event);
    }
    let top_items = rank_items(&in_span);
    debug!(
        buckets = buckets.len(),
        in_span = in_span.len(),
        ignored = events.len() - in_span.len(),
        "rolled up detections"
    );
    Rollup { buckets, top_items }
}

fn seed_buckets<Tz: TimeZone>(plan: &Plan, tz: &Tz) -> Vec<Bucket> {
    let starts = plan.bucket_starts();
    let span_end = localize(tz, plan.span_end);
    let mut buckets = Vec::with_capacity(starts.len());
    for (index, start) in starts.iter().enumerate() {
        let end = match starts.get(index + 1) {
            Some(next) => localize(tz, *next) - Duration::milliseconds(1),
            None => span_end.clone(),
        };
        let previous = index
            .checked_sub(1)
            .and_then(|prev| starts.get(prev))
            .map(|prev| prev.date());
        buckets.push(Bucket {
            start: localize(tz, *start).fixed_offset(),
            end: end.fixed_offset(),
            label: plan.label(index, *start, previous),
            totals: BucketTotals::default(),
        });
    }
    buckets
}

/// Bucket holding `timestamp`, keyed on its local wall-clock date and hour so
/// every in-span instant maps to exactly one bucket.
fn bucket_index<Tz: TimeZone>(
    plan: &Plan,
    timestamp: &DateTime<Utc>,
    tz: &Tz,
) -> Option<usize> {
    let local = timestamp.with_timezone(tz).naive_local();
    let day = local.date();
    if day < plan.first_day || day > plan.last_day {
        return None;
    }
    match plan.resolution {
        Resolution::Hour => {
            let hour = local.hour();
            (DAY_FIRST_HOUR..=DAY_LAST_HOUR)
                .contains(&hour)
                .then(|| (hour - DAY_FIRST_HOUR) as usize)
        }
        Resolution::Day => usize::try_from((day - plan.first_day).num_days()).ok(),
        Resolution::Week => usize::try_from((day - plan.first_day).num_days() / 7).ok(),
    }
}

struct ItemTally<'a> {
    name: &'a str,
    totals: BucketTotals,
}

fn rank_items(events: &[&DetectionEvent]) -> Vec<TopItem> {
    if events.is_empty() {
        return Vec::new();
    }
    let in_span_total = events.len() as f64;
    let mut tallies: Vec<ItemTally<'_>> = Vec::new();
    let mut slots: HashMap<&str, usize> = HashMap::new();
    for event in events.iter().copied() {
        let name = event.item_name_or_unknown();
        let slot = *slots.entry(name).or_insert_with(|| {
            tallies.push(ItemTally {
                name,
                totals: BucketTotals::default(),
            });
            tallies.len() - 1
        });
        tallies[slot].totals.record(event.category());
    }
    // Stable: equal counts keep first-seen order.
    tallies.sort_by(|a, b| b.totals.total.cmp(&a.totals.total));
    tallies
        .into_iter()
        .take(TOP_ITEM_LIMIT)
        .map(|tally| TopItem {
            name: tally.name.to_string(),
            count: tally.totals.total,
            dominant_category: dominant_category(&tally.totals),
            percentage_of_total: tally.totals.total as f64 / in_span_total,
        })
        .collect()
}

fn dominant_category(totals: &BucketTotals) -> Option<Category> {
    let mut best: Option<(Category, u64)> = None;
    for category in Category::ALL {
        let count = totals.count(category);
        if count > 0 && best.is_none_or(|(_, top)| count > top) {
            best = Some((category, count));
        }
    }
    best.map(|(category, _)| category)
}

fn localize<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(value) => value,
        LocalResult::Ambiguous(earliest, _) => earliest,
        // Skipped by a DST jump; take the first wall-clock hour after the gap.
        LocalResult::None => tz
            .from_local_datetime(&(naive + Duration::hours(1)))
            .earliest()
            .unwrap_or_else(|| tz.from_utc_datetime(&naive)),
    }
}

fn start_of_day(day: NaiveDate) -> NaiveDateTime {
    day.and_time(NaiveTime::MIN)
}

fn parse_day(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|parsed| parsed.date_naive())
        })
        .filter(|day| (CUSTOM_MIN_YEAR..=CUSTOM_MAX_YEAR).contains(&day.year()))
}

fn hour_label(hour: u32) -> String {
    let suffix = if hour < 12 { "AM" } else { "PM" };
    let display = match hour % 12 {
        0 => 12,
        value => value,
    };
    format!("{display}{suffix}")
}

fn month_day_label(day: NaiveDate) -> String {
    format!("{}/{}", day.month(), day.day())
}
