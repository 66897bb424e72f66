use chrono::{DateTime, Local, TimeZone};
use revisent_core::{
    BucketTotals, CsvOptions, DetectionEvent, DetectionSummary, ImpactEstimate, Rollup, TimeFrame,
    TimeSpan, estimate_impact, frame_span, rollup, rollup_to_csv,
};
use tracing::{debug, warn};

use crate::error::Result;
use crate::services::{SharedConfig, open_db};
use revisent_db::Db;

/// Frame-based analytics over stored detections. The plain methods evaluate
/// frames against the server's local clock; the `_at` variants take `now`
/// explicitly.
#[derive(Clone)]
pub struct AnalyticsService {
    config: SharedConfig,
}

impl AnalyticsService {
    pub(super) fn new(config: SharedConfig) -> Self {
        Self { config }
    }

    fn db(&self) -> Result<Db> {
        open_db(&self.config)
    }

    pub fn rollup(&self, frame: &TimeFrame, device_ids: Option<Vec<String>>) -> Result<Rollup> {
        self.rollup_at(frame, device_ids, &Local::now())
    }

    pub fn rollup_at<Tz: TimeZone>(
        &self,
        frame: &TimeFrame,
        device_ids: Option<Vec<String>>,
        now: &DateTime<Tz>,
    ) -> Result<Rollup> {
        let Some((_, events)) = self.load_span(frame, device_ids, now)? else {
            return Ok(Rollup::default());
        };
        let result = rollup(&events, frame, now);
        debug!(
            fetched = events.len(),
            buckets = result.buckets.len(),
            "computed rollup"
        );
        Ok(result)
    }

    pub fn summary(
        &self,
        frame: &TimeFrame,
        device_ids: Option<Vec<String>>,
    ) -> Result<DetectionSummary> {
        self.summary_at(frame, device_ids, &Local::now())
    }

    pub fn summary_at<Tz: TimeZone>(
        &self,
        frame: &TimeFrame,
        device_ids: Option<Vec<String>>,
        now: &DateTime<Tz>,
    ) -> Result<DetectionSummary> {
        let Some((span, events)) = self.load_span(frame, device_ids, now)? else {
            return Ok(DetectionSummary {
                span: None,
                totals: BucketTotals::default(),
                diversion_rate: 0.0,
                impact: ImpactEstimate::default(),
            });
        };
        let mut totals = BucketTotals::default();
        for event in &events {
            totals.record(event.category());
        }
        let factors = self.db()?.list_impact_factors()?;
        Ok(DetectionSummary {
            span: Some(span),
            totals,
            diversion_rate: totals.diversion_rate(),
            impact: estimate_impact(&totals, &factors),
        })
    }

    pub fn export_csv(
        &self,
        frame: &TimeFrame,
        device_ids: Option<Vec<String>>,
        include_diversion_rate: bool,
    ) -> Result<String> {
        self.export_csv_at(frame, device_ids, include_diversion_rate, &Local::now())
    }

    pub fn export_csv_at<Tz: TimeZone>(
        &self,
        frame: &TimeFrame,
        device_ids: Option<Vec<String>>,
        include_diversion_rate: bool,
        now: &DateTime<Tz>,
    ) -> Result<String> {
        let result = self.rollup_at(frame, device_ids, now)?;
        Ok(rollup_to_csv(
            &result,
            CsvOptions {
                include_diversion_rate,
            },
        ))
    }

    fn load_span<Tz: TimeZone>(
        &self,
        frame: &TimeFrame,
        device_ids: Option<Vec<String>>,
        now: &DateTime<Tz>,
    ) -> Result<Option<(TimeSpan, Vec<DetectionEvent>)>> {
        let Some(span) = frame_span(frame, now) else {
            warn!(?frame, "time frame not ready; serving empty analytics");
            return Ok(None);
        };
        let events = self.db()?.fetch_detections(&span.to_filter(device_ids))?;
        Ok(Some((span, events)))
    }
}
