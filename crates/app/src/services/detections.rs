use revisent_core::{DetectionEvent, DetectionFilter};
use serde::Serialize;
use tracing::info;

use crate::error::{AppError, Result};
use crate::feed::{DetectionFeed, Subscription};
use crate::services::{SharedConfig, open_db};
use revisent_db::Db;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RecordOutcome {
    pub received: usize,
    pub inserted: usize,
}

#[derive(Clone)]
pub struct DetectionsService {
    config: SharedConfig,
    feed: DetectionFeed,
}

impl DetectionsService {
    pub(super) fn new(config: SharedConfig, feed: DetectionFeed) -> Self {
        Self { config, feed }
    }

    fn db(&self) -> Result<Db> {
        open_db(&self.config)
    }

    /// Stores detections reported by stations and announces the ones that
    /// were not already known.
    pub fn record(&self, events: &[DetectionEvent]) -> Result<RecordOutcome> {
        for event in events {
            if event.id.trim().is_empty() {
                return Err(AppError::InvalidInput(
                    "detection id is required".to_string(),
                ));
            }
            if event.device_id.trim().is_empty() {
                return Err(AppError::InvalidInput(format!(
                    "device_id is required for detection {}",
                    event.id
                )));
            }
        }
        let mut db = self.db()?;
        let inserted = db.insert_detections(events)?;
        for event in &inserted {
            self.feed.publish(event);
        }
        info!(
            received = events.len(),
            inserted = inserted.len(),
            "recorded detections"
        );
        Ok(RecordOutcome {
            received: events.len(),
            inserted: inserted.len(),
        })
    }

    pub fn fetch(&self, filter: &DetectionFilter) -> Result<Vec<DetectionEvent>> {
        Ok(self.db()?.fetch_detections(filter)?)
    }

    pub fn list(
        &self,
        filter: &DetectionFilter,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<DetectionEvent>> {
        Ok(self.db()?.list_detections(filter, limit, offset)?)
    }

    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&DetectionEvent) + Send + Sync + 'static,
    {
        self.feed.subscribe(callback)
    }
}
