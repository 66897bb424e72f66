use chrono::{DateTime, Duration, Utc};
use revisent_core::StationStatus;

use crate::error::{AppError, Result};
use crate::services::{SharedConfig, open_db};
use revisent_db::Db;

#[derive(Clone)]
pub struct StationsService {
    config: SharedConfig,
}

impl StationsService {
    pub(super) fn new(config: SharedConfig) -> Self {
        Self { config }
    }

    fn db(&self) -> Result<Db> {
        open_db(&self.config)
    }

    pub fn list(&self, active_minutes: Option<u32>) -> Result<Vec<StationStatus>> {
        self.list_at(active_minutes, Utc::now())
    }

    pub fn list_at(
        &self,
        active_minutes: Option<u32>,
        now: DateTime<Utc>,
    ) -> Result<Vec<StationStatus>> {
        let db = self.db()?;
        let minutes = match active_minutes {
            Some(value) => value,
            None => db.get_station_active_minutes()?,
        };
        let since = now - Duration::minutes(minutes.into());
        Ok(db.list_stations(since)?)
    }

    pub fn clear_data(&self, device_id: &str) -> Result<usize> {
        let device_id = device_id.trim();
        if device_id.is_empty() {
            return Err(AppError::InvalidInput("device_id is required".to_string()));
        }
        let mut db = self.db()?;
        let deleted = db.clear_device_data(device_id)?;
        if deleted == 0 {
            return Err(AppError::NotFound(format!(
                "no detections for station {}",
                device_id
            )));
        }
        Ok(deleted)
    }
}
