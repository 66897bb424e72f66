use crate::error::{AppError, Result};
use crate::services::{SharedConfig, open_db};
use revisent_db::Db;

/// Snapshot of user-configurable settings stored in the DB.
#[derive(Debug, Clone)]
pub struct SettingsSnapshot {
    pub station_active_minutes: u32,
}

#[derive(Clone)]
pub struct SettingsService {
    config: SharedConfig,
}

impl SettingsService {
    pub(super) fn new(config: SharedConfig) -> Self {
        Self { config }
    }

    fn db(&self) -> Result<Db> {
        open_db(&self.config)
    }

    pub fn get(&self) -> Result<SettingsSnapshot> {
        let db = self.db()?;
        Ok(SettingsSnapshot {
            station_active_minutes: db.get_station_active_minutes()?,
        })
    }

    pub fn update(&self, station_active_minutes: Option<u32>) -> Result<()> {
        let db = self.db()?;
        if let Some(minutes) = station_active_minutes {
            if minutes == 0 {
                return Err(AppError::InvalidInput(
                    "station_active_minutes must be at least 1".to_string(),
                ));
            }
            db.set_station_active_minutes(minutes)?;
        }
        Ok(())
    }
}
