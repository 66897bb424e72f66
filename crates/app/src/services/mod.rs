mod analytics;
mod detections;
mod impact;
mod settings;
mod stations;

use std::sync::Arc;

use crate::app::AppConfig;
use crate::error::Result;
use crate::feed::DetectionFeed;
use revisent_db::Db;

pub use analytics::AnalyticsService;
pub use detections::{DetectionsService, RecordOutcome};
pub use impact::ImpactService;
pub use settings::{SettingsService, SettingsSnapshot};
pub use stations::StationsService;

type SharedConfig = Arc<AppConfig>;

/// Service registry for app-level operations.
#[derive(Clone)]
pub struct AppServices {
    pub analytics: AnalyticsService,
    pub detections: DetectionsService,
    pub impact: ImpactService,
    pub stations: StationsService,
    pub settings: SettingsService,
}

impl AppServices {
    pub fn new(config: &AppConfig, feed: DetectionFeed) -> Self {
        let shared = Arc::new(config.clone());
        Self {
            analytics: AnalyticsService::new(shared.clone()),
            detections: DetectionsService::new(shared.clone(), feed),
            impact: ImpactService::new(shared.clone()),
            stations: StationsService::new(shared.clone()),
            settings: SettingsService::new(shared),
        }
    }
}

fn open_db(config: &SharedConfig) -> Result<Db> {
    Ok(Db::open(&config.db_path)?)
}
