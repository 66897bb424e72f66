use std::path::PathBuf;

use crate::error::{AppError, Result};
use crate::feed::DetectionFeed;
use crate::impact;
use crate::services::AppServices;
use revisent_db::Db;

/// Paths and files needed to run the dashboard backend.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub impact_defaults_path: PathBuf,
}

/// Application state shared by the HTTP server and the CLI.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub feed: DetectionFeed,
    pub services: AppServices,
}

impl AppState {
    pub fn new(db_path: PathBuf, impact_defaults_path: PathBuf) -> Self {
        let config = AppConfig {
            db_path,
            impact_defaults_path,
        };
        let feed = DetectionFeed::new();
        let services = AppServices::new(&config, feed.clone());
        Self {
            config,
            feed,
            services,
        }
    }

    pub fn is_fresh_db(&self) -> bool {
        !self.config.db_path.exists()
    }

    pub fn setup_db(&self) -> Result<()> {
        setup_db(&self.config.db_path)
    }

    pub fn initialize(&self) -> Result<()> {
        let is_fresh_db = self.is_fresh_db();
        self.setup_db()
            .map_err(|err| AppError::Message(format!("initialize db: {}", err)))?;
        if is_fresh_db {
            self.apply_impact_defaults()?;
        }
        self.sync_impact_defaults()?;
        Ok(())
    }

    pub fn open_db(&self) -> Result<Db> {
        Ok(Db::open(&self.config.db_path)?)
    }

    pub fn apply_impact_defaults(&self) -> Result<()> {
        impact::apply_impact_defaults(&self.config.db_path, &self.config.impact_defaults_path)
    }

    pub fn sync_impact_defaults(&self) -> Result<()> {
        impact::sync_impact_defaults(&self.config.db_path, &self.config.impact_defaults_path)
    }
}

pub fn setup_db(path: &std::path::Path) -> Result<()> {
    let mut db = Db::open(path)?;
    db.migrate()?;
    Ok(())
}
