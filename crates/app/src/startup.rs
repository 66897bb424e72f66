use std::path::PathBuf;

use crate::Result;

pub const DB_FILE_NAME: &str = "revisent.sqlite";
pub const IMPACT_DEFAULTS_FILE_NAME: &str = "revisent-impact.json";

#[derive(Clone, Debug)]
pub struct AppPaths {
    pub app_data_dir: PathBuf,
    pub db_path: PathBuf,
    pub impact_defaults_path: PathBuf,
}

impl AppPaths {
    pub fn new(app_data_dir: PathBuf) -> Self {
        let db_path = app_data_dir.join(DB_FILE_NAME);
        let impact_defaults_path = app_data_dir.join(IMPACT_DEFAULTS_FILE_NAME);
        Self {
            app_data_dir,
            db_path,
            impact_defaults_path,
        }
    }
}

pub fn ensure_app_data_dir(paths: &AppPaths) -> Result<()> {
    std::fs::create_dir_all(&paths.app_data_dir)?;
    Ok(())
}
