use revisent_core::StationStatus;
use serde::Serialize;

/// Rendered CSV plus the download name the HTTP layer advertises.
pub struct CsvExport {
    pub filename: String,
    pub body: String,
}

#[derive(Serialize)]
pub struct StationsResponse {
    pub active_minutes: u32,
    pub stations: Vec<StationStatus>,
}

#[derive(Serialize)]
pub struct SettingsResponse {
    pub station_active_minutes: u32,
    pub db_path: String,
    pub impact_defaults_path: String,
    pub app_data_dir: String,
}

#[derive(Serialize)]
pub struct UpdatedResponse {
    pub updated: i64,
}

#[derive(Serialize)]
pub struct ClearedResponse {
    pub device_id: String,
    pub cleared: i64,
}

#[derive(Serialize)]
pub struct OkResponse {
    pub ok: bool,
}
