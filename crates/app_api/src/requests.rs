use revisent_core::{DetectionEvent, ImpactFactor};
use serde::Deserialize;

#[derive(Debug, Deserialize, Default)]
pub struct EmptyRequest {}

#[derive(Debug, Deserialize, Default)]
pub struct RangeRequest {
    pub frame: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub device_ids: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Default)]
pub struct CsvRequest {
    pub frame: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub device_ids: Option<Vec<String>>,
    #[serde(default)]
    pub include_diversion_rate: bool,
}

/// Event log page. `start`/`end` are RFC 3339 instants, unlike the date-only
/// bounds of a custom frame.
#[derive(Debug, Deserialize, Default)]
pub struct DetectionsRequest {
    pub start: Option<String>,
    pub end: Option<String>,
    pub device_ids: Option<Vec<String>>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct RecordRequest {
    pub events: Vec<DetectionEvent>,
}

#[derive(Debug, Deserialize, Default)]
pub struct StationsRequest {
    pub active_minutes: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct StationsClearDataRequest {
    pub device_id: String,
}

#[derive(Debug, Deserialize)]
pub struct ImpactReplaceRequest {
    pub factors: Vec<ImpactFactor>,
}

#[derive(Debug, Deserialize)]
pub struct SettingsPutRequest {
    pub station_active_minutes: Option<u32>,
}
