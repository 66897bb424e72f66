use serde::{Deserialize, Serialize};

/// Frame selection as it arrives from a dashboard request.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct RangeParams {
    pub frame: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub device_ids: Option<Vec<String>>,
}
