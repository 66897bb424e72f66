pub mod app;
pub mod config;
pub mod error;
pub mod feed;
pub mod impact;
pub mod services;
pub mod startup;
pub mod util;

pub use app::{AppConfig, AppState};
pub use config::RangeParams;
pub use error::{ApiError, AppError, Result};
pub use feed::{DetectionFeed, Subscription};
pub use impact::{
    apply_impact_defaults, load_impact_defaults, load_initial_impact, sync_impact_defaults,
    write_impact_defaults,
};
pub use services::{AppServices, RecordOutcome, SettingsSnapshot};
pub use startup::{AppPaths, ensure_app_data_dir};
pub use util::time::{parse_rfc3339_utc, resolve_frame};
