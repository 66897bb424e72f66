use chrono::{DateTime, Utc};

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("time parse error: {0}")]
    TimeParse(#[from] chrono::ParseError),
    /// Detection timestamps are stored as four-digit-year strings.
    #[error("detection {id} has a timestamp outside years 0000-9999: {timestamp}")]
    TimestampOutOfRange {
        id: String,
        timestamp: DateTime<Utc>,
    },
}

pub type Result<T> = std::result::Result<T, DbError>;
