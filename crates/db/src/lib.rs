mod detections;
mod error;
mod helpers;
mod impact;
mod migrations;
mod settings;
mod stations;

use std::path::Path;

use rusqlite::Connection;

pub use error::{DbError, Result};
pub use settings::DEFAULT_STATION_ACTIVE_MINUTES;

pub struct Db {
    conn: Connection,
}

impl Db {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        conn.pragma_update(None, "temp_store", "MEMORY")?;
        conn.pragma_update(None, "cache_size", -20_000)?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(Self { conn })
    }
}
