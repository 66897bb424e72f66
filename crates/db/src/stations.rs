use chrono::{DateTime, Utc};
use revisent_core::StationStatus;

use crate::Db;
use crate::error::Result;
use crate::helpers::parse_ts;

impl Db {
    /// One entry per device that has reported at least one detection.
    /// A station is online when its last detection is at or after `since`.
    pub fn list_stations(&self, since: DateTime<Utc>) -> Result<Vec<StationStatus>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT device_id, MAX(ts) AS last_seen, COUNT(*) AS detection_count
            FROM detection_event
            GROUP BY device_id
            ORDER BY last_seen DESC, device_id ASC
            "#,
        )?;
        let mut rows = stmt.query([])?;
        let mut stations = Vec::new();
        while let Some(row) = rows.next()? {
            let last_seen: String = row.get(1)?;
            let last_seen = parse_ts(&last_seen)?;
            stations.push(StationStatus {
                device_id: row.get(0)?,
                last_seen,
                detection_count: row.get::<_, i64>(2)?.max(0) as u64,
                online: last_seen >= since,
            });
        }
        Ok(stations)
    }
}
