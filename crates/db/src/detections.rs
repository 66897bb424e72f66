use chrono::Utc;
use rusqlite::{params, params_from_iter};
use revisent_core::{DetectionEvent, DetectionFilter};

use crate::Db;
use crate::error::{DbError, Result};
use crate::helpers::{filter_clause, format_ts, is_storable_ts, row_to_detection};

const DETECTION_COLUMNS: &str = "id, ts, category, item_name, device_id";

impl Db {
    /// Inserts detections, ignoring ids that are already stored. Returns the
    /// events that were new. The batch is rejected as a whole when any
    /// timestamp falls outside four-digit years.
    pub fn insert_detections(
        &mut self,
        events: &[DetectionEvent],
    ) -> Result<Vec<DetectionEvent>> {
        if events.is_empty() {
            return Ok(Vec::new());
        }
        if let Some(event) = events.iter().find(|event| !is_storable_ts(&event.timestamp)) {
            return Err(DbError::TimestampOutOfRange {
                id: event.id.clone(),
                timestamp: event.timestamp,
            });
        }
        let recorded_at = format_ts(&Utc::now());
        let tx = self.conn.transaction()?;
        let mut inserted = Vec::new();
        {
            let mut stmt = tx.prepare(
                r#"
                INSERT OR IGNORE INTO detection_event (
                  id, ts, category, item_name, device_id, recorded_at
                ) VALUES (
                  ?1, ?2, ?3, ?4, ?5, ?6
                )
                "#,
            )?;
            for event in events {
                let rows = stmt.execute(params![
                    event.id,
                    format_ts(&event.timestamp),
                    event.category,
                    event.item_name,
                    event.device_id,
                    recorded_at,
                ])?;
                if rows > 0 {
                    inserted.push(event.clone());
                }
            }
        }
        tx.commit()?;
        Ok(inserted)
    }

    /// Point-in-time snapshot, oldest first. Both time bounds are inclusive.
    pub fn fetch_detections(&self, filter: &DetectionFilter) -> Result<Vec<DetectionEvent>> {
        let Some((clause, values)) = filter_clause(filter) else {
            return Ok(Vec::new());
        };
        let sql = format!(
            "SELECT {DETECTION_COLUMNS} FROM detection_event {clause} ORDER BY ts ASC, id ASC"
        );
        self.query_detections(&sql, &values)
    }

    /// Newest-first page for the event log.
    pub fn list_detections(
        &self,
        filter: &DetectionFilter,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<DetectionEvent>> {
        let Some((clause, values)) = filter_clause(filter) else {
            return Ok(Vec::new());
        };
        let sql = format!(
            "SELECT {DETECTION_COLUMNS} FROM detection_event {clause} \
             ORDER BY ts DESC, id DESC LIMIT {limit} OFFSET {offset}"
        );
        self.query_detections(&sql, &values)
    }

    pub fn count_detections(&self, filter: &DetectionFilter) -> Result<u64> {
        let Some((clause, values)) = filter_clause(filter) else {
            return Ok(0);
        };
        let sql = format!("SELECT COUNT(*) FROM detection_event {clause}");
        let count = self
            .conn
            .query_row(&sql, params_from_iter(values.iter()), |row| row.get::<_, i64>(0))?;
        Ok(count.max(0) as u64)
    }

    pub fn clear_device_data(&mut self, device_id: &str) -> Result<usize> {
        let deleted = self.conn.execute(
            "DELETE FROM detection_event WHERE device_id = ?1",
            params![device_id],
        )?;
        Ok(deleted)
    }

    fn query_detections(&self, sql: &str, values: &[String]) -> Result<Vec<DetectionEvent>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params_from_iter(values.iter()))?;
        let mut events = Vec::new();
        while let Some(row) = rows.next()? {
            events.push(row_to_detection(row)?);
        }
        Ok(events)
    }
}
