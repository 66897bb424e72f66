#![allow(dead_code)]

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use revisent_core::DetectionEvent;
use revisent_db::Db;
use tempfile::TempDir;

pub struct TestDb {
    pub _dir: TempDir,
    pub db: Db,
    pub path: PathBuf,
}

pub fn setup_db() -> TestDb {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("test.sqlite");
    let mut db = Db::open(&path).expect("open db");
    db.migrate().expect("migrate db");
    TestDb {
        _dir: dir,
        db,
        path,
    }
}

pub fn ts(value: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value)
        .expect("timestamp")
        .with_timezone(&Utc)
}

pub fn make_detection(
    id: &str,
    at: &str,
    category: &str,
    item_name: Option<&str>,
    device_id: &str,
) -> DetectionEvent {
    DetectionEvent {
        id: id.to_string(),
        timestamp: ts(at),
        category: category.to_string(),
        item_name: item_name.map(str::to_string),
        device_id: device_id.to_string(),
    }
}

pub fn insert_detections(db: &mut Db, events: Vec<DetectionEvent>) {
    db.insert_detections(&events).expect("insert detections");
}
