mod support;

use revisent_db::DEFAULT_STATION_ACTIVE_MINUTES;
use support::{insert_detections, make_detection, setup_db, ts};

#[test]
fn stations_report_last_seen_and_online_state() {
    let mut test_db = setup_db();
    let db = &mut test_db.db;
    insert_detections(
        db,
        vec![
            make_detection("a", "2025-03-10T08:00:00Z", "trash", None, "st-1"),
            make_detection("b", "2025-03-10T11:55:00Z", "recycle", None, "st-1"),
            make_detection("c", "2025-03-10T09:00:00Z", "compost", None, "st-2"),
        ],
    );

    let stations = db
        .list_stations(ts("2025-03-10T11:45:00Z"))
        .expect("stations");

    assert_eq!(stations.len(), 2);
    assert_eq!(stations[0].device_id, "st-1");
    assert_eq!(stations[0].detection_count, 2);
    assert_eq!(stations[0].last_seen, ts("2025-03-10T11:55:00Z"));
    assert!(stations[0].online);
    assert_eq!(stations[1].device_id, "st-2");
    assert!(!stations[1].online);
}

#[test]
fn station_active_minutes_defaults_and_updates() {
    let test_db = setup_db();
    let db = &test_db.db;

    assert_eq!(
        db.get_station_active_minutes().expect("default"),
        DEFAULT_STATION_ACTIVE_MINUTES
    );
    db.set_station_active_minutes(30).expect("set");
    assert_eq!(db.get_station_active_minutes().expect("updated"), 30);

    db.set_setting("station_active_minutes", "not-a-number")
        .expect("set raw");
    assert_eq!(
        db.get_station_active_minutes().expect("fallback"),
        DEFAULT_STATION_ACTIVE_MINUTES
    );
}
