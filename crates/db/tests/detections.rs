mod support;

use revisent_core::DetectionFilter;
use support::{insert_detections, make_detection, setup_db, ts};

#[test]
fn insert_ignores_duplicate_ids() {
    let mut test_db = setup_db();
    let db = &mut test_db.db;
    let first = make_detection("d1", "2025-03-10T07:15:00Z", "recycle", Some("Can"), "st-1");
    let second = make_detection("d2", "2025-03-10T07:20:00Z", "trash", None, "st-1");

    let inserted = db
        .insert_detections(&[first.clone(), second.clone()])
        .expect("insert");
    assert_eq!(inserted.len(), 2);

    let again = db
        .insert_detections(&[first, second.clone()])
        .expect("insert again");
    assert!(again.is_empty());

    let stored = db
        .fetch_detections(&DetectionFilter::default())
        .expect("fetch");
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[1], second);
}

#[test]
fn fetch_honors_inclusive_time_bounds() {
    let mut test_db = setup_db();
    let db = &mut test_db.db;
    insert_detections(
        db,
        vec![
            make_detection("before", "2025-03-09T23:59:59.999Z", "trash", None, "st-1"),
            make_detection("start", "2025-03-10T00:00:00Z", "trash", None, "st-1"),
            make_detection("end", "2025-03-10T23:59:59.999Z", "compost", None, "st-1"),
            make_detection("after", "2025-03-11T00:00:00Z", "trash", None, "st-1"),
        ],
    );

    let filter = DetectionFilter {
        device_ids: None,
        start_time: Some(ts("2025-03-10T00:00:00Z")),
        end_time: Some(ts("2025-03-10T23:59:59.999Z")),
    };
    let events = db.fetch_detections(&filter).expect("fetch");

    let ids: Vec<&str> = events.iter().map(|event| event.id.as_str()).collect();
    assert_eq!(ids, vec!["start", "end"]);
    assert_eq!(db.count_detections(&filter).expect("count"), 2);
}

#[test]
fn fetch_filters_by_device_ids() {
    let mut test_db = setup_db();
    let db = &mut test_db.db;
    insert_detections(
        db,
        vec![
            make_detection("a", "2025-03-10T08:00:00Z", "trash", None, "st-1"),
            make_detection("b", "2025-03-10T09:00:00Z", "recycle", None, "st-2"),
            make_detection("c", "2025-03-10T10:00:00Z", "compost", None, "st-3"),
        ],
    );

    let filter = DetectionFilter {
        device_ids: Some(vec!["st-1".to_string(), "st-3".to_string()]),
        ..DetectionFilter::default()
    };
    let events = db.fetch_detections(&filter).expect("fetch");
    let ids: Vec<&str> = events.iter().map(|event| event.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "c"]);

    let none = DetectionFilter {
        device_ids: Some(Vec::new()),
        ..DetectionFilter::default()
    };
    assert!(db.fetch_detections(&none).expect("fetch").is_empty());
    assert_eq!(db.count_detections(&none).expect("count"), 0);
}

#[test]
fn list_detections_pages_newest_first() {
    let mut test_db = setup_db();
    let db = &mut test_db.db;
    insert_detections(
        db,
        vec![
            make_detection("a", "2025-03-10T08:00:00Z", "trash", None, "st-1"),
            make_detection("b", "2025-03-10T09:00:00Z", "recycle", None, "st-1"),
            make_detection("c", "2025-03-10T10:00:00Z", "compost", None, "st-1"),
        ],
    );

    let page = db
        .list_detections(&DetectionFilter::default(), 2, 0)
        .expect("page");
    let ids: Vec<&str> = page.iter().map(|event| event.id.as_str()).collect();
    assert_eq!(ids, vec!["c", "b"]);

    let next = db
        .list_detections(&DetectionFilter::default(), 2, 2)
        .expect("next page");
    assert_eq!(next.len(), 1);
    assert_eq!(next[0].id, "a");
}

#[test]
fn unknown_categories_round_trip_unchanged() {
    let mut test_db = setup_db();
    let db = &mut test_db.db;
    insert_detections(
        db,
        vec![make_detection(
            "odd",
            "2025-03-10T08:00:00Z",
            "e-waste",
            Some("Battery"),
            "st-1",
        )],
    );

    let events = db
        .fetch_detections(&DetectionFilter::default())
        .expect("fetch");
    assert_eq!(events[0].category, "e-waste");
    assert_eq!(events[0].category(), None);
}

#[test]
fn clear_device_data_only_touches_that_device() {
    let mut test_db = setup_db();
    let db = &mut test_db.db;
    insert_detections(
        db,
        vec![
            make_detection("a", "2025-03-10T08:00:00Z", "trash", None, "st-1"),
            make_detection("b", "2025-03-10T09:00:00Z", "recycle", None, "st-2"),
            make_detection("c", "2025-03-10T10:00:00Z", "compost", None, "st-1"),
        ],
    );

    let deleted = db.clear_device_data("st-1").expect("clear");

    assert_eq!(deleted, 2);
    let remaining = db
        .fetch_detections(&DetectionFilter::default())
        .expect("fetch");
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].device_id, "st-2");
}

#[test]
fn insert_rejects_timestamps_beyond_four_digit_years() {
    use chrono::{TimeZone, Utc};
    use revisent_db::DbError;

    let mut test_db = setup_db();
    let db = &mut test_db.db;
    let ok = make_detection("ok", "2025-03-10T07:15:00Z", "recycle", None, "st-1");
    let mut far = make_detection("far", "2025-03-10T07:16:00Z", "trash", None, "st-1");
    far.timestamp = Utc
        .with_ymd_and_hms(10000, 1, 1, 0, 0, 0)
        .single()
        .expect("far timestamp");

    let err = db
        .insert_detections(&[ok, far])
        .expect_err("out of range");
    assert!(matches!(err, DbError::TimestampOutOfRange { ref id, .. } if id == "far"));
    assert_eq!(
        db.count_detections(&DetectionFilter::default())
            .expect("count"),
        0
    );
}
