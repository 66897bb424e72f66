use rusqlite::Connection;

#[test]
fn migrate_is_idempotent() {
    let dir = tempfile::tempdir().expect("temp dir");
    let db_path = dir.path().join("migrate.sqlite");

    let mut db = revisent_db::Db::open(&db_path).expect("open db");
    db.migrate().expect("first migrate");
    db.migrate().expect("second migrate");

    assert_eq!(
        db.applied_migrations().expect("applied"),
        vec!["0001_init".to_string(), "0002_add_impact_factor".to_string()]
    );
}

#[test]
fn migrate_upgrades_a_database_at_0001() {
    let dir = tempfile::tempdir().expect("temp dir");
    let db_path = dir.path().join("upgrade.sqlite");
    {
        let conn = Connection::open(&db_path).expect("open conn");
        conn.execute_batch(include_str!("../migrations/0001_init.sql"))
            .expect("apply 0001");
        conn.execute_batch(
            r#"
            CREATE TABLE schema_migration (name TEXT PRIMARY KEY, applied_at TEXT NOT NULL);
            INSERT INTO schema_migration (name, applied_at) VALUES ('0001_init', '2025-01-01T00:00:00Z');
            INSERT INTO detection_event (id, ts, category, item_name, device_id, recorded_at)
            VALUES ('d1', '2025-03-10T08:00:00.000Z', 'recycle', 'Can', 'st-1', '2025-03-10T08:00:01.000Z');
            "#,
        )
        .expect("seed");
    }

    let mut db = revisent_db::Db::open(&db_path).expect("open db");
    db.migrate().expect("migrate");

    let conn = Connection::open(&db_path).expect("open conn");
    let detections: i64 = conn
        .query_row("SELECT COUNT(*) FROM detection_event", [], |row| row.get(0))
        .expect("count detections");
    assert_eq!(detections, 1);
    let factor_table: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'impact_factor'",
            [],
            |row| row.get(0),
        )
        .expect("impact table");
    assert_eq!(factor_table, 1);
}
