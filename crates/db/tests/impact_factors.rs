mod support;

use revisent_core::{Category, ImpactFactor};
use support::setup_db;

#[test]
fn replace_impact_factors_overwrites_previous_rows() {
    let mut test_db = setup_db();
    let db = &mut test_db.db;
    db.replace_impact_factors(&[
        ImpactFactor {
            category: Category::Recycle,
            kg_co2e_per_item: 0.2,
        },
        ImpactFactor {
            category: Category::Trash,
            kg_co2e_per_item: 0.0,
        },
    ])
    .expect("replace");

    let updated = db
        .replace_impact_factors(&[ImpactFactor {
            category: Category::Compost,
            kg_co2e_per_item: 0.07,
        }])
        .expect("replace again");

    assert_eq!(updated, 1);
    let factors = db.list_impact_factors().expect("list");
    assert_eq!(factors.len(), 1);
    assert_eq!(factors[0].category, Category::Compost);
    assert!((factors[0].kg_co2e_per_item - 0.07).abs() < 1e-12);
}

#[test]
fn unknown_stored_categories_are_skipped() {
    let test_db = setup_db();
    let conn = rusqlite::Connection::open(&test_db.path).expect("open conn");
    conn.execute(
        "INSERT INTO impact_factor (category, kg_co2e_per_item) VALUES ('glass', 0.3), ('recycle', 0.1)",
        [],
    )
    .expect("insert raw");

    let factors = test_db.db.list_impact_factors().expect("list");

    assert_eq!(factors.len(), 1);
    assert_eq!(factors[0].category, Category::Recycle);
}
