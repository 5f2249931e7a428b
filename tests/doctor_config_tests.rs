// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::Connection;
use spendlens::commands::doctor;
use spendlens::{config, db};

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn
}

#[test]
fn clean_store_has_no_issues() {
    let conn = setup();
    conn.execute(
        "INSERT INTO expenses(category_id, amount, expense_date) VALUES (1, '4.20', '2025-01-01')",
        [],
    )
    .unwrap();
    assert!(doctor::find_issues(&conn).unwrap().is_empty());
}

#[test]
fn flags_every_kind_of_bad_row() {
    let conn = setup();
    conn.execute_batch(
        r#"
        PRAGMA foreign_keys = OFF;
        INSERT INTO expenses(id, category_id, amount, expense_date) VALUES (1, 404, '1', '2025-01-01');
        INSERT INTO expenses(id, category_id, amount, expense_date) VALUES (2, 1, '1', 'soon');
        INSERT INTO expenses(id, category_id, amount, expense_date) VALUES (3, 1, '0', '2025-01-01');
        INSERT INTO expenses(id, category_id, amount, expense_date) VALUES (4, 1, 'ten', '2025-01-01');
        "#,
    )
    .unwrap();
    let issues: Vec<String> = doctor::find_issues(&conn)
        .unwrap()
        .into_iter()
        .map(|r| r[0].clone())
        .collect();
    assert_eq!(
        issues,
        vec![
            "unknown_category",
            "invalid_date",
            "non_positive_amount",
            "invalid_amount"
        ]
    );
}

#[test]
fn settings_round_trip_and_validate() {
    let conn = setup();
    assert_eq!(config::window_months(&conn).unwrap(), config::DEFAULT_WINDOW_MONTHS);
    assert_eq!(config::display_currency(&conn).unwrap(), None);

    config::set(&conn, config::WINDOW_MONTHS, " 6 ").unwrap();
    config::set(&conn, config::DISPLAY_CURRENCY, "EUR").unwrap();
    assert_eq!(config::window_months(&conn).unwrap(), 6);
    assert_eq!(config::display_currency(&conn).unwrap().as_deref(), Some("EUR"));
    assert_eq!(config::list(&conn).unwrap().len(), 2);

    assert!(config::set(&conn, config::WINDOW_MONTHS, "0").is_err());
    assert!(config::set(&conn, config::WINDOW_MONTHS, "many").is_err());
    assert!(config::set(&conn, "colour", "blue").is_err());
    assert_eq!(config::window_months(&conn).unwrap(), 6);
}
