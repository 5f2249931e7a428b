// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;
use spendlens::ValidationError;
use spendlens::commands::{categories, expenses};
use spendlens::models::ExpenseInput;
use spendlens::{cli, db};

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn
}

fn input(category: &str, amount: &str, date: &str) -> ExpenseInput {
    ExpenseInput {
        category: category.into(),
        amount: amount.parse().unwrap(),
        expense_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        description: None,
        payment_method: None,
        location: None,
        notes: None,
    }
}

#[test]
fn schema_seeds_default_categories_once() {
    let mut conn = setup();
    db::init_schema(&mut conn).unwrap();
    let index = categories::load_index(&conn).unwrap();
    assert_eq!(index.len(), 7);
    assert_eq!(index.by_name("Food").unwrap().icon, "🍔");
}

#[test]
fn create_and_get_round_trip() {
    let conn = setup();
    let mut i = input("Food", "12.34", "2025-01-02");
    i.description = Some("Lunch".into());
    i.payment_method = Some("card".into());
    let created = expenses::create_expense(&conn, &i).unwrap();
    let fetched = expenses::get_expense(&conn, created.id).unwrap();
    assert_eq!(created, fetched);
    assert_eq!(fetched.amount, Decimal::new(1234, 2));
    assert_eq!(fetched.description.as_deref(), Some("Lunch"));
    assert_eq!(fetched.payment_method.as_deref(), Some("card"));
    assert_eq!(fetched.location, None);
}

#[test]
fn expense_json_keeps_exact_amount() {
    let conn = setup();
    let e = expenses::create_expense(&conn, &input("Food", "0.10", "2025-01-02")).unwrap();
    let v = serde_json::to_value(&e).unwrap();
    assert_eq!(v["amount"], "0.10");
    assert_eq!(v["expenseDate"], "2025-01-02");

    let back: spendlens::models::Expense = serde_json::from_value(v).unwrap();
    assert_eq!(back, e);
}

#[test]
fn rejects_non_positive_amount() {
    let conn = setup();
    for amt in ["0", "-5"] {
        let err = expenses::create_expense(&conn, &input("Food", amt, "2025-01-02")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ValidationError>(),
            Some(ValidationError::NonPositiveAmount(_))
        ));
    }
}

#[test]
fn rejects_unknown_category() {
    let conn = setup();
    let err = expenses::create_expense(&conn, &input("Yachts", "5", "2025-01-02")).unwrap_err();
    assert_eq!(
        err.downcast_ref::<ValidationError>(),
        Some(&ValidationError::CategoryNotFound("Yachts".into()))
    );
}

#[test]
fn update_replaces_fields() {
    let conn = setup();
    let mut i = input("Food", "10", "2025-01-02");
    i.notes = Some("old".into());
    let e = expenses::create_expense(&conn, &i).unwrap();

    let updated = expenses::update_expense(&conn, e.id, &input("Transport", "3.50", "2025-01-05"))
        .unwrap();
    assert_eq!(updated.id, e.id);
    assert_eq!(updated.amount, Decimal::new(350, 2));
    assert_eq!(updated.notes, None);
    let transport = categories::load_index(&conn)
        .unwrap()
        .by_name("Transport")
        .unwrap()
        .id;
    assert_eq!(updated.category_id, transport);
}

#[test]
fn update_validates_before_touching_row() {
    let conn = setup();
    let e = expenses::create_expense(&conn, &input("Food", "10", "2025-01-02")).unwrap();
    assert!(expenses::update_expense(&conn, e.id, &input("Food", "0", "2025-01-02")).is_err());
    assert_eq!(
        expenses::get_expense(&conn, e.id).unwrap().amount,
        Decimal::from(10)
    );
}

#[test]
fn missing_ids_are_reported() {
    let conn = setup();
    for err in [
        expenses::get_expense(&conn, 99).unwrap_err(),
        expenses::delete_expense(&conn, 99).unwrap_err(),
        expenses::update_expense(&conn, 99, &input("Food", "1", "2025-01-01")).unwrap_err(),
    ] {
        assert_eq!(
            err.downcast_ref::<ValidationError>(),
            Some(&ValidationError::ExpenseNotFound(99))
        );
    }
}

#[test]
fn delete_removes_row() {
    let conn = setup();
    let e = expenses::create_expense(&conn, &input("Food", "1", "2025-01-01")).unwrap();
    expenses::delete_expense(&conn, e.id).unwrap();
    assert!(expenses::get_expense(&conn, e.id).is_err());
}

#[test]
fn list_filters_and_orders_newest_first() {
    let conn = setup();
    for (cat, amt, date) in [
        ("Food", "1", "2025-01-01"),
        ("Food", "2", "2025-01-03"),
        ("Transport", "3", "2025-01-03"),
        ("Food", "4", "2025-02-01"),
    ] {
        expenses::create_expense(&conn, &input(cat, amt, date)).unwrap();
    }

    let matches = cli::build_cli().get_matches_from([
        "spendlens",
        "expense",
        "list",
        "--from",
        "2025-01-01",
        "--to",
        "2025-01-31",
        "--category",
        "Food",
    ]);
    let Some(("expense", exp_m)) = matches.subcommand() else {
        panic!("no expense subcommand");
    };
    let Some(("list", list_m)) = exp_m.subcommand() else {
        panic!("no list subcommand");
    };
    let filter = expenses::ExpenseFilter::from_matches(list_m).unwrap();
    let rows = expenses::list_expenses(&conn, &filter).unwrap();
    let amounts: Vec<Decimal> = rows.iter().map(|e| e.amount).collect();
    assert_eq!(amounts, vec![Decimal::from(2), Decimal::from(1)]);

    let all = expenses::list_expenses(
        &conn,
        &expenses::ExpenseFilter {
            limit: Some(2),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].amount, Decimal::from(4));
    // same day: higher id first
    assert_eq!(all[1].amount, Decimal::from(3));
}

#[test]
fn add_via_cli_matches() {
    let conn = setup();
    let matches = cli::build_cli().get_matches_from([
        "spendlens",
        "expense",
        "add",
        "--date",
        " 2025-03-04 ",
        "--category",
        " Bills ",
        "--amount",
        "99.90",
        "--location",
        "  ",
    ]);
    if let Some(("expense", exp_m)) = matches.subcommand() {
        expenses::handle(&conn, exp_m).unwrap();
    } else {
        panic!("no expense subcommand");
    }
    let rows = expenses::list_expenses(&conn, &Default::default()).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].amount, Decimal::new(9990, 2));
    assert_eq!(rows[0].location, None);
}

#[test]
fn category_in_use_cannot_be_removed() {
    let conn = setup();
    expenses::create_expense(&conn, &input("Health", "8", "2025-01-01")).unwrap();
    let err = categories::remove_category(&conn, "Health").unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ValidationError>(),
        Some(ValidationError::CategoryInUse { expenses: 1, .. })
    ));

    categories::add_category(&conn, "Pets", "🐾").unwrap();
    categories::remove_category(&conn, "Pets").unwrap();
    assert!(categories::load_index(&conn).unwrap().by_name("Pets").is_none());
}
