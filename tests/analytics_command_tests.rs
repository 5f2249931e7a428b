// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::{Connection, params};
use rust_decimal::Decimal;
use spendlens::commands::analytics;
use spendlens::{AnalyticsError, AnalyticsRequest, cli, config, db};

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn.execute_batch(
        r#"
        INSERT INTO categories(name, icon) VALUES ('food', 'F'), ('transport', 'T');
        INSERT INTO expenses(category_id, amount, expense_date)
            SELECT id, '10', '2024-01-01' FROM categories WHERE name='food';
        INSERT INTO expenses(category_id, amount, expense_date)
            SELECT id, '20', '2024-01-01' FROM categories WHERE name='food';
        INSERT INTO expenses(category_id, amount, expense_date)
            SELECT id, '5', '2024-01-03' FROM categories WHERE name='transport';
        "#,
    )
    .unwrap();
    conn
}

fn analytics_matches(args: &[&str]) -> clap::ArgMatches {
    let mut argv = vec!["spendlens", "analytics"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    match matches.subcommand() {
        Some(("analytics", m)) => m.clone(),
        _ => panic!("no analytics subcommand"),
    }
}

#[test]
fn summarizes_stored_snapshot() {
    let mut conn = setup();
    let req = AnalyticsRequest::new(d("2024-01-01"), d("2024-01-03"));
    let r = analytics::run(&mut conn, &req).unwrap();
    assert_eq!(r.total_expenses, Decimal::from(35));
    assert_eq!(r.total_transactions, 3);
    assert_eq!(r.average_daily_expense, Decimal::new(1167, 2));
    assert_eq!(r.expenses_by_category[0].category_name, "food");
    assert_eq!(r.expenses_by_category[0].category_icon, "F");
}

#[test]
fn explicit_window_from_flags() {
    let conn = setup();
    let m = analytics_matches(&["--from", "2024-01-02", "--to", "2024-01-03"]);
    let req = analytics::request_from_matches(&conn, &m, d("2030-01-01")).unwrap();
    assert_eq!(req, AnalyticsRequest::new(d("2024-01-02"), d("2024-01-03")));
}

#[test]
fn default_window_uses_configured_months() {
    let conn = setup();
    let m = analytics_matches(&[]);
    let today = d("2024-05-20");

    let req = analytics::request_from_matches(&conn, &m, today).unwrap();
    assert_eq!(req, AnalyticsRequest::new(d("2024-04-20"), today));

    config::set(&conn, config::WINDOW_MONTHS, "3").unwrap();
    let req = analytics::request_from_matches(&conn, &m, today).unwrap();
    assert_eq!(req, AnalyticsRequest::new(d("2024-02-20"), today));
}

#[test]
fn reversed_window_is_invalid_range() {
    let mut conn = setup();
    let req = AnalyticsRequest::new(d("2024-02-01"), d("2024-01-01"));
    let err = analytics::run(&mut conn, &req).unwrap_err();
    let inner = err.downcast_ref::<AnalyticsError>().unwrap();
    assert!(matches!(inner, AnalyticsError::InvalidRange { .. }));
    assert_eq!(analytics::hint(inner), "swap --from and --to");
}

#[test]
fn corrupt_stored_date_fails_the_report() {
    let mut conn = setup();
    conn.execute(
        "UPDATE expenses SET expense_date='2024-02-30' WHERE amount='5'",
        [],
    )
    .unwrap();
    let req = AnalyticsRequest::new(d("2024-01-01"), d("2024-01-03"));
    let err = analytics::run(&mut conn, &req).unwrap_err();
    match err.downcast_ref::<AnalyticsError>() {
        Some(AnalyticsError::InvalidDate { value, .. }) => {
            assert_eq!(value.as_deref(), Some("2024-02-30"))
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn dangling_category_fails_the_report() {
    let mut conn = setup();
    conn.execute_batch("PRAGMA foreign_keys = OFF;").unwrap();
    conn.execute(
        "INSERT INTO expenses(category_id, amount, expense_date) VALUES (?1, '1', '2024-01-02')",
        params![999],
    )
    .unwrap();
    let req = AnalyticsRequest::new(d("2024-01-01"), d("2024-01-03"));
    let err = analytics::run(&mut conn, &req).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<AnalyticsError>(),
        Some(AnalyticsError::UnknownCategory {
            category_id: 999,
            ..
        })
    ));
}
