// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::{AnalyticsRequest, AnalyticsResult};
use crate::dates::months_before;
use crate::error::AnalyticsError;
use crate::utils::{fmt_money, maybe_print_json, parse_date, pretty_table};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::Connection;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    let json_flag = m.get_flag("json");
    let jsonl_flag = m.get_flag("jsonl");
    let today = chrono::Utc::now().date_naive();
    let request = request_from_matches(conn, m, today)?;
    let result = run(conn, &request)?;

    if maybe_print_json(json_flag, jsonl_flag, &result)? {
        return Ok(());
    }
    let ccy = crate::config::display_currency(conn)?;
    print_report(&request, &result, ccy.as_deref());
    Ok(())
}

/// Resolves the window from `--from`/`--to`. A missing `--to` means `today`; a
/// missing `--from` goes back `report.window_months` months from the end.
pub fn request_from_matches(
    conn: &Connection,
    m: &clap::ArgMatches,
    today: NaiveDate,
) -> Result<AnalyticsRequest> {
    let end = match m.get_one::<String>("to") {
        Some(s) => parse_date(s)?,
        None => today,
    };
    let start = match m.get_one::<String>("from") {
        Some(s) => parse_date(s)?,
        None => months_before(end, crate::config::window_months(conn)?),
    };
    Ok(AnalyticsRequest::new(start, end))
}

/// Loads a snapshot and summarizes it.
pub fn run(conn: &mut Connection, request: &AnalyticsRequest) -> Result<AnalyticsResult> {
    let (expenses, categories) = crate::db::load_snapshot(conn)?;
    tracing::debug!(
        start = %request.start_date,
        end = %request.end_date,
        expenses = expenses.len(),
        "summarizing"
    );
    let result = request
        .summarize(&expenses, &categories)
        .inspect_err(|e| tracing::warn!(error = %e, "analytics failed"))
        .with_context(|| describe(request))?;
    Ok(result)
}

fn describe(request: &AnalyticsRequest) -> String {
    format!(
        "Cannot summarize {} .. {}",
        request.start_date, request.end_date
    )
}

/// Short advice shown under an engine failure.
pub fn hint(err: &AnalyticsError) -> &'static str {
    match err {
        AnalyticsError::InvalidRange { .. } => "swap --from and --to",
        AnalyticsError::InvalidDate { .. } => "fix the stored date (see `spendlens doctor`)",
        AnalyticsError::UnknownCategory { .. } => {
            "re-create the category or edit the expense (see `spendlens doctor`)"
        }
        AnalyticsError::AmountOverflow { .. } => "narrow the window or correct the oversized amount",
    }
}

fn print_report(request: &AnalyticsRequest, r: &AnalyticsResult, ccy: Option<&str>) {
    let summary = vec![
        vec![
            "Window".to_string(),
            format!("{} .. {}", request.start_date, request.end_date),
        ],
        vec!["Total".to_string(), fmt_money(&r.total_expenses, ccy)],
        vec![
            "Average / day".to_string(),
            fmt_money(&r.average_daily_expense, ccy),
        ],
        vec!["Transactions".to_string(), r.total_transactions.to_string()],
    ];
    println!("{}", pretty_table(&["Summary", ""], summary));

    if r.total_transactions == 0 {
        return;
    }

    let by_category = r
        .expenses_by_category
        .iter()
        .map(|c| {
            vec![
                format!("{} {}", c.category_icon, c.category_name)
                    .trim()
                    .to_string(),
                fmt_money(&c.total_amount, ccy),
                c.transaction_count.to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Category", "Spent", "Count"], by_category)
    );

    let daily = r
        .daily_expenses
        .iter()
        .map(|d| vec![d.date.to_string(), fmt_money(&d.amount, ccy)])
        .collect();
    println!("{}", pretty_table(&["Day", "Spent"], daily));

    let monthly = r
        .monthly_expenses
        .iter()
        .map(|(m, amt)| vec![m.to_string(), fmt_money(amt, ccy)])
        .collect();
    println!("{}", pretty_table(&["Month", "Spent"], monthly));
}
