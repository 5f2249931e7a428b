// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::{EXPENSE_COLUMNS, expense_from_row};
use crate::error::ValidationError;
use crate::models::{Expense, ExpenseInput};
use crate::utils::{
    fmt_money, id_for_category, maybe_print_json, non_blank, parse_date, parse_decimal,
    pretty_table,
};
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let e = create_expense(conn, &input_from_matches(sub)?)?;
            let date = e.expense_date.map(|d| d.to_string()).unwrap_or_default();
            println!("Recorded expense #{} of {} on {}", e.id, e.amount, date);
        }
        Some(("edit", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            let e = update_expense(conn, id, &input_from_matches(sub)?)?;
            println!("Updated expense #{}", e.id);
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            delete_expense(conn, id)?;
            println!("Removed expense #{}", id);
        }
        Some(("show", sub)) => show(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

pub fn input_from_matches(sub: &clap::ArgMatches) -> Result<ExpenseInput> {
    Ok(ExpenseInput {
        category: sub.get_one::<String>("category").unwrap().trim().to_string(),
        amount: parse_decimal(sub.get_one::<String>("amount").unwrap())?,
        expense_date: parse_date(sub.get_one::<String>("date").unwrap())?,
        description: non_blank(sub.get_one::<String>("description")),
        payment_method: non_blank(sub.get_one::<String>("payment-method")),
        location: non_blank(sub.get_one::<String>("location")),
        notes: non_blank(sub.get_one::<String>("notes")),
    })
}

/// Checks the write-path invariants and resolves the category name.
fn validate(conn: &Connection, input: &ExpenseInput) -> Result<i64> {
    if input.amount <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveAmount(input.amount).into());
    }
    id_for_category(conn, &input.category)
}

pub fn create_expense(conn: &Connection, input: &ExpenseInput) -> Result<Expense> {
    let category_id = validate(conn, input)?;
    conn.execute(
        "INSERT INTO expenses(category_id, amount, expense_date, description, payment_method, location, notes)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            category_id,
            input.amount.to_string(),
            input.expense_date.to_string(),
            input.description,
            input.payment_method,
            input.location,
            input.notes
        ],
    )?;
    let id = conn.last_insert_rowid();
    tracing::debug!(id, category_id, amount = %input.amount, "expense created");
    get_expense(conn, id)
}

/// Replaces every field of an existing expense.
pub fn update_expense(conn: &Connection, id: i64, input: &ExpenseInput) -> Result<Expense> {
    let category_id = validate(conn, input)?;
    let changed = conn.execute(
        "UPDATE expenses SET category_id=?1, amount=?2, expense_date=?3, description=?4,
         payment_method=?5, location=?6, notes=?7 WHERE id=?8",
        params![
            category_id,
            input.amount.to_string(),
            input.expense_date.to_string(),
            input.description,
            input.payment_method,
            input.location,
            input.notes,
            id
        ],
    )?;
    if changed == 0 {
        return Err(ValidationError::ExpenseNotFound(id).into());
    }
    tracing::debug!(id, "expense updated");
    get_expense(conn, id)
}

pub fn delete_expense(conn: &Connection, id: i64) -> Result<()> {
    let changed = conn.execute("DELETE FROM expenses WHERE id=?1", params![id])?;
    if changed == 0 {
        return Err(ValidationError::ExpenseNotFound(id).into());
    }
    tracing::debug!(id, "expense deleted");
    Ok(())
}

pub fn get_expense(conn: &Connection, id: i64) -> Result<Expense> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM expenses WHERE id=?1",
        EXPENSE_COLUMNS
    ))?;
    let mut rows = stmt.query(params![id])?;
    match rows.next()? {
        Some(r) => expense_from_row(r),
        None => Err(ValidationError::ExpenseNotFound(id).into()),
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExpenseFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub category: Option<String>,
    pub limit: Option<usize>,
}

impl ExpenseFilter {
    pub fn from_matches(sub: &clap::ArgMatches) -> Result<Self> {
        Ok(ExpenseFilter {
            from: sub.get_one::<String>("from").map(|s| parse_date(s)).transpose()?,
            to: sub.get_one::<String>("to").map(|s| parse_date(s)).transpose()?,
            category: non_blank(sub.get_one::<String>("category")),
            limit: sub.get_one::<usize>("limit").copied(),
        })
    }
}

/// Newest first: by date descending, then id descending.
pub fn list_expenses(conn: &Connection, filter: &ExpenseFilter) -> Result<Vec<Expense>> {
    let mut sql = format!("SELECT {} FROM expenses WHERE 1=1", EXPENSE_COLUMNS);
    let mut params_vec: Vec<String> = Vec::new();

    if let Some(from) = filter.from {
        sql.push_str(" AND expense_date >= ?");
        params_vec.push(from.to_string());
    }
    if let Some(to) = filter.to {
        sql.push_str(" AND expense_date <= ?");
        params_vec.push(to.to_string());
    }
    if let Some(cat) = &filter.category {
        let cat_id = id_for_category(conn, cat)?;
        sql.push_str(" AND category_id = ?");
        params_vec.push(cat_id.to_string());
    }
    sql.push_str(" ORDER BY expense_date DESC, id DESC");
    if let Some(limit) = filter.limit {
        sql.push_str(" LIMIT ?");
        params_vec.push(limit.to_string());
    }

    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query(rusqlite::params_from_iter(params_vec.iter()))?;
    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        data.push(expense_from_row(r)?);
    }
    Ok(data)
}

fn category_label(conn: &Connection, category_id: i64) -> Result<String> {
    let label: Option<(String, String)> = conn
        .query_row(
            "SELECT icon, name FROM categories WHERE id=?1",
            params![category_id],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .optional()?;
    Ok(match label {
        Some((icon, name)) if icon.is_empty() => name,
        Some((icon, name)) => format!("{} {}", icon, name),
        None => format!("#{} (missing)", category_id),
    })
}

fn show(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let e = get_expense(conn, id)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &e)? {
        return Ok(());
    }
    let ccy = crate::config::display_currency(conn)?;
    let rows = vec![
        vec!["ID".into(), e.id.to_string()],
        vec!["Date".into(), e.expense_date.map(|d| d.to_string()).unwrap_or_default()],
        vec!["Category".into(), category_label(conn, e.category_id)?],
        vec!["Amount".into(), fmt_money(&e.amount, ccy.as_deref())],
        vec!["Description".into(), e.description.unwrap_or_default()],
        vec!["Payment method".into(), e.payment_method.unwrap_or_default()],
        vec!["Location".into(), e.location.unwrap_or_default()],
        vec!["Notes".into(), e.notes.unwrap_or_default()],
    ];
    println!("{}", pretty_table(&["Field", "Value"], rows));
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let data = list_expenses(conn, &ExpenseFilter::from_matches(sub)?)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    let ccy = crate::config::display_currency(conn)?;
    let mut rows = Vec::with_capacity(data.len());
    for e in data {
        rows.push(vec![
            e.id.to_string(),
            e.expense_date.map(|d| d.to_string()).unwrap_or_default(),
            category_label(conn, e.category_id)?,
            fmt_money(&e.amount, ccy.as_deref()),
            e.description.unwrap_or_default(),
            e.payment_method.unwrap_or_default(),
        ]);
    }
    println!(
        "{}",
        pretty_table(
            &["ID", "Date", "Category", "Amount", "Description", "Payment"],
            rows,
        )
    );
    Ok(())
}
