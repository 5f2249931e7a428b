// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::category_index::CategoryIndex;
use crate::dates::parse_day;
use crate::error::AnalyticsError;
use crate::models::{Category, Expense};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{Connection, Row, params};
use rust_decimal::Decimal;
use std::fs;
use std::path::PathBuf;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Spendlens", "spendlens"));

/// Overrides the platform data-dir location of the database file.
pub const DB_ENV: &str = "SPENDLENS_DB";

const DEFAULT_CATEGORIES: &[(&str, &str)] = &[
    ("Food", "🍔"),
    ("Transport", "🚗"),
    ("Shopping", "🛍"),
    ("Entertainment", "🎬"),
    ("Bills", "💡"),
    ("Health", "💊"),
    ("Other", "📦"),
];

pub fn db_path() -> Result<PathBuf> {
    if let Some(p) = std::env::var_os(DB_ENV).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(p));
    }
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("spendlens.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    let path = db_path()?;
    tracing::debug!(path = %path.display(), "opening database");
    let mut conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&mut conn)?;
    Ok(conn)
}

/// Creates tables if missing and seeds the default categories into an empty
/// category table.
pub fn init_schema(conn: &mut Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS categories(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        icon TEXT NOT NULL DEFAULT ''
    );

    CREATE TABLE IF NOT EXISTS expenses(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        category_id INTEGER NOT NULL,
        amount TEXT NOT NULL,
        expense_date TEXT NOT NULL,
        description TEXT,
        payment_method TEXT,
        location TEXT,
        notes TEXT,
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        FOREIGN KEY(category_id) REFERENCES categories(id)
    );
    CREATE INDEX IF NOT EXISTS idx_expenses_date ON expenses(expense_date);
    CREATE INDEX IF NOT EXISTS idx_expenses_category ON expenses(category_id);
    "#,
    )?;

    let existing: i64 = conn.query_row("SELECT COUNT(*) FROM categories", [], |r| r.get(0))?;
    if existing == 0 {
        let tx = conn.transaction()?;
        for (name, icon) in DEFAULT_CATEGORIES {
            tx.execute(
                "INSERT INTO categories(name, icon) VALUES (?1, ?2)",
                params![name, icon],
            )?;
        }
        tx.commit()?;
        tracing::info!(count = DEFAULT_CATEGORIES.len(), "seeded default categories");
    }
    Ok(())
}

pub(crate) const EXPENSE_COLUMNS: &str = "id, category_id, amount, expense_date, description, payment_method, location, notes";

/// Decodes a row selected with [`EXPENSE_COLUMNS`]. Text that is not a valid
/// date or amount is reported against the expense id.
pub(crate) fn expense_from_row(r: &Row<'_>) -> Result<Expense> {
    let id: i64 = r.get(0)?;
    let amount_s: String = r.get(2)?;
    let date_s: Option<String> = r.get(3)?;
    let amount = amount_s
        .trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid amount '{}' on expense {}", amount_s, id))?;
    let expense_date = match date_s.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(s) => Some(parse_day(s).map_err(|_| AnalyticsError::InvalidDate {
            expense_id: Some(id),
            value: Some(s.to_string()),
        })?),
    };
    Ok(Expense {
        id,
        category_id: r.get(1)?,
        amount,
        expense_date,
        description: r.get(4)?,
        payment_method: r.get(5)?,
        location: r.get(6)?,
        notes: r.get(7)?,
    })
}

pub fn load_categories(conn: &Connection) -> Result<CategoryIndex> {
    let mut stmt = conn.prepare("SELECT id, name, icon FROM categories ORDER BY id")?;
    let rows = stmt.query_map([], |r| {
        Ok(Category {
            id: r.get(0)?,
            name: r.get(1)?,
            icon: r.get(2)?,
        })
    })?;
    let mut index = CategoryIndex::new();
    for row in rows {
        index.insert(row?);
    }
    Ok(index)
}

/// Reads every expense and category as one consistent snapshot.
pub fn load_snapshot(conn: &mut Connection) -> Result<(Vec<Expense>, CategoryIndex)> {
    let tx = conn.transaction()?;
    let index = load_categories(&tx)?;
    let mut expenses = Vec::new();
    {
        let mut stmt = tx.prepare(&format!(
            "SELECT {} FROM expenses ORDER BY expense_date, id",
            EXPENSE_COLUMNS
        ))?;
        let mut rows = stmt.query([])?;
        while let Some(r) = rows.next()? {
            expenses.push(expense_from_row(r)?);
        }
    }
    tx.commit()?;
    tracing::debug!(
        expenses = expenses.len(),
        categories = index.len(),
        "loaded snapshot"
    );
    Ok((expenses, index))
}
