// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::dates::parse_day;
use crate::utils::pretty_table;
use anyhow::Result;
use rust_decimal::Decimal;
use rusqlite::Connection;

pub fn handle(conn: &Connection) -> Result<()> {
    let rows = find_issues(conn)?;
    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}

/// Rows that would make an analytics run fail or misreport, as
/// `[issue, detail]` pairs.
pub fn find_issues(conn: &Connection) -> Result<Vec<Vec<String>>> {
    let mut rows = Vec::new();

    // 1) Expenses pointing at a category that no longer exists
    let mut stmt = conn.prepare(
        "SELECT e.id, e.category_id FROM expenses e
         LEFT JOIN categories c ON e.category_id=c.id
         WHERE c.id IS NULL ORDER BY e.id",
    )?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let id: i64 = r.get(0)?;
        let cat: i64 = r.get(1)?;
        rows.push(vec![
            "unknown_category".into(),
            format!("expense {} -> category {}", id, cat),
        ]);
    }

    // 2) Dates and amounts that do not parse, or amounts that are not positive
    let mut stmt2 = conn.prepare("SELECT id, expense_date, amount FROM expenses ORDER BY id")?;
    let mut cur2 = stmt2.query([])?;
    while let Some(r) = cur2.next()? {
        let id: i64 = r.get(0)?;
        let d: Option<String> = r.get(1)?;
        let amt: String = r.get(2)?;
        if d.as_deref().map(parse_day).and_then(|p| p.ok()).is_none() {
            rows.push(vec![
                "invalid_date".into(),
                format!("expense {} date {:?}", id, d.unwrap_or_default()),
            ]);
        }
        match amt.trim().parse::<Decimal>() {
            Ok(v) if v > Decimal::ZERO => {}
            Ok(v) => rows.push(vec![
                "non_positive_amount".into(),
                format!("expense {} amount {}", id, v),
            ]),
            Err(_) => rows.push(vec![
                "invalid_amount".into(),
                format!("expense {} amount {:?}", id, amt),
            ]),
        }
    }

    tracing::debug!(issues = rows.len(), "doctor finished");
    Ok(rows)
}
