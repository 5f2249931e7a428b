// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, bail};
use rusqlite::Connection;
use serde_json::json;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("expenses", sub)) => {
            let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
            let out = sub.get_one::<String>("out").unwrap().trim();
            let n = export_expenses(conn, &fmt, out)?;
            println!("Exported {} expense(s) to {}", n, out);
            Ok(())
        }
        _ => Ok(()),
    }
}

type ExportRow = (
    String,
    String,
    String,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
);

/// Writes every expense, oldest first, with its category name. Amounts keep
/// their stored decimal text. Nothing is written when an expense points at a
/// missing category.
pub fn export_expenses(conn: &Connection, fmt: &str, out: &str) -> Result<usize> {
    if fmt != "csv" && fmt != "json" {
        bail!("Unknown format: {} (use csv|json)", fmt);
    }
    let mut stmt = conn.prepare(
        "SELECT e.id, e.expense_date, c.name, e.amount, e.description, e.payment_method, e.location, e.notes
         FROM expenses e
         LEFT JOIN categories c ON e.category_id=c.id
         ORDER BY e.expense_date, e.id",
    )?;
    let mut rows = stmt.query([])?;
    let mut data: Vec<ExportRow> = Vec::new();
    while let Some(r) = rows.next()? {
        let id: i64 = r.get(0)?;
        let Some(category) = r.get::<_, Option<String>>(2)? else {
            bail!(
                "Expense {} references a missing category; run `spendlens doctor`",
                id
            );
        };
        data.push((
            r.get(1)?,
            category,
            r.get(3)?,
            r.get(4)?,
            r.get(5)?,
            r.get(6)?,
            r.get(7)?,
        ));
    }

    if fmt == "csv" {
        let mut wtr = csv::Writer::from_path(out)?;
        wtr.write_record([
            "date",
            "category",
            "amount",
            "description",
            "payment_method",
            "location",
            "notes",
        ])?;
        for (d, cat, amt, desc, pay, loc, notes) in &data {
            wtr.write_record([
                d.as_str(),
                cat.as_str(),
                amt.as_str(),
                desc.as_deref().unwrap_or_default(),
                pay.as_deref().unwrap_or_default(),
                loc.as_deref().unwrap_or_default(),
                notes.as_deref().unwrap_or_default(),
            ])?;
        }
        wtr.flush()?;
    } else {
        let items: Vec<_> = data
            .iter()
            .map(|(d, cat, amt, desc, pay, loc, notes)| {
                json!({
                    "date": d, "category": cat, "amount": amt, "description": desc,
                    "paymentMethod": pay, "location": loc, "notes": notes
                })
            })
            .collect();
        std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
    }
    let count = data.len();
    tracing::debug!(count, out, "exported expenses");
    Ok(count)
}
