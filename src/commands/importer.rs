// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::ValidationError;
use crate::models::ExpenseInput;
use crate::utils::{non_blank, parse_date, parse_decimal};
use anyhow::{Context, Result};
use csv::ReaderBuilder;
use rusqlite::{Connection, params};
use rust_decimal::Decimal;
use std::collections::{HashMap, hash_map::Entry};
use std::io::Read;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("expenses", sub)) => {
            let path = sub.get_one::<String>("path").unwrap().trim();
            let n = import_expenses_from_path(conn, path)?;
            println!("Imported {} expense(s) from {}", n, path);
            Ok(())
        }
        _ => Ok(()),
    }
}

pub fn import_expenses_from_path(conn: &mut Connection, path: &str) -> Result<usize> {
    let file = std::fs::File::open(path).with_context(|| format!("Open CSV {}", path))?;
    import_expenses(conn, file)
}

/// Reads `date,category,amount,description,payment_method,location,notes`
/// rows. The import is one transaction: any invalid row aborts all of it.
pub fn import_expenses<R: Read>(conn: &mut Connection, reader: R) -> Result<usize> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let tx = conn.transaction()?;
    let mut category_cache: HashMap<String, i64> = HashMap::new();
    let mut count = 0usize;

    for (i, result) in rdr.records().enumerate() {
        let line = i + 2;
        let rec = result.with_context(|| format!("Malformed CSV at line {}", line))?;
        let field = |idx: usize| rec.get(idx).map(|s| s.to_string());

        let date_raw = field(0).context("date missing")?;
        let category = field(1).context("category missing")?.trim().to_string();
        let amount_raw = field(2).context("amount missing")?;

        let input = ExpenseInput {
            expense_date: parse_date(&date_raw)
                .with_context(|| format!("Line {}: invalid expense date", line))?,
            amount: parse_decimal(&amount_raw)
                .with_context(|| format!("Line {}: invalid amount", line))?,
            description: non_blank(field(3).as_ref()),
            payment_method: non_blank(field(4).as_ref()),
            location: non_blank(field(5).as_ref()),
            notes: non_blank(field(6).as_ref()),
            category,
        };
        if input.amount <= Decimal::ZERO {
            return Err(anyhow::Error::from(ValidationError::NonPositiveAmount(
                input.amount,
            ))
            .context(format!("Line {}", line)));
        }

        let cat_id = match category_cache.entry(input.category.clone()) {
            Entry::Occupied(e) => *e.get(),
            Entry::Vacant(v) => {
                let id = crate::utils::id_for_category(&tx, &input.category)
                    .with_context(|| format!("Line {}", line))?;
                *v.insert(id)
            }
        };

        tx.execute(
            "INSERT INTO expenses(category_id, amount, expense_date, description, payment_method, location, notes)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                cat_id,
                input.amount.to_string(),
                input.expense_date.to_string(),
                input.description,
                input.payment_method,
                input.location,
                input.notes
            ],
        )?;
        count += 1;
    }

    tx.commit()?;
    tracing::info!(count, "imported expenses");
    Ok(count)
}
