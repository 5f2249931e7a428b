// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::category_index::CategoryIndex;
use crate::error::ValidationError;
use crate::models::Category;
use crate::utils::{id_for_category, maybe_print_json, pretty_table};
use anyhow::{Result, bail};
use rusqlite::{Connection, params};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let icon = sub.get_one::<String>("icon").map(String::as_str).unwrap_or("");
            let c = add_category(conn, name, icon)?;
            println!("Added category '{}' {}", c.name, c.icon);
        }
        Some(("list", sub)) => {
            let data: Vec<Category> = load_index(conn)?.iter().cloned().collect();
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
                let rows = data
                    .into_iter()
                    .map(|c| vec![c.id.to_string(), c.icon, c.name])
                    .collect();
                println!("{}", pretty_table(&["ID", "Icon", "Category"], rows));
            }
        }
        Some(("rm", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            remove_category(conn, name)?;
            println!("Removed category '{}'", name.trim());
        }
        _ => {}
    }
    Ok(())
}

pub fn add_category(conn: &Connection, name: &str, icon: &str) -> Result<Category> {
    let name = name.trim();
    if name.is_empty() {
        bail!("Category name must not be empty");
    }
    let icon = icon.trim();
    conn.execute(
        "INSERT INTO categories(name, icon) VALUES (?1, ?2)",
        params![name, icon],
    )?;
    Ok(Category {
        id: conn.last_insert_rowid(),
        name: name.to_string(),
        icon: icon.to_string(),
    })
}

/// Deletes a category that no expense references.
pub fn remove_category(conn: &Connection, name: &str) -> Result<()> {
    let id = id_for_category(conn, name)?;
    let used: i64 = conn.query_row(
        "SELECT COUNT(*) FROM expenses WHERE category_id=?1",
        params![id],
        |r| r.get(0),
    )?;
    if used > 0 {
        return Err(ValidationError::CategoryInUse {
            name: name.trim().to_string(),
            expenses: used,
        }
        .into());
    }
    conn.execute("DELETE FROM categories WHERE id=?1", params![id])?;
    Ok(())
}

pub fn load_index(conn: &Connection) -> Result<CategoryIndex> {
    crate::db::load_categories(conn)
}
