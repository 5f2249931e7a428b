// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Settings persisted in the `settings` table.

use anyhow::{Context, Result, bail};
use rusqlite::{Connection, OptionalExtension, params};

pub const WINDOW_MONTHS: &str = "report.window_months";
pub const DISPLAY_CURRENCY: &str = "display.currency";

pub const DEFAULT_WINDOW_MONTHS: u32 = 1;

/// Keys accepted by `config set`, with a short description.
pub const KNOWN_KEYS: &[(&str, &str)] = &[
    (
        WINDOW_MONTHS,
        "months covered by `analytics` when no window is given",
    ),
    (
        DISPLAY_CURRENCY,
        "label printed next to amounts (no conversion)",
    ),
];

pub fn get(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key=?1",
            params![key],
            |r| r.get(0),
        )
        .optional()?;
    Ok(v)
}

pub fn set(conn: &Connection, key: &str, value: &str) -> Result<()> {
    let value = value.trim();
    match key {
        WINDOW_MONTHS => {
            let n: u32 = value
                .parse()
                .with_context(|| format!("Invalid value '{}' for {}", value, key))?;
            if n == 0 {
                bail!("{} must be at least 1", key);
            }
        }
        DISPLAY_CURRENCY => {}
        _ => bail!("Unknown setting '{}'", key),
    }
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    tracing::debug!(key, value, "setting updated");
    Ok(())
}

pub fn list(conn: &Connection) -> Result<Vec<(String, String)>> {
    let mut stmt = conn.prepare("SELECT key, value FROM settings ORDER BY key")?;
    let rows = stmt.query_map([], |r| Ok((r.get::<_, String>(0)?, r.get::<_, String>(1)?)))?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

pub fn window_months(conn: &Connection) -> Result<u32> {
    match get(conn, WINDOW_MONTHS)? {
        Some(s) => s
            .parse()
            .with_context(|| format!("Invalid stored value '{}' for {}", s, WINDOW_MONTHS)),
        None => Ok(DEFAULT_WINDOW_MONTHS),
    }
}

pub fn display_currency(conn: &Connection) -> Result<Option<String>> {
    Ok(get(conn, DISPLAY_CURRENCY)?.filter(|s| !s.is_empty()))
}
