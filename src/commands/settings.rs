// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config;
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("get", sub)) => {
            let key = sub.get_one::<String>("key").unwrap().trim();
            match config::get(conn, key)? {
                Some(v) => println!("{}", v),
                None => println!("{} is not set", key),
            }
        }
        Some(("set", sub)) => {
            let key = sub.get_one::<String>("key").unwrap().trim();
            let value = sub.get_one::<String>("value").unwrap();
            config::set(conn, key, value)?;
            println!("Set {} = {}", key, value.trim());
        }
        Some(("list", _)) => {
            let stored = config::list(conn)?;
            let rows = config::KNOWN_KEYS
                .iter()
                .map(|(key, about)| {
                    let value = stored
                        .iter()
                        .find(|(k, _)| k == key)
                        .map(|(_, v)| v.clone())
                        .unwrap_or_default();
                    vec![key.to_string(), value, about.to_string()]
                })
                .collect();
            println!("{}", pretty_table(&["Key", "Value", "Meaning"], rows));
        }
        _ => {}
    }
    Ok(())
}
