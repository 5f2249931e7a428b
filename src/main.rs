// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use spendlens::{AnalyticsError, cli, commands, db, logging};

fn main() -> Result<()> {
    logging::init();
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let mut conn = db::open_or_init()?;

    let outcome = match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path()?.display());
            Ok(())
        }
        Some(("category", sub)) => commands::categories::handle(&conn, sub),
        Some(("expense", sub)) => commands::expenses::handle(&conn, sub),
        Some(("analytics", sub)) => commands::analytics::handle(&mut conn, sub),
        Some(("import", sub)) => commands::importer::handle(&mut conn, sub),
        Some(("export", sub)) => commands::exporter::handle(&conn, sub),
        Some(("config", sub)) => commands::settings::handle(&conn, sub),
        Some(("doctor", _)) => commands::doctor::handle(&conn),
        _ => {
            cli::build_cli().print_help()?;
            println!();
            Ok(())
        }
    };

    if let Err(err) = &outcome {
        if let Some(a) = err.downcast_ref::<AnalyticsError>() {
            eprintln!("hint: {}", commands::analytics::hint(a));
        }
    }
    outcome
}
