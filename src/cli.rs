// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print as JSON lines"),
    )
}

fn expense_fields(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("date")
            .long("date")
            .required(true)
            .help("Expense date, YYYY-MM-DD"),
    )
    .arg(
        Arg::new("category")
            .long("category")
            .required(true)
            .help("Category name"),
    )
    .arg(
        Arg::new("amount")
            .long("amount")
            .required(true)
            .allow_hyphen_values(true)
            .help("Positive decimal amount"),
    )
    .arg(Arg::new("description").long("description"))
    .arg(Arg::new("payment-method").long("payment-method"))
    .arg(Arg::new("location").long("location"))
    .arg(Arg::new("notes").long("notes"))
}

fn window_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("from")
            .long("from")
            .help("First day of the window, YYYY-MM-DD (inclusive)"),
    )
    .arg(
        Arg::new("to")
            .long("to")
            .help("Last day of the window, YYYY-MM-DD (inclusive)"),
    )
}

pub fn build_cli() -> Command {
    Command::new("spendlens")
        .about("Categorized expense tracking with windowed spend analytics")
        .version(clap::crate_version!())
        .subcommand(Command::new("init").about("Create the database and default categories"))
        .subcommand(
            Command::new("category")
                .about("Manage expense categories")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("icon").long("icon").help("Short display glyph")),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(Command::new("rm").arg(Arg::new("name").long("name").required(true))),
        )
        .subcommand(
            Command::new("expense")
                .about("Record, edit and list expenses")
                .subcommand(expense_fields(Command::new("add")))
                .subcommand(expense_fields(
                    Command::new("edit").arg(
                        Arg::new("id")
                            .long("id")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                ))
                .subcommand(
                    Command::new("rm").arg(
                        Arg::new("id")
                            .long("id")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                )
                .subcommand(json_flags(
                    Command::new("show").arg(
                        Arg::new("id")
                            .long("id")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                ))
                .subcommand(json_flags(window_args(
                    Command::new("list")
                        .arg(Arg::new("category").long("category"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))),
        )
        .subcommand(json_flags(window_args(
            Command::new("analytics").about("Summarize spending over a date window"),
        )))
        .subcommand(
            Command::new("import")
                .about("Import expenses from CSV")
                .subcommand(
                    Command::new("expenses").arg(Arg::new("path").long("path").required(true)),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Export expenses")
                .subcommand(
                    Command::new("expenses")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("csv")
                                .value_parser(["csv", "json"]),
                        )
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(
            Command::new("config")
                .about("Read and write settings")
                .subcommand(Command::new("get").arg(Arg::new("key").long("key").required(true)))
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("key").long("key").required(true))
                        .arg(Arg::new("value").long("value").required(true)),
                )
                .subcommand(Command::new("list")),
        )
        .subcommand(Command::new("doctor").about("Check stored data for integrity problems"))
}
