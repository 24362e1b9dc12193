// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{crate_version, Arg, ArgAction, Command};

fn user_arg() -> Arg {
    Arg::new("user")
        .long("user")
        .value_name("NAME")
        .default_value("default")
        .help("User profile to operate on")
}

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
            .help("Print as JSON lines"),
    )
}

pub fn build_cli() -> Command {
    Command::new("spendguard")
        .version(crate_version!())
        .about("Personal budget tracking with spent reconciliation and spending alerts")
        .subcommand(Command::new("init").about("Initialize the database"))
        .subcommand(
            Command::new("user")
                .about("Manage user profiles")
                .subcommand(
                    Command::new("add").about("Add a user").arg(
                        Arg::new("name")
                            .long("name")
                            .required(true)
                            .help("Unique user name"),
                    ),
                )
                .subcommand(Command::new("list").about("List users"))
                .subcommand(
                    Command::new("rm")
                        .about("Remove a user and all their data")
                        .arg(Arg::new("name").long("name").required(true)),
                ),
        )
        .subcommand(
            Command::new("budget")
                .about("Manage category budgets")
                .subcommand(
                    Command::new("add")
                        .about("Create a budget")
                        .arg(user_arg())
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .required(true)
                                .help("Spending limit, a positive decimal"),
                        )
                        .arg(Arg::new("icon").long("icon"))
                        .arg(Arg::new("color").long("color"))
                        .arg(Arg::new("description").long("description")),
                )
                .subcommand(json_flags(
                    Command::new("list").about("List budgets").arg(user_arg()),
                ))
                .subcommand(
                    Command::new("status")
                        .about("Show limit, spent, and percent used per budget")
                        .arg(user_arg()),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a budget; its transactions are kept, unlinked")
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .required(true)
                                .value_parser(clap::value_parser!(i64)),
                        ),
                )
                .subcommand(
                    Command::new("recompute")
                        .about("Re-derive a budget's spent total from its transactions")
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .required(true)
                                .value_parser(clap::value_parser!(i64)),
                        ),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and manage transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction")
                        .arg(user_arg())
                        .arg(Arg::new("description").long("description").required(true))
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .required(true)
                                .help("Amount as a positive decimal; sign follows --kind"),
                        )
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .required(true)
                                .help("YYYY-MM-DD, optionally with HH:MM"),
                        )
                        .arg(
                            Arg::new("kind")
                                .long("kind")
                                .required(true)
                                .value_parser(["expense", "income"]),
                        )
                        .arg(
                            Arg::new("budget")
                                .long("budget")
                                .value_parser(clap::value_parser!(i64))
                                .help("Budget id the expense counts toward"),
                        ),
                )
                .subcommand(
                    Command::new("edit")
                        .about("Edit a transaction; only the given fields change")
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .required(true)
                                .value_parser(clap::value_parser!(i64)),
                        )
                        .arg(Arg::new("description").long("description"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("amount").long("amount"))
                        .arg(Arg::new("date").long("date"))
                        .arg(
                            Arg::new("kind")
                                .long("kind")
                                .value_parser(["expense", "income"]),
                        )
                        .arg(
                            Arg::new("budget")
                                .long("budget")
                                .value_parser(clap::value_parser!(i64)),
                        )
                        .arg(
                            Arg::new("detach")
                                .long("detach")
                                .action(ArgAction::SetTrue)
                                .conflicts_with("budget")
                                .help("Unlink the transaction from its budget"),
                        ),
                )
                .subcommand(
                    Command::new("rm").about("Delete a transaction").arg(
                        Arg::new("id")
                            .long("id")
                            .required(true)
                            .value_parser(clap::value_parser!(i64)),
                    ),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List transactions")
                        .arg(user_arg())
                        .arg(Arg::new("month").long("month").help("Filter by YYYY-MM"))
                        .arg(Arg::new("category").long("category"))
                        .arg(
                            Arg::new("budget")
                                .long("budget")
                                .value_parser(clap::value_parser!(i64)),
                        )
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(clap::value_parser!(usize)),
                        ),
                )),
        )
        .subcommand(
            Command::new("settings")
                .about("Per-user alerting and currency display settings")
                .subcommand(
                    Command::new("set")
                        .about("Set one or more settings")
                        .arg(user_arg())
                        .arg(
                            Arg::new("large-tx")
                                .long("large-tx")
                                .help("Single-expense amount that triggers a large-transaction alert"),
                        )
                        .arg(
                            Arg::new("budget-threshold")
                                .long("budget-threshold")
                                .help("Fraction of a budget (0..1) that triggers a budget alert"),
                        )
                        .arg(Arg::new("symbol").long("symbol"))
                        .arg(
                            Arg::new("position")
                                .long("position")
                                .value_parser(["before", "after"]),
                        )
                        .arg(Arg::new("decimal-places").long("decimal-places"))
                        .arg(Arg::new("thousands-sep").long("thousands-sep"))
                        .arg(Arg::new("decimal-sep").long("decimal-sep")),
                )
                .subcommand(
                    Command::new("show")
                        .about("Show effective settings")
                        .arg(user_arg()),
                ),
        )
        .subcommand(
            Command::new("export").about("Export data").subcommand(
                Command::new("transactions")
                    .about("Export a user's transactions")
                    .arg(user_arg())
                    .arg(
                        Arg::new("format")
                            .long("format")
                            .required(true)
                            .help("csv or json"),
                    )
                    .arg(Arg::new("out").long("out").required(true)),
            ),
        )
        .subcommand(
            Command::new("doctor")
                .about("Check every budget's spent total against its transactions")
                .arg(
                    Arg::new("fix")
                        .long("fix")
                        .action(ArgAction::SetTrue)
                        .help("Recompute drifted budgets"),
                ),
        )
}
