// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
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
    Command::new("spendbook")
        .version(clap::crate_version!())
        .about("Personal expense ledger with base-currency reports")
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Enable verbose logging"),
        )
        .arg(
            Arg::new("home")
                .long("home")
                .global(true)
                .env("SPENDBOOK_HOME")
                .help("Keep data/ and config/ under this directory"),
        )
        .arg(
            Arg::new("strict")
                .long("strict")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Fail on unparseable rows and unknown currencies"),
        )
        .subcommand(Command::new("init").about("Create missing ledger and config files"))
        .subcommand(
            Command::new("add")
                .about("Record an expense")
                .arg(Arg::new("amount").long("amount").short('a').required(true))
                .arg(
                    Arg::new("date")
                        .long("date")
                        .short('d')
                        .help("YYYY-MM-DD, defaults to today"),
                )
                .arg(
                    Arg::new("currency")
                        .long("currency")
                        .short('c')
                        .help("Defaults to the base currency"),
                )
                .arg(
                    Arg::new("payment")
                        .long("payment")
                        .short('p')
                        .default_value("card")
                        .value_parser(["card", "cash", "transfer", "standing-order"]),
                )
                .arg(Arg::new("category").long("category").short('k').required(true))
                .arg(Arg::new("merchant").long("merchant").short('m'))
                .arg(Arg::new("note").long("note").short('n')),
        )
        .subcommand(json_flags(
            Command::new("list")
                .about("List expenses in base currency")
                .arg(Arg::new("month").long("month").help("YYYY-MM"))
                .arg(Arg::new("category").long("category"))
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize)),
                ),
        ))
        .subcommand(
            Command::new("report")
                .about("Totals in base currency")
                .subcommand_required(true)
                .subcommand(json_flags(
                    Command::new("summary").about("Total plus category and month tables"),
                ))
                .subcommand(json_flags(
                    Command::new("by-category").about("Totals per category, largest first"),
                ))
                .subcommand(json_flags(
                    Command::new("by-month").about("Totals per calendar month"),
                )),
        )
        .subcommand(
            Command::new("chart")
                .about("Write the category bar chart and monthly line chart as SVG")
                .arg(Arg::new("out").long("out").short('o').default_value(".")),
        )
        .subcommand(Command::new("categories").about("List configured categories"))
        .subcommand(
            Command::new("fx")
                .about("Inspect the currency table")
                .subcommand_required(true)
                .subcommand(Command::new("list").about("Show base currency and multipliers"))
                .subcommand(
                    Command::new("convert")
                        .about("Convert an amount between table currencies")
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("from").long("from").required(true))
                        .arg(Arg::new("to").long("to").help("Defaults to the base currency")),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Export expenses with base-currency amounts")
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .default_value("csv"),
                )
                .arg(Arg::new("out").long("out").short('o').required(true)),
        )
        .subcommand(
            Command::new("doctor")
                .about("Show rows left out of reports and currencies missing from the table"),
        )
}
