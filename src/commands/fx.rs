// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::SpendError;
use crate::fx::convert;
use crate::session::Session;
use crate::utils::{arg, parse_decimal, pretty_table};
use anyhow::Result;

pub fn handle(session: &Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", _)) => list_rates(session),
        Some(("convert", sub)) => convert_amount(session, sub)?,
        _ => {}
    }
    Ok(())
}

fn list_rates(session: &Session) {
    let table = &session.currencies;
    let data: Vec<Vec<String>> = table
        .rates
        .iter()
        .map(|(code, rate)| {
            let marker = if *code == table.base { "base" } else { "" };
            vec![code.clone(), rate.to_string(), marker.to_string()]
        })
        .collect();
    println!("1 unit of CCY = Multiplier {}", table.base);
    println!("{}", pretty_table(&["CCY", "Multiplier", ""], data));
}

/// Both ends must be table currencies; stored rows fall back to 1.0 for
/// unknown codes, typed ones do not.
fn convert_amount(session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let amount = parse_decimal(arg(sub, "amount")?)?;
    let from = table_code(session, arg(sub, "from")?)?;
    let to = match sub.get_one::<String>("to") {
        Some(code) => table_code(session, code)?,
        None => session.base().to_string(),
    };
    let res = convert(amount, &from, &to, &session.currencies, session.strictness)?;
    println!("{} {} -> {:.4} {}", amount, from, res, to);
    Ok(())
}

fn table_code(session: &Session, code: &str) -> Result<String> {
    session
        .currencies
        .find_code(code)
        .map(str::to_string)
        .ok_or_else(|| SpendError::UnknownCurrency(code.trim().to_string()).into())
}
