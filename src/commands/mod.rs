// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod categories;
pub mod chart;
pub mod doctor;
pub mod exporter;
pub mod fx;
pub mod reports;
pub mod transactions;

use crate::models::Strictness;
use crate::paths::Paths;
use crate::session::Session;
use crate::utils::fmt_money;
use anyhow::Result;

pub fn session_from(matches: &clap::ArgMatches) -> Result<Session> {
    let paths = Paths::resolve(matches.get_one::<String>("home").map(String::as_str))?;
    let strictness = if matches.get_flag("strict") {
        Strictness::Strict
    } else {
        Strictness::Lenient
    };
    Session::start(paths, strictness)
}

pub fn dispatch(matches: &clap::ArgMatches) -> Result<()> {
    if matches.subcommand().is_none() {
        crate::cli::build_cli().print_help()?;
        println!();
        return Ok(());
    }
    let session = session_from(matches)?;
    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Ledger:     {}", session.paths.ledger.display());
            println!("Categories: {}", session.paths.categories.display());
            println!("Currencies: {}", session.paths.fx.display());
        }
        Some(("add", sub)) => {
            transactions::add(&session, sub)?;
            let view = reports::summary_view(&session)?;
            println!("Total ({}): {}", view.base, fmt_money(&view.total, &view.base));
        }
        Some(("list", sub)) => transactions::list(&session, sub)?,
        Some(("report", sub)) => reports::handle(&session, sub)?,
        Some(("chart", sub)) => chart::handle(&session, sub)?,
        Some(("categories", _)) => categories::handle(&session)?,
        Some(("fx", sub)) => fx::handle(&session, sub)?,
        Some(("export", sub)) => exporter::handle(&session, sub)?,
        Some(("doctor", _)) => doctor::handle(&session)?,
        _ => {}
    }
    Ok(())
}
