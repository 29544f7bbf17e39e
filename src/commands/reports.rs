// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::report::{Analysis, CategoryTotal, MonthTotal};
use crate::session::Session;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::Result;
use rust_decimal::Decimal;
use serde::Serialize;

pub const EMPTY_HINT: &str = "No expenses yet. Record the first one with `spendbook add`.";

pub fn handle(session: &Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(session, sub)?,
        Some(("by-category", sub)) => by_category(session, sub)?,
        Some(("by-month", sub)) => by_month(session, sub)?,
        _ => {}
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct SummaryView {
    pub base: String,
    pub total: Decimal,
    pub by_category: Vec<CategoryTotal>,
    pub by_month: Vec<MonthTotal>,
}

pub fn summary_view(session: &Session) -> Result<SummaryView> {
    Ok(match session.analysis()? {
        Analysis::Empty => SummaryView {
            base: session.base().to_string(),
            total: Decimal::ZERO,
            by_category: Vec::new(),
            by_month: Vec::new(),
        },
        Analysis::Summary(s) => SummaryView {
            base: s.base,
            total: s.total,
            by_category: s.by_category,
            by_month: s.by_month,
        },
    })
}

fn category_rows(items: &[CategoryTotal]) -> Vec<Vec<String>> {
    items
        .iter()
        .map(|c| vec![c.category.clone(), format!("{:.2}", c.total)])
        .collect()
}

fn month_rows(items: &[MonthTotal]) -> Vec<Vec<String>> {
    items
        .iter()
        .map(|m| vec![m.month.clone(), format!("{:.2}", m.total)])
        .collect()
}

fn summary(session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let view = summary_view(session)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &view)? {
        return Ok(());
    }
    if view.by_category.is_empty() {
        println!("{}", EMPTY_HINT);
        return Ok(());
    }
    let hdr = format!("Spent ({})", view.base);
    println!("Total ({}): {}", view.base, fmt_money(&view.total, &view.base));
    println!("{}", pretty_table(&["Category", &hdr], category_rows(&view.by_category)));
    println!("{}", pretty_table(&["Month", &hdr], month_rows(&view.by_month)));
    Ok(())
}

fn by_category(session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let data = summary_view(session)?.by_category;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        if data.is_empty() {
            println!("{}", EMPTY_HINT);
        } else {
            let hdr = format!("Spent ({})", session.base());
            println!("{}", pretty_table(&["Category", &hdr], category_rows(&data)));
        }
    }
    Ok(())
}

fn by_month(session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let data = summary_view(session)?.by_month;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        if data.is_empty() {
            println!("{}", EMPTY_HINT);
        } else {
            let hdr = format!("Spent ({})", session.base());
            println!("{}", pretty_table(&["Month", &hdr], month_rows(&data)));
        }
    }
    Ok(())
}
