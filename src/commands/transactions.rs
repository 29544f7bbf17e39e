// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::SpendError;
use crate::models::{Expense, PaymentMethod};
use crate::session::Session;
use crate::utils::{
    arg, maybe_print_json, month_key, non_blank, parse_date, parse_decimal, parse_month,
    pretty_table,
};
use anyhow::Result;
use chrono::Local;
use serde::Serialize;

pub fn add(session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let expense = expense_from_args(session, sub)?;
    session.ledger().append(&expense)?;
    println!(
        "Saved {} {} on {} ({}, {})",
        expense.amount, expense.currency, expense.date, expense.category, expense.payment_method
    );
    Ok(())
}

/// Validate `add` arguments the way the entry form constrains its fields:
/// currency from the table, category from the configured list, amount >= 0.
pub fn expense_from_args(session: &Session, sub: &clap::ArgMatches) -> Result<Expense> {
    let amount = parse_decimal(arg(sub, "amount")?)?;
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(SpendError::NegativeAmount(amount.to_string()).into());
    }
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d.trim())?,
        None => Local::now().date_naive(),
    };

    let currency = match sub.get_one::<String>("currency").map(|s| s.trim()) {
        None => session.base().to_string(),
        Some(c) => session
            .currencies
            .find_code(c)
            .map(str::to_string)
            .ok_or_else(|| SpendError::UnknownCurrency(c.to_string()))?,
    };

    let category = arg(sub, "category")?.to_string();
    if !session.categories.categories.is_empty() && !session.categories.contains(&category) {
        return Err(SpendError::UnknownCategory(category).into());
    }

    let payment_method: PaymentMethod = arg(sub, "payment")?.parse()?;

    Ok(Expense {
        date,
        amount: amount.round_dp(2),
        currency,
        category,
        merchant: non_blank(sub.get_one::<String>("merchant").map(String::as_str)),
        payment_method,
        note: non_blank(sub.get_one::<String>("note").map(String::as_str)),
    })
}

pub fn list(session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(session, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        if data.is_empty() {
            println!("No expenses recorded yet.");
            return Ok(());
        }
        let base_hdr = format!("Amount ({})", session.base());
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.date.clone(),
                    r.amount.clone(),
                    r.currency.clone(),
                    r.base_amount.clone(),
                    r.category.clone(),
                    r.merchant.clone(),
                    r.payment_method.clone(),
                    r.note.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Date", "Amount", "CCY", &base_hdr, "Category", "Merchant", "Payment", "Note"],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct ExpenseRow {
    pub date: String,
    pub amount: String,
    pub currency: String,
    pub base_amount: String,
    pub category: String,
    pub merchant: String,
    pub payment_method: String,
    pub note: String,
}

/// Usable expenses, oldest first. `--limit` keeps the most recent entries.
pub fn query_rows(session: &Session, sub: &clap::ArgMatches) -> Result<Vec<ExpenseRow>> {
    let month = match sub.get_one::<String>("month") {
        Some(m) => Some(parse_month(m.trim())?),
        None => None,
    };
    let category = sub.get_one::<String>("category").map(|s| s.trim());

    let mut records = session.normalized()?;
    records.retain(|r| {
        month.as_deref().is_none_or(|m| month_key(r.date) == m)
            && category.is_none_or(|c| r.category.as_deref() == Some(c))
    });
    records.sort_by_key(|r| r.date);
    if let Some(limit) = sub.get_one::<usize>("limit") {
        let skip = records.len().saturating_sub(*limit);
        records.drain(..skip);
    }

    Ok(records
        .into_iter()
        .map(|r| ExpenseRow {
            date: r.date.to_string(),
            amount: r.amount.to_string(),
            currency: r.currency,
            base_amount: format!("{:.2}", r.base_amount),
            category: r.category.unwrap_or_default(),
            merchant: r.merchant.unwrap_or_default(),
            payment_method: r.payment_method.unwrap_or_default(),
            note: r.note.unwrap_or_default(),
        })
        .collect())
}
