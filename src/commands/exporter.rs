// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::SpendError;
use crate::session::Session;
use crate::utils::arg;
use anyhow::{Context, Result};
use serde_json::json;

pub fn handle(session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = arg(sub, "format")?.to_lowercase();
    let out = arg(sub, "out")?;
    if fmt != "csv" && fmt != "json" {
        return Err(SpendError::UnsupportedFormat(fmt).into());
    }

    let mut records = session.normalized()?;
    records.sort_by_key(|r| r.date);

    match fmt.as_str() {
        "csv" => {
            let mut wtr =
                csv::Writer::from_path(out).with_context(|| format!("Create {}", out))?;
            wtr.write_record([
                "date",
                "amount",
                "currency",
                "base_amount",
                "category",
                "merchant",
                "payment_method",
                "note",
            ])?;
            for r in records {
                wtr.write_record([
                    r.date.to_string(),
                    r.amount.to_string(),
                    r.currency,
                    format!("{:.2}", r.base_amount),
                    r.category.unwrap_or_default(),
                    r.merchant.unwrap_or_default(),
                    r.payment_method.unwrap_or_default(),
                    r.note.unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        _ => {
            let items: Vec<_> = records
                .into_iter()
                .map(|r| {
                    json!({
                        "date": r.date.to_string(),
                        "amount": r.amount.to_string(),
                        "currency": r.currency,
                        "base_amount": format!("{:.2}", r.base_amount),
                        "category": r.category,
                        "merchant": r.merchant,
                        "payment_method": r.payment_method,
                        "note": r.note,
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)
                .with_context(|| format!("Write {}", out))?;
        }
    }
    println!("Exported expenses to {}", out);
    Ok(())
}
