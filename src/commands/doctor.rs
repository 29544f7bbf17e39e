// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::fx::normalize_ledger;
use crate::models::{Parsed, Strictness};
use crate::session::Session;
use crate::utils::pretty_table;
use anyhow::Result;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::fmt::Debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub kind: &'static str,
    pub detail: String,
}

fn cell<T: Debug>(p: &Parsed<T>) -> String {
    match p {
        Parsed::Value(v) => format!("{:?}", v),
        Parsed::Missing => "<empty>".to_string(),
        Parsed::Invalid(raw) => format!("'{}'", raw),
    }
}

/// Problems that reports silently work around in lenient mode.
pub fn diagnose(session: &Session) -> Result<Vec<Issue>> {
    let mut issues = Vec::new();
    let table = &session.currencies;

    // 1) Base currency should convert to itself at 1.0
    match table.multiplier(&table.base) {
        Some(m) if m == Decimal::ONE => {}
        Some(m) => issues.push(Issue {
            kind: "base_rate",
            detail: format!("{} has multiplier {}, expected 1", table.base, m),
        }),
        None => issues.push(Issue {
            kind: "base_rate",
            detail: format!("{} missing from rates", table.base),
        }),
    }

    // 2) Rows left out of reports, 3) currencies treated as base
    let records = session.ledger().load()?;
    let mut unknown: BTreeMap<String, usize> = BTreeMap::new();
    for r in &records {
        if !r.is_usable() {
            issues.push(Issue {
                kind: "excluded_row",
                detail: format!(
                    "line {}: date {}, amount {}",
                    r.line,
                    cell(&r.date),
                    cell(&r.amount)
                ),
            });
            continue;
        }
        if let Some(ccy) = &r.currency {
            if table.multiplier(ccy).is_none() {
                *unknown.entry(ccy.clone()).or_insert(0) += 1;
            }
        }
    }
    // 4) Rows whose base amount would overflow a total
    for line in normalize_ledger(&records, table, Strictness::Lenient)?.out_of_range {
        issues.push(Issue {
            kind: "out_of_range",
            detail: format!("line {}: amount too large to total", line),
        });
    }
    for (ccy, n) in unknown {
        issues.push(Issue {
            kind: "unknown_currency",
            detail: format!("{} ({} rows counted at 1.0)", ccy, n),
        });
    }
    Ok(issues)
}

pub fn handle(session: &Session) -> Result<()> {
    let issues = diagnose(session)?;
    if issues.is_empty() {
        println!("doctor: no issues found");
    } else {
        let rows = issues
            .into_iter()
            .map(|i| vec![i.kind.to_string(), i.detail])
            .collect();
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
