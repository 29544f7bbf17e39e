// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::CurrencyTable;
use crate::error::SpendError;
use crate::ledger::LedgerRecord;
use crate::models::Strictness;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::warn;

/// A ledger row expressed in the base currency.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedExpense {
    pub date: NaiveDate,
    pub amount: Decimal,
    pub currency: String,
    pub multiplier: Decimal,
    pub base_amount: Decimal,
    pub category: Option<String>,
    pub merchant: Option<String>,
    pub payment_method: Option<String>,
    pub note: Option<String>,
}

/// Multiplier for `code`. Unknown codes count as base currency when lenient.
pub fn multiplier_for(table: &CurrencyTable, code: &str, strictness: Strictness) -> Result<Decimal> {
    match table.multiplier(code) {
        Some(m) => Ok(m),
        None if strictness == Strictness::Strict => {
            Err(SpendError::UnknownCurrency(code.to_string()).into())
        }
        None => {
            warn!(currency = code, "Currency missing from table, using 1.0");
            Ok(Decimal::ONE)
        }
    }
}

/// A normalized ledger plus the lines that were left out because their base
/// amount does not fit a running total.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Normalized {
    pub rows: Vec<NormalizedExpense>,
    pub out_of_range: Vec<u64>,
}

/// Convert every usable row to base currency. Rows without a parsed date and
/// amount are skipped; rows without a currency are taken to be in base.
pub fn normalize(
    records: &[LedgerRecord],
    table: &CurrencyTable,
    strictness: Strictness,
) -> Result<Vec<NormalizedExpense>> {
    Ok(normalize_ledger(records, table, strictness)?.rows)
}

/// Like [`normalize`], also reporting the rows dropped for overflow.
///
/// The sum of `|base_amount|` over the kept rows always fits a `Decimal`, so
/// any total over a subset of them can be added without overflow. A row
/// that would break this is an error when strict and dropped otherwise.
pub fn normalize_ledger(
    records: &[LedgerRecord],
    table: &CurrencyTable,
    strictness: Strictness,
) -> Result<Normalized> {
    let mut out = Normalized {
        rows: Vec::with_capacity(records.len()),
        out_of_range: Vec::new(),
    };
    let mut magnitude = Decimal::ZERO;
    for r in records {
        let (Some(date), Some(amount)) = (r.date.value(), r.amount.value()) else {
            continue;
        };
        let currency = r.currency.clone().unwrap_or_else(|| table.base.clone());
        let multiplier = multiplier_for(table, &currency, strictness)?;
        let fits = amount
            .checked_mul(multiplier)
            .and_then(|b| magnitude.checked_add(b.abs()).map(|m| (b, m)));
        let Some((base_amount, next)) = fits else {
            if strictness == Strictness::Strict {
                return Err(SpendError::AmountOutOfRange {
                    line: r.line,
                    amount: amount.to_string(),
                    currency,
                }
                .into());
            }
            warn!(line = r.line, %amount, currency = %currency, "Amount out of range, row excluded from reports");
            out.out_of_range.push(r.line);
            continue;
        };
        magnitude = next;
        out.rows.push(NormalizedExpense {
            date: *date,
            amount: *amount,
            base_amount,
            currency,
            multiplier,
            category: r.category.clone(),
            merchant: r.merchant.clone(),
            payment_method: r.payment_method.clone(),
            note: r.note.clone(),
        });
    }
    Ok(out)
}

/// Convert between two table currencies by way of the base currency.
pub fn convert(
    amount: Decimal,
    from: &str,
    to: &str,
    table: &CurrencyTable,
    strictness: Strictness,
) -> Result<Decimal> {
    if from == to {
        return Ok(amount);
    }
    let in_base = amount
        .checked_mul(multiplier_for(table, from, strictness)?)
        .with_context(|| format!("{} {} is out of range in {}", amount, from, table.base))?;
    let to_mult = multiplier_for(table, to, strictness)?;
    if to_mult.is_zero() {
        return Ok(in_base);
    }
    in_base
        .checked_div(to_mult)
        .with_context(|| format!("{} {} is out of range in {}", amount, from, to))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Parsed;

    fn table() -> CurrencyTable {
        CurrencyTable::new("EUR", &[("EUR", Decimal::ONE), ("TRY", Decimal::new(3, 2))])
    }

    fn row(amount: &str, currency: Option<&str>) -> LedgerRecord {
        LedgerRecord {
            line: 2,
            date: Parsed::Value(NaiveDate::from_ymd_opt(2025, 8, 1).unwrap()),
            amount: Parsed::Value(amount.parse().unwrap()),
            currency: currency.map(str::to_string),
            category: Some("Travel".into()),
            merchant: None,
            payment_method: Some("card".into()),
            note: None,
        }
    }

    #[test]
    fn try_amount_is_scaled_to_base() {
        let out = normalize(&[row("100", Some("TRY"))], &table(), Strictness::Lenient).unwrap();
        assert_eq!(out[0].base_amount, Decimal::new(3, 0));
        assert_eq!(out[0].multiplier, Decimal::new(3, 2));
    }

    #[test]
    fn unknown_currency_passes_through_when_lenient() {
        let out = normalize(&[row("42.10", Some("USD"))], &table(), Strictness::Lenient).unwrap();
        assert_eq!(out[0].base_amount, Decimal::new(4210, 2));
        assert_eq!(out[0].multiplier, Decimal::ONE);
    }

    #[test]
    fn unknown_currency_fails_when_strict() {
        let err = normalize(&[row("1", Some("USD"))], &table(), Strictness::Strict).unwrap_err();
        assert_eq!(
            err.downcast_ref::<SpendError>(),
            Some(&SpendError::UnknownCurrency("USD".into()))
        );
    }

    #[test]
    fn blank_currency_defaults_to_base() {
        let out = normalize(&[row("8", None)], &table(), Strictness::Strict).unwrap();
        assert_eq!(out[0].currency, "EUR");
        assert_eq!(out[0].base_amount, Decimal::new(8, 0));
    }

    #[test]
    fn unusable_rows_are_skipped() {
        let mut bad_date = row("5", Some("EUR"));
        bad_date.date = Parsed::Invalid("soon".into());
        let mut no_amount = row("5", Some("EUR"));
        no_amount.amount = Parsed::Missing;
        let out = normalize(
            &[bad_date, row("2", Some("EUR")), no_amount],
            &table(),
            Strictness::Lenient,
        )
        .unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].base_amount, Decimal::new(2, 0));
    }

    #[test]
    fn convert_goes_through_base() {
        let t = CurrencyTable::new(
            "EUR",
            &[("EUR", Decimal::ONE), ("TRY", Decimal::new(3, 2)), ("USD", Decimal::new(9, 1))],
        );
        // 300 TRY -> 9 EUR -> 10 USD
        let usd = convert(Decimal::new(300, 0), "TRY", "USD", &t, Strictness::Strict).unwrap();
        assert_eq!(format!("{:.2}", usd), "10.00");
        let same = convert(Decimal::new(5, 0), "USD", "USD", &t, Strictness::Strict).unwrap();
        assert_eq!(same, Decimal::new(5, 0));
    }

    #[test]
    fn overflowing_row_is_dropped_when_lenient() {
        let mut huge = row("79228162514264337593543950335", Some("EUR"));
        huge.line = 3;
        let records = [row("1", Some("EUR")), huge, row("2", Some("EUR"))];
        let out = normalize_ledger(&records, &table(), Strictness::Lenient).unwrap();
        assert_eq!(out.out_of_range, vec![3]);
        let total: Decimal = out.rows.iter().map(|r| r.base_amount).sum();
        assert_eq!(total, Decimal::new(3, 0));
    }

    #[test]
    fn overflowing_multiplication_fails_when_strict() {
        let t = CurrencyTable::new("EUR", &[("EUR", Decimal::ONE), ("USD", Decimal::new(11, 1))]);
        let mut huge = row("79228162514264337593543950335", Some("USD"));
        huge.line = 7;
        let err = normalize(&[huge], &t, Strictness::Strict).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SpendError>(),
            Some(SpendError::AmountOutOfRange { line: 7, .. })
        ));
    }
}
