// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The expense ledger: a flat CSV file with one row per expense.
//!
//! Reads are lenient by default. A row whose date or amount cannot be parsed
//! is still returned (and still written back on the next rewrite), it just
//! carries [`Parsed::Invalid`] so later stages can leave it out.

use crate::error::SpendError;
use crate::models::{Expense, Parsed, Strictness};
use crate::utils::{coerce_date, coerce_decimal, non_blank, DATE_FORMAT};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use csv::{ReaderBuilder, Trim, WriterBuilder};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const HEADER: [&str; 7] = [
    "date",
    "amount",
    "currency",
    "category",
    "merchant",
    "payment_method",
    "note",
];

/// One stored row, as found on disk.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerRecord {
    /// 1-based line in the ledger file (the header is line 1).
    pub line: u64,
    pub date: Parsed<NaiveDate>,
    pub amount: Parsed<Decimal>,
    pub currency: Option<String>,
    pub category: Option<String>,
    pub merchant: Option<String>,
    pub payment_method: Option<String>,
    pub note: Option<String>,
}

impl LedgerRecord {
    fn from_expense(e: &Expense, line: u64) -> Self {
        LedgerRecord {
            line,
            date: Parsed::Value(e.date),
            amount: Parsed::Value(e.amount),
            currency: non_blank(Some(e.currency.as_str())),
            category: non_blank(Some(e.category.as_str())),
            merchant: non_blank(e.merchant.as_deref()),
            payment_method: Some(e.payment_method.to_string()),
            note: non_blank(e.note.as_deref()),
        }
    }

    /// Both date and amount parsed; the row can take part in reports.
    pub fn is_usable(&self) -> bool {
        self.date.is_value() && self.amount.is_value()
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct RawRow {
    #[serde(default)]
    date: String,
    #[serde(default)]
    amount: String,
    #[serde(default)]
    currency: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    merchant: String,
    #[serde(default)]
    payment_method: String,
    #[serde(default)]
    note: String,
}

impl RawRow {
    fn into_record(self, line: u64) -> LedgerRecord {
        LedgerRecord {
            line,
            date: coerce(&self.date, coerce_date),
            amount: coerce(&self.amount, coerce_decimal),
            currency: non_blank(Some(self.currency.as_str())),
            category: non_blank(Some(self.category.as_str())),
            merchant: non_blank(Some(self.merchant.as_str())),
            payment_method: non_blank(Some(self.payment_method.as_str())),
            note: non_blank(Some(self.note.as_str())),
        }
    }
}

impl From<&LedgerRecord> for RawRow {
    fn from(r: &LedgerRecord) -> Self {
        RawRow {
            date: match &r.date {
                Parsed::Value(d) => d.format(DATE_FORMAT).to_string(),
                Parsed::Missing => String::new(),
                Parsed::Invalid(raw) => raw.clone(),
            },
            amount: match &r.amount {
                Parsed::Value(a) => a.normalize().to_string(),
                Parsed::Missing => String::new(),
                Parsed::Invalid(raw) => raw.clone(),
            },
            currency: r.currency.clone().unwrap_or_default(),
            category: r.category.clone().unwrap_or_default(),
            merchant: r.merchant.clone().unwrap_or_default(),
            payment_method: r.payment_method.clone().unwrap_or_default(),
            note: r.note.clone().unwrap_or_default(),
        }
    }
}

fn coerce<T>(raw: &str, parse: impl Fn(&str) -> Option<T>) -> Parsed<T> {
    if raw.trim().is_empty() {
        return Parsed::Missing;
    }
    match parse(raw) {
        Some(v) => Parsed::Value(v),
        None => Parsed::Invalid(raw.to_string()),
    }
}

fn check_strict<T>(cell: &Parsed<T>, line: u64, field: &'static str) -> Result<(), SpendError> {
    match cell {
        Parsed::Value(_) => Ok(()),
        Parsed::Missing => Err(SpendError::MalformedRow {
            line,
            field,
            value: String::new(),
        }),
        Parsed::Invalid(raw) => Err(SpendError::MalformedRow {
            line,
            field,
            value: raw.clone(),
        }),
    }
}

#[derive(Debug, Clone)]
pub struct Ledger {
    path: PathBuf,
}

impl Ledger {
    pub fn open(path: impl AsRef<Path>) -> Self {
        Ledger {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write a header-only ledger if none exists yet.
    pub fn ensure_exists(&self) -> Result<()> {
        if self.path.exists() {
            return Ok(());
        }
        self.write_all(&[])?;
        debug!(path = %self.path.display(), "Created empty ledger");
        Ok(())
    }

    pub fn load(&self) -> Result<Vec<LedgerRecord>> {
        self.load_with(Strictness::Lenient)
    }

    pub fn load_with(&self, strictness: Strictness) -> Result<Vec<LedgerRecord>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "Ledger missing, treating as empty");
            return Ok(Vec::new());
        }
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::Headers)
            .from_path(&self.path)
            .with_context(|| format!("Open ledger {}", self.path.display()))?;
        let headers = rdr.headers()?.clone();

        let mut out = Vec::new();
        for result in rdr.records() {
            let rec = result.with_context(|| format!("Read ledger {}", self.path.display()))?;
            let line = rec.position().map(|p| p.line()).unwrap_or_default();
            let raw: RawRow = rec
                .deserialize(Some(&headers))
                .with_context(|| format!("Decode ledger line {}", line))?;
            let record = raw.into_record(line);
            if strictness == Strictness::Strict {
                check_strict(&record.date, line, "date")?;
                check_strict(&record.amount, line, "amount")?;
            } else if !record.is_usable() {
                warn!(line, date = ?record.date, amount = ?record.amount, "Row excluded from reports");
            }
            out.push(record);
        }
        debug!(rows = out.len(), path = %self.path.display(), "Loaded ledger");
        Ok(out)
    }

    /// Add one expense by rewriting the whole file.
    ///
    /// There is no locking: two processes appending at the same moment can
    /// each rewrite the file from the same snapshot and one entry is lost.
    /// Fine for a single user; do not share a ledger between writers.
    pub fn append(&self, expense: &Expense) -> Result<()> {
        let mut records = self.load()?;
        let line = records.last().map(|r| r.line + 1).unwrap_or(2);
        records.push(LedgerRecord::from_expense(expense, line));
        self.write_all(&records)?;
        debug!(rows = records.len(), "Ledger rewritten");
        Ok(())
    }

    fn write_all(&self, records: &[LedgerRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        let mut wtr = WriterBuilder::new()
            .has_headers(false)
            .from_path(&self.path)
            .with_context(|| format!("Write ledger {}", self.path.display()))?;
        wtr.write_record(HEADER)?;
        for r in records {
            wtr.serialize(RawRow::from(r))?;
        }
        wtr.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PaymentMethod;
    use tempfile::tempdir;

    fn expense(date: &str, amount: &str, ccy: &str) -> Expense {
        Expense {
            date: NaiveDate::parse_from_str(date, DATE_FORMAT).unwrap(),
            amount: amount.parse().unwrap(),
            currency: ccy.to_string(),
            category: "Groceries".to_string(),
            merchant: None,
            payment_method: PaymentMethod::Card,
            note: Some("weekly".to_string()),
        }
    }

    #[test]
    fn ensure_exists_writes_header_only() {
        let dir = tempdir().unwrap();
        let ledger = Ledger::open(dir.path().join("data").join("expenses.csv"));
        ledger.ensure_exists().unwrap();
        let text = fs::read_to_string(ledger.path()).unwrap();
        assert_eq!(
            text.trim_end(),
            "date,amount,currency,category,merchant,payment_method,note"
        );
        assert!(ledger.load().unwrap().is_empty());
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempdir().unwrap();
        let ledger = Ledger::open(dir.path().join("nope.csv"));
        assert!(ledger.load().unwrap().is_empty());
    }

    #[test]
    fn append_creates_parent_and_round_trips() {
        let dir = tempdir().unwrap();
        let ledger = Ledger::open(dir.path().join("nested").join("expenses.csv"));
        ledger.append(&expense("2025-08-03", "12.50", "EUR")).unwrap();
        ledger.append(&expense("2025-08-04", "100", "TRY")).unwrap();

        let rows = ledger.load().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0].date,
            Parsed::Value(NaiveDate::from_ymd_opt(2025, 8, 3).unwrap())
        );
        assert_eq!(rows[0].amount, Parsed::Value(Decimal::new(1250, 2)));
        assert_eq!(rows[0].merchant, None);
        assert_eq!(rows[0].payment_method.as_deref(), Some("card"));
        assert_eq!(rows[1].currency.as_deref(), Some("TRY"));
        assert_eq!(rows[1].line, 3);

        let text = fs::read_to_string(ledger.path()).unwrap();
        assert!(text.contains("2025-08-03,12.5,EUR,Groceries,,card,weekly"));
    }

    #[test]
    fn unparseable_cells_are_flagged_and_preserved() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("expenses.csv");
        fs::write(
            &path,
            "date,amount,currency,category,merchant,payment_method,note\n\
             03.08.2025,7,EUR,Bar,,cash,\n\
             someday,5,EUR,Bar,,cash,\n\
             2025-08-05,a lot,EUR,Bar,,cash,\n\
             2025-08-06,,EUR\n",
        )
        .unwrap();
        let ledger = Ledger::open(&path);
        let rows = ledger.load().unwrap();
        assert_eq!(rows.len(), 4);
        assert!(rows[0].is_usable());
        assert_eq!(rows[1].date, Parsed::Invalid("someday".into()));
        assert_eq!(rows[2].amount, Parsed::Invalid("a lot".into()));
        assert_eq!(rows[3].amount, Parsed::Missing);
        assert_eq!(rows[3].category, None);

        ledger.append(&expense("2025-08-07", "1", "EUR")).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("2025-08-03,7,EUR,Bar,,cash,"));
        assert!(text.contains("someday,5,EUR"));
        assert!(text.contains("2025-08-05,a lot,EUR"));
        assert_eq!(ledger.load().unwrap().len(), 5);
    }

    #[test]
    fn strict_load_rejects_bad_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("expenses.csv");
        fs::write(
            &path,
            "date,amount,currency,category,merchant,payment_method,note\n\
             2025-08-01,3,EUR,Bar,,cash,\n\
             2025-08-02,oops,EUR,Bar,,cash,\n",
        )
        .unwrap();
        let err = Ledger::open(&path)
            .load_with(Strictness::Strict)
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<SpendError>(),
            Some(&SpendError::MalformedRow {
                line: 3,
                field: "amount",
                value: "oops".into()
            })
        );
    }
}
