// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Domain errors raised by the ledger pipeline.
//!
//! Plumbing failures (I/O, CSV, YAML) travel as `anyhow::Error` with context
//! attached; the variants here are the ones callers may want to match on.

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SpendError {
    #[error("Ledger line {line}: invalid {field} '{value}'")]
    MalformedRow {
        line: u64,
        field: &'static str,
        value: String,
    },
    #[error("Ledger line {line}: {amount} {currency} does not fit a base-currency total")]
    AmountOutOfRange {
        line: u64,
        amount: String,
        currency: String,
    },
    #[error("Currency '{0}' is not in the currency table")]
    UnknownCurrency(String),
    #[error("Category '{0}' is not configured")]
    UnknownCategory(String),
    #[error("Amount must not be negative, got {0}")]
    NegativeAmount(String),
    #[error("Unknown payment method '{0}' (use card|cash|transfer|standing-order)")]
    UnknownPaymentMethod(String),
    #[error("Unknown format: {0} (use csv|json)")]
    UnsupportedFormat(String),
}
