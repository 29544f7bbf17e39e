// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::SpendError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    Card,
    Cash,
    Transfer,
    StandingOrder,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::Card,
        PaymentMethod::Cash,
        PaymentMethod::Transfer,
        PaymentMethod::StandingOrder,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "card",
            PaymentMethod::Cash => "cash",
            PaymentMethod::Transfer => "transfer",
            PaymentMethod::StandingOrder => "standing-order",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = SpendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace(['_', ' '], "-");
        PaymentMethod::ALL
            .into_iter()
            .find(|m| m.as_str() == key)
            .ok_or_else(|| SpendError::UnknownPaymentMethod(s.to_string()))
    }
}

/// A validated expense as entered by the user, before it reaches the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub date: NaiveDate,
    pub amount: Decimal,
    pub currency: String,
    pub category: String,
    pub merchant: Option<String>,
    pub payment_method: PaymentMethod,
    pub note: Option<String>,
}

/// How to treat rows and currencies that cannot be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strictness {
    /// Drop unparseable rows from aggregation, treat unknown currencies as base.
    #[default]
    Lenient,
    /// Fail on the first unparseable row or unknown currency.
    Strict,
}

/// A stored cell that may be absent or hold text that failed to parse.
///
/// Invalid cells keep their raw text so that rewriting the ledger does not
/// lose what the user originally typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parsed<T> {
    Value(T),
    Missing,
    Invalid(String),
}

impl<T> Parsed<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            Parsed::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_value(&self) -> bool {
        matches!(self, Parsed::Value(_))
    }
}
