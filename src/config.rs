// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Category list and currency table, plus first-run bootstrap of every
//! persisted resource.

use crate::ledger::Ledger;
use crate::paths::Paths;
use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::debug;

pub const DEFAULT_BASE: &str = "EUR";

const DEFAULT_CATEGORIES_YAML: &str = r#"categories:
  - Groceries
  - Restaurant
  - Bar
  - Taxes
  - Household
  - Car
  - Hotel
  - Transport
  - Health
  - Travel
  - Other
"#;

const DEFAULT_FX_YAML: &str = r#"# 1 unit of each currency = <rate> units of the base currency
base: "EUR"
rates:
  EUR: 1.0
  TRY: 0.03
"#;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Categories {
    #[serde(default)]
    pub categories: Vec<String>,
}

impl Categories {
    pub fn contains(&self, label: &str) -> bool {
        self.categories.iter().any(|c| c == label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyTable {
    #[serde(default = "default_base")]
    pub base: String,
    #[serde(default = "default_rates")]
    pub rates: BTreeMap<String, Decimal>,
}

fn default_base() -> String {
    DEFAULT_BASE.to_string()
}

fn default_rates() -> BTreeMap<String, Decimal> {
    BTreeMap::from([(DEFAULT_BASE.to_string(), Decimal::ONE)])
}

impl Default for CurrencyTable {
    fn default() -> Self {
        CurrencyTable {
            base: default_base(),
            rates: default_rates(),
        }
    }
}

impl CurrencyTable {
    pub fn new(base: &str, rates: &[(&str, Decimal)]) -> Self {
        CurrencyTable {
            base: base.to_string(),
            rates: rates
                .iter()
                .map(|(code, rate)| (code.to_string(), *rate))
                .collect(),
        }
    }

    /// Units of base currency per unit of `code`, if the table knows it.
    pub fn multiplier(&self, code: &str) -> Option<Decimal> {
        self.rates.get(code).copied()
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.rates.keys().map(String::as_str)
    }

    /// The table's spelling of `code`, matched case-insensitively.
    pub fn find_code(&self, code: &str) -> Option<&str> {
        self.codes().find(|c| c.eq_ignore_ascii_case(code.trim()))
    }
}

/// Create whichever of the ledger, category list and currency table is
/// missing. Existing files are left untouched.
pub fn bootstrap(paths: &Paths) -> Result<()> {
    Ledger::open(&paths.ledger).ensure_exists()?;
    write_default(&paths.categories, DEFAULT_CATEGORIES_YAML)?;
    write_default(&paths.fx, DEFAULT_FX_YAML)?;
    Ok(())
}

fn write_default(path: &Path, contents: &str) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(path, contents)
        .with_context(|| format!("Failed to write default config to {}", path.display()))?;
    debug!(path = %path.display(), "Created default config");
    Ok(())
}

fn read_yaml<T>(path: &Path) -> Result<T>
where
    T: for<'de> Deserialize<'de> + Default,
{
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    // An empty document parses as null; treat it like an empty mapping.
    if text.trim().is_empty() {
        return Ok(T::default());
    }
    let value: Option<T> = serde_yaml::from_str(&text)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    Ok(value.unwrap_or_default())
}

pub fn load_categories(path: &Path) -> Result<Categories> {
    let cats: Categories = read_yaml(path)?;
    debug!(count = cats.categories.len(), "Loaded categories");
    Ok(cats)
}

pub fn load_currency_table(path: &Path) -> Result<CurrencyTable> {
    let table: CurrencyTable = read_yaml(path)?;
    debug!(base = %table.base, currencies = table.rates.len(), "Loaded currency table");
    Ok(table)
}
