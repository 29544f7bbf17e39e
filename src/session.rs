// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::{self, Categories, CurrencyTable};
use crate::fx::{self, NormalizedExpense};
use crate::ledger::Ledger;
use crate::models::Strictness;
use crate::paths::Paths;
use crate::report::{self, Analysis};
use anyhow::Result;
use tracing::debug;

/// Configuration for one invocation: read once at startup, never mutated.
#[derive(Debug, Clone)]
pub struct Session {
    pub paths: Paths,
    pub categories: Categories,
    pub currencies: CurrencyTable,
    pub strictness: Strictness,
}

impl Session {
    /// Create missing files, then load the category list and currency table.
    pub fn start(paths: Paths, strictness: Strictness) -> Result<Self> {
        config::bootstrap(&paths)?;
        let categories = config::load_categories(&paths.categories)?;
        let currencies = config::load_currency_table(&paths.fx)?;
        debug!(?strictness, ledger = %paths.ledger.display(), "Session ready");
        Ok(Session {
            paths,
            categories,
            currencies,
            strictness,
        })
    }

    pub fn ledger(&self) -> Ledger {
        Ledger::open(&self.paths.ledger)
    }

    pub fn base(&self) -> &str {
        &self.currencies.base
    }

    pub fn normalized(&self) -> Result<Vec<NormalizedExpense>> {
        let records = self.ledger().load_with(self.strictness)?;
        fx::normalize(&records, &self.currencies, self.strictness)
    }

    pub fn analysis(&self) -> Result<Analysis> {
        Ok(report::analyze(&self.normalized()?, self.base()))
    }
}
