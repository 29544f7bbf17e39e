// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use std::path::{Path, PathBuf};

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Spendbook", "spendbook"));

pub const LEDGER_FILE: &str = "expenses.csv";
pub const CATEGORIES_FILE: &str = "categories.yaml";
pub const FX_FILE: &str = "fx.yaml";

/// Locations of the three persisted resources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    pub ledger: PathBuf,
    pub categories: PathBuf,
    pub fx: PathBuf,
}

impl Paths {
    /// Everything under one directory: `<root>/data/expenses.csv` and
    /// `<root>/config/{categories,fx}.yaml`.
    pub fn under(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        let config = root.join("config");
        Paths {
            ledger: root.join("data").join(LEDGER_FILE),
            categories: config.join(CATEGORIES_FILE),
            fx: config.join(FX_FILE),
        }
    }

    pub fn platform() -> Result<Self> {
        let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
            .context("Could not determine platform-specific data dir")?;
        Ok(Paths {
            ledger: proj.data_dir().join(LEDGER_FILE),
            categories: proj.config_dir().join(CATEGORIES_FILE),
            fx: proj.config_dir().join(FX_FILE),
        })
    }

    pub fn resolve(home: Option<&str>) -> Result<Self> {
        match home {
            Some(dir) => Ok(Self::under(dir.trim())),
            None => Self::platform(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn home_override_lays_out_data_and_config() {
        let p = Paths::resolve(Some("/tmp/sb")).unwrap();
        assert_eq!(p.ledger, PathBuf::from("/tmp/sb/data/expenses.csv"));
        assert_eq!(p.categories, PathBuf::from("/tmp/sb/config/categories.yaml"));
        assert_eq!(p.fx, PathBuf::from("/tmp/sb/config/fx.yaml"));
    }
}
