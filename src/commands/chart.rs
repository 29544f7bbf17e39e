// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::chart::{category_bars, monthly_line, save};
use crate::commands::reports::EMPTY_HINT;
use crate::report::Analysis;
use crate::session::Session;
use crate::utils::arg;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub const CATEGORY_CHART: &str = "by-category.svg";
pub const MONTH_CHART: &str = "by-month.svg";

pub fn handle(session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let out = Path::new(arg(sub, "out")?);
    match render(session, out)? {
        Some((bars, line)) => {
            println!("Wrote {} and {}", bars.display(), line.display());
        }
        None => println!("{}", EMPTY_HINT),
    }
    Ok(())
}

/// Write both charts into `dir`. Nothing is written for an empty ledger.
pub fn render(session: &Session, dir: &Path) -> Result<Option<(PathBuf, PathBuf)>> {
    let Analysis::Summary(summary) = session.analysis()? else {
        return Ok(None);
    };
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    let bars = dir.join(CATEGORY_CHART);
    let line = dir.join(MONTH_CHART);
    save(&category_bars(&summary.by_category, &summary.base), &bars)?;
    save(&monthly_line(&summary.by_month, &summary.base), &line)?;
    Ok(Some((bars, line)))
}
