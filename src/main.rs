// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use spendbook::{cli, commands, log::init_logging};

fn main() -> Result<()> {
    let matches = cli::build_cli().get_matches();
    init_logging(matches.get_flag("verbose"));

    let result = commands::dispatch(&matches);
    if let Err(e) = &result {
        tracing::error!(error = %e, "spendbook failed");
    }
    result
}
