// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::session::Session;
use crate::utils::pretty_table;
use anyhow::Result;

pub fn handle(session: &Session) -> Result<()> {
    let data: Vec<Vec<String>> = session
        .categories
        .categories
        .iter()
        .map(|c| vec![c.clone()])
        .collect();
    if data.is_empty() {
        println!(
            "No categories configured; edit {}",
            session.paths.categories.display()
        );
    } else {
        println!("{}", pretty_table(&["Category"], data));
    }
    Ok(())
}
