// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use serde_json::json;
use spendbook::{cli, commands};
use std::path::Path;
use tempfile::tempdir;

fn run(home: &Path, args: &[&str]) -> anyhow::Result<()> {
    let home = home.to_string_lossy().to_string();
    let mut argv = vec!["spendbook", "--home", home.as_str()];
    argv.extend_from_slice(args);
    commands::dispatch(&cli::build_cli().get_matches_from(argv))
}

#[test]
fn export_writes_pretty_json_with_base_amounts() {
    let dir = tempdir().unwrap();
    run(
        dir.path(),
        &[
            "add", "--amount", "100", "--date", "2025-01-02", "--currency", "TRY",
            "--category", "Groceries", "--merchant", "Corner Shop", "--note", "Weekly run",
        ],
    )
    .unwrap();

    let out_path = dir.path().join("export.json");
    let out_str = out_path.to_string_lossy().to_string();
    run(dir.path(), &["export", "--format", "json", "--out", &out_str]).unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(
        parsed,
        json!([
            {
                "date": "2025-01-02",
                "amount": "100",
                "currency": "TRY",
                "base_amount": "3.00",
                "category": "Groceries",
                "merchant": "Corner Shop",
                "payment_method": "card",
                "note": "Weekly run"
            }
        ])
    );
}

#[test]
fn export_csv_has_header_and_rows() {
    let dir = tempdir().unwrap();
    run(
        dir.path(),
        &["add", "--amount", "8", "--date", "2025-03-04", "--category", "Bar"],
    )
    .unwrap();
    let out_path = dir.path().join("export.csv");
    let out_str = out_path.to_string_lossy().to_string();
    run(dir.path(), &["export", "--out", &out_str]).unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let mut lines = contents.lines();
    assert_eq!(
        lines.next(),
        Some("date,amount,currency,base_amount,category,merchant,payment_method,note")
    );
    assert_eq!(lines.next(), Some("2025-03-04,8,EUR,8.00,Bar,,card,"));
}

#[test]
fn export_rejects_unknown_format() {
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.unknown");
    let out_str = out_path.to_string_lossy().to_string();
    assert!(run(dir.path(), &["export", "--format", "xml", "--out", &out_str]).is_err());
    assert!(!out_path.exists());
}
