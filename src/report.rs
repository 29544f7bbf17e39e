// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Totals per category and per calendar month, in base currency.
//!
//! Input comes from [`crate::fx::normalize`], which keeps the summed
//! magnitudes in range; the additions here saturate rather than panic when
//! handed anything else.

use crate::fx::NormalizedExpense;
use crate::utils::month_key;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

pub const UNSPECIFIED: &str = "(unspecified)";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthTotal {
    pub month: String, // YYYY-MM
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub base: String,
    pub total: Decimal,
    pub records: Vec<NormalizedExpense>,
    pub by_category: Vec<CategoryTotal>,
    pub by_month: Vec<MonthTotal>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Analysis {
    /// Nothing to report on yet.
    Empty,
    Summary(Summary),
}

pub fn by_category(records: &[NormalizedExpense]) -> Vec<CategoryTotal> {
    let mut agg: HashMap<&str, Decimal> = HashMap::new();
    for r in records {
        let cat = r.category.as_deref().unwrap_or(UNSPECIFIED);
        let total = agg.entry(cat).or_insert(Decimal::ZERO);
        *total = total.saturating_add(r.base_amount);
    }
    let mut items: Vec<CategoryTotal> = agg
        .into_iter()
        .map(|(category, total)| CategoryTotal {
            category: category.to_string(),
            total,
        })
        .collect();
    items.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.category.cmp(&b.category)));
    items
}

pub fn by_month(records: &[NormalizedExpense]) -> Vec<MonthTotal> {
    let mut map: BTreeMap<String, Decimal> = BTreeMap::new();
    for r in records {
        let total = map.entry(month_key(r.date)).or_insert(Decimal::ZERO);
        *total = total.saturating_add(r.base_amount);
    }
    map.into_iter()
        .map(|(month, total)| MonthTotal { month, total })
        .collect()
}

pub fn analyze(records: &[NormalizedExpense], base: &str) -> Analysis {
    if records.is_empty() {
        return Analysis::Empty;
    }
    let mut sorted = records.to_vec();
    // stable: same-day entries keep ledger order
    sorted.sort_by_key(|r| r.date);
    Analysis::Summary(Summary {
        base: base.to_string(),
        total: records
            .iter()
            .fold(Decimal::ZERO, |acc, r| acc.saturating_add(r.base_amount)),
        by_category: by_category(records),
        by_month: by_month(records),
        records: sorted,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn rec(date: (i32, u32, u32), base_amount: i64, category: Option<&str>) -> NormalizedExpense {
        NormalizedExpense {
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            amount: Decimal::new(base_amount, 0),
            currency: "EUR".into(),
            multiplier: Decimal::ONE,
            base_amount: Decimal::new(base_amount, 0),
            category: category.map(str::to_string),
            merchant: None,
            payment_method: None,
            note: None,
        }
    }

    #[test]
    fn empty_input_is_empty_state() {
        assert_eq!(analyze(&[], "EUR"), Analysis::Empty);
    }

    #[test]
    fn same_month_entries_add_up() {
        let records = vec![
            rec((2025, 8, 1), 10, Some("Bar")),
            rec((2025, 8, 31), 20, Some("Car")),
        ];
        let months = by_month(&records);
        assert_eq!(
            months,
            vec![MonthTotal {
                month: "2025-08".into(),
                total: Decimal::new(30, 0)
            }]
        );
    }

    #[test]
    fn categories_sorted_descending_with_unspecified_bucket() {
        let records = vec![
            rec((2025, 1, 1), 5, Some("Bar")),
            rec((2025, 1, 2), 7, None),
            rec((2025, 1, 3), 9, Some("Car")),
            rec((2025, 1, 4), 4, Some("Bar")),
        ];
        let cats = by_category(&records);
        let labels: Vec<_> = cats.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(labels, vec!["Bar", "Car", UNSPECIFIED]);
        assert_eq!(cats[0].total, Decimal::new(9, 0));
    }

    #[test]
    fn category_totals_sum_to_grand_total() {
        let records = vec![
            rec((2025, 3, 1), 12, Some("Hotel")),
            rec((2024, 12, 9), 3, None),
            rec((2025, 1, 5), 40, Some("Travel")),
            rec((2025, 3, 7), 1, Some("Hotel")),
        ];
        let Analysis::Summary(s) = analyze(&records, "EUR") else {
            panic!("expected a summary");
        };
        let cat_sum: Decimal = s.by_category.iter().map(|c| c.total).sum();
        let month_sum: Decimal = s.by_month.iter().map(|m| m.total).sum();
        assert_eq!(cat_sum, s.total);
        assert_eq!(month_sum, s.total);
        assert_eq!(s.total, Decimal::new(56, 0));
        assert_eq!(s.by_month[0].month, "2024-12");
        assert_eq!(s.records[0].date, NaiveDate::from_ymd_opt(2024, 12, 9).unwrap());
    }

    #[test]
    fn month_totals_ignore_input_order() {
        let mut records = vec![
            rec((2025, 2, 1), 1, None),
            rec((2025, 1, 1), 2, None),
            rec((2025, 2, 14), 3, None),
            rec((2025, 1, 20), 4, None),
        ];
        let forward = by_month(&records);
        records.reverse();
        assert_eq!(by_month(&records), forward);
        assert_eq!(forward[0].month, "2025-01");
        assert_eq!(forward[0].total, Decimal::new(6, 0));
    }

    #[test]
    fn oversized_input_saturates_instead_of_panicking() {
        let mut big = rec((2025, 5, 1), 0, Some("Car"));
        big.base_amount = Decimal::MAX;
        let records = vec![big, rec((2025, 5, 2), 1, Some("Car"))];
        assert_eq!(by_category(&records)[0].total, Decimal::MAX);
        assert_eq!(by_month(&records)[0].total, Decimal::MAX);
    }
}
