use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{Expense, SummaryEntry};

// ---------------------------------------------------------------------------
// Category summary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySummary {
    pub categories: Vec<SummaryEntry>,
    pub total: f64,
}

impl CategorySummary {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Group expenses by category and sum their (already absolute) amounts.
/// Entries come back ordered by category name; an empty input gives an empty
/// summary.
pub fn summarize(expenses: &[Expense]) -> CategorySummary {
    let mut groups: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for e in expenses {
        let slot = groups.entry(e.category.as_str()).or_default();
        slot.0 += e.amount;
        slot.1 += 1;
    }

    let total: f64 = groups.values().map(|(t, _)| t).sum();
    let categories = groups
        .into_iter()
        .map(|(name, (t, count))| SummaryEntry {
            category: name.to_string(),
            total: t,
            count,
            pct: if total != 0.0 { t / total * 100.0 } else { 0.0 },
        })
        .collect();

    CategorySummary { categories, total }
}
