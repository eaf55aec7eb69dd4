use comfy_table::Table;

use crate::categorizer::{RuleSet, OTHER};

pub fn format_rules(rules: &RuleSet) -> String {
    if rules.is_empty() {
        return format!("No keyword rules; every expense is \"{OTHER}\".");
    }
    let mut table = Table::new();
    table.set_header(vec!["#", "Keyword", "Category"]);
    for (i, rule) in rules.rules().iter().enumerate() {
        table.add_row(vec![(i + 1).to_string(), rule.keyword.clone(), rule.category.clone()]);
    }
    format!(
        "Keyword Rules (first match wins, otherwise \"{OTHER}\")\n{table}"
    )
}

pub fn list(rules: &RuleSet) {
    println!("{}", format_rules(rules));
}
