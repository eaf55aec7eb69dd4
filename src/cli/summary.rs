use std::path::Path;

use colored::Colorize;
use comfy_table::{Cell, CellAlignment, Table};

use super::OutputFormat;
use crate::browser::NO_DATA;
use crate::categorizer::RuleSet;
use crate::error::Result;
use crate::fmt;
use crate::importer;
use crate::reports::{self, CategorySummary};

pub fn format_summary(data: &CategorySummary) -> String {
    if data.is_empty() {
        return NO_DATA.to_string();
    }
    let mut table = Table::new();
    table.set_header(vec!["Category", "Amount", "%", "Count"]);
    for item in &data.categories {
        table.add_row(vec![
            Cell::new(&item.category),
            Cell::new(fmt::amount(item.total)).set_alignment(CellAlignment::Right),
            Cell::new(fmt::percent(item.pct)).set_alignment(CellAlignment::Right),
            Cell::new(item.count),
        ]);
    }
    table.add_row(vec![
        Cell::new("Total".bold()),
        Cell::new(fmt::amount(data.total)).set_alignment(CellAlignment::Right),
        Cell::new(""),
        Cell::new(""),
    ]);
    format!("Spending by Category\n{table}")
}

pub fn run(file: &str, format: OutputFormat, rules: &RuleSet) -> Result<()> {
    let expenses = importer::load(Path::new(file), rules)?;
    let data = reports::summarize(&expenses);
    match format {
        OutputFormat::Text => println!("{}", format_summary(&data)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&data)?),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Expense;

    #[test]
    fn test_format_summary_has_percentages() {
        let data = reports::summarize(&[
            Expense {
                date: "d".into(),
                description: "Tesco".into(),
                amount: 23.5,
                category: "Groceries".into(),
            },
            Expense {
                date: "d".into(),
                description: "Uber".into(),
                amount: 12.0,
                category: "Transportation".into(),
            },
        ]);
        let out = format_summary(&data);
        assert!(out.contains("Groceries"));
        assert!(out.contains("66.2%"));
        assert!(out.contains("33.8%"));
        assert!(out.contains("35.50"));
    }

    #[test]
    fn test_format_summary_empty() {
        assert_eq!(format_summary(&reports::summarize(&[])), NO_DATA);
    }
}
