use std::path::Path;

use colored::Colorize;
use comfy_table::{Cell, CellAlignment, Table};

use crate::categorizer::RuleSet;
use crate::error::Result;
use crate::fmt;
use crate::table::{Column, ExpenseTable};

pub fn format_table(table: &ExpenseTable) -> String {
    if table.is_empty() {
        return "No expenses found.".to_string();
    }
    let mut out = Table::new();
    out.set_header(Column::ALL.iter().map(|c| c.title()).collect::<Vec<_>>());
    for e in table.rows() {
        out.add_row(vec![
            Cell::new(Column::Date.cell(e)),
            Cell::new(Column::Category.cell(e)),
            Cell::new(Column::Description.cell(e)),
            Cell::new(Column::Amount.cell(e)).set_alignment(CellAlignment::Right),
        ]);
    }
    out.add_row(vec![
        Cell::new("Total".bold()),
        Cell::new(""),
        Cell::new(format!("{} expenses", table.len())),
        Cell::new(fmt::amount(table.total())).set_alignment(CellAlignment::Right),
    ]);
    format!("Expenses\n{out}")
}

pub fn run(file: &str, sort: Option<Column>, desc: bool, rules: &RuleSet) -> Result<()> {
    let mut table = ExpenseTable::default();
    table.load(Path::new(file), rules)?;
    if let Some(column) = sort {
        table.sort_by(column, desc);
    }
    println!("{}", format_table(&table));
    Ok(())
}
