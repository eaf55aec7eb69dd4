use std::path::Path;

use crate::categorizer::RuleSet;
use crate::error::Result;
use crate::fmt;
use crate::importer;
use crate::models::Expense;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Date,
    Category,
    Description,
    Amount,
}

impl Column {
    pub const ALL: [Column; 4] = [
        Column::Date,
        Column::Category,
        Column::Description,
        Column::Amount,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Self::Date => "Date",
            Self::Category => "Category",
            Self::Description => "Description",
            Self::Amount => "Amount",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Self::Date => 0,
            Self::Category => 1,
            Self::Description => 2,
            Self::Amount => 3,
        }
    }

    pub fn from_index(idx: usize) -> Option<Column> {
        Self::ALL.get(idx).copied()
    }

    /// Text shown in this column's cell; also the sort key.
    pub fn cell(&self, expense: &Expense) -> String {
        match self {
            Self::Date => expense.date.clone(),
            Self::Category => expense.category.clone(),
            Self::Description => expense.description.clone(),
            Self::Amount => fmt::amount(expense.amount),
        }
    }
}

/// Categorized expenses in display order, plus per-column sort direction.
#[derive(Debug, Default)]
pub struct ExpenseTable {
    rows: Vec<Expense>,
    /// `Some(true)` once a column has been sorted descending.
    sort_desc: [Option<bool>; 4],
    last_sort: Option<Column>,
}

impl ExpenseTable {
    pub fn new(rows: Vec<Expense>) -> Self {
        Self {
            rows,
            ..Self::default()
        }
    }

    /// Load `path` and replace the whole table. On error the table is left
    /// exactly as it was.
    pub fn load(&mut self, path: &Path, rules: &RuleSet) -> Result<usize> {
        let rows = importer::load(path, rules)?;
        self.replace(rows);
        Ok(self.rows.len())
    }

    pub fn replace(&mut self, rows: Vec<Expense>) {
        *self = Self::new(rows);
    }

    pub fn rows(&self) -> &[Expense] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.rows.iter().map(|e| e.amount).sum()
    }

    /// (column, descending) of the most recent sort.
    pub fn sort_state(&self) -> Option<(Column, bool)> {
        self.last_sort
            .map(|c| (c, self.sort_desc[c.index()].unwrap_or(false)))
    }

    /// Header activation: ascending the first time a column is used, then
    /// flipping on every further activation of that column. Compares the
    /// displayed cell text, so "10.00" < "2.00".
    pub fn toggle_sort(&mut self, column: Column) -> bool {
        let slot = &mut self.sort_desc[column.index()];
        let descending = match *slot {
            None => false,
            Some(prev) => !prev,
        };
        *slot = Some(descending);
        self.last_sort = Some(column);
        self.sort_by(column, descending);
        log::debug!(
            "sorted by {} {}",
            column.title(),
            if descending { "desc" } else { "asc" }
        );
        descending
    }

    /// Stable sort on display strings. Equal keys keep their current order in
    /// both directions.
    pub fn sort_by(&mut self, column: Column, descending: bool) {
        let mut keyed: Vec<(String, Expense)> = self
            .rows
            .drain(..)
            .map(|e| (column.cell(&e), e))
            .collect();
        if descending {
            keyed.sort_by(|a, b| b.0.cmp(&a.0));
        } else {
            keyed.sort_by(|a, b| a.0.cmp(&b.0));
        }
        self.rows = keyed.into_iter().map(|(_, e)| e).collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categorizer::build_rules;

    fn expense(date: &str, desc: &str, amount: f64, category: &str) -> Expense {
        Expense {
            date: date.to_string(),
            description: desc.to_string(),
            amount,
            category: category.to_string(),
        }
    }

    fn sample() -> ExpenseTable {
        ExpenseTable::new(vec![
            expense("2024-01-07", "Uber Trip", 2.0, "Transportation"),
            expense("2024-01-05", "Tesco Store", 10.0, "Groceries"),
            expense("2024-01-06", "Cinema", 3.5, "Entertainment"),
        ])
    }

    fn column_values(table: &ExpenseTable, column: Column) -> Vec<String> {
        table.rows().iter().map(|e| column.cell(e)).collect()
    }

    #[test]
    fn test_amount_cell_is_two_decimals() {
        assert_eq!(Column::Amount.cell(&expense("d", "x", 23.5, "c")), "23.50");
    }

    #[test]
    fn test_amount_sort_is_lexicographic() {
        let mut table = sample();
        table.toggle_sort(Column::Amount);
        assert_eq!(column_values(&table, Column::Amount), vec!["10.00", "2.00", "3.50"]);
    }

    #[test]
    fn test_second_sort_reverses() {
        let mut table = sample();
        assert!(!table.toggle_sort(Column::Date));
        let ascending = column_values(&table, Column::Date);
        assert_eq!(ascending, vec!["2024-01-05", "2024-01-06", "2024-01-07"]);

        assert!(table.toggle_sort(Column::Date));
        let mut reversed = ascending.clone();
        reversed.reverse();
        assert_eq!(column_values(&table, Column::Date), reversed);

        assert!(!table.toggle_sort(Column::Date));
        assert_eq!(column_values(&table, Column::Date), ascending);
    }

    #[test]
    fn test_toggle_state_is_per_column() {
        let mut table = sample();
        table.toggle_sort(Column::Date);
        table.toggle_sort(Column::Category);
        assert_eq!(table.sort_state(), Some((Column::Category, false)));
        // Date's second activation flips it even after another column was used
        assert!(table.toggle_sort(Column::Date));
    }

    #[test]
    fn test_sort_is_stable_for_ties() {
        let mut table = ExpenseTable::new(vec![
            expense("d1", "first", 1.0, "Same"),
            expense("d2", "second", 1.0, "Same"),
            expense("d3", "third", 1.0, "Alpha"),
        ]);
        table.toggle_sort(Column::Category);
        assert_eq!(column_values(&table, Column::Date), vec!["d3", "d1", "d2"]);
        table.toggle_sort(Column::Category);
        assert_eq!(column_values(&table, Column::Date), vec!["d1", "d2", "d3"]);
    }

    #[test]
    fn test_sort_is_case_sensitive_bytes() {
        let mut table = ExpenseTable::new(vec![
            expense("d1", "apple", 1.0, "c"),
            expense("d2", "Banana", 1.0, "c"),
        ]);
        table.toggle_sort(Column::Description);
        assert_eq!(column_values(&table, Column::Description), vec!["Banana", "apple"]);
    }

    #[test]
    fn test_column_lookup() {
        assert_eq!(Column::from_index(2), Some(Column::Description));
        assert_eq!(Column::from_index(4), None);
    }

    #[test]
    fn test_load_replaces_rows_and_resets_sort() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("a.csv");
        let second = dir.path().join("b.csv");
        std::fs::write(&first, "2024-01-05,Tesco,-1.00\n2024-01-06,Aldi,-2.00\n").unwrap();
        std::fs::write(&second, "2024-02-01,Netflix,-9.99\n").unwrap();

        let rules = build_rules();
        let mut table = ExpenseTable::default();
        assert_eq!(table.load(&first, &rules).unwrap(), 2);
        table.toggle_sort(Column::Amount);
        assert_eq!(table.load(&second, &rules).unwrap(), 1);
        assert_eq!(table.rows()[0].description, "Netflix");
        assert_eq!(table.sort_state(), None);
    }

    #[test]
    fn test_failed_load_keeps_previous_rows() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.csv");
        let bad = dir.path().join("bad.csv");
        std::fs::write(&good, "2024-01-05,Tesco,-1.00\n").unwrap();
        std::fs::write(&bad, "2024-01-05,Tesco,-1.00,x\n").unwrap();

        let rules = build_rules();
        let mut table = ExpenseTable::default();
        table.load(&good, &rules).unwrap();
        table.toggle_sort(Column::Date);
        assert!(table.load(&bad, &rules).is_err());
        assert!(table.load(&dir.path().join("missing.csv"), &rules).is_err());
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0].description, "Tesco");
        assert_eq!(table.sort_state(), Some((Column::Date, false)));
    }

    #[test]
    fn test_total() {
        assert_eq!(sample().total(), 15.5);
        assert_eq!(ExpenseTable::default().total(), 0.0);
    }
}
