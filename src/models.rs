use serde::Serialize;

/// One row of the source file. `amount` is `None` when the cell failed
/// numeric coercion or was absent.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub date: String,
    pub description: String,
    pub amount: Option<f64>,
}

/// A transaction with a negative amount, tagged with its category at load time.
#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    pub date: String,
    pub description: String,
    /// Absolute value of the source amount.
    pub amount: f64,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryEntry {
    pub category: String,
    pub total: f64,
    pub count: usize,
    pub pct: f64,
}
