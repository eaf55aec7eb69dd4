use std::io::Read;
use std::path::Path;

use crate::categorizer::{categorize, RuleSet};
use crate::error::{Result, TrackerError};
use crate::models::{Expense, Transaction};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Numeric coercion for the Amount column. Anything that is not a plain
/// finite decimal after trimming becomes missing, including `inf`/`-inf`,
/// which a float parser would otherwise accept and display as infinite.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let value: f64 = raw.trim().parse().ok()?;
    value.is_finite().then_some(value)
}

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

/// Read headerless Date,Description,Amount rows by position. Short rows get a
/// missing amount; rows with extra fields are a structural error, and so is a
/// file with no rows at all.
pub fn read_transactions<R: Read>(reader: R) -> Result<Vec<Transaction>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        if record.len() > 3 {
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            return Err(TrackerError::Malformed {
                line,
                fields: record.len(),
            });
        }
        let date = record.get(0).unwrap_or("").to_string();
        let description = record.get(1).unwrap_or("").to_string();
        let amount = record.get(2).and_then(parse_amount);
        if amount.is_none() {
            log::debug!(
                "amount not numeric at line {}: {:?}",
                record.position().map(|p| p.line()).unwrap_or(0),
                record.get(2).unwrap_or("")
            );
        }
        rows.push(Transaction {
            date,
            description,
            amount,
        });
    }
    if rows.is_empty() {
        return Err(TrackerError::Empty);
    }
    Ok(rows)
}

/// Keep strictly negative amounts and tag each with its category. Missing
/// amounts never qualify.
pub fn to_expenses(transactions: Vec<Transaction>, rules: &RuleSet) -> Vec<Expense> {
    transactions
        .into_iter()
        .filter_map(|t| match t.amount {
            Some(amount) if amount < 0.0 => {
                let category = categorize(&t.description, rules).to_string();
                Some(Expense {
                    date: t.date,
                    description: t.description,
                    amount: amount.abs(),
                    category,
                })
            }
            _ => None,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// load
// ---------------------------------------------------------------------------

/// Parse the file at `file_path` into categorized expenses, preserving source
/// row order. Nothing is returned unless the whole file was read.
pub fn load(file_path: &Path, rules: &RuleSet) -> Result<Vec<Expense>> {
    log::debug!("loading {}", file_path.display());
    let file = std::fs::File::open(file_path)?;
    let transactions = read_transactions(std::io::BufReader::new(file))?;
    let total = transactions.len();
    let expenses = to_expenses(transactions, rules);
    log::info!(
        "loaded {}: {} rows, {} expenses",
        file_path.display(),
        total,
        expenses.len()
    );
    Ok(expenses)
}
