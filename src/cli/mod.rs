pub mod browse;
pub mod list;
pub mod rules;
pub mod summary;

use clap::{Parser, Subcommand, ValueEnum};

use crate::table::Column;

#[derive(Parser)]
#[command(
    name = "expenses",
    about = "Categorize bank-statement expenses by keyword and browse them."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive table, optionally loading a CSV first.
    Browse {
        /// Headerless Date,Description,Amount CSV file
        file: Option<String>,
    },
    /// Print the categorized expenses as a table.
    List {
        /// Headerless Date,Description,Amount CSV file
        file: String,
        /// Column to sort by (compares the displayed text)
        #[arg(long, value_enum)]
        sort: Option<SortColumn>,
        /// Sort descending
        #[arg(long, requires = "sort")]
        desc: bool,
    },
    /// Print spending totals per category.
    Summary {
        /// Headerless Date,Description,Amount CSV file
        file: String,
        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Show the built-in keyword rules in precedence order.
    Rules,
}

#[derive(Clone, Copy, Debug, PartialEq, ValueEnum)]
pub enum SortColumn {
    Date,
    Category,
    Description,
    Amount,
}

impl From<SortColumn> for Column {
    fn from(value: SortColumn) -> Self {
        match value {
            SortColumn::Date => Column::Date,
            SortColumn::Category => Column::Category,
            SortColumn::Description => Column::Description,
            SortColumn::Amount => Column::Amount,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
