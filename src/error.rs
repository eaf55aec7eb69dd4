use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Malformed row at line {line}: expected 3 fields, saw {fields}")]
    Malformed { line: u64, fields: usize },

    #[error("No columns to parse from file")]
    Empty,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Interactive view requires a terminal")]
    NotATerminal,
}

pub type Result<T> = std::result::Result<T, TrackerError>;
