use thiserror::Error;

/// Rejected board assignments.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("board must have at least one row")]
    Empty,

    #[error("row {row} places a queen in column {column}, board size is {size}")]
    ColumnOutOfRange {
        row: usize,
        column: usize,
        size: usize,
    },
}

/// Failures while writing the step trace out as CSV.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("browser: {0}")]
    Browser(String),
}
