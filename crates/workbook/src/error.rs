use thiserror::Error;

/// Errors that can occur while fetching, decoding or rebuilding a workbook
#[derive(Error, Debug)]
pub enum WorkbookError {
    #[error("Workbook could not be opened: {0}")]
    Open(String),

    #[error("Sheet not found: {name}")]
    SheetNotFound { name: String },

    #[error("Sheet {sheet} has no '{column}' column")]
    MissingColumn { sheet: String, column: String },

    #[error("Sheet {sheet}, row {row}: expected a number in '{column}', got '{value}'")]
    BadCell {
        sheet: String,
        row: usize,
        column: String,
        value: String,
    },

    #[error("Workbook fetch failed: {0}")]
    Fetch(String),

    #[error("Workbook write failed: {0}")]
    Write(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, WorkbookError>;
