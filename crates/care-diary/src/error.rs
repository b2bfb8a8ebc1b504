//! Error types for care-diary

use std::path::PathBuf;

use thiserror::Error;

/// Result type for care-diary operations
pub type DiaryResult<T> = std::result::Result<T, DiaryError>;

/// Errors surfaced by the transfer pipeline
#[derive(Debug, Error)]
pub enum DiaryError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Day or night author missing
    #[error("Both the day and the night author are required")]
    MissingAuthors,

    /// Shift log file not found
    #[error("Shift log not found: {0}")]
    LogNotFound(PathBuf),

    /// CSV error
    #[error(transparent)]
    Csv(#[from] care_diary_csv::CsvError),

    /// Ledger error
    #[error(transparent)]
    Ledger(#[from] care_diary_ledger::LedgerError),

    /// Core error
    #[error(transparent)]
    Core(#[from] care_diary_core::Error),
}
