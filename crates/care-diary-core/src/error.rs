//! Error types for care-diary-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in care-diary-core
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid cell address format
    #[error("Invalid cell address: {0}")]
    InvalidAddress(String),

    /// Row index out of bounds (rows are 1-based)
    #[error("Row index {0} out of bounds (1..={1})")]
    RowOutOfBounds(u32, u32),

    /// Column index out of bounds (columns are 1-based)
    #[error("Column index {0} out of bounds (1..={1})")]
    ColumnOutOfBounds(u16, u16),

    /// Sheet not found by name
    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    /// Invalid sheet name
    #[error("Invalid sheet name: {0}")]
    InvalidSheetName(String),

    /// Duplicate sheet name
    #[error("Sheet name already exists: {0}")]
    DuplicateSheetName(String),

    /// Unrecognised shift label
    #[error("Unknown shift label: {0}")]
    UnknownShift(String),
}
