//! Ledger error types

use thiserror::Error;

/// Result type for ledger operations
pub type LedgerResult<T> = std::result::Result<T, LedgerError>;

/// Errors that can occur while transcribing into record books
#[derive(Debug, Error)]
pub enum LedgerError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A page had to be created without its template
    #[error("Template sheet '{template}' not found; page '{page}' would be created without it")]
    MissingTemplate { template: String, page: String },

    /// A page the engine expected to exist is gone
    #[error("Page not found: {0}")]
    PageNotFound(String),

    /// A store could not be read or written
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// Core error
    #[error("Core error: {0}")]
    Core(#[from] care_diary_core::Error),
}
