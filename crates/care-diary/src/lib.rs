//! # care-diary
//!
//! Transcribes a free-form shift log into paginated per-resident care
//! records.
//!
//! ## Features
//!
//! - Day/night entry extraction from a two-column shift log (CSV)
//! - Author stamping per shift
//! - Duplicate-ignoring entry journal
//! - Append-only record books with one page chain per resident, page
//!   rotation and year-boundary markers
//! - Durable write cursors so every run continues where the last one stopped
//! - Page export to CSV
//!
//! ## Example
//!
//! ```rust,no_run
//! use care_diary::prelude::*;
//! use chrono::NaiveDate;
//!
//! let workspace = DiaryWorkspace::open("records").unwrap();
//! let request = TransferRequest {
//!     log_path: "records/15日裏.csv".into(),
//!     date: NaiveDate::from_ymd_opt(2025, 5, 15).unwrap(),
//!     author_day: "佐藤".into(),
//!     author_night: "加藤".into(),
//! };
//! let report = transfer(&workspace, &request, &TransferOptions::default()).unwrap();
//! println!("{} entries transcribed", report.transcription.placements.len());
//! ```

pub mod error;
pub mod export;
pub mod prefs;
pub mod prelude;
pub mod transfer;
pub mod workspace;

pub use error::{DiaryError, DiaryResult};
pub use export::{export_page, page_view};
pub use prefs::Preferences;
pub use transfer::{transfer, transfer_sheet, TransferOptions, TransferReport, TransferRequest};
pub use workspace::DiaryWorkspace;

// Re-export core types
pub use care_diary_core::{
    calendar, normalize, AuthoredEntry, Book, CellAddress, CellValue, EntryRecord, LogEntry,
    Sheet, Shift,
};

// Re-export extraction
pub use care_diary_extract::{
    assign_authors, rows, ExtractOptions, LogExtractor, RawRow, RowStream, TabularSource,
};

// Re-export ledger types
pub use care_diary_ledger::{
    BookSink, Collection, Cursor, CursorStore, EngineOptions, EntryStore, JsonCursorStore,
    LedgerError, MemoryCursorStore, PageLayout, PaginationEngine, Placement, RecordSink, Resident,
    Roster, RosterSlot, TransferSession, TranscriptionReport,
};

// Re-export I/O types
pub use care_diary_csv::{
    CsvError, CsvJournal, CsvReadOptions, CsvReader, CsvWriteOptions, CsvWriter, LineTerminator,
};
