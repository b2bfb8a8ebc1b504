//! Convenient re-exports
//!
//! ```rust
//! use care_diary::prelude::*;
//! ```

pub use crate::{
    assign_authors, transfer, AuthoredEntry, Book, Collection, CsvReader, CsvWriter, Cursor,
    CursorStore, DiaryError, DiaryResult, DiaryWorkspace, LogEntry, LogExtractor, PageLayout,
    PaginationEngine, Preferences, RecordSink, Roster, Sheet, Shift, TransferOptions,
    TransferReport, TransferRequest,
};
