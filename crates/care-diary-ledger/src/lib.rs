//! # care-diary-ledger
//!
//! Transcribes authored diary entries into paginated, append-only record
//! books, one chain of pages per resident.
//!
//! - [`RecordSink`] - where cell values land ([`BookSink`] is the in-memory book)
//! - [`CursorStore`] - durable write position per resident
//! - [`PaginationEngine`] - page rotation, year markers, cursor advance
//! - [`TransferSession`] - the open sinks of one transfer run
//! - [`Collection`], [`Roster`] - which record book a resident belongs to
//! - [`EntryStore`] - duplicate-ignoring journal of every entry
//! - [`storage`] - synced temp-file-and-rename JSON writes

pub mod collection;
pub mod cursor;
pub mod engine;
pub mod error;
pub mod journal;
pub mod layout;
pub mod roster;
pub mod session;
pub mod sink;
pub mod storage;

pub use collection::Collection;
pub use cursor::{Cursor, CursorStore, JsonCursorStore, MemoryCursorStore};
pub use engine::{EngineOptions, PaginationEngine, Placement, TranscriptionReport};
pub use error::{LedgerError, LedgerResult};
pub use journal::{EntryStore, MemoryEntryStore};
pub use layout::PageLayout;
pub use roster::{Resident, Roster, RosterSlot};
pub use session::TransferSession;
pub use sink::{BookSink, PageCreation, RecordSink};
