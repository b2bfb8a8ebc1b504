//! # care-diary-extract
//!
//! Turns a free-form shift log into structured [`LogEntry`] records.
//!
//! A shift log is a two-column table: a resident name in column 1 and a note
//! in column 2, with continuation lines leaving the name blank. The log has no
//! shift column; the day/night boundary is inferred from marker rows
//! (`以上`, `巡回`, `夜間浴`).
//!
//! ```rust
//! use care_diary_core::{Sheet, Shift};
//! use care_diary_extract::{assign_authors, LogExtractor};
//!
//! let mut log = Sheet::new("15日裏");
//! log.set_value("A2", "Alice").unwrap();
//! log.set_value("B2", "note1").unwrap();
//! log.set_value("A3", "以上").unwrap();
//! log.set_value("A4", "Bob").unwrap();
//! log.set_value("B4", "note2").unwrap();
//!
//! let entries = LogExtractor::default().extract(&log);
//! assert_eq!(entries[1].shift, Shift::Night);
//!
//! let authored = assign_authors(entries, "Sato", "Kato");
//! assert_eq!(authored[1].author, "Kato");
//! ```
//!
//! [`LogEntry`]: care_diary_core::LogEntry

mod author;
mod extractor;
mod rows;
mod source;

pub use author::assign_authors;
pub use extractor::{ExtractOptions, LogExtractor};
pub use rows::{rows, RawRow, RowStream};
pub use source::TabularSource;

/// Column holding the resident name
pub const NAME_COLUMN: u16 = 1;

/// Column holding the note text
pub const CONTENT_COLUMN: u16 = 2;

/// First data row of a shift log (row 1 is the column header)
pub const DEFAULT_START_ROW: u32 = 2;
