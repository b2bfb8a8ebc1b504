//! # care-diary-core
//!
//! Core data structures for the care-diary shift log and the per-resident
//! record books it is transcribed into.
//!
//! This crate provides the fundamental types used throughout care-diary:
//! - [`CellValue`] and [`CellAddress`] - Cell contents and addressing
//! - [`Sheet`], [`Book`] - Sparse grids and ordered collections of them
//! - [`LogEntry`], [`AuthoredEntry`], [`Shift`] - Extracted diary entries
//! - [`normalize`] - Canonical form of raw cell text
//! - [`calendar`] - Era-year and weekday labels
//!
//! ## Example
//!
//! ```rust
//! use care_diary_core::{Book, CellValue};
//!
//! let mut book = Book::new();
//! book.add_sheet("personal").unwrap();
//! let sheet = book.sheet_mut("personal").unwrap();
//!
//! // Rows and columns are 1-based, as printed on the record page
//! sheet.set_value("A2", "令和7年").unwrap();
//! sheet.set_value_at(4, 3, CellValue::string("Ate well")).unwrap();
//! assert_eq!(sheet.text_at(4, 3), "Ate well");
//! ```

pub mod book;
pub mod calendar;
pub mod cell;
pub mod entry;
pub mod error;
pub mod sheet;
pub mod text;

// Re-exports for convenience
pub use book::Book;
pub use cell::{CellAddress, CellValue};
pub use entry::{AuthoredEntry, EntryRecord, LogEntry, Shift};
pub use error::{Error, Result};
pub use sheet::Sheet;
pub use text::normalize;

/// Maximum number of rows in a sheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a sheet (Excel limit)
pub const MAX_COLS: u16 = 16_384;

/// Maximum length of a sheet name
pub const MAX_SHEET_NAME_LEN: usize = 31;
