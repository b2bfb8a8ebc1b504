//! # care-diary-csv
//!
//! CSV I/O for care-diary: reading shift logs, exporting record pages and
//! journaling entries.

mod error;
mod journal;
mod options;
mod reader;
mod writer;

pub use error::{CsvError, CsvResult};
pub use journal::CsvJournal;
pub use options::{CsvReadOptions, CsvWriteOptions, LineTerminator};
pub use reader::CsvReader;
pub use writer::CsvWriter;
