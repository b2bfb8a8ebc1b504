//! Entry journal stored as CSV

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use ahash::AHashSet;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use care_diary_core::{EntryRecord, Shift};
use care_diary_ledger::journal::EntryKey;
use care_diary_ledger::{EntryStore, LedgerError, LedgerResult};

use crate::error::{CsvError, CsvResult};

/// One journal line
#[derive(Debug, Serialize, Deserialize)]
struct JournalRow {
    resident_name: String,
    date: NaiveDate,
    shift: String,
    content: String,
    author: String,
}

impl From<&EntryRecord> for JournalRow {
    fn from(record: &EntryRecord) -> Self {
        Self {
            resident_name: record.resident.clone(),
            date: record.date,
            shift: record.shift.label().to_string(),
            content: record.content.clone(),
            author: record.author.clone(),
        }
    }
}

/// Append-only CSV journal of diary entries
///
/// Columns: `resident_name,date,shift,content,author`. Rows already in the file
/// seed the duplicate set, so re-running a transfer for the same day appends
/// nothing.
#[derive(Debug)]
pub struct CsvJournal {
    path: PathBuf,
    keys: AHashSet<EntryKey>,
}

impl CsvJournal {
    /// Open the journal at `path`; a missing file is an empty journal
    pub fn open<P: AsRef<Path>>(path: P) -> CsvResult<Self> {
        let path = path.as_ref().to_path_buf();
        let mut keys = AHashSet::new();

        if path.exists() {
            let mut reader = csv::Reader::from_path(&path)?;
            for (i, result) in reader.deserialize::<JournalRow>().enumerate() {
                let row = result?;
                // Line 1 is the header
                let line = i as u64 + 2;
                let shift: Shift = row.shift.parse().map_err(|e: care_diary_core::Error| {
                    CsvError::Parse {
                        line,
                        message: e.to_string(),
                    }
                })?;
                keys.insert((row.resident_name, row.date, shift, row.content));
            }
            log::debug!("journal {} holds {} entries", path.display(), keys.len());
        }

        Ok(Self { path, keys })
    }

    /// Path of the journal file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of distinct entries in the journal
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Check if the journal holds no entries
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Check if a record is already journaled
    pub fn contains(&self, record: &EntryRecord) -> bool {
        self.keys.contains(&record.key())
    }

    fn append(&mut self, records: &[EntryRecord]) -> CsvResult<usize> {
        let fresh: Vec<&EntryRecord> = {
            let mut batch_keys = AHashSet::new();
            records
                .iter()
                .filter(|r| !self.keys.contains(&r.key()) && batch_keys.insert(r.key()))
                .collect()
        };
        if fresh.is_empty() {
            return Ok(0);
        }

        let write_header = !self.path.exists() || std::fs::metadata(&self.path)?.len() == 0;
        let file: File = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(write_header)
            .from_writer(file);

        for record in &fresh {
            writer.serialize(JournalRow::from(*record))?;
        }
        writer.flush()?;

        for record in &fresh {
            self.keys.insert(record.key());
        }
        Ok(fresh.len())
    }
}

impl EntryStore for CsvJournal {
    fn insert_batch(&mut self, records: &[EntryRecord]) -> LedgerResult<usize> {
        self.append(records)
            .map_err(|e| LedgerError::StoreUnavailable(format!("{}: {e}", self.path.display())))
    }
}
