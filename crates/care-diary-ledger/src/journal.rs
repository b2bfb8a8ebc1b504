//! Journal of every transcribed entry

use ahash::AHashSet;
use chrono::NaiveDate;

use care_diary_core::{EntryRecord, Shift};

use crate::error::LedgerResult;

/// Duplicate key of a journal row
pub type EntryKey = (String, NaiveDate, Shift, String);

/// Append-only entry storage that ignores duplicate inserts
///
/// Two records are duplicates when resident, date, shift and content match;
/// the author does not take part in the key.
pub trait EntryStore {
    /// Insert records, skipping duplicates; returns the number inserted
    fn insert_batch(&mut self, records: &[EntryRecord]) -> LedgerResult<usize>;
}

/// Entry store kept in memory only
#[derive(Debug, Default)]
pub struct MemoryEntryStore {
    keys: AHashSet<EntryKey>,
    records: Vec<EntryRecord>,
}

impl MemoryEntryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored records in insertion order
    pub fn records(&self) -> &[EntryRecord] {
        &self.records
    }
}

impl EntryStore for MemoryEntryStore {
    fn insert_batch(&mut self, records: &[EntryRecord]) -> LedgerResult<usize> {
        let mut inserted = 0;
        for record in records {
            if self.keys.insert(record.key()) {
                self.records.push(record.clone());
                inserted += 1;
            }
        }
        Ok(inserted)
    }
}
