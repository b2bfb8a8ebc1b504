//! Durable write cursors, one per resident

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::collection::Collection;
use crate::error::LedgerResult;
use crate::storage;

/// Where the next write for a resident lands
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    /// Resident name
    pub resident: String,
    /// Record book the page lives in
    pub collection: Collection,
    /// Page (sheet) name, e.g. `宮本武蔵(2)`
    pub page: String,
    /// Next writable row on the page
    pub next_row: u32,
}

/// Keyed storage of cursors with upsert semantics
pub trait CursorStore {
    /// Cursor for a resident, if one was ever written
    fn get(&self, resident: &str) -> LedgerResult<Option<Cursor>>;

    /// Insert or replace the cursor for `cursor.resident`
    fn put(&mut self, cursor: Cursor) -> LedgerResult<()>;
}

/// Cursor store kept in memory only
#[derive(Debug, Clone, Default)]
pub struct MemoryCursorStore {
    cursors: BTreeMap<String, Cursor>,
}

impl MemoryCursorStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// All cursors ordered by resident
    pub fn cursors(&self) -> impl Iterator<Item = &Cursor> {
        self.cursors.values()
    }

    /// Number of residents with a cursor
    pub fn len(&self) -> usize {
        self.cursors.len()
    }

    /// Check if no cursor was stored
    pub fn is_empty(&self) -> bool {
        self.cursors.is_empty()
    }
}

impl CursorStore for MemoryCursorStore {
    fn get(&self, resident: &str) -> LedgerResult<Option<Cursor>> {
        Ok(self.cursors.get(resident).cloned())
    }

    fn put(&mut self, cursor: Cursor) -> LedgerResult<()> {
        self.cursors.insert(cursor.resident.clone(), cursor);
        Ok(())
    }
}

/// Cursor store persisted as a JSON file
///
/// Updates stay in memory until [`JsonCursorStore::save`]; the file is
/// replaced atomically so a crash leaves either the old or the new cursors.
#[derive(Debug)]
pub struct JsonCursorStore {
    path: PathBuf,
    inner: MemoryCursorStore,
    dirty: bool,
}

impl JsonCursorStore {
    /// Open the store at `path`; a missing file is an empty store
    pub fn open<P: AsRef<Path>>(path: P) -> LedgerResult<Self> {
        let path = path.as_ref().to_path_buf();
        let mut inner = MemoryCursorStore::new();

        if path.exists() {
            let text = fs::read_to_string(&path)?;
            let cursors: Vec<Cursor> = serde_json::from_str(&text)?;
            for cursor in cursors {
                inner.cursors.insert(cursor.resident.clone(), cursor);
            }
            tracing::debug!(path = %path.display(), count = inner.len(), "loaded cursors");
        }

        Ok(Self {
            path,
            inner,
            dirty: false,
        })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All cursors ordered by resident
    pub fn cursors(&self) -> impl Iterator<Item = &Cursor> {
        self.inner.cursors()
    }

    /// Write pending updates to disk
    pub fn save(&mut self) -> LedgerResult<()> {
        if !self.dirty {
            return Ok(());
        }

        let cursors: Vec<&Cursor> = self.inner.cursors().collect();
        storage::write_json(&self.path, &cursors)?;

        self.dirty = false;
        tracing::debug!(path = %self.path.display(), count = cursors.len(), "saved cursors");
        Ok(())
    }
}

impl CursorStore for JsonCursorStore {
    fn get(&self, resident: &str) -> LedgerResult<Option<Cursor>> {
        self.inner.get(resident)
    }

    fn put(&mut self, cursor: Cursor) -> LedgerResult<()> {
        self.dirty = true;
        self.inner.put(cursor)
    }
}
