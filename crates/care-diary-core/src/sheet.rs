//! Sheet type

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use crate::cell::{CellAddress, CellValue};
use crate::error::{Error, Result};
use crate::{MAX_COLS, MAX_ROWS};

static EMPTY: CellValue = CellValue::Empty;

/// A sheet: a named, sparse grid of cell values
///
/// Rows and columns are 1-based. Only non-empty cells are stored, so writing
/// [`CellValue::Empty`] removes a cell.
///
/// Structure: `BTreeMap<row, BTreeMap<col, CellValue>>`
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sheet {
    /// Sheet name
    name: String,
    /// Row number → column map
    rows: BTreeMap<u32, BTreeMap<u16, CellValue>>,
}

impl Sheet {
    /// Create a new, empty sheet with the given name
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            rows: BTreeMap::new(),
        }
    }

    /// Get the sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the sheet name
    pub fn set_name<S: Into<String>>(&mut self, name: S) {
        self.name = name.into();
    }

    // === Cell Access ===

    /// Get a cell value by address string (e.g., "A2")
    pub fn value(&self, address: &str) -> Result<&CellValue> {
        let addr = CellAddress::parse(address)?;
        Ok(self.value_at(addr.row, addr.col))
    }

    /// Get a cell value by row and column
    pub fn value_at(&self, row: u32, col: u16) -> &CellValue {
        self.rows
            .get(&row)
            .and_then(|cols| cols.get(&col))
            .unwrap_or(&EMPTY)
    }

    /// Get a cell's displayed text by row and column (empty string when unset)
    pub fn text_at(&self, row: u32, col: u16) -> String {
        self.value_at(row, col).to_string()
    }

    /// Check if every cell of `row` within `cols` is blank
    pub fn is_row_blank(&self, row: u32, cols: RangeInclusive<u16>) -> bool {
        match self.rows.get(&row) {
            None => true,
            Some(cells) => cells.range(cols).all(|(_, v)| v.is_blank()),
        }
    }

    /// Last row holding any cell, or 0 for an empty sheet
    pub fn max_row(&self) -> u32 {
        self.rows.keys().next_back().copied().unwrap_or(0)
    }

    /// Last column holding any cell, or 0 for an empty sheet
    pub fn max_col(&self) -> u16 {
        self.rows
            .values()
            .filter_map(|cols| cols.keys().next_back().copied())
            .max()
            .unwrap_or(0)
    }

    /// Number of stored (non-empty) cells
    pub fn cell_count(&self) -> usize {
        self.rows.values().map(BTreeMap::len).sum()
    }

    // === Cell Modification ===

    /// Set a cell value by address string
    pub fn set_value<V: Into<CellValue>>(&mut self, address: &str, value: V) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.set_value_at(addr.row, addr.col, value)
    }

    /// Set a cell value by row and column
    pub fn set_value_at<V: Into<CellValue>>(&mut self, row: u32, col: u16, value: V) -> Result<()> {
        Self::validate_position(row, col)?;

        let value = value.into();
        if value.is_empty() {
            if let Some(cols) = self.rows.get_mut(&row) {
                cols.remove(&col);
                if cols.is_empty() {
                    self.rows.remove(&row);
                }
            }
        } else {
            self.rows.entry(row).or_default().insert(col, value);
        }
        Ok(())
    }

    fn validate_position(row: u32, col: u16) -> Result<()> {
        if row == 0 || row > MAX_ROWS {
            return Err(Error::RowOutOfBounds(row, MAX_ROWS));
        }
        if col == 0 || col > MAX_COLS {
            return Err(Error::ColumnOutOfBounds(col, MAX_COLS));
        }
        Ok(())
    }
}
