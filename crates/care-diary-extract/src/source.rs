//! Tabular source abstraction

use care_diary_core::{CellValue, Sheet};

/// A grid of cells the row stream can read from
///
/// Rows and columns are 1-based.
pub trait TabularSource {
    /// Cell value at `row`/`col`, or `None` when the cell is unset
    fn cell(&self, row: u32, col: u16) -> Option<&CellValue>;

    /// Last populated row (0 for an empty source)
    fn max_row(&self) -> u32;
}

impl TabularSource for Sheet {
    fn cell(&self, row: u32, col: u16) -> Option<&CellValue> {
        let value = self.value_at(row, col);
        (!value.is_empty()).then_some(value)
    }

    fn max_row(&self) -> u32 {
        Sheet::max_row(self)
    }
}

impl<T: TabularSource + ?Sized> TabularSource for &T {
    fn cell(&self, row: u32, col: u16) -> Option<&CellValue> {
        (**self).cell(row, col)
    }

    fn max_row(&self) -> u32 {
        (**self).max_row()
    }
}
