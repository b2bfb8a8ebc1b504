//! Lazy row stream over a tabular source

use care_diary_core::normalize;

use crate::source::TabularSource;
use crate::{CONTENT_COLUMN, NAME_COLUMN};

/// One normalized (name, content) row of a shift log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// Row number in the source
    pub index: u32,
    /// Normalized name column
    pub name: String,
    /// Normalized content column
    pub content: String,
}

impl RawRow {
    /// Both columns are empty
    pub fn is_blank(&self) -> bool {
        self.name.is_empty() && self.content.is_empty()
    }
}

/// Iterator over the rows of a source from a start row to its last populated row
///
/// The stream stops only at the end of the source; early termination on runs
/// of blank rows is left to the consumer.
#[derive(Debug, Clone)]
pub struct RowStream<S> {
    source: S,
    next: u32,
    last: u32,
}

impl<S: TabularSource> RowStream<S> {
    /// Stream rows of `source` starting at `start`
    pub fn new(source: S, start: u32) -> Self {
        let last = source.max_row();
        Self {
            source,
            next: start.max(1),
            last,
        }
    }

    fn column_text(&self, row: u32, col: u16) -> String {
        let raw = self.source.cell(row, col).map(|v| v.to_string());
        normalize(raw.as_deref())
    }
}

impl<S: TabularSource> Iterator for RowStream<S> {
    type Item = RawRow;

    fn next(&mut self) -> Option<RawRow> {
        if self.next > self.last {
            return None;
        }
        let index = self.next;
        self.next += 1;

        Some(RawRow {
            index,
            name: self.column_text(index, NAME_COLUMN),
            content: self.column_text(index, CONTENT_COLUMN),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.last + 1).saturating_sub(self.next) as usize;
        (remaining, Some(remaining))
    }
}

/// Stream the rows of `source` from `start`
pub fn rows<S: TabularSource>(source: S, start: u32) -> RowStream<S> {
    RowStream::new(source, start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use care_diary_core::Sheet;
    use pretty_assertions::assert_eq;

    fn sample() -> Sheet {
        let mut sheet = Sheet::new("log");
        sheet.set_value("A1", "氏名").unwrap();
        sheet.set_value("B1", "記事").unwrap();
        sheet.set_value("A2", " 宮本 ").unwrap();
        sheet.set_value("B2", "体温３６．５").unwrap();
        sheet.set_value("B4", "　").unwrap();
        sheet.set_value_at(5, 1, 201.0).unwrap();
        sheet
    }

    #[test]
    fn test_rows_from_start() {
        let sheet = sample();
        let got: Vec<RawRow> = rows(&sheet, 2).collect();

        assert_eq!(got.len(), 4);
        assert_eq!(
            got[0],
            RawRow {
                index: 2,
                name: "宮本".into(),
                content: "体温36．5".into(),
            }
        );
        assert!(got[1].is_blank());
        assert!(got[2].is_blank());
        assert_eq!(got[3].name, "201");
    }

    #[test]
    fn test_restartable() {
        let sheet = sample();
        assert_eq!(rows(&sheet, 1).count(), 5);
        assert_eq!(rows(&sheet, 4).count(), 2);
        assert_eq!(rows(&sheet, 6).count(), 0);
    }

    #[test]
    fn test_empty_source() {
        let sheet = Sheet::new("empty");
        assert_eq!(rows(&sheet, 2).next(), None);
    }
}
