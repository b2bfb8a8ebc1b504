//! Page export

use std::path::Path;

use care_diary_core::Sheet;
use care_diary_csv::{CsvWriteOptions, CsvWriter};
use care_diary_ledger::{Collection, LedgerError, PageLayout};

use crate::error::DiaryResult;
use crate::workspace::DiaryWorkspace;

/// Copy of a page limited to the layout's record columns
pub fn page_view(source: &Sheet, layout: &PageLayout) -> care_diary_core::Result<Sheet> {
    let mut view = Sheet::new(source.name());
    for row in 1..=source.max_row() {
        for col in layout.used_cols() {
            let value = source.value_at(row, col);
            if !value.is_blank() {
                view.set_value_at(row, col, value.clone())?;
            }
        }
    }
    Ok(view)
}

/// Export one page of a record book as CSV
pub fn export_page<P: AsRef<Path>>(
    workspace: &DiaryWorkspace,
    collection: Collection,
    page: &str,
    path: P,
    options: &CsvWriteOptions,
) -> DiaryResult<()> {
    let book = workspace.load_book(collection)?;
    let sheet = book
        .sheet(page)
        .ok_or_else(|| LedgerError::PageNotFound(page.to_string()))?;

    let view = page_view(sheet, workspace.layout())?;
    CsvWriter::write_file(&view, path.as_ref(), options)?;
    tracing::info!(%collection, page, path = %path.as_ref().display(), "exported page");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use care_diary_core::Book;
    use care_diary_csv::LineTerminator;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_export_drops_columns_outside_layout() {
        let dir = tempfile::tempdir().unwrap();
        let ws = DiaryWorkspace::open(dir.path()).unwrap();

        let mut book = Book::new();
        book.add_sheet("宮本").unwrap();
        let sheet = book.sheet_mut("宮本").unwrap();
        sheet.set_value("A2", "令和7年").unwrap();
        sheet.set_value("C4", "良眠").unwrap();
        sheet.set_value("D4", "加藤").unwrap();
        sheet.set_value("F4", "memo").unwrap();
        ws.save_book(Collection::SecondFloor, &book).unwrap();

        let out = dir.path().join("page.csv");
        let options = CsvWriteOptions {
            line_terminator: LineTerminator::LF,
            ..Default::default()
        };
        export_page(&ws, Collection::SecondFloor, "宮本", &out, &options).unwrap();

        let text = std::fs::read_to_string(&out).unwrap();
        assert_eq!(text, ",,,\n令和7年,,,\n,,,\n,,良眠,加藤\n");
    }

    #[test]
    fn test_export_unknown_page() {
        let dir = tempfile::tempdir().unwrap();
        let ws = DiaryWorkspace::open(dir.path()).unwrap();
        let out = dir.path().join("page.csv");

        let result = export_page(&ws, Collection::Departed, "宮本", out, &Default::default());
        assert!(result.is_err());
    }
}
