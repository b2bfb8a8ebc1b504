//! Record sink: where transcribed cell values land

use care_diary_core::{Book, CellAddress, CellValue};

use crate::error::{LedgerError, LedgerResult};
use crate::layout::PageLayout;

/// How a page came into existence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageCreation {
    /// Copied from the template sheet
    FromTemplate,
    /// The template was missing; the page is structurally empty
    Bare,
}

/// Page storage the pagination engine writes into
///
/// Pages are addressed by name. The sink owns physical storage, template
/// duplication and page ordering; the engine only asks for pages and writes
/// values by row and column.
pub trait RecordSink {
    /// Layout shared by every page of this sink
    fn layout(&self) -> &PageLayout;

    /// Check if a page exists
    fn page_exists(&self, page: &str) -> bool;

    /// Create a page named `page`, copying the layout's template when present
    fn create_page(&mut self, page: &str) -> LedgerResult<PageCreation>;

    /// Place `page` immediately before `relative_to`
    fn reorder(&mut self, page: &str, relative_to: &str) -> LedgerResult<()>;

    /// Write one cell
    fn write_cell(&mut self, page: &str, row: u32, col: u16, value: CellValue) -> LedgerResult<()>;

    /// Displayed text of a header cell (empty when unset)
    fn header_value(&self, page: &str, cell: CellAddress) -> String;

    /// Check if every used column of `row` is blank
    fn is_row_blank(&self, page: &str, row: u32) -> bool;

    /// Last row holding any cell (0 for an empty page)
    fn last_row(&self, page: &str) -> u32;
}

/// A [`RecordSink`] over an in-memory [`Book`]
#[derive(Debug, Clone)]
pub struct BookSink {
    book: Book,
    layout: PageLayout,
}

impl BookSink {
    /// Wrap a book
    pub fn new(book: Book, layout: PageLayout) -> Self {
        Self { book, layout }
    }

    /// Get the book
    pub fn book(&self) -> &Book {
        &self.book
    }

    /// Unwrap the book
    pub fn into_book(self) -> Book {
        self.book
    }

    /// Check if the template sheet is present
    pub fn has_template(&self) -> bool {
        self.book.contains(&self.layout.template)
    }
}

impl RecordSink for BookSink {
    fn layout(&self) -> &PageLayout {
        &self.layout
    }

    fn page_exists(&self, page: &str) -> bool {
        self.book.contains(page)
    }

    fn create_page(&mut self, page: &str) -> LedgerResult<PageCreation> {
        if self.has_template() {
            self.book.copy_sheet(&self.layout.template, page)?;
            Ok(PageCreation::FromTemplate)
        } else {
            self.book.add_sheet(page)?;
            Ok(PageCreation::Bare)
        }
    }

    fn reorder(&mut self, page: &str, relative_to: &str) -> LedgerResult<()> {
        self.book.move_before(page, relative_to)?;
        Ok(())
    }

    fn write_cell(&mut self, page: &str, row: u32, col: u16, value: CellValue) -> LedgerResult<()> {
        let sheet = self
            .book
            .sheet_mut(page)
            .ok_or_else(|| LedgerError::PageNotFound(page.into()))?;
        sheet.set_value_at(row, col, value)?;
        Ok(())
    }

    fn header_value(&self, page: &str, cell: CellAddress) -> String {
        self.book
            .sheet(page)
            .map(|s| s.text_at(cell.row, cell.col))
            .unwrap_or_default()
    }

    fn is_row_blank(&self, page: &str, row: u32) -> bool {
        self.book
            .sheet(page)
            .map_or(true, |s| s.is_row_blank(row, self.layout.used_cols()))
    }

    fn last_row(&self, page: &str) -> u32 {
        self.book.sheet(page).map_or(0, |s| s.max_row())
    }
}
