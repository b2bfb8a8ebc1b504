//! Fixed layout of a personal record page

use care_diary_core::CellAddress;

/// Where things live on a record page
///
/// ```text
/// row 1   title (from the template)
/// row 2   A2: era-year label        C2: resident label
/// row 3   column headings
/// row 4.. date | weekday | note line | author / year marker
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLayout {
    /// Rows before the first content row
    pub header_rows: u32,
    /// Content rows per page
    pub row_limit: u32,
    /// Cell holding the era-year label
    pub year_cell: CellAddress,
    /// Cell holding the resident label
    pub resident_cell: CellAddress,
    /// Column for the month/day label
    pub date_col: u16,
    /// Column for the weekday symbol
    pub weekday_col: u16,
    /// Column for note lines
    pub content_col: u16,
    /// Column for the author and year markers
    pub author_col: u16,
    /// Sheet copied for every new page
    pub template: String,
}

impl PageLayout {
    /// First row that may hold content
    pub fn first_content_row(&self) -> u32 {
        self.header_rows + 1
    }

    /// Last row that may hold content
    pub fn last_content_row(&self) -> u32 {
        self.header_rows + self.row_limit
    }

    /// Columns checked when deciding whether a row is free
    pub fn used_cols(&self) -> std::ops::RangeInclusive<u16> {
        let cols = [
            self.date_col,
            self.weekday_col,
            self.content_col,
            self.author_col,
        ];
        let lo = cols.iter().copied().min().unwrap_or(1);
        let hi = cols.iter().copied().max().unwrap_or(1);
        lo..=hi
    }

    /// Text written into the resident cell
    pub fn resident_label(&self, name: &str) -> String {
        format!("\u{3000}入所者氏名\u{3000}{name}")
    }
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            header_rows: 3,
            row_limit: 31,
            year_cell: CellAddress::new(2, 1),
            resident_cell: CellAddress::new(2, 3),
            date_col: 1,
            weekday_col: 2,
            content_col: 3,
            author_col: 4,
            template: "personal".into(),
        }
    }
}
