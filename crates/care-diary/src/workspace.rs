//! On-disk layout of a diary workspace
//!
//! ```text
//! <base>/
//!   template.json                 template book holding the `personal` sheet
//!   2階個人ファイル.json            record books, one per collection
//!   3階個人ファイル.json
//!   退所者個人ファイル.json
//!   cursors.json                  write cursor per resident
//!   residents.json                roster
//!   diary_<yyyy>.csv              entry journal per calendar year
//!   prefs.json                    saved authors and last date
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use care_diary_core::Book;
use care_diary_csv::CsvJournal;
use care_diary_ledger::{storage, BookSink, Collection, JsonCursorStore, PageLayout, Roster};

use crate::error::DiaryResult;
use crate::prefs::Preferences;

/// A directory holding record books, cursors, roster and journals
#[derive(Debug, Clone)]
pub struct DiaryWorkspace {
    base: PathBuf,
    layout: PageLayout,
}

impl DiaryWorkspace {
    /// Open (and create if needed) a workspace directory
    pub fn open<P: AsRef<Path>>(base: P) -> DiaryResult<Self> {
        Self::with_layout(base, PageLayout::default())
    }

    /// Open a workspace whose pages use a custom layout
    pub fn with_layout<P: AsRef<Path>>(base: P, layout: PageLayout) -> DiaryResult<Self> {
        let base = base.as_ref().to_path_buf();
        fs::create_dir_all(&base)?;
        Ok(Self { base, layout })
    }

    /// Workspace directory
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Page layout of every record book
    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    /// Path of a collection's record book
    pub fn book_path(&self, collection: Collection) -> PathBuf {
        self.base.join(format!("{}.json", collection.file_stem()))
    }

    /// Path of the template book
    pub fn template_path(&self) -> PathBuf {
        self.base.join("template.json")
    }

    /// Path of the cursor store
    pub fn cursor_path(&self) -> PathBuf {
        self.base.join("cursors.json")
    }

    /// Path of the roster
    pub fn roster_path(&self) -> PathBuf {
        self.base.join("residents.json")
    }

    /// Path of the preferences file
    pub fn prefs_path(&self) -> PathBuf {
        self.base.join("prefs.json")
    }

    /// Path of the journal for a calendar year
    pub fn journal_path(&self, year: i32) -> PathBuf {
        self.base.join(format!("diary_{year}.csv"))
    }

    /// Write the default template book unless one exists; returns true when written
    pub fn init_template(&self) -> DiaryResult<bool> {
        let path = self.template_path();
        if path.exists() {
            return Ok(false);
        }

        let mut book = Book::new();
        book.add_sheet(&self.layout.template)?;
        if let Some(sheet) = book.sheet_mut(&self.layout.template) {
            sheet.set_value("A1", "個人記録")?;
            let heading = self.layout.header_rows;
            sheet.set_value_at(heading, self.layout.date_col, "月日")?;
            sheet.set_value_at(heading, self.layout.weekday_col, "曜日")?;
            sheet.set_value_at(heading, self.layout.content_col, "記事")?;
            sheet.set_value_at(heading, self.layout.author_col, "記録者")?;
        }
        write_json(&path, &book)?;
        Ok(true)
    }

    /// Load a collection's record book
    ///
    /// A collection seen for the first time starts as a copy of the template
    /// book, or as an empty book when there is no template.
    pub fn load_book(&self, collection: Collection) -> DiaryResult<Book> {
        let path = self.book_path(collection);
        if path.exists() {
            return read_json(&path);
        }

        let template = self.template_path();
        if template.exists() {
            tracing::info!(%collection, "starting record book from template");
            return read_json(&template);
        }

        tracing::warn!(%collection, template = %template.display(), "no template book");
        Ok(Book::new())
    }

    /// Load a collection's record book wrapped as a sink
    pub fn open_sink(&self, collection: Collection) -> DiaryResult<BookSink> {
        Ok(BookSink::new(self.load_book(collection)?, self.layout.clone()))
    }

    /// Save a collection's record book atomically
    pub fn save_book(&self, collection: Collection, book: &Book) -> DiaryResult<()> {
        write_json(&self.book_path(collection), book)
    }

    /// Open the cursor store
    pub fn cursors(&self) -> DiaryResult<JsonCursorStore> {
        Ok(JsonCursorStore::open(self.cursor_path())?)
    }

    /// Load the roster
    pub fn roster(&self) -> DiaryResult<Roster> {
        Ok(Roster::load(self.roster_path())?)
    }

    /// Save the roster
    pub fn save_roster(&self, roster: &Roster) -> DiaryResult<()> {
        Ok(roster.save(self.roster_path())?)
    }

    /// Open the journal for a calendar year
    pub fn journal(&self, year: i32) -> DiaryResult<CsvJournal> {
        Ok(CsvJournal::open(self.journal_path(year))?)
    }

    /// Load saved preferences
    pub fn prefs(&self) -> Preferences {
        Preferences::load(self.prefs_path())
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> DiaryResult<T> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> DiaryResult<()> {
    Ok(storage::write_json(path, value)?)
}
