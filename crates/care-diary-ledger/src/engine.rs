//! Pagination engine
//!
//! Places each authored entry on its resident's current page and advances the
//! resident's cursor. Per entry:
//!
//! 1. resolve the page and row from the cursor, or open the resident's page
//! 2. rotate to a new page if the cursor is already past the last content row
//! 3. insert a year marker if the page header shows another era-year
//! 4. rotate if the entry's lines do not fit in the rows left
//! 5. write the lines and persist the cursor
//!
//! An entry never straddles two pages and written rows are never rewritten.

use chrono::NaiveDate;

use care_diary_core::calendar::{
    era_label, era_year_of, month_day_label, parse_era_label, weekday_label, year_marker_label,
};
use care_diary_core::{AuthoredEntry, CellValue};

use crate::collection::Collection;
use crate::cursor::{Cursor, CursorStore};
use crate::error::{LedgerError, LedgerResult};
use crate::session::TransferSession;
use crate::sink::{PageCreation, RecordSink};

/// Engine options
#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Fail instead of creating pages when the template sheet is missing
    pub require_template: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            require_template: true,
        }
    }
}

/// Where one entry was written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    /// Resident name
    pub resident: String,
    /// Record book
    pub collection: Collection,
    /// Page the lines were written to
    pub page: String,
    /// Row of the first line
    pub first_row: u32,
    /// Row of the last line
    pub last_row: u32,
}

/// Outcome of a transcription run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranscriptionReport {
    /// One placement per written entry, in input order
    pub placements: Vec<Placement>,
    /// Pages created by rotation
    pub rotations: Vec<String>,
    /// Pages created for residents seen for the first time
    pub new_pages: Vec<String>,
    /// Year markers inserted, as (page, row)
    pub year_markers: Vec<(String, u32)>,
    /// Pages created without a template
    pub bare_pages: Vec<String>,
    /// Cursors that had to be re-derived by scanning the page
    pub resynced: Vec<String>,
    /// Entries with no content lines
    pub skipped: usize,
}

/// Current write position while handling one entry
struct Position {
    page: String,
    next_row: u32,
}

/// Writes authored entries into paginated record books
#[derive(Debug, Clone, Default)]
pub struct PaginationEngine {
    options: EngineOptions,
}

impl PaginationEngine {
    /// Create an engine with custom options
    pub fn new(options: EngineOptions) -> Self {
        Self { options }
    }

    /// Transcribe `entries` dated `date`, routing each resident with `route`
    pub fn transcribe<S, C, R>(
        &self,
        session: &mut TransferSession<'_, S>,
        cursors: &mut C,
        entries: &[AuthoredEntry],
        date: NaiveDate,
        route: R,
    ) -> LedgerResult<TranscriptionReport>
    where
        S: RecordSink,
        C: CursorStore,
        R: Fn(&str) -> Collection,
    {
        let mut report = TranscriptionReport::default();

        for entry in entries {
            let collection = route(&entry.name);
            let sink = session.sink_mut(collection)?;
            self.write_entry(sink, cursors, collection, entry, date, &mut report)?;
        }

        tracing::info!(
            written = report.placements.len(),
            rotations = report.rotations.len(),
            year_markers = report.year_markers.len(),
            "transcription finished"
        );
        Ok(report)
    }

    /// Write one entry into `sink` and advance the resident's cursor
    ///
    /// Returns `None` (and writes nothing) for an entry without content lines.
    pub fn write_entry<S, C>(
        &self,
        sink: &mut S,
        cursors: &mut C,
        collection: Collection,
        entry: &AuthoredEntry,
        date: NaiveDate,
        report: &mut TranscriptionReport,
    ) -> LedgerResult<Option<Placement>>
    where
        S: RecordSink,
        C: CursorStore,
    {
        let lines: Vec<&str> = entry.lines().collect();
        if lines.is_empty() {
            report.skipped += 1;
            return Ok(None);
        }

        let layout = sink.layout().clone();
        let era = era_year_of(date);
        let name = entry.name.as_str();

        let mut pos = self.resolve(sink, cursors, collection, name, era, report)?;

        if pos.next_row > layout.last_content_row() {
            pos = self.rotate(sink, name, &pos.page, era, report)?;
        }

        // An unreadable year label counts as the current year
        let header = sink.header_value(&pos.page, layout.year_cell);
        let page_era = parse_era_label(&header).unwrap_or(era);
        if page_era != era {
            sink.write_cell(
                &pos.page,
                pos.next_row,
                layout.author_col,
                year_marker_label(era).into(),
            )?;
            sink.write_cell(
                &pos.page,
                layout.year_cell.row,
                layout.year_cell.col,
                era_label(era).into(),
            )?;
            tracing::info!(page = %pos.page, row = pos.next_row, era, "year marker inserted");
            report.year_markers.push((pos.page.clone(), pos.next_row));
            pos.next_row += 1;
        }

        let needed = lines.len() as u32;
        let last_needed = pos.next_row + needed - 1;
        if last_needed > layout.last_content_row() && pos.next_row > layout.first_content_row() {
            pos = self.rotate(sink, name, &pos.page, era, report)?;
        }
        if pos.next_row + needed - 1 > layout.last_content_row() {
            tracing::warn!(
                resident = name,
                lines = needed,
                capacity = layout.row_limit,
                "entry longer than a page, writing past the last content row"
            );
        }

        let first_row = pos.next_row;
        for (i, line) in lines.iter().enumerate() {
            let row = pos.next_row;
            if i == 0 {
                sink.write_cell(&pos.page, row, layout.date_col, month_day_label(date).into())?;
                sink.write_cell(&pos.page, row, layout.weekday_col, weekday_label(date).into())?;
            }
            sink.write_cell(&pos.page, row, layout.content_col, CellValue::string(*line))?;
            if i == lines.len() - 1 {
                sink.write_cell(
                    &pos.page,
                    row,
                    layout.author_col,
                    CellValue::string(entry.author.as_str()),
                )?;
            }
            pos.next_row += 1;
        }

        cursors.put(Cursor {
            resident: name.to_string(),
            collection,
            page: pos.page.clone(),
            next_row: pos.next_row,
        })?;

        let placement = Placement {
            resident: name.to_string(),
            collection,
            page: pos.page,
            first_row,
            last_row: first_row + needed - 1,
        };
        tracing::debug!(
            resident = name,
            page = %placement.page,
            first_row,
            last_row = placement.last_row,
            "entry written"
        );
        report.placements.push(placement.clone());
        Ok(Some(placement))
    }

    /// Resolve the page and row the next write for `name` should use
    fn resolve<S, C>(
        &self,
        sink: &mut S,
        cursors: &C,
        collection: Collection,
        name: &str,
        era: i32,
        report: &mut TranscriptionReport,
    ) -> LedgerResult<Position>
    where
        S: RecordSink,
        C: CursorStore,
    {
        let first = sink.layout().first_content_row();

        match cursors.get(name)? {
            Some(cursor) if cursor.collection == collection && sink.page_exists(&cursor.page) => {
                let latest = latest_page(sink, name);
                if sink.page_exists(&latest)
                    && chain_position(name, &latest) > chain_position(name, &cursor.page)
                {
                    // A rotation newer than the stored cursor sealed its page
                    let next_row = first_blank_row(sink, &latest, first);
                    tracing::warn!(
                        resident = name,
                        stored = %cursor.page,
                        page = %latest,
                        next_row,
                        "cursor points at a sealed page, resynced"
                    );
                    report.resynced.push(name.to_string());
                    return Ok(Position {
                        page: latest,
                        next_row,
                    });
                }

                let row = cursor.next_row.max(first);
                if sink.is_row_blank(&cursor.page, row) {
                    return Ok(Position {
                        page: cursor.page,
                        next_row: row,
                    });
                }
                // Page content got ahead of the stored cursor
                let next_row = first_blank_row(sink, &cursor.page, row);
                tracing::warn!(
                    resident = name,
                    page = %cursor.page,
                    stored = cursor.next_row,
                    next_row,
                    "cursor behind page content, resynced"
                );
                report.resynced.push(name.to_string());
                Ok(Position {
                    page: cursor.page,
                    next_row,
                })
            }
            stale => {
                if let Some(cursor) = stale {
                    tracing::warn!(
                        resident = name,
                        page = %cursor.page,
                        stored_in = %cursor.collection,
                        routed_to = %collection,
                        "cursor does not match record book, ignoring it"
                    );
                }
                self.open_resident_page(sink, name, era, report)
            }
        }
    }

    /// Latest existing page of a resident, or a fresh page named after them
    fn open_resident_page<S: RecordSink>(
        &self,
        sink: &mut S,
        name: &str,
        era: i32,
        report: &mut TranscriptionReport,
    ) -> LedgerResult<Position> {
        let first = sink.layout().first_content_row();

        if sink.page_exists(name) {
            let page = latest_page(sink, name);
            let next_row = first_blank_row(sink, &page, first);
            tracing::debug!(resident = name, %page, next_row, "resuming existing page");
            return Ok(Position { page, next_row });
        }

        self.create_page(sink, name, name, era, report)?;
        report.new_pages.push(name.to_string());
        Ok(Position {
            page: name.to_string(),
            next_row: first,
        })
    }

    /// Seal `current` and continue on the next suffixed page
    fn rotate<S: RecordSink>(
        &self,
        sink: &mut S,
        name: &str,
        current: &str,
        era: i32,
        report: &mut TranscriptionReport,
    ) -> LedgerResult<Position> {
        let page = next_page_name(sink, name);
        self.create_page(sink, &page, name, era, report)?;
        sink.reorder(&page, current)?;

        tracing::info!(resident = name, from = current, to = %page, "page rotated");
        report.rotations.push(page.clone());
        Ok(Position {
            next_row: sink.layout().first_content_row(),
            page,
        })
    }

    /// Create a page and write its header labels
    fn create_page<S: RecordSink>(
        &self,
        sink: &mut S,
        page: &str,
        name: &str,
        era: i32,
        report: &mut TranscriptionReport,
    ) -> LedgerResult<()> {
        let layout = sink.layout().clone();

        if self.options.require_template && !sink.page_exists(&layout.template) {
            return Err(LedgerError::MissingTemplate {
                template: layout.template,
                page: page.to_string(),
            });
        }

        if sink.create_page(page)? == PageCreation::Bare {
            tracing::warn!(%page, template = %layout.template, "template missing, created bare page");
            report.bare_pages.push(page.to_string());
        }

        sink.write_cell(
            page,
            layout.year_cell.row,
            layout.year_cell.col,
            era_label(era).into(),
        )?;
        sink.write_cell(
            page,
            layout.resident_cell.row,
            layout.resident_cell.col,
            layout.resident_label(name).into(),
        )?;
        Ok(())
    }
}

/// `name(k)` for the lowest unused k >= 2
fn next_page_name<S: RecordSink>(sink: &S, name: &str) -> String {
    (2u32..)
        .map(|k| suffixed(name, k))
        .find(|page| !sink.page_exists(page))
        .unwrap_or_else(|| name.to_string())
}

/// Highest-suffixed page in the unbroken chain `name`, `name(2)`, `name(3)`, ...
fn latest_page<S: RecordSink>(sink: &S, name: &str) -> String {
    let mut latest = name.to_string();
    for k in 2u32.. {
        let page = suffixed(name, k);
        if !sink.page_exists(&page) {
            break;
        }
        latest = page;
    }
    latest
}

fn suffixed(name: &str, k: u32) -> String {
    format!("{name}({k})")
}

/// Index of `page` in the chain of `name`: 1 for `name`, k for `name(k)`
fn chain_position(name: &str, page: &str) -> Option<u32> {
    if page == name {
        return Some(1);
    }
    page.strip_prefix(name)?
        .strip_prefix('(')?
        .strip_suffix(')')?
        .parse()
        .ok()
}

/// First fully blank row at or after `from`
fn first_blank_row<S: RecordSink>(sink: &S, page: &str, from: u32) -> u32 {
    let last = sink.last_row(page);
    (from..=last)
        .find(|&row| sink.is_row_blank(page, row))
        .unwrap_or_else(|| from.max(last + 1))
}
