//! Shift log to record book transfer

use std::path::PathBuf;

use chrono::{Datelike, NaiveDate};

use care_diary_core::Sheet;
use care_diary_csv::{CsvReadOptions, CsvReader};
use care_diary_extract::{assign_authors, ExtractOptions, LogExtractor};
use care_diary_ledger::{
    EngineOptions, EntryStore, LedgerError, PaginationEngine, TransferSession, TranscriptionReport,
};

use crate::error::{DiaryError, DiaryResult};
use crate::workspace::DiaryWorkspace;

/// Options for a transfer run
#[derive(Debug, Clone, Default)]
pub struct TransferOptions {
    /// Shift log extraction
    pub extract: ExtractOptions,
    /// Pagination
    pub engine: EngineOptions,
    /// Shift log CSV parsing
    pub csv: CsvReadOptions,
}

/// One day's shift log and who wrote it
#[derive(Debug, Clone)]
pub struct TransferRequest {
    /// Shift log CSV
    pub log_path: PathBuf,
    /// Date the log covers
    pub date: NaiveDate,
    /// Day shift author
    pub author_day: String,
    /// Night shift author
    pub author_night: String,
}

/// Outcome of a transfer run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferReport {
    /// Entries extracted from the shift log
    pub extracted: usize,
    /// Rows newly added to the journal
    pub journaled: usize,
    /// Pages and rows written
    pub transcription: TranscriptionReport,
}

impl TransferReport {
    /// Check if the shift log held nothing to transfer
    pub fn is_empty(&self) -> bool {
        self.extracted == 0
    }
}

/// Transfer a shift log file into the workspace's record books
pub fn transfer(
    workspace: &DiaryWorkspace,
    request: &TransferRequest,
    options: &TransferOptions,
) -> DiaryResult<TransferReport> {
    check_authors(request)?;
    if !request.log_path.is_file() {
        return Err(DiaryError::LogNotFound(request.log_path.clone()));
    }

    let sheet = CsvReader::read_file(&request.log_path, &options.csv)?;
    tracing::info!(
        log = %request.log_path.display(),
        rows = sheet.max_row(),
        "read shift log"
    );
    transfer_sheet(workspace, &sheet, request, options)
}

/// Transfer an already loaded shift log
///
/// Books are saved before cursors, so an interrupted run leaves cursors that
/// lag the books; the engine resyncs those by scanning forward.
pub fn transfer_sheet(
    workspace: &DiaryWorkspace,
    sheet: &Sheet,
    request: &TransferRequest,
    options: &TransferOptions,
) -> DiaryResult<TransferReport> {
    check_authors(request)?;

    let entries = LogExtractor::new(options.extract.clone()).extract(sheet);
    if entries.is_empty() {
        tracing::info!("nothing to transfer");
        return Ok(TransferReport::default());
    }

    let authored = assign_authors(entries, &request.author_day, &request.author_night);
    let records: Vec<_> = authored.iter().map(|e| e.to_record(request.date)).collect();
    let journaled = workspace
        .journal(request.date.year())?
        .insert_batch(&records)?;
    tracing::debug!(journaled, "journal updated");

    let roster = workspace.roster()?;
    let mut cursors = workspace.cursors()?;
    let mut session = TransferSession::new(|collection| {
        workspace
            .open_sink(collection)
            .map_err(|e| LedgerError::StoreUnavailable(format!("{collection}: {e}")))
    });

    let engine = PaginationEngine::new(options.engine.clone());
    let transcription = engine.transcribe(
        &mut session,
        &mut cursors,
        &authored,
        request.date,
        |name| roster.collection_of(name),
    )?;

    for (collection, sink) in session.into_sinks() {
        workspace.save_book(collection, sink.book())?;
        tracing::debug!(%collection, "saved record book");
    }
    cursors.save()?;

    Ok(TransferReport {
        extracted: authored.len(),
        journaled,
        transcription,
    })
}

fn check_authors(request: &TransferRequest) -> DiaryResult<()> {
    if request.author_day.trim().is_empty() || request.author_night.trim().is_empty() {
        return Err(DiaryError::MissingAuthors);
    }
    Ok(())
}
