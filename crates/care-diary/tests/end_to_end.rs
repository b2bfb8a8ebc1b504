//! Shift log to record book, through files on disk

use std::fs;

use care_diary::prelude::*;
use care_diary::{Cursor, JsonCursorStore, Resident};
use chrono::NaiveDate;
use pretty_assertions::assert_eq;

const LOG: &str = "\
氏名,記事
宮本,朝食全量摂取
,午後は散歩
田中,入浴済み
以上,
巡回,
田中,良眠
";

fn resident(name: &str, room: &str) -> Resident {
    Resident {
        name: name.into(),
        room: room.into(),
        birthday: None,
        gender: None,
    }
}

fn setup() -> (tempfile::TempDir, DiaryWorkspace, TransferRequest) {
    let dir = tempfile::tempdir().unwrap();
    let ws = DiaryWorkspace::open(dir.path()).unwrap();
    ws.init_template().unwrap();

    let mut roster = Roster::new();
    roster.upsert(resident("宮本", "201"));
    roster.upsert(resident("田中", "305"));
    ws.save_roster(&roster).unwrap();

    let log_path = dir.path().join("15日裏.csv");
    fs::write(&log_path, LOG).unwrap();

    let request = TransferRequest {
        log_path,
        date: NaiveDate::from_ymd_opt(2025, 5, 15).unwrap(),
        author_day: "佐藤".into(),
        author_night: "加藤".into(),
    };
    (dir, ws, request)
}

/// Fill 宮本's first page up to `next_row - 1` and leave the cursor at `next_row`
fn seed_page(ws: &DiaryWorkspace, next_row: u32) {
    let mut book = ws.load_book(Collection::SecondFloor).unwrap();
    book.copy_sheet("personal", "宮本").unwrap();
    let sheet = book.sheet_mut("宮本").unwrap();
    sheet.set_value("A2", "令和7年").unwrap();
    for row in 4..next_row {
        sheet.set_value_at(row, 3, format!("line {row}")).unwrap();
    }
    ws.save_book(Collection::SecondFloor, &book).unwrap();

    let mut cursors = ws.cursors().unwrap();
    cursors
        .put(Cursor {
            resident: "宮本".into(),
            collection: Collection::SecondFloor,
            page: "宮本".into(),
            next_row,
        })
        .unwrap();
    cursors.save().unwrap();
}

#[test]
fn test_day_and_night_entries_reach_their_pages() {
    let (_dir, ws, request) = setup();
    seed_page(&ws, 35);

    let report = transfer(&ws, &request, &TransferOptions::default()).unwrap();

    assert_eq!(report.extracted, 3);
    assert_eq!(report.journaled, 3);
    assert_eq!(report.transcription.rotations, vec!["宮本(2)".to_string()]);
    assert_eq!(report.transcription.new_pages, vec!["田中".to_string()]);

    let second = ws.load_book(Collection::SecondFloor).unwrap();
    assert_eq!(second.sheet_names(), vec!["personal", "宮本(2)", "宮本"]);
    let page = second.sheet("宮本(2)").unwrap();
    assert_eq!(page.text_at(2, 1), "令和7年");
    assert_eq!(page.text_at(2, 3), "\u{3000}入所者氏名\u{3000}宮本");
    assert_eq!(page.text_at(4, 1), "5/15");
    assert_eq!(page.text_at(4, 2), "木");
    assert_eq!(page.text_at(4, 3), "朝食全量摂取");
    assert_eq!(page.text_at(4, 4), "");
    assert_eq!(page.text_at(5, 3), "午後は散歩");
    assert_eq!(page.text_at(5, 4), "佐藤");
    // The full page is untouched
    assert_eq!(second.sheet("宮本").unwrap().max_row(), 34);

    let third = ws.load_book(Collection::ThirdFloor).unwrap();
    let page = third.sheet("田中").unwrap();
    assert_eq!(page.text_at(4, 3), "入浴済み");
    assert_eq!(page.text_at(4, 4), "佐藤");
    assert_eq!(page.text_at(5, 3), "良眠");
    assert_eq!(page.text_at(5, 4), "加藤");

    let cursors = JsonCursorStore::open(ws.cursor_path()).unwrap();
    let got: Vec<(&str, &str, u32)> = cursors
        .cursors()
        .map(|c| (c.resident.as_str(), c.page.as_str(), c.next_row))
        .collect();
    assert_eq!(got, vec![("宮本", "宮本(2)", 6), ("田中", "田中", 6)]);
}

#[test]
fn test_two_line_entry_on_last_free_row_moves_to_new_page() {
    let (_dir, ws, request) = setup();
    seed_page(&ws, 34);

    let report = transfer(&ws, &request, &TransferOptions::default()).unwrap();

    assert_eq!(report.transcription.rotations, vec!["宮本(2)".to_string()]);
    let placement = &report.transcription.placements[0];
    assert_eq!(placement.page, "宮本(2)");
    assert_eq!((placement.first_row, placement.last_row), (4, 5));

    let second = ws.load_book(Collection::SecondFloor).unwrap();
    let old = second.sheet("宮本").unwrap();
    assert!(old.is_row_blank(34, 1..=4));
    assert_eq!(old.max_row(), 33);
    assert_eq!(second.sheet("宮本(2)").unwrap().text_at(5, 4), "佐藤");

    let cursors = ws.cursors().unwrap();
    let cursor = cursors.get("宮本").unwrap().unwrap();
    assert_eq!((cursor.page.as_str(), cursor.next_row), ("宮本(2)", 6));
}

#[test]
fn test_rerun_appends_pages_but_not_journal() {
    let (_dir, ws, request) = setup();

    let first = transfer(&ws, &request, &TransferOptions::default()).unwrap();
    let second = transfer(&ws, &request, &TransferOptions::default()).unwrap();

    assert_eq!(first.journaled, 3);
    assert_eq!(second.journaled, 0);
    assert_eq!(ws.journal(2025).unwrap().len(), 3);

    // Pages keep growing from the stored cursors
    let rows: Vec<(u32, u32)> = second
        .transcription
        .placements
        .iter()
        .map(|p| (p.first_row, p.last_row))
        .collect();
    assert_eq!(rows, vec![(6, 7), (6, 6), (7, 7)]);
    assert!(second.transcription.new_pages.is_empty());
}

#[test]
fn test_unknown_resident_goes_to_departed_book() {
    let (_dir, ws, request) = setup();
    ws.save_roster(&Roster::new()).unwrap();

    let report = transfer(&ws, &request, &TransferOptions::default()).unwrap();

    assert!(report
        .transcription
        .placements
        .iter()
        .all(|p| p.collection == Collection::Departed));
    assert!(ws.book_path(Collection::Departed).exists());
    assert!(!ws.book_path(Collection::SecondFloor).exists());
}

#[test]
fn test_missing_template_fails_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    let ws = DiaryWorkspace::open(dir.path()).unwrap();
    let log_path = dir.path().join("log.csv");
    fs::write(&log_path, LOG).unwrap();
    let request = TransferRequest {
        log_path,
        date: NaiveDate::from_ymd_opt(2025, 5, 15).unwrap(),
        author_day: "佐藤".into(),
        author_night: "加藤".into(),
    };

    let result = transfer(&ws, &request, &TransferOptions::default());
    assert!(matches!(
        result,
        Err(DiaryError::Ledger(care_diary::LedgerError::MissingTemplate { .. }))
    ));
    assert!(!ws.cursor_path().exists());

    let options = TransferOptions {
        engine: care_diary::EngineOptions {
            require_template: false,
        },
        ..Default::default()
    };
    let report = transfer(&ws, &request, &options).unwrap();
    assert_eq!(report.transcription.bare_pages.len(), 2);
}
