//! Day/night shift extraction state machine

use care_diary_core::{LogEntry, Shift};

use crate::rows::{rows, RawRow};
use crate::source::TabularSource;
use crate::DEFAULT_START_ROW;

/// Options controlling extraction
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// First row to read
    pub start_row: u32,
    /// Consecutive fully-blank rows that mark the end of the log
    pub max_blank_rows: u32,
    /// Name cell that closes the day section
    pub day_end_marker: String,
    /// Name cells that open the night section
    pub night_headers: Vec<String>,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            start_row: DEFAULT_START_ROW,
            max_blank_rows: 30,
            day_end_marker: "以上".into(),
            night_headers: vec!["巡回".into(), "夜間浴".into()],
        }
    }
}

/// Extracts [`LogEntry`] records from a shift log
#[derive(Debug, Clone, Default)]
pub struct LogExtractor {
    options: ExtractOptions,
}

impl LogExtractor {
    /// Create an extractor with custom options
    pub fn new(options: ExtractOptions) -> Self {
        Self { options }
    }

    /// Get the options
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Extract entries from a source, starting at the configured start row
    pub fn extract<S: TabularSource>(&self, source: S) -> Vec<LogEntry> {
        self.extract_rows(rows(source, self.options.start_row))
    }

    /// Extract entries from an already-normalized row sequence
    pub fn extract_rows<I>(&self, rows: I) -> Vec<LogEntry>
    where
        I: IntoIterator<Item = RawRow>,
    {
        let mut machine = ShiftMachine::default();
        let mut blank_run = 0u32;

        for row in rows {
            if row.is_blank() {
                blank_run += 1;
                if blank_run >= self.options.max_blank_rows {
                    tracing::debug!(row = row.index, "blank run reached, end of log");
                    break;
                }
                continue;
            }
            blank_run = 0;

            if row.name == self.options.day_end_marker {
                machine.flush();
                machine.shift = Shift::Night;
                continue;
            }

            if self.options.night_headers.contains(&row.name) {
                // A second night header leaves the state untouched
                if machine.shift == Shift::Day {
                    machine.flush();
                    machine.shift = Shift::Night;
                }
                continue;
            }

            if !row.name.is_empty() {
                machine.flush();
                machine.start(row.name, row.content);
            } else {
                machine.append(row.content);
            }
        }

        machine.flush();
        tracing::debug!(entries = machine.entries.len(), "extracted shift log");
        machine.entries
    }
}

/// Per-pass state: the current shift and the entry being accumulated
#[derive(Debug, Default)]
struct ShiftMachine {
    shift: Shift,
    name: Option<String>,
    lines: Vec<String>,
    entries: Vec<LogEntry>,
}

impl ShiftMachine {
    fn start(&mut self, name: String, content: String) {
        self.name = Some(name);
        if !content.is_empty() {
            self.lines.push(content);
        }
    }

    fn append(&mut self, content: String) {
        // Lines with no owning name are dropped
        if self.name.is_some() && !content.is_empty() {
            self.lines.push(content);
        }
    }

    /// Emit the pending entry under the current shift, if it has both parts
    fn flush(&mut self) {
        let name = self.name.take();
        let lines = std::mem::take(&mut self.lines);

        if let Some(name) = name {
            if !name.is_empty() && !lines.is_empty() {
                self.entries
                    .push(LogEntry::new(name, lines.join("\n"), self.shift));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn raw(rows: &[(&str, &str)]) -> Vec<RawRow> {
        rows.iter()
            .enumerate()
            .map(|(i, (name, content))| RawRow {
                index: i as u32 + 2,
                name: name.to_string(),
                content: content.to_string(),
            })
            .collect()
    }

    fn extract(rows: &[(&str, &str)]) -> Vec<LogEntry> {
        LogExtractor::default().extract_rows(raw(rows))
    }

    #[test]
    fn test_day_end_marker_switches_to_night() {
        let entries = extract(&[("Alice", "note1"), ("以上", ""), ("Bob", "note2")]);
        assert_eq!(
            entries,
            vec![
                LogEntry::new("Alice", "note1", Shift::Day),
                LogEntry::new("Bob", "note2", Shift::Night),
            ]
        );
    }

    #[test]
    fn test_multi_line_continuation() {
        let entries = extract(&[("Alice", "line1"), ("", "line2"), ("Bob", "x")]);
        assert_eq!(entries[0], LogEntry::new("Alice", "line1\nline2", Shift::Day));
        assert_eq!(entries[1], LogEntry::new("Bob", "x", Shift::Day));
    }

    #[test]
    fn test_name_only_row_collects_following_lines() {
        let entries = extract(&[("Alice", ""), ("", "a"), ("", "b")]);
        assert_eq!(entries, vec![LogEntry::new("Alice", "a\nb", Shift::Day)]);
    }

    #[test]
    fn test_entry_without_content_is_dropped() {
        let entries = extract(&[("Alice", ""), ("Bob", "x")]);
        assert_eq!(entries, vec![LogEntry::new("Bob", "x", Shift::Day)]);
    }

    #[test]
    fn test_orphan_continuation_is_dropped() {
        let entries = extract(&[("", "stray"), ("Bob", "x")]);
        assert_eq!(entries, vec![LogEntry::new("Bob", "x", Shift::Day)]);
    }

    #[test]
    fn test_night_header_flushes_before_switch() {
        let entries = extract(&[
            ("Alice", "day note"),
            ("", "more"),
            ("巡回", "22:00"),
            ("", "orphan after header"),
            ("Bob", "night note"),
        ]);
        assert_eq!(
            entries,
            vec![
                LogEntry::new("Alice", "day note\nmore", Shift::Day),
                LogEntry::new("Bob", "night note", Shift::Night),
            ]
        );
    }

    #[test]
    fn test_repeated_night_headers_are_idempotent() {
        let entries = extract(&[
            ("以上", ""),
            ("Alice", "a"),
            ("夜間浴", ""),
            ("", "after bath header"),
            ("巡回", ""),
            ("Bob", "b"),
        ]);
        assert_eq!(
            entries,
            vec![
                LogEntry::new("Alice", "a", Shift::Night),
                LogEntry::new("Bob", "b", Shift::Night),
            ]
        );
    }

    #[test]
    fn test_night_header_row_in_night_keeps_pending_entry() {
        // Already night: the header row is consumed without a flush, so the
        // pending entry keeps collecting continuation lines
        let entries = extract(&[("以上", ""), ("Alice", "a"), ("巡回", ""), ("", "b")]);
        assert_eq!(entries, vec![LogEntry::new("Alice", "a\nb", Shift::Night)]);
    }

    #[test]
    fn test_blank_run_terminates() {
        let mut rows = vec![("Alice", "a")];
        rows.extend(std::iter::repeat(("", "")).take(30));
        rows.push(("Bob", "b"));

        let entries = extract(&rows);
        assert_eq!(entries, vec![LogEntry::new("Alice", "a", Shift::Day)]);
    }

    #[test]
    fn test_short_blank_run_continues() {
        let mut rows = vec![("Alice", "a")];
        rows.extend(std::iter::repeat(("", "")).take(29));
        rows.push(("", "still alice"));

        let entries = extract(&rows);
        assert_eq!(
            entries,
            vec![LogEntry::new("Alice", "a\nstill alice", Shift::Day)]
        );
    }

    #[test]
    fn test_custom_threshold() {
        let extractor = LogExtractor::new(ExtractOptions {
            max_blank_rows: 2,
            ..Default::default()
        });
        let entries = extractor.extract_rows(raw(&[("A", "a"), ("", ""), ("", ""), ("B", "b")]));
        assert_eq!(entries.len(), 1);
    }

    fn row_strategy() -> impl Strategy<Value = (String, String)> {
        let name = prop_oneof![
            Just(String::new()),
            Just("以上".to_string()),
            Just("巡回".to_string()),
            Just("夜間浴".to_string()),
            "[a-c]{1,3}",
        ];
        let content = prop_oneof![Just(String::new()), "[x-z]{1,4}"];
        (name, content)
    }

    proptest! {
        #[test]
        fn emitted_entries_are_bounded_and_complete(
            rows in proptest::collection::vec(row_strategy(), 0..80)
        ) {
            let named = rows.iter().filter(|(n, _)| !n.is_empty()).count();
            let input: Vec<RawRow> = rows
                .into_iter()
                .enumerate()
                .map(|(i, (name, content))| RawRow { index: i as u32, name, content })
                .collect();

            let entries = LogExtractor::default().extract_rows(input);
            prop_assert!(entries.len() <= named);
            for entry in &entries {
                prop_assert!(!entry.name.is_empty());
                prop_assert!(!entry.content.is_empty());
            }
        }
    }
}
