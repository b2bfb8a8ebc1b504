//! Diary entries extracted from a shift log

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::error::{Error, Result};

/// Which half of the day a diary entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Shift {
    /// Day shift (日勤)
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "日勤"))]
    Day,
    /// Night shift (夜勤)
    #[cfg_attr(feature = "serde", serde(rename = "夜勤"))]
    Night,
}

impl Shift {
    /// Label used in the diary and the entry journal
    pub fn label(&self) -> &'static str {
        match self {
            Shift::Day => "日勤",
            Shift::Night => "夜勤",
        }
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Shift {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "日勤" => Ok(Shift::Day),
            "夜勤" => Ok(Shift::Night),
            other => Err(Error::UnknownShift(other.into())),
        }
    }
}

/// One resident's note for one shift
///
/// `name` and `content` are never empty; the extractor drops anything else.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LogEntry {
    /// Resident name
    pub name: String,
    /// Note lines joined with `\n`
    pub content: String,
    /// Shift the note was written in
    pub shift: Shift,
}

impl LogEntry {
    /// Create a new entry
    pub fn new<N: Into<String>, C: Into<String>>(name: N, content: C, shift: Shift) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
            shift,
        }
    }

    /// Non-empty lines of the note, in order
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        content_lines(&self.content)
    }
}

/// A [`LogEntry`] stamped with the staff member who wrote it
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AuthoredEntry {
    /// Resident name
    pub name: String,
    /// Note lines joined with `\n`
    pub content: String,
    /// Shift the note was written in
    pub shift: Shift,
    /// Staff member responsible for the shift
    pub author: String,
}

impl AuthoredEntry {
    /// Attach an author to an entry
    pub fn new<A: Into<String>>(entry: LogEntry, author: A) -> Self {
        Self {
            name: entry.name,
            content: entry.content,
            shift: entry.shift,
            author: author.into(),
        }
    }

    /// Non-empty lines of the note, in order
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        content_lines(&self.content)
    }

    /// Journal row for this entry on `date`
    pub fn to_record(&self, date: NaiveDate) -> EntryRecord {
        EntryRecord {
            resident: self.name.clone(),
            date,
            shift: self.shift,
            content: self.content.clone(),
            author: self.author.clone(),
        }
    }
}

/// A persisted diary row
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntryRecord {
    /// Resident name
    pub resident: String,
    /// Diary date
    pub date: NaiveDate,
    /// Shift
    pub shift: Shift,
    /// Note lines joined with `\n`
    pub content: String,
    /// Staff member responsible for the shift
    pub author: String,
}

impl EntryRecord {
    /// Identity of a record; a second insert with the same key is ignored
    pub fn key(&self) -> (String, NaiveDate, Shift, String) {
        (
            self.resident.clone(),
            self.date,
            self.shift,
            self.content.clone(),
        )
    }
}

fn content_lines(content: &str) -> impl Iterator<Item = &str> {
    content.split('\n').filter(|line| !line.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift_labels() {
        assert_eq!(Shift::Day.to_string(), "日勤");
        assert_eq!("夜勤".parse::<Shift>().unwrap(), Shift::Night);
        assert!("昼".parse::<Shift>().is_err());
    }

    #[test]
    fn test_lines_skip_empty() {
        let entry = LogEntry::new("A", "one\n\ntwo\n", Shift::Day);
        assert_eq!(entry.lines().collect::<Vec<_>>(), vec!["one", "two"]);

        let padded = LogEntry::new("A", "a\n \nb", Shift::Day);
        assert_eq!(padded.lines().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_authored_keeps_fields() {
        let entry = LogEntry::new("A", "note", Shift::Night);
        let authored = AuthoredEntry::new(entry, "Suzuki");
        assert_eq!(authored.name, "A");
        assert_eq!(authored.shift, Shift::Night);
        assert_eq!(authored.author, "Suzuki");

        let date = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        let record = authored.to_record(date);
        assert_eq!(
            record.key(),
            ("A".to_string(), date, Shift::Night, "note".to_string())
        );
    }
}
