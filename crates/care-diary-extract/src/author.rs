//! Author assignment

use care_diary_core::{AuthoredEntry, LogEntry, Shift};

/// Stamp each entry with the author responsible for its shift
///
/// Order is preserved and every entry receives exactly one author.
pub fn assign_authors<I>(entries: I, author_day: &str, author_night: &str) -> Vec<AuthoredEntry>
where
    I: IntoIterator<Item = LogEntry>,
{
    entries
        .into_iter()
        .map(|entry| {
            let author = match entry.shift {
                Shift::Day => author_day,
                Shift::Night => author_night,
            };
            AuthoredEntry::new(entry, author)
        })
        .collect()
}
