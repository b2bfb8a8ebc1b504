//! Saved operator preferences (`prefs.json`)

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use care_diary_ledger::storage;

use crate::error::DiaryResult;

/// Authors and the last working date, remembered between runs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Day-shift author
    #[serde(default)]
    pub author_day: String,
    /// Night-shift author
    #[serde(default)]
    pub author_night: String,
    /// Last diary date worked on, `YYYY-MM-DD` (empty when never set)
    #[serde(default)]
    pub last_date: String,
}

impl Preferences {
    /// Load preferences; a missing or unreadable file yields the defaults
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        let Ok(text) = fs::read_to_string(path) else {
            return Self::default();
        };
        match serde_json::from_str(&text) {
            Ok(prefs) => prefs,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable preferences");
                Self::default()
            }
        }
    }

    /// Save preferences as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> DiaryResult<()> {
        Ok(storage::write_json(path.as_ref(), self)?)
    }

    /// Last working date, if set and valid
    pub fn last_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.last_date, "%Y-%m-%d").ok()
    }

    /// Remember a working date
    pub fn set_last_date(&mut self, date: NaiveDate) {
        self.last_date = date.format("%Y-%m-%d").to_string();
    }
}
