//! Crash-safe JSON files

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::error::LedgerResult;

/// Replace `path` with `content`
///
/// The bytes go to a sibling `.tmp` file that is synced before the rename, so
/// readers see either the old file or the complete new one.
pub fn atomic_write(path: &Path, content: &[u8]) -> LedgerResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp_path = tmp_path(path);
    let mut file = File::create(&tmp_path)?;
    file.write_all(content)?;
    file.sync_all()?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

/// Write `value` as pretty JSON through [`atomic_write`]
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> LedgerResult<()> {
    let json = serde_json::to_string_pretty(value)?;
    atomic_write(path, json.as_bytes())
}

fn tmp_path(path: &Path) -> std::path::PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
