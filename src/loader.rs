//! Division file loading and report writing.
//!
//! # Layout
//! ```text
//! <divisions>/tournament_index.json   index of division files
//! <divisions>/<file>.json             one Division per file
//! <out>/<Session_Name>.json           one SessionSchedule per session
//! <out>/schedule_index.json           RunSummary
//! ```
//!
//! Only index entries with `draw_type == "main_draw"` are loaded.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::models::Division;
use crate::report::Report;

pub const INDEX_FILE: &str = "tournament_index.json";
pub const SCHEDULE_INDEX_FILE: &str = "schedule_index.json";
pub const MAIN_DRAW: &str = "main_draw";

/// Contents of `tournament_index.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TournamentIndex {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tournament: Option<String>,
    #[serde(default)]
    pub divisions: Vec<IndexEntry>,
}

/// One division file listed in the index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexEntry {
    /// File name relative to the divisions directory.
    pub file: String,
    /// `main_draw`, `qualifying`, ...
    pub draw_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    serde_json::from_str(&text).map_err(|e| Error::json(path, e))
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).map_err(|e| Error::json(path, e))?;
    fs::write(path, text).map_err(|e| Error::io(path, e))
}

/// Reads the tournament index of a divisions directory.
pub fn load_index(dir: impl AsRef<Path>) -> Result<TournamentIndex> {
    read_json(&dir.as_ref().join(INDEX_FILE))
}

/// Reads every main-draw division listed in the index, in index order.
pub fn load_divisions(dir: impl AsRef<Path>) -> Result<(TournamentIndex, Vec<Division>)> {
    let dir = dir.as_ref();
    let index = load_index(dir)?;
    let mut divisions = Vec::new();
    for entry in index.divisions.iter().filter(|e| e.draw_type == MAIN_DRAW) {
        let division: Division = read_json(&dir.join(&entry.file))?;
        debug!(file = %entry.file, code = %division.code, "division loaded");
        divisions.push(division);
    }
    info!(
        divisions = divisions.len(),
        skipped = index.divisions.len() - divisions.len(),
        "draws loaded"
    );
    Ok((index, divisions))
}

/// Writes one file per session plus the schedule index. Returns the paths
/// written, index last.
pub fn write_report(dir: impl AsRef<Path>, report: &Report) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;

    let mut written = Vec::with_capacity(report.sessions.len() + 1);
    for session in &report.sessions {
        let path = dir.join(&session.file);
        write_json(&path, session)?;
        written.push(path);
    }
    let path = dir.join(SCHEDULE_INDEX_FILE);
    write_json(&path, &report.summary)?;
    written.push(path);

    info!(dir = %dir.display(), files = written.len(), "schedules written");
    Ok(written)
}
