use crate::error::{RankError, Result};
use crate::types::ranking::Recipient;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const PROGRAMS_DIR: &str = ".aidrank/programs";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordState {
    Recorded,
}

/// Durable top-K for one program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramRecord {
    pub program_id: String,
    pub state: RecordState,
    pub recorded_at: String,
    pub aidrank_version: String,
    pub inputs_digest: String,
    pub recipients: Vec<Recipient>,
}

pub fn record_path(root: &Path, program_id: &str) -> PathBuf {
    root.join(PROGRAMS_DIR).join(format!("{program_id}.json"))
}

pub fn read_record(root: &Path, program_id: &str) -> Result<Option<ProgramRecord>> {
    let path = record_path(root, program_id);
    let raw = match fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(error) => return Err(RankError::Io(error)),
    };
    let record = serde_json::from_str(&raw)?;
    Ok(Some(record))
}

/// Replaces the program's record as a whole. The new record is written and
/// synced to a uniquely named sibling temp file, renamed over the old one and
/// the directory entry synced, so a failed write leaves the previous record
/// untouched.
pub fn write_record(root: &Path, record: &ProgramRecord) -> Result<PathBuf> {
    let out_path = record_path(root, &record.program_id);
    let dir = out_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| root.join(PROGRAMS_DIR));
    fs::create_dir_all(&dir)?;

    let json = serde_json::to_string_pretty(record)?;
    let mut tmp = tempfile::Builder::new()
        .prefix(&format!(".{}.", record.program_id))
        .suffix(".json.tmp")
        .tempfile_in(&dir)?;
    tmp.write_all(json.as_bytes())?;
    tmp.write_all(b"\n")?;
    tmp.as_file().sync_all()?;
    tmp.persist(&out_path).map_err(|error| RankError::Io(error.error))?;
    sync_dir(&dir)?;
    Ok(out_path)
}

#[cfg(unix)]
fn sync_dir(dir: &Path) -> Result<()> {
    fs::File::open(dir)?.sync_all()?;
    Ok(())
}

#[cfg(not(unix))]
fn sync_dir(_dir: &Path) -> Result<()> {
    Ok(())
}
