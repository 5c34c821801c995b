use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use pitchtag_types::{Record, SummaryRow};

use crate::error::TagError;

/// Append-only CSV log of tagged actions.
///
/// The header row is written by the append that creates the file (or finds
/// it empty) and never again.
#[derive(Debug, Clone)]
pub struct TagLog {
    path: PathBuf,
}

impl TagLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory holding the log
    pub fn folder(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    pub fn append(&self, record: &Record) -> Result<(), TagError> {
        let needs_header = match fs::metadata(&self.path) {
            Ok(meta) => meta.len() == 0,
            Err(e) if e.kind() == ErrorKind::NotFound => true,
            Err(e) => return Err(e.into()),
        };

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(needs_header)
            .from_writer(file);
        writer.serialize(record)?;
        writer.flush()?;

        tracing::debug!(
            "Appended row to {} (header: {})",
            self.path.display(),
            needs_header
        );
        Ok(())
    }

    /// Read every record back. A log that does not exist yet is empty.
    pub fn read_all(&self) -> Result<Vec<Record>, TagError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = csv::Reader::from_path(&self.path)?;
        let records = reader
            .deserialize()
            .collect::<Result<Vec<Record>, csv::Error>>()?;
        Ok(records)
    }
}

/// Count records per team/player/action, in order of first appearance
pub fn summarize(records: &[Record]) -> Vec<SummaryRow> {
    let mut rows: Vec<SummaryRow> = Vec::new();

    for record in records {
        let existing = rows.iter_mut().find(|row| {
            row.team == record.team && row.player == record.player && row.action == record.action
        });

        match existing {
            Some(row) => row.count += 1,
            None => rows.push(SummaryRow {
                team: record.team.clone(),
                player: record.player.clone(),
                action: record.action.clone(),
                count: 1,
            }),
        }
    }

    rows
}
