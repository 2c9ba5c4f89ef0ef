//! Local audit copies of persisted records

use crate::error::StoreError;
use crate::remote::ScoutPayload;
use greenorb_domain::NormalizedRecord;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory of pretty-printed JSON files, one per record key
///
/// Writing the same key twice overwrites the earlier file.
#[derive(Debug, Clone)]
pub struct AuditLog {
    dir: PathBuf,
}

impl AuditLog {
    /// Create an audit log rooted at `dir` (created on first write)
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Root directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File the record is written to
    pub fn path_for(&self, record: &NormalizedRecord) -> PathBuf {
        self.dir.join(format!("{}.json", record.ledger_key()))
    }

    /// Write the audit copy of `record`
    pub fn write(&self, record: &NormalizedRecord) -> Result<PathBuf, StoreError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(record);
        let json = serde_json::to_string_pretty(&ScoutPayload::from(record))?;
        fs::write(&path, json)?;
        Ok(path)
    }
}
