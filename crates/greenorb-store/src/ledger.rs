//! The ledger used by the pipelines: audit copy, remote push, archive

use crate::archive::ProcessedArchive;
use crate::audit::AuditLog;
use crate::error::StoreError;
use crate::remote::RemoteStore;
use async_trait::async_trait;
use greenorb_domain::{Ledger, NormalizedRecord, PersistOutcome};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use tracing::{debug, warn};

/// [`Ledger`] backed by the audit directory, the store API and the
/// processed-files archive
///
/// Records confirmed during this run are remembered by key; persisting an
/// identical record again is skipped without any I/O.
#[derive(Debug)]
pub struct StoreLedger {
    audit: AuditLog,
    remote: RemoteStore,
    archive: ProcessedArchive,
    confirmed: Mutex<HashMap<String, NormalizedRecord>>,
}

impl StoreLedger {
    /// Create a ledger from its three parts
    pub fn new(audit: AuditLog, remote: RemoteStore, archive: ProcessedArchive) -> Self {
        Self {
            audit,
            remote,
            archive,
            confirmed: Mutex::new(HashMap::new()),
        }
    }

    /// The processed-files archive
    pub fn processed(&self) -> &ProcessedArchive {
        &self.archive
    }

    /// The audit directory
    pub fn audit(&self) -> &AuditLog {
        &self.audit
    }

    /// Number of records confirmed during this run
    pub fn confirmed_count(&self) -> usize {
        self.confirmed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn already_confirmed(&self, key: &str, record: &NormalizedRecord) -> bool {
        let confirmed = self.confirmed.lock().unwrap_or_else(PoisonError::into_inner);
        confirmed.get(key) == Some(record)
    }
}

#[async_trait]
impl Ledger for StoreLedger {
    type Error = StoreError;

    async fn persist(&self, record: &NormalizedRecord) -> PersistOutcome {
        let key = record.ledger_key();

        if self.already_confirmed(&key, record) {
            debug!("{} already saved this run", key);
            return PersistOutcome::DuplicateSkipped;
        }

        match self.audit.write(record) {
            Ok(path) => debug!("Wrote audit copy {}", path.display()),
            Err(e) => warn!("Could not write audit copy for {}: {}", key, e),
        }

        match self.remote.push(record).await {
            Ok(()) => {
                self.confirmed
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .insert(key, record.clone());
                PersistOutcome::Saved
            }
            Err(e) => PersistOutcome::RemoteError(e.to_string()),
        }
    }

    fn archive(&self, source: &Path) -> Result<PathBuf, StoreError> {
        self.archive.archive(source)
    }
}
