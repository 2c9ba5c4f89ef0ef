//! GreenOrb Persistence Layer
//!
//! Implements the [`Ledger`](greenorb_domain::Ledger) trait.
//!
//! # Architecture
//!
//! - [`AuditLog`]: one pretty-printed JSON file per record key
//! - [`RemoteStore`]: POST to the company store API, success only on HTTP 200
//! - [`ProcessedArchive`]: source files moved here after a confirmed save;
//!   presence is the "already processed" marker used by [`ProcessedArchive::backlog`]
//!
//! Persisting is at-least-once: the remote API upserts on name, so a retry
//! after a crash is harmless.
//!
//! # Examples
//!
//! ```no_run
//! use greenorb_store::{AuditLog, ProcessedArchive, RemoteStore, StoreLedger};
//! use std::time::Duration;
//!
//! let remote = RemoteStore::new("http://localhost:5000/api/scout", Duration::from_secs(10)).unwrap();
//! let ledger = StoreLedger::new(
//!     AuditLog::new("RawData/ESG_Reports/JSON_Results"),
//!     remote,
//!     ProcessedArchive::new("RawData/ESG_Reports/Processed"),
//! );
//! ```

#![warn(missing_docs)]

mod archive;
mod audit;
mod error;
mod ledger;
mod remote;

pub use archive::ProcessedArchive;
pub use audit::AuditLog;
pub use error::StoreError;
pub use ledger::StoreLedger;
pub use remote::{RemoteStore, ScoutPayload, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS};
