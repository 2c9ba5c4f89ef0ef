//! Oracle call options and responses

use std::fmt;
use std::time::Duration;

/// Outcome of a single oracle call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OracleStatus {
    /// HTTP 200 with a decodable body
    Ok,
    /// The service answered with a non-200 status code
    HttpError(u16),
    /// No answer within the per-call timeout
    Timeout,
    /// Transport failure or undecodable body
    Exception(String),
}

impl OracleStatus {
    /// True for [`OracleStatus::Ok`]
    pub fn is_ok(&self) -> bool {
        matches!(self, OracleStatus::Ok)
    }
}

impl fmt::Display for OracleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OracleStatus::Ok => write!(f, "ok"),
            OracleStatus::HttpError(code) => write!(f, "http error {}", code),
            OracleStatus::Timeout => write!(f, "timeout"),
            OracleStatus::Exception(msg) => write!(f, "exception: {}", msg),
        }
    }
}

/// Raw text returned by the oracle
///
/// When `status` is anything but [`OracleStatus::Ok`] the text is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawOracleResponse {
    /// Call status
    pub status: OracleStatus,

    /// Generated text, untrusted
    pub text: String,
}

impl RawOracleResponse {
    /// A successful response carrying `text`
    pub fn ok(text: impl Into<String>) -> Self {
        Self {
            status: OracleStatus::Ok,
            text: text.into(),
        }
    }

    /// A failed response; the text is always empty
    pub fn failed(status: OracleStatus) -> Self {
        Self {
            status,
            text: String::new(),
        }
    }

    /// True if the call succeeded
    pub fn is_ok(&self) -> bool {
        self.status.is_ok()
    }
}

/// Sampling and resource options for one oracle call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OracleOptions {
    /// Sampling temperature
    pub temperature: f32,

    /// Context window size (`num_ctx`) in tokens
    pub context_window: u32,

    /// Upper bound on the whole call
    pub timeout: Duration,
}

impl Default for OracleOptions {
    fn default() -> Self {
        Self {
            temperature: 0.1,
            context_window: 8192,
            timeout: Duration::from_secs(120),
        }
    }
}
