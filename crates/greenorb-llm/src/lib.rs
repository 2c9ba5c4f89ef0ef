//! GreenOrb Oracle Layer
//!
//! Implementations of the [`Oracle`] trait from `greenorb-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `OllamaProvider`: Local Ollama API integration
//!
//! Every provider folds failures into the response status instead of
//! returning an error, so a dead or slow oracle only ever skips one unit.
//!
//! # Examples
//!
//! ```
//! use greenorb_llm::MockProvider;
//! use greenorb_domain::{Oracle, OracleOptions};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let provider = MockProvider::new("[]");
//! let response = provider.invoke("test prompt", &OracleOptions::default()).await;
//! assert!(response.is_ok());
//! assert_eq!(response.text, "[]");
//! # }
//! ```

#![warn(missing_docs)]

pub mod ollama;

use async_trait::async_trait;
use greenorb_domain::{Oracle, OracleOptions, OracleStatus, RawOracleResponse};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;

pub use ollama::OllamaProvider;

/// Errors that can occur while talking to an LLM service
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// The call exceeded its timeout
    #[error("Request timed out")]
    Timeout,

    /// The service answered with a non-200 status
    #[error("HTTP {0}")]
    Status(u16),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl From<LlmError> for OracleStatus {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Timeout => OracleStatus::Timeout,
            LlmError::Status(code) => OracleStatus::HttpError(code),
            LlmError::Communication(msg) | LlmError::InvalidResponse(msg) => {
                OracleStatus::Exception(msg)
            }
        }
    }
}

/// Mock oracle for deterministic testing
///
/// Returns pre-configured responses without making any network calls.
/// Resolution order for each call: queued responses first, then a response
/// registered for the exact prompt, then the default response.
///
/// # Examples
///
/// ```
/// use greenorb_llm::MockProvider;
/// use greenorb_domain::{Oracle, OracleOptions, OracleStatus};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let opts = OracleOptions::default();
///
/// // Queued responses are consumed in order
/// let provider = MockProvider::new("[]");
/// provider.push_response("first");
/// provider.push_failure(OracleStatus::Timeout);
/// assert_eq!(provider.invoke("a", &opts).await.text, "first");
/// assert_eq!(provider.invoke("b", &opts).await.status, OracleStatus::Timeout);
/// assert_eq!(provider.invoke("c", &opts).await.text, "[]");
/// assert_eq!(provider.call_count(), 3);
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: RawOracleResponse,
    responses: Arc<Mutex<HashMap<String, RawOracleResponse>>>,
    queue: Arc<Mutex<VecDeque<RawOracleResponse>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self::with_default(RawOracleResponse::ok(response))
    }

    /// Create a MockProvider whose every call fails with `status`
    pub fn failing(status: OracleStatus) -> Self {
        Self::with_default(RawOracleResponse::failed(status))
    }

    fn with_default(default_response: RawOracleResponse) -> Self {
        Self {
            default_response,
            responses: Arc::new(Mutex::new(HashMap::new())),
            queue: Arc::new(Mutex::new(VecDeque::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Add a specific response for a given prompt
    pub fn add_response(&mut self, prompt: impl Into<String>, response: impl Into<String>) {
        locked(&self.responses).insert(prompt.into(), RawOracleResponse::ok(response));
    }

    /// Queue a response for the next unmatched call
    pub fn push_response(&self, response: impl Into<String>) {
        locked(&self.queue).push_back(RawOracleResponse::ok(response));
    }

    /// Queue a failed call
    pub fn push_failure(&self, status: OracleStatus) {
        locked(&self.queue).push_back(RawOracleResponse::failed(status));
    }

    /// Get the number of times invoke was called
    pub fn call_count(&self) -> usize {
        locked(&self.prompts).len()
    }

    /// Every prompt received so far, in call order
    pub fn prompts(&self) -> Vec<String> {
        locked(&self.prompts).clone()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

#[async_trait]
impl Oracle for MockProvider {
    async fn invoke(&self, prompt: &str, _options: &OracleOptions) -> RawOracleResponse {
        locked(&self.prompts).push(prompt.to_string());

        if let Some(queued) = locked(&self.queue).pop_front() {
            return queued;
        }

        // Check if we have a specific response for this prompt
        let responses = locked(&self.responses);
        if let Some(response) = responses.get(prompt) {
            return response.clone();
        }

        self.default_response.clone()
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}

fn locked<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
