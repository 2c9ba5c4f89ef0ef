//! Ollama Provider Implementation
//!
//! Provides integration with Ollama's local generate API.
//!
//! # Features
//!
//! - Non-streaming calls to `/api/generate`
//! - Per-call temperature, context window and timeout
//! - Only HTTP 200 counts as success; every call is attempted exactly once
//!
//! # Examples
//!
//! ```no_run
//! use greenorb_llm::OllamaProvider;
//! use greenorb_domain::{Oracle, OracleOptions};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), greenorb_llm::LlmError> {
//! let provider = OllamaProvider::new("http://localhost:11434", "llama3")?;
//! let response = provider.invoke("List the companies...", &OracleOptions::default()).await;
//! println!("{}", response.text);
//! # Ok(())
//! # }
//! ```

use crate::LlmError;
use async_trait::async_trait;
use greenorb_domain::{Oracle, OracleOptions, RawOracleResponse};
use serde::{Deserialize, Serialize};

/// Default Ollama API endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

/// Default model name
pub const DEFAULT_MODEL: &str = "llama3.2";

/// Ollama API provider for local LLM inference
#[derive(Debug, Clone)]
pub struct OllamaProvider {
    endpoint: String,
    model: String,
    client: reqwest::Client,
}

/// Request body for Ollama generate API
#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Serialize)]
struct GenerateOptions {
    temperature: f32,
    num_ctx: u32,
}

/// Response from Ollama generate API
#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

impl OllamaProvider {
    /// Create a new Ollama provider
    ///
    /// # Parameters
    ///
    /// - `endpoint`: Ollama API endpoint (e.g., "http://localhost:11434")
    /// - `model`: Model to use (e.g., "llama3", "mistral")
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::Communication`] if the HTTP client cannot be built.
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| LlmError::Communication(e.to_string()))?;

        let endpoint: String = endpoint.into();
        Ok(Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            model: model.into(),
            client,
        })
    }

    /// Create a new Ollama provider against `http://localhost:11434`
    pub fn default_endpoint(model: impl Into<String>) -> Result<Self, LlmError> {
        Self::new(DEFAULT_ENDPOINT, model)
    }

    /// The configured endpoint, without a trailing slash
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Generate text using the Ollama API
    ///
    /// # Errors
    ///
    /// - [`LlmError::Timeout`] when no answer arrives within `options.timeout`
    /// - [`LlmError::Status`] for any status other than 200
    /// - [`LlmError::Communication`] when Ollama is unreachable
    /// - [`LlmError::InvalidResponse`] when the body has no `response` field
    pub async fn generate(&self, prompt: &str, options: &OracleOptions) -> Result<String, LlmError> {
        let url = format!("{}/api/generate", self.endpoint);

        let body = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            options: GenerateOptions {
                temperature: options.temperature,
                num_ctx: options.context_window,
            },
        };

        tracing::debug!(
            model = %self.model,
            prompt_chars = prompt.len(),
            temperature = options.temperature,
            "Calling Ollama"
        );

        let response = self
            .client
            .post(&url)
            .timeout(options.timeout)
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status().as_u16();
        if status != 200 {
            return Err(LlmError::Status(status));
        }

        let parsed: GenerateResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                LlmError::Timeout
            } else {
                LlmError::InvalidResponse(e.to_string())
            }
        })?;

        Ok(parsed.response)
    }
}

fn map_transport_error(e: reqwest::Error) -> LlmError {
    if e.is_timeout() {
        LlmError::Timeout
    } else {
        LlmError::Communication(e.to_string())
    }
}

#[async_trait]
impl Oracle for OllamaProvider {
    async fn invoke(&self, prompt: &str, options: &OracleOptions) -> RawOracleResponse {
        match self.generate(prompt, options).await {
            Ok(text) => RawOracleResponse::ok(text),
            Err(e) => {
                tracing::warn!(model = %self.model, error = %e, "Oracle call failed");
                RawOracleResponse::failed(e.into())
            }
        }
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
