//! Encyclopedia summaries as enrichment context

use async_trait::async_trait;
use greenorb_domain::ContextLookup;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::SourceError;

/// Default MediaWiki API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://en.wikipedia.org/w/api.php";

/// Default User-Agent sent with lookups
pub const DEFAULT_USER_AGENT: &str =
    "GreenOrbEnrichment/1.0 (https://github.com/Prawag/greenorb; contact@greenorb.example)";

/// Default cap on returned summary length, in characters
pub const DEFAULT_MAX_CHARS: usize = 4000;

/// Fetches the introductory extract of an article named after the entity
#[derive(Debug, Clone)]
pub struct WikipediaLookup {
    client: reqwest::Client,
    endpoint: String,
    max_chars: usize,
}

impl WikipediaLookup {
    /// Create a lookup against `endpoint`
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Lookup`] if the HTTP client cannot be built.
    pub fn new(
        endpoint: impl Into<String>,
        user_agent: &str,
        timeout: Duration,
        max_chars: usize,
    ) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| SourceError::Lookup(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            max_chars,
        })
    }

    /// Lookup against the public endpoint with a 10 second timeout
    pub fn with_defaults() -> Result<Self, SourceError> {
        Self::new(
            DEFAULT_ENDPOINT,
            DEFAULT_USER_AGENT,
            Duration::from_secs(10),
            DEFAULT_MAX_CHARS,
        )
    }

    /// The API endpoint in use
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch the summary for `title`
    ///
    /// `Ok(None)` means the request succeeded but no article matched.
    pub async fn fetch(&self, title: &str) -> Result<Option<String>, SourceError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("action", "query"),
                ("prop", "extracts"),
                ("exintro", "1"),
                ("explaintext", "1"),
                ("redirects", "1"),
                ("titles", title),
                ("format", "json"),
            ])
            .send()
            .await
            .map_err(|e| SourceError::Lookup(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Lookup(format!("status {}", status.as_u16())));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| SourceError::Lookup(e.to_string()))?;

        Ok(first_extract(&body).map(|extract| extract.chars().take(self.max_chars).collect()))
    }
}

#[async_trait]
impl ContextLookup for WikipediaLookup {
    async fn lookup(&self, entity: &str) -> Option<String> {
        match self.fetch(entity).await {
            Ok(Some(summary)) => {
                debug!("Found {} chars of context for {}", summary.chars().count(), entity);
                Some(summary)
            }
            Ok(None) => {
                debug!("No article for {}", entity);
                None
            }
            Err(e) => {
                warn!("Lookup for {} failed: {}", entity, e);
                None
            }
        }
    }
}

/// First non-empty extract among the returned pages; `-1` marks a missing page
fn first_extract(body: &Value) -> Option<&str> {
    body.get("query")?
        .get("pages")?
        .as_object()?
        .iter()
        .filter(|(id, _)| id.as_str() != "-1")
        .filter_map(|(_, page)| page.get("extract")?.as_str())
        .find(|extract| !extract.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn lookup_for(server: &MockServer, max_chars: usize) -> WikipediaLookup {
        WikipediaLookup::new(server.uri(), "greenorb-tests", Duration::from_secs(5), max_chars).unwrap()
    }

    #[test]
    fn test_first_extract_skips_missing_page() {
        let body = json!({"query": {"pages": {"-1": {"missing": ""}}}});
        assert_eq!(first_extract(&body), None);

        let body = json!({"query": {"pages": {"123": {"extract": "Acme Corp is a company."}}}});
        assert_eq!(first_extract(&body), Some("Acme Corp is a company."));
    }

    #[test]
    fn test_first_extract_ignores_empty() {
        let body = json!({"query": {"pages": {"5": {"extract": "  "}}}});
        assert_eq!(first_extract(&body), None);
        assert_eq!(first_extract(&json!({"batchcomplete": ""})), None);
    }

    #[tokio::test]
    async fn test_lookup_sends_title_and_truncates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("titles", "Acme Corp"))
            .and(query_param("prop", "extracts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "query": {"pages": {"42": {"title": "Acme Corp", "extract": "x".repeat(50)}}}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let summary = lookup_for(&server, 10).lookup("Acme Corp").await.unwrap();
        assert_eq!(summary, "x".repeat(10));
    }

    #[tokio::test]
    async fn test_missing_article_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "query": {"pages": {"-1": {"title": "Nope", "missing": ""}}}
            })))
            .mount(&server)
            .await;

        assert_eq!(lookup_for(&server, 100).lookup("Nope").await, None);
    }

    #[tokio::test]
    async fn test_http_error_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let lookup = lookup_for(&server, 100);
        assert!(matches!(lookup.fetch("Acme").await, Err(SourceError::Lookup(_))));
        assert_eq!(lookup.lookup("Acme").await, None);
    }

    #[tokio::test]
    async fn test_unreachable_is_none() {
        let lookup = WikipediaLookup::new("http://127.0.0.1:9/w/api.php", "t", Duration::from_secs(2), 100).unwrap();
        assert_eq!(lookup.lookup("Acme").await, None);
    }
}
