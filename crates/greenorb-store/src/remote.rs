//! Client for the remote company store API

use crate::error::StoreError;
use greenorb_domain::NormalizedRecord;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default store endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000/api/scout";

/// Default request timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Wire shape accepted by the store API (upserted on `name`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoutPayload {
    /// Company name
    pub name: String,
    /// Sector
    pub sector: String,
    /// Country
    pub country: String,
    /// Annual CO2 in metric tons
    pub co2: Option<f64>,
    /// ESG grade
    pub esg: String,
    /// Source reference
    pub url: String,
    /// Products or services
    pub products: String,
    /// Provenance
    pub methodology: String,
    /// Scope 1 emissions
    pub s1: f64,
    /// Scope 2 emissions
    pub s2: f64,
    /// Scope 3 emissions
    pub s3: f64,
    /// Year the figures cover
    pub report_year: Option<i32>,
}

impl From<&NormalizedRecord> for ScoutPayload {
    fn from(record: &NormalizedRecord) -> Self {
        Self {
            name: record.name.clone(),
            sector: record.sector.clone(),
            country: record.country.clone(),
            co2: record.co2,
            esg: record.esg.clone(),
            url: record.url.clone(),
            products: record.products.clone(),
            methodology: record.methodology.clone(),
            s1: record.scope1,
            s2: record.scope2,
            s3: record.scope3,
            report_year: record.report_year,
        }
    }
}

/// HTTP client for the store API
#[derive(Debug, Clone)]
pub struct RemoteStore {
    endpoint: String,
    client: reqwest::Client,
}

impl RemoteStore {
    /// Create a client posting to `endpoint` with a per-request timeout
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }

    /// The endpoint records are posted to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POST one record; only HTTP 200 counts as accepted
    pub async fn push(&self, record: &NormalizedRecord) -> Result<(), StoreError> {
        let payload = ScoutPayload::from(record);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        match response.status().as_u16() {
            200 => Ok(()),
            code => Err(StoreError::Status(code)),
        }
    }
}
