//! REST insert into the hosted enrollments table.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net` against the
//! backend's PostgREST surface, authenticated with the public anon key.
//! Native builds: every insert fails with [`EnrollError::Unavailable`].

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use crate::config::BackendConfig;
use crate::enroll::{EnrollError, EnrollmentRecord, EnrollmentSink};

fn table_endpoint(base_url: &str, table: &str) -> String {
    format!("{}/rest/v1/{table}", base_url.trim_end_matches('/'))
}

#[cfg(any(test, feature = "hydrate"))]
fn bearer(api_key: &str) -> String {
    format!("Bearer {api_key}")
}

/// One table on the hosted backend.
#[derive(Debug, Clone)]
pub struct RestTable {
    endpoint: String,
    api_key: String,
}

impl RestTable {
    #[must_use]
    pub fn new(config: &BackendConfig) -> Self {
        Self { endpoint: table_endpoint(&config.base_url, &config.table), api_key: config.api_key.clone() }
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl RestTable {
    #[cfg(feature = "hydrate")]
    async fn post(&self, record: &EnrollmentRecord) -> Result<(), EnrollError> {
        let resp = gloo_net::http::Request::post(&self.endpoint)
            .header("apikey", &self.api_key)
            .header("Authorization", &bearer(&self.api_key))
            .header("Prefer", "return=minimal")
            .json(&[record])
            .map_err(|e| EnrollError::Request(e.to_string()))?
            .send()
            .await
            .map_err(|e| EnrollError::Request(e.to_string()))?;
        if !resp.ok() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(EnrollError::Rejected { status, body });
        }
        Ok(())
    }

    #[cfg(not(feature = "hydrate"))]
    async fn post(&self, _record: &EnrollmentRecord) -> Result<(), EnrollError> {
        Err(EnrollError::Unavailable)
    }
}

#[async_trait::async_trait(?Send)]
impl EnrollmentSink for RestTable {
    async fn insert(&self, record: &EnrollmentRecord) -> Result<(), EnrollError> {
        self.post(record).await
    }
}
