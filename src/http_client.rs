//! HTTP client abstraction for the completion service.
//!
//! A trait-based seam over reqwest so the completion client can be tested
//! without network access. Transport failures and non-success HTTP statuses
//! both surface as [`CligptError::Service`]; there is no retry.

use crate::error::CligptError;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;

/// Trait for POSTing JSON to the completion service.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Sends a POST request with a JSON body and returns the response body.
    ///
    /// # Errors
    ///
    /// Returns [`CligptError::Service`] if the request fails in transport or
    /// the server answers with a non-success status.
    async fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &serde_json::Value,
    ) -> Result<String>;
}

/// Production implementation backed by reqwest.
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &serde_json::Value,
    ) -> Result<String> {
        let mut request = self.client.post(url);

        for (key, value) in headers {
            request = request.header(*key, *value);
        }

        let response = request
            .json(body)
            .send()
            .await
            .map_err(|e| CligptError::Service(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| CligptError::Service(e.to_string()))?;

        if !status.is_success() {
            return Err(CligptError::Service(format!("HTTP {}: {}", status, text)).into());
        }

        Ok(text)
    }
}

/// Mock client for tests: returns a canned response or a canned failure, and
/// records every request body it receives.
#[cfg(test)]
pub struct MockHttpClient {
    response: Result<String, String>,
    requests: std::sync::Arc<std::sync::Mutex<Vec<serde_json::Value>>>,
}

#[cfg(test)]
impl MockHttpClient {
    pub fn responding(body: &str) -> Self {
        Self {
            response: Ok(body.to_string()),
            requests: Default::default(),
        }
    }

    pub fn failing(detail: &str) -> Self {
        Self {
            response: Err(detail.to_string()),
            requests: Default::default(),
        }
    }

    /// Handle onto the recorded request bodies; survives boxing the mock.
    pub fn requests(&self) -> std::sync::Arc<std::sync::Mutex<Vec<serde_json::Value>>> {
        self.requests.clone()
    }
}

#[cfg(test)]
#[async_trait]
impl HttpClient for MockHttpClient {
    async fn post_json(
        &self,
        _url: &str,
        _headers: &[(&str, &str)],
        body: &serde_json::Value,
    ) -> Result<String> {
        self.requests.lock().unwrap().push(body.clone());
        match &self.response {
            Ok(text) => Ok(text.clone()),
            Err(detail) => Err(CligptError::Service(detail.clone()).into()),
        }
    }
}
