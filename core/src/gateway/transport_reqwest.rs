//! Real HTTP transport using reqwest

use crate::error::{CopilotError, Result};
use crate::gateway::transport_types::{HttpReply, HttpTransport};
use async_trait::async_trait;
use serde_json::Value as JsonValue;
use std::time::Duration;
use tracing::debug;

/// Real HTTP transport using reqwest
///
/// The client is built once and cloned cheaply; every request is bounded by
/// the configured timeout.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create transport with custom timeout
    pub fn with_timeout(timeout_secs: u64) -> Result<Self> {
        let timeout = Duration::from_secs(timeout_secs);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CopilotError::Configuration(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    async fn into_reply(response: reqwest::Response) -> Result<HttpReply> {
        let status = response.status().as_u16();
        let body = response.text().await.map_err(network_error)?;
        debug!(status, body_len = body.len(), "HTTP response received");
        Ok(HttpReply { status, body })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &JsonValue,
    ) -> Result<HttpReply> {
        let mut request = self.client.post(url).json(body);
        for (key, value) in headers {
            request = request.header(*key, *value);
        }

        let response = request.send().await.map_err(network_error)?;
        Self::into_reply(response).await
    }

    async fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpReply> {
        let mut request = self.client.get(url);
        for (key, value) in headers {
            request = request.header(*key, *value);
        }

        let response = request.send().await.map_err(network_error)?;
        Self::into_reply(response).await
    }
}

fn network_error(err: reqwest::Error) -> CopilotError {
    // Drop the URL: it is not needed for diagnosis and may carry credentials
    let err = err.without_url();
    if err.is_timeout() {
        CopilotError::Network(format!("request timed out: {}", err))
    } else if err.is_connect() {
        CopilotError::Network(format!("connection failed: {}", err))
    } else {
        CopilotError::Network(err.to_string())
    }
}
