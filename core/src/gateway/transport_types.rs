//! Transport types
//!
//! Common types shared across transport implementations.

use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value as JsonValue;

/// Raw HTTP reply: status code and body text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Asynchronous HTTP transport
///
/// Abstraction over the HTTP client so the gateway can be driven by
/// FakeTransport in tests. Implementations only report transport failures
/// (as `CopilotError::Network`); status handling belongs to the caller.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// POST a JSON body and return the reply
    async fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &JsonValue,
    ) -> Result<HttpReply>;

    /// GET a resource and return the reply
    async fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpReply>;
}
