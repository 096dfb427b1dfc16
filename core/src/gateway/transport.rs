//! HTTP transport for the model gateway
//!
//! Wraps the transport implementations in one concrete type so the gateway
//! does not need boxed trait objects.

pub use crate::gateway::transport_fake::{FakeTransport, RecordedRequest};
pub use crate::gateway::transport_reqwest::ReqwestTransport;
pub use crate::gateway::transport_types::{HttpReply, HttpTransport};

use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value as JsonValue;

/// Concrete transport enum
#[derive(Debug, Clone)]
pub enum Transport {
    Real(ReqwestTransport),
    Fake(FakeTransport),
}

#[async_trait]
impl HttpTransport for Transport {
    async fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &JsonValue,
    ) -> Result<HttpReply> {
        match self {
            Transport::Real(t) => t.post_json(url, headers, body).await,
            Transport::Fake(t) => t.post_json(url, headers, body).await,
        }
    }

    async fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpReply> {
        match self {
            Transport::Real(t) => t.get(url, headers).await,
            Transport::Fake(t) => t.get(url, headers).await,
        }
    }
}

impl From<FakeTransport> for Transport {
    fn from(fake: FakeTransport) -> Self {
        Transport::Fake(fake)
    }
}

impl From<ReqwestTransport> for Transport {
    fn from(real: ReqwestTransport) -> Self {
        Transport::Real(real)
    }
}
