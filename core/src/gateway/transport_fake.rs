//! Fake transport for testing
//!
//! Serves scripted replies instead of real HTTP calls and records every
//! request it receives. Clones share state, so a test can keep a handle while
//! the gateway owns another.

use crate::error::{CopilotError, Result};
use crate::gateway::transport_types::{HttpReply, HttpTransport};
use async_trait::async_trait;
use serde_json::Value as JsonValue;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

/// A request seen by the fake transport
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<JsonValue>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Scripted outcome; `Err` holds a network error message
type Scripted = std::result::Result<HttpReply, String>;

#[derive(Debug, Default)]
struct FakeState {
    queued: VecDeque<Scripted>,
    fallback: Option<Scripted>,
    requests: Vec<RecordedRequest>,
}

/// Fake transport for testing (uses scripted replies)
#[derive(Debug, Clone, Default)]
pub struct FakeTransport {
    state: Arc<Mutex<FakeState>>,
}

impl FakeTransport {
    /// Create fake transport with nothing scripted
    pub fn new() -> Self {
        Self::default()
    }

    /// Create fake transport that answers every call with the given reply
    pub fn replying(status: u16, body: &str) -> Self {
        let fake = Self::new();
        fake.state().fallback = Some(Ok(HttpReply::new(status, body)));
        fake
    }

    /// Create fake transport whose model always generates `text`
    pub fn with_model_text(text: &str) -> Self {
        Self::replying(200, &model_envelope(text))
    }

    /// Create fake transport that always fails with a network error
    pub fn with_network_error(msg: &str) -> Self {
        let fake = Self::new();
        fake.state().fallback = Some(Err(msg.to_string()));
        fake
    }

    /// Queue a one-shot reply, served before the fallback
    pub fn push_reply(&self, status: u16, body: &str) {
        self.state()
            .queued
            .push_back(Ok(HttpReply::new(status, body)));
    }

    /// Queue a one-shot network error
    pub fn push_network_error(&self, msg: &str) {
        self.state().queued.push_back(Err(msg.to_string()));
    }

    /// All requests received so far
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.state().requests.len()
    }

    fn state(&self) -> MutexGuard<'_, FakeState> {
        // A panicking test thread must not wedge the others
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn respond(&self, request: RecordedRequest) -> Result<HttpReply> {
        let mut state = self.state();
        state.requests.push(request);

        let scripted = match state.queued.pop_front() {
            Some(next) => next,
            None => state
                .fallback
                .clone()
                .unwrap_or_else(|| Err("no scripted reply".to_string())),
        };

        scripted.map_err(CopilotError::Network)
    }
}

#[async_trait]
impl HttpTransport for FakeTransport {
    async fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &JsonValue,
    ) -> Result<HttpReply> {
        self.respond(RecordedRequest {
            method: "POST".to_string(),
            url: url.to_string(),
            headers: owned_headers(headers),
            body: Some(body.clone()),
        })
    }

    async fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpReply> {
        self.respond(RecordedRequest {
            method: "GET".to_string(),
            url: url.to_string(),
            headers: owned_headers(headers),
            body: None,
        })
    }
}

fn owned_headers(headers: &[(&str, &str)]) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Wrap `text` in a generateContent envelope with a single candidate
pub fn model_envelope(text: &str) -> String {
    serde_json::json!({
        "candidates": [{
            "content": {
                "parts": [{ "text": text }],
                "role": "model"
            },
            "finishReason": "STOP"
        }]
    })
    .to_string()
}
