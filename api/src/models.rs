//! API Models Module
//!
//! Request and response shapes for the HTTP surface.

use copilot_core::ServerSettings;
use serde::{Deserialize, Serialize};

/// API server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub version: String,
    pub cors_origins: Vec<String>,
}

impl ApiConfig {
    pub fn from_settings(settings: &ServerSettings) -> Self {
        Self {
            host: settings.host.clone(),
            port: settings.port,
            version: env!("CARGO_PKG_VERSION").to_string(),
            cors_origins: settings.cors_origins.clone(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::from_settings(&ServerSettings::default())
    }
}

/// Body of `POST /api/generate`
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateRequest {
    pub subject: String,
}

/// Query of `POST /api/generate-questions`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuestionsQuery {
    pub subject: Option<String>,
    pub topic: Option<String>,
    pub count: Option<i64>,
}

/// Query of `POST /api/generate-quiz`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuizQuery {
    pub topic: Option<String>,
    pub count: Option<i64>,
}

/// Query of `POST /api/answer-doubt`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DoubtQuery {
    pub question: Option<String>,
    pub context: Option<String>,
}

/// Query of `POST /api/verify-answer`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VerifyQuery {
    pub question: Option<String>,
    pub answer: Option<String>,
}

/// Success envelope for the query-parameter routes
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: "Success".to_string(),
            data,
        }
    }
}

/// Error body returned for every failed request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
    pub details: Option<String>,
}
