//! Error taxonomy
//!
//! One error type for every failure an operation can surface. The kind of an
//! error is fixed where it is raised; callers match on [`ErrorKind`] instead of
//! inspecting message text.

use std::fmt;

/// Maximum number of characters of model output kept in a parse error.
pub const PREVIEW_CHARS: usize = 200;

/// Content operation errors
#[derive(Debug, thiserror::Error)]
pub enum CopilotError {
    /// Caller input was empty or out of range
    #[error("Validation error: {0}")]
    Validation(String),

    /// The provider could not be reached (DNS, connect, timeout)
    #[error("Network error calling model provider: {0}")]
    Network(String),

    /// The provider answered with a non-success status
    #[error("Model provider returned {status}: {body}")]
    Provider { status: u16, body: String },

    /// Success status, but the envelope did not contain generated text
    #[error("Malformed provider response: {0}")]
    MalformedProviderResponse(String),

    /// The model answered, but the extracted text is not valid JSON
    #[error("Could not parse model output as JSON: {reason} (preview: {preview})")]
    ResponseParse { reason: String, preview: String },

    /// Parsed JSON lacks a key the operation requires
    #[error("Model response missing '{field}' field")]
    MissingField { field: String },

    /// Credentials were rejected by the provider
    #[error("Authentication with model provider failed: {0}")]
    Auth(String),

    /// Invalid or incomplete configuration
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Tagged error kind, used for status mapping at the transport boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    Network,
    Provider,
    MalformedProviderResponse,
    ResponseParse,
    MissingField,
    Auth,
    Configuration,
}

impl ErrorKind {
    /// Name reported in the `error` field of API error bodies
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "ValidationError",
            ErrorKind::Network => "NetworkError",
            ErrorKind::Provider => "ProviderError",
            ErrorKind::MalformedProviderResponse => "MalformedProviderResponse",
            ErrorKind::ResponseParse => "ResponseParseError",
            ErrorKind::MissingField => "MissingFieldError",
            ErrorKind::Auth => "AuthError",
            ErrorKind::Configuration => "ConfigurationError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl CopilotError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CopilotError::Validation(_) => ErrorKind::Validation,
            CopilotError::Network(_) => ErrorKind::Network,
            CopilotError::Provider { .. } => ErrorKind::Provider,
            CopilotError::MalformedProviderResponse(_) => ErrorKind::MalformedProviderResponse,
            CopilotError::ResponseParse { .. } => ErrorKind::ResponseParse,
            CopilotError::MissingField { .. } => ErrorKind::MissingField,
            CopilotError::Auth(_) => ErrorKind::Auth,
            CopilotError::Configuration(_) => ErrorKind::Configuration,
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        CopilotError::Validation(message.into())
    }

    pub fn missing_field(field: impl Into<String>) -> Self {
        CopilotError::MissingField {
            field: field.into(),
        }
    }

    /// Build a parse error that carries a bounded preview of the raw text
    pub fn response_parse(reason: impl fmt::Display, raw: &str) -> Self {
        CopilotError::ResponseParse {
            reason: reason.to_string(),
            preview: preview(raw, PREVIEW_CHARS),
        }
    }
}

/// Truncate `text` to at most `max_chars` characters, marking the cut with "..."
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}

pub type Result<T> = std::result::Result<T, CopilotError>;
