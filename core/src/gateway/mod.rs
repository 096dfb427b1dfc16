//! Model Gateway
//!
//! Single point of contact with the Gemini API. Every call issues exactly one
//! outbound request: no retries, no backoff. Transport failures, HTTP status
//! failures and envelope problems are each mapped to their own error kind.

pub mod gemini_parse;
pub mod transport;
pub mod transport_fake;
pub mod transport_reqwest;
pub mod transport_types;

pub use gemini_parse::ModelInfo;
pub use transport::{FakeTransport, HttpReply, HttpTransport, RecordedRequest, ReqwestTransport, Transport};

use crate::config::ProviderSettings;
use crate::error::{preview, CopilotError, Result};
use crate::extract::extract_json;
use serde_json::Value as JsonValue;
use tracing::{debug, info, warn};

/// Instruction appended to every structured-generation prompt
pub const STRUCTURED_SUFFIX: &str = "\n\nIMPORTANT: Return ONLY valid JSON, no additional text.";

/// Upper bound on provider error bodies carried in errors
const PROVIDER_BODY_CHARS: usize = 1000;

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gateway to the generative model
pub struct ModelGateway {
    transport: Transport,
    api_key: String,
    model: String,
    base_url: String,
    api_version: String,
    temperature: f64,
    max_tokens: u32,
}

impl ModelGateway {
    /// Create gateway with a real HTTP transport
    pub fn new(settings: &ProviderSettings) -> Result<Self> {
        let transport = ReqwestTransport::with_timeout(settings.timeout_seconds)?;
        Self::with_transport(settings, transport.into())
    }

    /// Create gateway with custom transport (for testing)
    pub fn with_transport(settings: &ProviderSettings, transport: Transport) -> Result<Self> {
        let api_key = settings
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                CopilotError::Configuration("GEMINI_API_KEY is not configured".to_string())
            })?;

        Ok(Self {
            transport,
            api_key: api_key.to_string(),
            model: settings.model.clone(),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_version: settings.api_version.clone(),
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
        })
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/{}/models/{}:generateContent",
            self.base_url, self.api_version, self.model
        )
    }

    fn models_url(&self) -> String {
        format!("{}/{}/models", self.base_url, self.api_version)
    }

    /// Generate text from a prompt
    ///
    /// `temperature` and `max_tokens` override the configured defaults.
    pub async fn generate_text(
        &self,
        prompt: &str,
        temperature: Option<f64>,
        max_tokens: Option<u32>,
    ) -> Result<String> {
        let temperature = temperature.unwrap_or(self.temperature);
        let max_tokens = max_tokens.unwrap_or(self.max_tokens);
        let body = gemini_parse::build_generate_request(prompt, temperature, max_tokens);

        debug!(
            model = %self.model,
            prompt_chars = prompt.len(),
            temperature,
            max_tokens,
            "Calling generateContent"
        );

        let reply = self
            .transport
            .post_json(&self.generate_url(), &[(API_KEY_HEADER, self.api_key.as_str())], &body)
            .await?;
        check_status(&reply)?;

        let text = gemini_parse::parse_generate_content(&reply.body)?;
        debug!(chars = text.len(), "Model text received");
        Ok(text)
    }

    /// Generate and parse a JSON value
    ///
    /// The model output goes through [`extract_json`] first; text that still
    /// does not parse becomes a `ResponseParse` error with a bounded preview.
    pub async fn generate_structured(
        &self,
        prompt: &str,
        temperature: Option<f64>,
    ) -> Result<JsonValue> {
        let full_prompt = format!("{}{}", prompt, STRUCTURED_SUFFIX);
        let text = self.generate_text(&full_prompt, temperature, None).await?;

        let cleaned = extract_json(&text);
        serde_json::from_str(&cleaned).map_err(|e| {
            warn!(error = %e, "Model output is not valid JSON");
            CopilotError::response_parse(e, &text)
        })
    }

    /// Check that the configured credentials work
    ///
    /// Makes one tiny generation call. Never fails: any error is logged and
    /// reported as `false`.
    pub async fn validate_credentials(&self) -> bool {
        match self.generate_text("Say 'OK'", None, Some(10)).await {
            Ok(_) => {
                info!(model = %self.model, "Model credentials validated");
                true
            }
            Err(e) => {
                warn!(error = %e, kind = %e.kind(), "Model credential check failed");
                false
            }
        }
    }

    /// List the models available to the configured key
    pub async fn list_models(&self) -> Result<Vec<ModelInfo>> {
        let reply = self
            .transport
            .get(&self.models_url(), &[(API_KEY_HEADER, self.api_key.as_str())])
            .await?;
        check_status(&reply)?;

        let models = gemini_parse::parse_model_list(&reply.body)?;
        debug!(count = models.len(), "Listed models");
        Ok(models)
    }
}

impl std::fmt::Debug for ModelGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelGateway")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish_non_exhaustive()
    }
}

/// Map a non-success reply to its error kind
fn check_status(reply: &HttpReply) -> Result<()> {
    if reply.is_success() {
        return Ok(());
    }

    let body = preview(&reply.body, PROVIDER_BODY_CHARS);
    let rejected_key = reply.status == 400 && reply.body.to_lowercase().contains("api key");
    if matches!(reply.status, 401 | 403) || rejected_key {
        warn!(status = reply.status, "Model provider rejected credentials");
        return Err(CopilotError::Auth(format!(
            "provider returned {}: {}",
            reply.status, body
        )));
    }

    warn!(status = reply.status, "Model provider returned error status");
    Err(CopilotError::Provider {
        status: reply.status,
        body,
    })
}
