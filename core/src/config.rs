//! Configuration Management Module
//!
//! Settings for the server, the model provider and content generation.
//! Values are layered: built-in defaults, an optional config file,
//! `COPILOT_<SECTION>__<KEY>` environment variables, then the plain variable
//! names the service has always honoured (`GEMINI_API_KEY`, `PORT`, ...).
//! Everything is validated once at startup.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Top-level service settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub provider: ProviderSettings,
    pub generation: GenerationSettings,
    pub logging: LoggingSettings,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            cors_origins: vec![
                "http://localhost:3000".to_string(),
                "http://localhost:5500".to_string(),
                "http://127.0.0.1:5500".to_string(),
                "http://localhost:8080".to_string(),
                "*".to_string(),
            ],
        }
    }
}

/// Model provider settings
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub api_version: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub timeout_seconds: u64,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-2.5-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            api_version: "v1".to_string(),
            temperature: 0.7,
            max_tokens: 2000,
            timeout_seconds: 30,
        }
    }
}

// Keeps the API key out of logs
impl std::fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

/// Content generation limits and defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    pub max_topics: u32,
    pub questions_per_topic: u32,
    pub default_question_count: u32,
    pub default_quiz_count: u32,
    pub max_subject_length: usize,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            max_topics: 9,
            questions_per_topic: 5,
            default_question_count: 5,
            default_quiz_count: 10,
            max_subject_length: 100,
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(anyhow!("Unsupported log format: {}", s)),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub format: LogFormat,
    pub directory: Option<String>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            directory: None,
        }
    }
}

impl Settings {
    /// Load settings from all sources and validate them
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }
        builder = builder.add_source(
            config::Environment::with_prefix("COPILOT")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let mut settings: Settings = builder
            .build()
            .context("Failed to read configuration sources")?
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        settings.apply_env_overrides(|name| std::env::var(name).ok());
        settings.validate()?;

        info!(
            model = %settings.provider.model,
            port = settings.server.port,
            "Configuration loaded"
        );
        Ok(settings)
    }

    /// Apply overrides from the plain environment variable names
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(api_key) = lookup("GEMINI_API_KEY") {
            self.provider.api_key = Some(api_key);
            debug!("Applied env override for API key");
        }

        if let Some(model) = lookup("GEMINI_MODEL") {
            self.provider.model = model;
            debug!("Applied env override for model");
        }

        if let Some(max_tokens) = lookup("GEMINI_MAX_TOKENS").and_then(|v| v.parse().ok()) {
            self.provider.max_tokens = max_tokens;
            debug!("Applied env override for max tokens");
        }

        if let Some(temperature) = lookup("GEMINI_TEMPERATURE").and_then(|v| v.parse().ok()) {
            self.provider.temperature = temperature;
            debug!("Applied env override for temperature");
        }

        if let Some(host) = lookup("HOST") {
            self.server.host = host;
            debug!("Applied env override for host");
        }

        if let Some(port) = lookup("PORT").and_then(|v| v.parse().ok()) {
            self.server.port = port;
            debug!("Applied env override for port");
        }

        if let Some(origins) = lookup("CORS_ORIGINS") {
            self.server.cors_origins = origins
                .split(',')
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect();
            debug!("Applied env override for CORS origins");
        }

        if let Some(max_topics) = lookup("MAX_TOPICS").and_then(|v| v.parse().ok()) {
            self.generation.max_topics = max_topics;
            debug!("Applied env override for max topics");
        }

        if let Some(per_topic) = lookup("QUESTIONS_PER_TOPIC").and_then(|v| v.parse().ok()) {
            self.generation.questions_per_topic = per_topic;
            debug!("Applied env override for questions per topic");
        }

        if let Some(level) = lookup("LOG_LEVEL") {
            self.logging.level = level;
            debug!("Applied env override for log level");
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let provider = &self.provider;

        match provider.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => {}
            _ => {
                return Err(anyhow!(
                    "GEMINI_API_KEY is not set. Add it to the environment or set provider.api_key in the config file"
                ))
            }
        }

        if provider.model.trim().is_empty() {
            return Err(anyhow!("Provider model name is empty"));
        }

        if provider.base_url.trim().is_empty() {
            return Err(anyhow!("Provider base URL is empty"));
        }

        if !(0.0..=2.0).contains(&provider.temperature) {
            return Err(anyhow!(
                "Invalid temperature: {} (must be between 0.0 and 2.0)",
                provider.temperature
            ));
        }

        if provider.max_tokens == 0 {
            return Err(anyhow!("Invalid max tokens: {}", provider.max_tokens));
        }

        if provider.timeout_seconds == 0 {
            return Err(anyhow!(
                "Invalid timeout: {} seconds",
                provider.timeout_seconds
            ));
        }

        let generation = &self.generation;
        if generation.max_topics == 0 {
            return Err(anyhow!("max_topics must be greater than 0"));
        }

        if generation.questions_per_topic == 0 {
            return Err(anyhow!("questions_per_topic must be greater than 0"));
        }

        if generation.max_subject_length == 0 {
            return Err(anyhow!("max_subject_length must be greater than 0"));
        }

        if !(1..=20).contains(&generation.default_question_count) {
            return Err(anyhow!(
                "default_question_count must be between 1 and 20, got: {}",
                generation.default_question_count
            ));
        }

        if !(1..=50).contains(&generation.default_quiz_count) {
            return Err(anyhow!(
                "default_quiz_count must be between 1 and 50, got: {}",
                generation.default_quiz_count
            ));
        }

        Ok(())
    }
}
