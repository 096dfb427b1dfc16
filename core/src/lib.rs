//! Learning Copilot Core Module
//!
//! The core module turns a subject, topic or question into structured
//! learning content. It owns the model gateway, the prompt templates, the
//! cleanup of model output and the content operations built on top of them.

pub mod config;
pub mod content;
pub mod error;
pub mod extract;
pub mod gateway;
pub mod prompts;

pub use config::{GenerationSettings, LogFormat, LoggingSettings, ProviderSettings, ServerSettings, Settings};
pub use content::{
    AnswerVerification, ContentService, DoubtAnswer, GenerationResult, Quiz, QuizQuestion, Topic,
    TopicQuestions, VideoSuggestion,
};
pub use error::{CopilotError, ErrorKind, Result};
pub use extract::extract_json;
pub use gateway::{FakeTransport, ModelGateway, ModelInfo, Transport};
pub use prompts::PromptBuilder;
