//! Gemini request building and response parsing
//!
//! Public functions for the generateContent and models endpoints.

use crate::error::{CopilotError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};

/// Build a generateContent request body for a single-turn prompt
pub fn build_generate_request(prompt: &str, temperature: f64, max_tokens: u32) -> JsonValue {
    json!({
        "contents": [{
            "parts": [{ "text": prompt }]
        }],
        "generationConfig": {
            "temperature": temperature,
            "maxOutputTokens": max_tokens
        }
    })
}

/// Parse a generateContent response envelope
///
/// Returns the trimmed text of the first candidate's first part.
pub fn parse_generate_content(response: &str) -> Result<String> {
    let json: JsonValue = serde_json::from_str(response).map_err(|e| {
        CopilotError::MalformedProviderResponse(format!("response is not JSON: {}", e))
    })?;

    let candidate = match json["candidates"].get(0) {
        Some(candidate) => candidate,
        None => {
            let reason = match json["promptFeedback"]["blockReason"].as_str() {
                Some(block) => format!("no candidates in response (blockReason: {})", block),
                None => "no candidates in response".to_string(),
            };
            return Err(CopilotError::MalformedProviderResponse(reason));
        }
    };

    let text = candidate
        .get("content")
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.get(0))
        .and_then(|p| p.get("text"))
        .and_then(|t| t.as_str());

    match text {
        Some(text) => Ok(text.trim().to_string()),
        None => {
            let reason = match candidate["finishReason"].as_str() {
                Some(finish) => format!(
                    "missing candidates[0].content.parts[0].text (finishReason: {})",
                    finish
                ),
                None => "missing candidates[0].content.parts[0].text".to_string(),
            };
            Err(CopilotError::MalformedProviderResponse(reason))
        }
    }
}

/// A model offered by the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub name: String,
    pub display_name: String,
    pub supports_generate_content: bool,
}

/// Parse a models listing response
pub fn parse_model_list(response: &str) -> Result<Vec<ModelInfo>> {
    let json: JsonValue = serde_json::from_str(response).map_err(|e| {
        CopilotError::MalformedProviderResponse(format!("model list is not JSON: {}", e))
    })?;

    // An account with no models gets an empty object back
    let Some(models) = json.get("models") else {
        return Ok(Vec::new());
    };
    let models = models.as_array().ok_or_else(|| {
        CopilotError::MalformedProviderResponse("'models' is not an array".to_string())
    })?;

    Ok(models.iter().filter_map(model_info).collect())
}

fn model_info(entry: &JsonValue) -> Option<ModelInfo> {
    let full_name = entry["name"].as_str()?;
    let name = full_name.strip_prefix("models/").unwrap_or(full_name);
    let display_name = entry["displayName"].as_str().unwrap_or(name);
    let supports_generate_content = entry["supportedGenerationMethods"]
        .as_array()
        .map(|methods| {
            methods
                .iter()
                .any(|m| m.as_str() == Some("generateContent"))
        })
        .unwrap_or(false);

    Some(ModelInfo {
        name: name.to_string(),
        display_name: display_name.to_string(),
        supports_generate_content,
    })
}
