//! Lenient shaping of parsed model output
//!
//! A required top-level key must be present with the right type. Below that
//! level, missing or mistyped fields degrade to empty values instead of
//! failing the operation.

use crate::content::models::{QuizQuestion, Topic, VideoSuggestion};
use crate::error::{CopilotError, Result};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

/// Name given to topics the model left unnamed
pub const UNNAMED_TOPIC: &str = "Unnamed Topic";

/// Feedback used when the model gave none
pub const DEFAULT_FEEDBACK: &str = "Answer verified by AI";

/// Fetch a required top-level array
pub fn required_array<'a>(value: &'a JsonValue, key: &str) -> Result<&'a Vec<JsonValue>> {
    value
        .get(key)
        .and_then(JsonValue::as_array)
        .ok_or_else(|| CopilotError::missing_field(key))
}

/// Fetch a required top-level key that is not null
pub fn required<'a>(value: &'a JsonValue, key: &str) -> Result<&'a JsonValue> {
    match value.get(key) {
        Some(JsonValue::Null) | None => Err(CopilotError::missing_field(key)),
        Some(found) => Ok(found),
    }
}

/// Strings, numbers and booleans as text; anything else is absent
pub fn scalar_text(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn text_field(value: &JsonValue, key: &str) -> String {
    value.get(key).and_then(scalar_text).unwrap_or_default()
}

/// String entries of a list; a non-list is empty
pub fn string_list(value: Option<&JsonValue>) -> Vec<String> {
    value
        .and_then(JsonValue::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

/// Shape one element of a `topics` array
///
/// Returns the topic and whether it had to be degraded.
pub fn topic(value: &JsonValue) -> (Topic, bool) {
    if !value.is_object() {
        return (Topic::new(UNNAMED_TOPIC, Vec::new()), true);
    }

    let name = value
        .get("topic")
        .and_then(JsonValue::as_str)
        .map(str::trim)
        .filter(|name| !name.is_empty());
    let raw_questions = value.get("questions");
    let questions = string_list(raw_questions);

    let degraded = name.is_none()
        || !raw_questions.map(JsonValue::is_array).unwrap_or(false)
        || raw_questions
            .and_then(JsonValue::as_array)
            .map(|items| items.len() != questions.len())
            .unwrap_or(false);

    (
        Topic::new(name.unwrap_or(UNNAMED_TOPIC), questions),
        degraded,
    )
}

/// Shape one element of a quiz `questions` array
pub fn quiz_question(value: &JsonValue) -> QuizQuestion {
    let options: BTreeMap<String, String> = value
        .get("options")
        .and_then(JsonValue::as_object)
        .map(|map| {
            map.iter()
                .filter_map(|(label, text)| {
                    scalar_text(text).map(|text| (label.trim().to_uppercase(), text))
                })
                .collect()
        })
        .unwrap_or_default();

    QuizQuestion {
        question: text_field(value, "question"),
        options,
        correct_answer: text_field(value, "correct_answer").trim().to_uppercase(),
        explanation: text_field(value, "explanation"),
    }
}

/// Shape one video suggestion; non-objects are dropped
pub fn video_suggestion(value: &JsonValue) -> Option<VideoSuggestion> {
    value.as_object()?;
    Some(VideoSuggestion {
        title: text_field(value, "title"),
        description: text_field(value, "description"),
        search_query: text_field(value, "search_query"),
    })
}

/// Read a correctness flag: a boolean or the strings "true"/"false"
pub fn correctness(value: &JsonValue) -> Option<bool> {
    match value {
        JsonValue::Bool(b) => Some(*b),
        JsonValue::String(s) => match s.trim().to_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Optional text field, defaulting when absent or blank
pub fn text_or(value: &JsonValue, key: &str, default: &str) -> String {
    let text = text_field(value, key);
    if text.trim().is_empty() {
        default.to_string()
    } else {
        text
    }
}

/// Optional text field, empty when absent
pub fn optional_text(value: &JsonValue, key: &str) -> String {
    text_field(value, key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;

    #[test]
    fn test_required_array_wrong_type_is_missing_field() {
        let value = json!({"topics": "none"});
        let err = required_array(&value, "topics").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingField);
        assert!(required_array(&json!({}), "topics").is_err());
        assert_eq!(required_array(&json!({"topics": []}), "topics").unwrap().len(), 0);
    }

    #[test]
    fn test_required_rejects_null() {
        assert!(required(&json!({"answer": null}), "answer").is_err());
        assert!(required(&json!({"answer": ""}), "answer").is_ok());
    }

    #[test]
    fn test_topic_well_formed() {
        let (topic, degraded) = topic(&json!({"topic": "Basics", "questions": ["Q1?", "Q2?"]}));
        assert_eq!(topic, Topic::new("Basics", vec!["Q1?".into(), "Q2?".into()]));
        assert!(!degraded);
    }

    #[test]
    fn test_topic_degrades() {
        let (t, degraded) = topic(&json!({"topic": "Basics", "questions": "oops"}));
        assert!(t.questions.is_empty());
        assert!(degraded);

        let (t, degraded) = topic(&json!({"questions": ["Q?"]}));
        assert_eq!(t.topic, UNNAMED_TOPIC);
        assert!(degraded);

        let (t, degraded) = topic(&json!("just a string"));
        assert_eq!(t, Topic::new(UNNAMED_TOPIC, vec![]));
        assert!(degraded);

        let (t, degraded) = topic(&json!({"topic": "Mixed", "questions": ["Q?", 3, null]}));
        assert_eq!(t.questions, vec!["Q?".to_string()]);
        assert!(degraded);
    }

    #[test]
    fn test_quiz_question_lenient() {
        let q = quiz_question(&json!({
            "question": "Largest planet?",
            "options": {"A": "Mars", "B": "Jupiter", "c": "Venus", "D": 4},
            "correct_answer": " b "
        }));
        assert_eq!(q.options.get("C").map(String::as_str), Some("Venus"));
        assert_eq!(q.options.get("D").map(String::as_str), Some("4"));
        assert_eq!(q.correct_answer, "B");
        assert_eq!(q.explanation, "");
        assert!(q.is_well_formed());

        let empty = quiz_question(&json!(42));
        assert_eq!(empty, QuizQuestion::default());
        assert!(!empty.is_well_formed());
    }

    #[test]
    fn test_video_suggestion() {
        let video = video_suggestion(&json!({"title": "Intro", "search_query": "rust intro"})).unwrap();
        assert_eq!(video.title, "Intro");
        assert_eq!(video.description, "");
        assert!(video_suggestion(&json!("Intro")).is_none());
    }

    #[test]
    fn test_correctness() {
        assert_eq!(correctness(&json!(true)), Some(true));
        assert_eq!(correctness(&json!("False")), Some(false));
        assert_eq!(correctness(&json!("maybe")), None);
        assert_eq!(correctness(&json!(1)), None);
    }

    #[test]
    fn test_text_or_default() {
        let value = json!({"feedback": "  ", "other": "x"});
        assert_eq!(text_or(&value, "feedback", DEFAULT_FEEDBACK), DEFAULT_FEEDBACK);
        assert_eq!(text_or(&value, "other", DEFAULT_FEEDBACK), "x");
        assert_eq!(optional_text(&value, "missing"), "");
    }
}
