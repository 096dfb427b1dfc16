//! Response extraction
//!
//! Turns a raw model completion into a string a strict JSON parser will
//! accept. The cleanup is heuristic: it strips markdown fences and surrounding
//! prose, normalizes curly quotes and drops trailing commas. It never fails;
//! text that is still not JSON afterwards is rejected by the caller's parse.

use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

const FENCE: &str = "```";
const JSON_FENCE: &str = "```json";

fn trailing_comma() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r",(\s*[}\]])").expect("trailing comma pattern is valid"))
}

/// Extract a parseable JSON string from a raw model response
pub fn extract_json(raw: &str) -> String {
    let mut text = raw.trim();

    text = strip_fences(text).trim();

    if let Some(start) = text.find(|c| c == '{' || c == '[') {
        if start > 0 {
            debug!("Removing {} bytes before JSON start", start);
            text = &text[start..];
        }
    }

    if let Some(end) = text.rfind(|c| c == '}' || c == ']') {
        if end + 1 < text.len() {
            debug!("Removing {} bytes after JSON end", text.len() - end - 1);
            text = &text[..=end];
        }
    }

    let normalized = normalize_quotes(text);
    remove_trailing_commas(&normalized).trim().to_string()
}

/// Take the content of the first fenced block, preferring one labeled `json`
fn strip_fences(text: &str) -> &str {
    // ASCII lowercasing keeps byte offsets aligned with `text`
    let lowered = text.to_ascii_lowercase();
    if let Some(start) = lowered.find(JSON_FENCE) {
        debug!("Removing JSON markdown wrapper");
        let body = &text[start + JSON_FENCE.len()..];
        return match body.find(FENCE) {
            Some(end) => &body[..end],
            None => body,
        };
    }

    if text.contains(FENCE) {
        let mut parts = text.split(FENCE);
        let _before = parts.next();
        if let (Some(inner), Some(_after)) = (parts.next(), parts.next()) {
            debug!("Removing generic markdown wrapper");
            return inner;
        }
    }

    text
}

fn normalize_quotes(text: &str) -> String {
    text.replace(['\u{201C}', '\u{201D}'], "\"")
        .replace(['\u{2018}', '\u{2019}'], "'")
}

fn remove_trailing_commas(text: &str) -> String {
    let mut current = text.to_string();
    loop {
        let next = trailing_comma().replace_all(&current, "$1").into_owned();
        if next == current {
            return current;
        }
        current = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn parse(text: &str) -> Value {
        serde_json::from_str(&extract_json(text)).expect("extracted text should parse")
    }

    #[test]
    fn test_plain_json_is_unchanged() {
        let raw = r#"{"topics": []}"#;
        assert_eq!(extract_json(raw), raw);
    }

    #[test]
    fn test_json_fence_with_prose() {
        let raw = "Here is your content:\n```json\n{\"topics\":[{\"topic\":\"Basics\",\"questions\":[\"Q1?\"]}]}\n```\nLet me know if you need more.";
        assert_eq!(
            parse(raw),
            json!({"topics": [{"topic": "Basics", "questions": ["Q1?"]}]})
        );
    }

    #[test]
    fn test_uppercase_json_fence() {
        let raw = "```JSON\n{\"a\": 1}\n```";
        assert_eq!(parse(raw), json!({"a": 1}));
    }

    #[test]
    fn test_unterminated_json_fence_takes_rest() {
        let raw = "```json\n{\"a\": 1}";
        assert_eq!(parse(raw), json!({"a": 1}));
    }

    #[test]
    fn test_generic_fence() {
        let raw = "Sure!\n```\n{\"answer\": \"yes\"}\n```";
        assert_eq!(parse(raw), json!({"answer": "yes"}));
    }

    #[test]
    fn test_generic_fence_with_other_label() {
        let raw = "```javascript\n{\"answer\": \"yes\"}\n```";
        assert_eq!(parse(raw), json!({"answer": "yes"}));
    }

    #[test]
    fn test_single_fence_marker_is_ignored() {
        let raw = "``` {\"a\": 1}";
        assert_eq!(parse(raw), json!({"a": 1}));
    }

    #[test]
    fn test_prose_around_unfenced_json() {
        let raw = "The result is {\"is_correct\": true} as requested.";
        assert_eq!(parse(raw), json!({"is_correct": true}));
    }

    #[test]
    fn test_array_before_object_wins() {
        let raw = "list: [{\"a\": 1}, {\"b\": 2}] done";
        assert_eq!(parse(raw), json!([{"a": 1}, {"b": 2}]));
    }

    #[test]
    fn test_trailing_comma_removed() {
        assert_eq!(parse(r#"{"a":1,}"#), json!({"a": 1}));
        assert_eq!(parse("{\"a\": [1, 2,\n  ],\n}"), json!({"a": [1, 2]}));
    }

    #[test]
    fn test_repeated_trailing_commas_removed() {
        assert_eq!(parse(r#"{"a": [1,,]}"#), json!({"a": [1]}));
    }

    #[test]
    fn test_smart_quotes_normalized() {
        let raw = "{\u{201C}answer\u{201D}: \u{201C}it\u{2019}s fine\u{201D}}";
        assert!(serde_json::from_str::<Value>(raw).is_err());
        assert_eq!(parse(raw), json!({"answer": "it's fine"}));
    }

    #[test]
    fn test_no_json_content_is_left_for_the_parser() {
        let raw = "  I cannot help with that request.  ";
        let extracted = extract_json(raw);
        assert_eq!(extracted, "I cannot help with that request.");
        assert!(serde_json::from_str::<Value>(&extracted).is_err());
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(extract_json(""), "");
        assert_eq!(extract_json("   \n"), "");
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let samples = [
            "```json\n{\"topics\":[{\"topic\":\"Basics\",\"questions\":[\"Q1?\",\"Q2?\"]}]}\n```",
            "Intro text {\"a\": [1, 2,], \"b\": {\"c\": 3,},} trailing words",
            "```\n[1, 2, 3]\n```",
            "{\u{201C}k\u{201D}: \u{2018}v\u{2019}}",
            "no json at all",
            "{\"a\": [1,,]}",
            "",
        ];
        for sample in samples {
            let once = extract_json(sample);
            let twice = extract_json(&once);
            assert_eq!(once, twice, "not a fixed point for {:?}", sample);
        }
    }

    #[test]
    fn test_fenced_object_round_trips() {
        let original = json!({
            "questions": [
                {
                    "question": "What is ownership?",
                    "options": {"A": "a", "B": "b", "C": "c", "D": "d"},
                    "correct_answer": "A",
                    "explanation": "Because."
                }
            ],
            "nested": {"depth": [1, 2, {"x": null}]}
        });
        let wrappers = [
            ("", ""),
            ("Here you go:\n```json\n", "\n```\nEnjoy!"),
            ("```\n", "\n```"),
            ("Sure thing. ", " Hope this helps."),
        ];
        for (prefix, suffix) in wrappers {
            let raw = format!("{}{}{}", prefix, serde_json::to_string_pretty(&original).unwrap(), suffix);
            assert_eq!(parse(&raw), original, "failed for prefix {:?}", prefix);
        }
    }
}
