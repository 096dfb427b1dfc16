//! Router tests
//!
//! Drive the real router with a fake model transport; no network access.

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use copilot_api::{ApiConfig, ApiServer, REQUEST_ID_HEADER};
use copilot_core::{ContentService, FakeTransport, GenerationSettings, ModelGateway, ProviderSettings};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn router_with(fake: &FakeTransport) -> Router {
    let provider = ProviderSettings {
        api_key: Some("test-key".to_string()),
        ..ProviderSettings::default()
    };
    let gateway = ModelGateway::with_transport(&provider, fake.clone().into()).unwrap();
    let service = ContentService::new(Arc::new(gateway), GenerationSettings::default());
    ApiServer::new(ApiConfig::default(), Arc::new(service)).router()
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn post(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn generate_returns_shaped_result() {
    let fake = FakeTransport::with_model_text(
        "```json\n{\"topics\":[{\"topic\":\"Basics\",\"questions\":[\"Q1?\",\"Q2?\"]}]}\n```",
    );
    let (status, body) = send(
        router_with(&fake),
        post_json("/api/generate", json!({"subject": "Python"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "subject": "Python",
            "topics": [{"topic": "Basics", "questions": ["Q1?", "Q2?"]}],
            "total_topics": 1,
            "total_questions": 2
        })
    );
}

#[tokio::test]
async fn generate_rejects_empty_subject() {
    let fake = FakeTransport::with_model_text("{}");
    let (status, body) = send(
        router_with(&fake),
        post_json("/api/generate", json!({"subject": "   "})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "ValidationError");
    assert_eq!(body["message"], "Subject cannot be empty");
    assert_eq!(body["details"], Value::Null);
    assert_eq!(fake.request_count(), 0);
}

#[tokio::test]
async fn generate_rejects_malformed_body() {
    let fake = FakeTransport::with_model_text("{}");
    let (status, body) = send(
        router_with(&fake),
        post_json("/api/generate", json!({"topic": "Python"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "ValidationError");
    assert_eq!(fake.request_count(), 0);
}

#[tokio::test]
async fn generate_reports_rate_limit_as_server_error() {
    let fake = FakeTransport::replying(429, r#"{"error":{"code":429,"status":"RESOURCE_EXHAUSTED"}}"#);
    let (status, body) = send(
        router_with(&fake),
        post_json("/api/generate", json!({"subject": "Python"})),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "ProviderError");
    assert_eq!(body["message"], "Content Generation failed");
    assert!(body["details"].as_str().unwrap().contains("429"));
}

#[tokio::test]
async fn rejected_key_is_unauthorized() {
    let fake = FakeTransport::replying(400, "API key not valid. Please pass a valid API key.");
    let (status, body) = send(
        router_with(&fake),
        post_json("/api/generate", json!({"subject": "Python"})),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "AuthError");
}

#[tokio::test]
async fn question_count_bounds() {
    let fake = FakeTransport::with_model_text(r#"{"questions":["Q?"]}"#);

    for count in [0, 21] {
        let uri = format!("/api/generate-questions?subject=Python&topic=Loops&count={}", count);
        let (status, body) = send(router_with(&fake), post(&uri)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "ValidationError");
    }
    assert_eq!(fake.request_count(), 0);

    for count in [1, 20] {
        let uri = format!("/api/generate-questions?subject=Python&topic=Loops&count={}", count);
        let (status, body) = send(router_with(&fake), post(&uri)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Success");
        assert_eq!(
            body["data"],
            json!({"subject": "Python", "topic": "Loops", "questions": ["Q?"]})
        );
    }
    assert_eq!(fake.request_count(), 2);
}

#[tokio::test]
async fn non_numeric_count_is_validation_error() {
    let fake = FakeTransport::with_model_text(r#"{"questions":[]}"#);
    let (status, body) = send(
        router_with(&fake),
        post("/api/generate-quiz?topic=Rust&count=many"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "ValidationError");
}

#[tokio::test]
async fn quiz_is_wrapped_in_envelope() {
    let fake = FakeTransport::with_model_text(
        r#"{"questions":[{"question":"Q?","options":{"A":"1","B":"2","C":"3","D":"4"},"correct_answer":"A","explanation":"e"}]}"#,
    );
    let (status, body) = send(
        router_with(&fake),
        post("/api/generate-quiz?topic=Arithmetic&count=1"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["topic"], "Arithmetic");
    assert_eq!(body["data"]["total_questions"], 1);
    assert_eq!(body["data"]["questions"][0]["correct_answer"], "A");
}

#[tokio::test]
async fn missing_topic_is_validation_error() {
    let fake = FakeTransport::with_model_text(r#"{"questions":[]}"#);
    let (status, body) = send(router_with(&fake), post("/api/generate-quiz")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Topic cannot be empty");
}

#[tokio::test]
async fn answer_doubt_missing_answer_field() {
    let fake = FakeTransport::with_model_text(r#"{"key_points":[]}"#);
    let (status, body) = send(
        router_with(&fake),
        post("/api/answer-doubt?question=What%20is%20a%20closure%3F"),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "MissingFieldError");
    assert_eq!(body["message"], "Doubt Answering failed");
}

#[tokio::test]
async fn verify_answer_echoes_inputs() {
    let fake = FakeTransport::with_model_text(r#"{"is_correct":true,"feedback":"Right."}"#);
    let (status, body) = send(
        router_with(&fake),
        post("/api/verify-answer?question=2%2B2%3F&answer=4"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"],
        json!({
            "question": "2+2?",
            "answer": "4",
            "is_correct": true,
            "feedback": "Right.",
            "correct_answer": ""
        })
    );
}

#[tokio::test]
async fn prose_reply_is_parse_error() {
    let fake = FakeTransport::with_model_text(&"I'd rather talk about the weather. ".repeat(20));
    let (status, body) = send(
        router_with(&fake),
        post("/api/generate-quiz?topic=Rust"),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "ResponseParseError");
    assert!(body["details"].as_str().unwrap().len() < 600);
}

#[tokio::test]
async fn models_are_listed() {
    let fake = FakeTransport::replying(
        200,
        r#"{"models":[{"name":"models/gemini-2.5-flash","displayName":"Gemini 2.5 Flash","supportedGenerationMethods":["generateContent"]}]}"#,
    );
    let (status, body) = send(router_with(&fake), get("/api/models")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["name"], "gemini-2.5-flash");
    assert_eq!(body["data"][0]["supports_generate_content"], true);
}

#[tokio::test]
async fn health_and_root() {
    let fake = FakeTransport::new();
    let (status, body) = send(router_with(&fake), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert!(body["timestamp"].is_string());

    let (status, body) = send(router_with(&fake), get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["endpoints"]["generate"], "/api/generate");
    assert_eq!(fake.request_count(), 0);
}

#[tokio::test]
async fn responses_carry_request_id() {
    let fake = FakeTransport::new();
    let response = router_with(&fake).oneshot(get("/health")).await.unwrap();
    let id = response.headers().get(REQUEST_ID_HEADER).unwrap();
    assert_eq!(id.to_str().unwrap().len(), 36);

    let request = Request::builder()
        .uri("/health")
        .header(REQUEST_ID_HEADER, "abc-123")
        .body(Body::empty())
        .unwrap();
    let response = router_with(&fake).oneshot(request).await.unwrap();
    assert_eq!(response.headers().get(REQUEST_ID_HEADER).unwrap(), "abc-123");
}
