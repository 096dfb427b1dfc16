//! API Handlers Module
//!
//! This module contains the request handlers for the API system.

use axum::{
    debug_handler,
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    response::Json,
};
use serde_json::{json, Value};
use std::sync::Arc;

use copilot_core::{
    AnswerVerification, ContentService, DoubtAnswer, GenerationResult, ModelInfo, Quiz,
    TopicQuestions,
};

use crate::error::ApiError;
use crate::models::{
    ApiConfig, ApiResponse, DoubtQuery, GenerateRequest, QuestionsQuery, QuizQuery, VerifyQuery,
};

/// Represents the state of the API server
pub struct ApiState {
    /// Content operations
    pub service: Arc<ContentService>,
    /// Server configuration
    pub config: ApiConfig,
}

/// Service metadata
#[debug_handler]
pub async fn root(State(state): State<Arc<ApiState>>) -> Json<Value> {
    Json(json!({
        "message": "Learning Copilot API is running",
        "status": "active",
        "version": state.config.version,
        "endpoints": {
            "generate": "/api/generate",
            "generate_questions": "/api/generate-questions",
            "generate_quiz": "/api/generate-quiz",
            "answer_doubt": "/api/answer-doubt",
            "verify_answer": "/api/verify-answer",
            "models": "/api/models",
            "health": "/health"
        }
    }))
}

/// Health check endpoint
#[debug_handler]
pub async fn health_check(State(state): State<Arc<ApiState>>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "learning-copilot-api",
        "version": state.config.version,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Generate topics and questions for a subject
#[debug_handler]
pub async fn generate_content(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<GenerationResult>, ApiError> {
    let Json(request) = payload?;
    tracing::info!(subject = %request.subject, "API request: generate content");

    let result = state
        .service
        .generate_content(&request.subject)
        .await
        .map_err(|e| ApiError::operation("Content Generation", e))?;

    tracing::info!(topics = result.total_topics(), "API response: generated content");
    Ok(Json(result))
}

/// Generate questions for one topic
#[debug_handler]
pub async fn generate_questions(
    State(state): State<Arc<ApiState>>,
    query: Result<Query<QuestionsQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<TopicQuestions>>, ApiError> {
    let Query(query) = query?;

    let result = state
        .service
        .generate_topic_questions(
            query.subject.as_deref().unwrap_or_default(),
            query.topic.as_deref().unwrap_or_default(),
            query.count,
        )
        .await
        .map_err(|e| ApiError::operation("Question Generation", e))?;

    Ok(Json(ApiResponse::success(result)))
}

/// Generate a multiple-choice quiz
#[debug_handler]
pub async fn generate_quiz(
    State(state): State<Arc<ApiState>>,
    query: Result<Query<QuizQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<Quiz>>, ApiError> {
    let Query(query) = query?;

    let result = state
        .service
        .generate_quiz(query.topic.as_deref().unwrap_or_default(), query.count)
        .await
        .map_err(|e| ApiError::operation("Quiz Generation", e))?;

    Ok(Json(ApiResponse::success(result)))
}

/// Answer a student's doubt
#[debug_handler]
pub async fn answer_doubt(
    State(state): State<Arc<ApiState>>,
    query: Result<Query<DoubtQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<DoubtAnswer>>, ApiError> {
    let Query(query) = query?;

    let result = state
        .service
        .answer_doubt(
            query.question.as_deref().unwrap_or_default(),
            query.context.as_deref(),
        )
        .await
        .map_err(|e| ApiError::operation("Doubt Answering", e))?;

    Ok(Json(ApiResponse::success(result)))
}

/// Verify a student's answer
#[debug_handler]
pub async fn verify_answer(
    State(state): State<Arc<ApiState>>,
    query: Result<Query<VerifyQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<AnswerVerification>>, ApiError> {
    let Query(query) = query?;

    let result = state
        .service
        .verify_answer(
            query.question.as_deref().unwrap_or_default(),
            query.answer.as_deref().unwrap_or_default(),
        )
        .await
        .map_err(|e| ApiError::operation("Answer Verification", e))?;

    Ok(Json(ApiResponse::success(result)))
}

/// List models available to the configured key
#[debug_handler]
pub async fn list_models(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<ApiResponse<Vec<ModelInfo>>>, ApiError> {
    let models = state
        .service
        .list_models()
        .await
        .map_err(|e| ApiError::operation("Model Listing", e))?;

    Ok(Json(ApiResponse::success(models)))
}
