//! Content operations
//!
//! One operation per use case. Each validates its input, builds a prompt,
//! makes a single structured call through the gateway, checks the required
//! top-level key and shapes the rest leniently.

pub mod models;
pub mod shaping;
pub mod validation;

pub use models::{
    AnswerVerification, DoubtAnswer, GenerationResult, Quiz, QuizQuestion, Topic, TopicQuestions,
    VideoSuggestion,
};

use crate::config::GenerationSettings;
use crate::error::{CopilotError, Result};
use crate::gateway::{ModelGateway, ModelInfo};
use crate::prompts::PromptBuilder;
use std::sync::Arc;
use tracing::{debug, info, warn};
use validation::{QUESTION_COUNT_RANGE, QUIZ_COUNT_RANGE};

/// Characters of a question shown in logs
const LOG_PREVIEW_CHARS: usize = 50;

/// Content service: the operations behind every route
#[derive(Debug, Clone)]
pub struct ContentService {
    gateway: Arc<ModelGateway>,
    prompts: PromptBuilder,
    limits: GenerationSettings,
}

impl ContentService {
    pub fn new(gateway: Arc<ModelGateway>, limits: GenerationSettings) -> Self {
        Self {
            gateway,
            prompts: PromptBuilder::from_settings(&limits),
            limits,
        }
    }

    /// Generate topics and questions for a subject
    pub async fn generate_content(&self, subject: &str) -> Result<GenerationResult> {
        let subject = validation::subject(subject, self.limits.max_subject_length)?;
        info!(subject = %subject, "Generating content");

        let prompt = self.prompts.topics_and_questions(&subject);
        let response = self.gateway.generate_structured(&prompt, None).await?;
        let raw_topics = shaping::required_array(&response, "topics")?;

        let mut topics = Vec::with_capacity(raw_topics.len());
        for (index, raw) in raw_topics.iter().enumerate() {
            let (topic, degraded) = shaping::topic(raw);
            if degraded {
                warn!(
                    index,
                    topic = %topic.topic,
                    questions = topic.questions.len(),
                    "Degraded topic in model response"
                );
            }
            topics.push(topic);
        }

        let result = GenerationResult::new(subject, topics);
        info!(
            subject = %result.subject(),
            topics = result.total_topics(),
            questions = result.total_questions(),
            "Generated content"
        );
        Ok(result)
    }

    /// Generate questions for one topic of a subject
    pub async fn generate_topic_questions(
        &self,
        subject: &str,
        topic: &str,
        count: Option<i64>,
    ) -> Result<TopicQuestions> {
        let subject = validation::subject(subject, self.limits.max_subject_length)?;
        let topic = validation::require_text("Topic", topic)?;
        let count = validation::count(
            "count",
            count.unwrap_or(i64::from(self.limits.default_question_count)),
            QUESTION_COUNT_RANGE,
        )?;
        info!(subject = %subject, topic = %topic, count, "Generating topic questions");

        let prompt = self.prompts.topic_questions(&subject, &topic, count);
        let response = self.gateway.generate_structured(&prompt, None).await?;
        let raw = shaping::required_array(&response, "questions")?;
        let questions = shaping::string_list(response.get("questions"));
        if questions.len() != raw.len() {
            warn!(
                dropped = raw.len() - questions.len(),
                "Dropped non-text questions from model response"
            );
        }

        info!(count = questions.len(), "Generated topic questions");
        Ok(TopicQuestions {
            subject,
            topic,
            questions,
        })
    }

    /// Generate a multiple-choice quiz
    pub async fn generate_quiz(&self, topic: &str, count: Option<i64>) -> Result<Quiz> {
        let topic = validation::require_text("Topic", topic)?;
        let count = validation::count(
            "count",
            count.unwrap_or(i64::from(self.limits.default_quiz_count)),
            QUIZ_COUNT_RANGE,
        )?;
        info!(topic = %topic, count, "Generating quiz");

        let prompt = self.prompts.quiz(&topic, count);
        let response = self.gateway.generate_structured(&prompt, None).await?;
        let raw = shaping::required_array(&response, "questions")?;

        let questions: Vec<QuizQuestion> = raw.iter().map(shaping::quiz_question).collect();
        let malformed = questions.iter().filter(|q| !q.is_well_formed()).count();
        if malformed > 0 {
            warn!(malformed, total = questions.len(), "Quiz contains malformed questions");
        }

        let quiz = Quiz::new(topic, questions);
        info!(
            topic = %quiz.topic(),
            requested = count,
            generated = quiz.total_questions(),
            "Generated quiz"
        );
        Ok(quiz)
    }

    /// Answer a student's doubt
    pub async fn answer_doubt(&self, question: &str, context: Option<&str>) -> Result<DoubtAnswer> {
        let question = validation::require_text("Question", question)?;
        let context = context.map(str::trim).unwrap_or_default();
        info!(
            question = %crate::error::preview(&question, LOG_PREVIEW_CHARS),
            "Answering doubt"
        );

        let prompt = self.prompts.doubt_answer(&question, context);
        let response = self.gateway.generate_structured(&prompt, None).await?;
        let answer =
            shaping::scalar_text(shaping::required(&response, "answer")?).ok_or_else(|| {
                CopilotError::missing_field("answer")
            })?;

        let key_points = shaping::string_list(response.get("key_points"));
        let video_suggestions: Vec<VideoSuggestion> = response
            .get("video_suggestions")
            .and_then(|v| v.as_array())
            .map(|items| items.iter().filter_map(shaping::video_suggestion).collect())
            .unwrap_or_default();

        debug!(
            key_points = key_points.len(),
            videos = video_suggestions.len(),
            "Answered doubt"
        );
        Ok(DoubtAnswer {
            question,
            answer,
            key_points,
            video_suggestions,
        })
    }

    /// Verify a student's answer
    pub async fn verify_answer(&self, question: &str, answer: &str) -> Result<AnswerVerification> {
        let question = validation::require_text("Question", question)?;
        let answer = validation::require_text("Answer", answer)?;
        info!(
            question = %crate::error::preview(&question, LOG_PREVIEW_CHARS),
            "Verifying answer"
        );

        let prompt = self.prompts.answer_verification(&question, &answer);
        let response = self.gateway.generate_structured(&prompt, None).await?;
        let is_correct = response
            .get("is_correct")
            .and_then(shaping::correctness)
            .ok_or_else(|| CopilotError::missing_field("is_correct"))?;

        let feedback = shaping::text_or(&response, "feedback", shaping::DEFAULT_FEEDBACK);
        let correct_answer = shaping::optional_text(&response, "correct_answer");
        if is_correct && !correct_answer.trim().is_empty() {
            debug!("Model supplied a correct answer for a correct response");
        }

        info!(is_correct, "Verified answer");
        Ok(AnswerVerification {
            question,
            answer,
            is_correct,
            feedback,
            correct_answer,
        })
    }

    /// List models available to the configured key
    pub async fn list_models(&self) -> Result<Vec<ModelInfo>> {
        self.gateway.list_models().await
    }
}
