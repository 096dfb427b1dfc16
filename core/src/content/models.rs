//! Content data model
//!
//! Shapes returned by the content operations. All of them are built fresh
//! per request.

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

/// A topic and its questions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub topic: String,
    pub questions: Vec<String>,
}

impl Topic {
    pub fn new(topic: impl Into<String>, questions: Vec<String>) -> Self {
        Self {
            topic: topic.into(),
            questions,
        }
    }
}

/// Topics and questions generated for a subject
///
/// The totals are derived from `topics` on every read, so they cannot drift.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResult {
    subject: String,
    topics: Vec<Topic>,
}

impl GenerationResult {
    pub fn new(subject: impl Into<String>, topics: Vec<Topic>) -> Self {
        Self {
            subject: subject.into(),
            topics,
        }
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    pub fn total_topics(&self) -> usize {
        self.topics.len()
    }

    pub fn total_questions(&self) -> usize {
        self.topics.iter().map(|t| t.questions.len()).sum()
    }
}

impl Serialize for GenerationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("GenerationResult", 4)?;
        state.serialize_field("subject", &self.subject)?;
        state.serialize_field("topics", &self.topics)?;
        state.serialize_field("total_topics", &self.total_topics())?;
        state.serialize_field("total_questions", &self.total_questions())?;
        state.end()
    }
}

/// Questions generated for a single topic
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicQuestions {
    pub subject: String,
    pub topic: String,
    pub questions: Vec<String>,
}

/// One multiple-choice question
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: BTreeMap<String, String>,
    pub correct_answer: String,
    pub explanation: String,
}

/// Labels every well-formed question offers
pub const OPTION_LABELS: [&str; 4] = ["A", "B", "C", "D"];

impl QuizQuestion {
    /// Exactly the options A-D, with the correct label among them
    pub fn is_well_formed(&self) -> bool {
        self.options.len() == OPTION_LABELS.len()
            && OPTION_LABELS.iter().all(|l| self.options.contains_key(*l))
            && self.options.contains_key(&self.correct_answer)
    }
}

/// A generated quiz
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quiz {
    topic: String,
    questions: Vec<QuizQuestion>,
}

impl Quiz {
    pub fn new(topic: impl Into<String>, questions: Vec<QuizQuestion>) -> Self {
        Self {
            topic: topic.into(),
            questions,
        }
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }
}

impl Serialize for Quiz {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Quiz", 3)?;
        state.serialize_field("topic", &self.topic)?;
        state.serialize_field("total_questions", &self.total_questions())?;
        state.serialize_field("questions", &self.questions)?;
        state.end()
    }
}

/// A suggested learning video
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VideoSuggestion {
    pub title: String,
    pub description: String,
    pub search_query: String,
}

/// Answer to a student's doubt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DoubtAnswer {
    pub question: String,
    pub answer: String,
    pub key_points: Vec<String>,
    pub video_suggestions: Vec<VideoSuggestion>,
}

/// Verdict on a student's answer
///
/// `correct_answer` is expected to be empty when `is_correct` is true, but
/// that is left to the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerVerification {
    pub question: String,
    pub answer: String,
    pub is_correct: bool,
    pub feedback: String,
    pub correct_answer: String,
}
