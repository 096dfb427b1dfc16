//! Input validation for content operations
//!
//! Runs before any prompt is built, so rejected input never reaches the
//! model provider.

use crate::error::{CopilotError, Result};
use std::ops::RangeInclusive;

/// Allowed question counts for per-topic generation
pub const QUESTION_COUNT_RANGE: RangeInclusive<i64> = 1..=20;

/// Allowed question counts for quizzes
pub const QUIZ_COUNT_RANGE: RangeInclusive<i64> = 1..=50;

/// Trim `value`, rejecting it if nothing is left
pub fn require_text(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CopilotError::validation(format!("{} cannot be empty", field)));
    }
    Ok(trimmed.to_string())
}

/// Trim and bound a subject name
pub fn subject(value: &str, max_chars: usize) -> Result<String> {
    let subject = require_text("Subject", value)?;
    let chars = subject.chars().count();
    if chars > max_chars {
        return Err(CopilotError::validation(format!(
            "Subject must be at most {} characters (got {})",
            max_chars, chars
        )));
    }
    Ok(subject)
}

/// Check a requested count against its allowed range
pub fn count(field: &str, value: i64, range: RangeInclusive<i64>) -> Result<u32> {
    if !range.contains(&value) {
        return Err(CopilotError::validation(format!(
            "{} must be between {} and {} (got {})",
            field,
            range.start(),
            range.end(),
            value
        )));
    }
    u32::try_from(value).map_err(|_| CopilotError::validation(format!("{} is out of range", field)))
}
