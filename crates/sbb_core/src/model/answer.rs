//! Answer domain model.
//!
//! # Invariants
//! - `question_id` must be set before the answer is persisted.
//! - `id` is `None` until the answer is saved.

use super::question::Question;
use super::{now_epoch_ms, AnswerId, QuestionId, ValidationError};
use serde::{Deserialize, Serialize};

/// Reply attached to exactly one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub(crate) id: Option<AnswerId>,
    pub content: String,
    /// Unix epoch milliseconds.
    pub create_date: i64,
    pub(crate) question_id: Option<QuestionId>,
}

impl Answer {
    /// Creates an unsaved, unlinked answer stamped with the current time.
    pub fn new(content: impl Into<String>) -> Self {
        Self::with_create_date(content, now_epoch_ms())
    }

    pub fn with_create_date(content: impl Into<String>, create_date: i64) -> Self {
        Self {
            id: None,
            content: content.into(),
            create_date,
            question_id: None,
        }
    }

    pub fn id(&self) -> Option<AnswerId> {
        self.id
    }

    pub fn question_id(&self) -> Option<QuestionId> {
        self.question_id
    }

    /// Points this answer at `question` without touching its collection.
    ///
    /// Use `Question::add_answer` when the in-memory question must also
    /// observe the new answer.
    pub fn set_question(&mut self, question: &Question) -> Result<(), ValidationError> {
        let question_id = question.id().ok_or(ValidationError::QuestionNotPersisted)?;
        self.question_id = Some(question_id);
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.question_id.is_none() {
            return Err(ValidationError::MissingQuestion);
        }
        Ok(())
    }
}
