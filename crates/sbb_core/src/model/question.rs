//! Question domain model.
//!
//! # Responsibility
//! - Define the top-level board post and its owned answer collection.
//! - Provide the relation helper that links an answer from the question side.
//!
//! # Invariants
//! - `id` is `None` until the question is saved and immutable afterwards.
//! - `answers` holds only answers whose `question_id` equals `id`.

use super::answer::Answer;
use super::{now_epoch_ms, QuestionId, ValidationError};
use serde::{Deserialize, Serialize};

/// Top-level board post.
///
/// Deserialization runs the relation check, so `answers` from the wire must
/// all reference `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "QuestionRecord")]
pub struct Question {
    pub(crate) id: Option<QuestionId>,
    pub subject: String,
    pub content: String,
    /// Unix epoch milliseconds.
    pub create_date: i64,
    /// Ordered by answer id.
    pub(crate) answers: Vec<Answer>,
}

/// Unchecked wire shape of `Question`.
#[derive(Deserialize)]
struct QuestionRecord {
    id: Option<QuestionId>,
    subject: String,
    content: String,
    create_date: i64,
    #[serde(default)]
    answers: Vec<Answer>,
}

impl TryFrom<QuestionRecord> for Question {
    type Error = ValidationError;

    fn try_from(record: QuestionRecord) -> Result<Self, Self::Error> {
        let question = Self {
            id: record.id,
            subject: record.subject,
            content: record.content,
            create_date: record.create_date,
            answers: record.answers,
        };
        question.validate_answers()?;
        Ok(question)
    }
}

impl Question {
    /// Creates an unsaved question stamped with the current time.
    pub fn new(subject: impl Into<String>, content: impl Into<String>) -> Self {
        Self::with_create_date(subject, content, now_epoch_ms())
    }

    /// Creates an unsaved question with a caller-provided creation timestamp.
    pub fn with_create_date(
        subject: impl Into<String>,
        content: impl Into<String>,
        create_date: i64,
    ) -> Self {
        Self {
            id: None,
            subject: subject.into(),
            content: content.into(),
            create_date,
            answers: Vec::new(),
        }
    }

    pub fn id(&self) -> Option<QuestionId> {
        self.id
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    /// Checks write-time invariants.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.subject.trim().is_empty() {
            return Err(ValidationError::BlankSubject);
        }
        Ok(())
    }

    /// Checks that every listed answer references this question's id.
    pub fn validate_answers(&self) -> Result<(), ValidationError> {
        for answer in &self.answers {
            if self.id.is_none() || answer.question_id != self.id {
                return Err(ValidationError::AnswerQuestionMismatch {
                    question_id: self.id,
                    answer_question_id: answer.question_id,
                });
            }
        }
        Ok(())
    }

    /// Links `answer` to this question and appends it to `answers`.
    ///
    /// Both sides of the relation are updated before returning, so the
    /// returned handle can be saved directly and the saved id lands in
    /// this question's collection.
    ///
    /// # Errors
    /// - `QuestionNotPersisted` when this question has no id yet; the
    ///   answer is dropped and neither side is modified.
    pub fn add_answer(&mut self, mut answer: Answer) -> Result<&mut Answer, ValidationError> {
        let question_id = self.id.ok_or(ValidationError::QuestionNotPersisted)?;
        answer.question_id = Some(question_id);
        self.answers.push(answer);
        let index = self.answers.len() - 1;
        Ok(&mut self.answers[index])
    }
}
