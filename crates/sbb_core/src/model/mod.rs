//! Board domain model: questions, answers and paging envelopes.
//!
//! # Responsibility
//! - Define canonical data structures used by repositories and services.
//! - Keep the Question/Answer relation consistent from the owning side.
//!
//! # Invariants
//! - Identifiers are assigned by storage on insert and never change afterwards.
//! - Every persisted answer references exactly one persisted question.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

pub mod answer;
pub mod page;
pub mod question;

/// Storage-assigned question identifier.
pub type QuestionId = i64;

/// Storage-assigned answer identifier.
pub type AnswerId = i64;

/// Entity-level validation failures raised before any persistence happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Question subject is empty or whitespace only.
    BlankSubject,
    /// Answer has no owning question reference.
    MissingQuestion,
    /// Relation requires a question that has already been saved.
    QuestionNotPersisted,
    /// An answer in `Question::answers` points at a different question.
    AnswerQuestionMismatch {
        question_id: Option<QuestionId>,
        answer_question_id: Option<QuestionId>,
    },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankSubject => write!(f, "question subject cannot be blank"),
            Self::MissingQuestion => write!(f, "answer must reference a question"),
            Self::QuestionNotPersisted => {
                write!(f, "question must be saved before answers can reference it")
            }
            Self::AnswerQuestionMismatch {
                question_id,
                answer_question_id,
            } => write!(
                f,
                "answer references question {answer_question_id:?} but is listed under question {question_id:?}"
            ),
        }
    }
}

impl Error for ValidationError {}

/// Current wall-clock time in epoch milliseconds.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}
