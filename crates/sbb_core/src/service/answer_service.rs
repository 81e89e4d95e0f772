//! Answer use-case service.
//!
//! # Invariants
//! - `create` leaves the question and the stored answer consistent: either
//!   the saved answer is in `question.answers`, or nothing changed.

use super::ServiceError;
use crate::model::answer::Answer;
use crate::model::question::Question;
use crate::repo::answer_repo::AnswerRepository;
use log::debug;

/// Use-case service wrapper for answer operations.
pub struct AnswerService<R: AnswerRepository> {
    repo: R,
}

impl<R: AnswerRepository> AnswerService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Adds a new answer to `question` and persists it.
    pub fn create(
        &self,
        question: &mut Question,
        content: impl Into<String>,
    ) -> Result<Answer, ServiceError> {
        let saved = {
            let answer = question.add_answer(Answer::new(content))?;
            self.repo.save(&mut *answer).map(|_| answer.clone())
        };

        match saved {
            Ok(answer) => {
                debug!(
                    "event=answer_create module=service status=ok id={:?} question_id={:?}",
                    answer.id(),
                    answer.question_id()
                );
                Ok(answer)
            }
            Err(err) => {
                question.answers.pop();
                Err(err.into())
            }
        }
    }
}
