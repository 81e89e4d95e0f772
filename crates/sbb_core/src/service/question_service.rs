//! Question use-case service.
//!
//! # Responsibility
//! - Create, list, look up, edit and remove questions for callers.
//!
//! # Invariants
//! - List pages are newest first with a fixed page size.

use super::ServiceError;
use crate::model::page::{Page, PageRequest};
use crate::model::question::Question;
use crate::model::QuestionId;
use crate::repo::question_repo::QuestionRepository;
use log::debug;

/// Rows per page for `get_list`.
pub const QUESTION_PAGE_SIZE: u32 = 10;

/// Use-case service wrapper for question operations.
pub struct QuestionService<R: QuestionRepository> {
    repo: R,
}

impl<R: QuestionRepository> QuestionService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates and persists a question stamped with the current time.
    pub fn create(
        &self,
        subject: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<Question, ServiceError> {
        let mut question = Question::new(subject, content);
        let id = self.repo.save(&mut question)?;
        debug!("event=question_create module=service status=ok id={id}");
        Ok(question)
    }

    /// Returns one zero-based page of questions, newest first.
    pub fn get_list(&self, page: u32) -> Result<Page<Question>, ServiceError> {
        let request = PageRequest::of(page, QUESTION_PAGE_SIZE);
        Ok(self.repo.find_page(&request)?)
    }

    /// Loads one question with its answers.
    ///
    /// Returns `QuestionNotFound` instead of an empty result.
    pub fn get_question(&self, id: QuestionId) -> Result<Question, ServiceError> {
        self.repo
            .find_by_id(id)?
            .ok_or(ServiceError::QuestionNotFound(id))
    }

    /// Replaces subject and content of a saved question.
    ///
    /// `question` is only updated once the new values are stored.
    pub fn modify(
        &self,
        question: &mut Question,
        subject: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<(), ServiceError> {
        let mut updated = question.clone();
        updated.subject = subject.into();
        updated.content = content.into();
        self.repo.save(&mut updated)?;
        *question = updated;
        Ok(())
    }

    /// Deletes a saved question together with its answers.
    pub fn delete(&self, question: &Question) -> Result<(), ServiceError> {
        self.repo.delete(question)?;
        Ok(())
    }
}
