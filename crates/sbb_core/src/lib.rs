//! Core persistence logic for the SBB question board.
//! This crate owns the Question/Answer model, its SQLite schema and the
//! repositories and services built on top of it.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::BoardConfig;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::answer::Answer;
pub use model::page::{Page, PageRequest};
pub use model::question::Question;
pub use model::{AnswerId, QuestionId, ValidationError};
pub use repo::answer_repo::{AnswerRepository, SqliteAnswerRepository};
pub use repo::question_repo::{QuestionRepository, SqliteQuestionRepository};
pub use repo::{EntityRef, RepoError, RepoResult};
pub use service::answer_service::AnswerService;
pub use service::question_service::{QuestionService, QUESTION_PAGE_SIZE};
pub use service::ServiceError;

/// Minimal health-check API for smoke checks.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
