//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define CRUD and finder contracts for questions and answers.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository writes must run entity `validate()` before SQL mutations.
//! - Absent rows on lookup are `Ok(None)`; absent rows on update/delete are
//!   `RepoError::NotFound`.
//! - Repositories are only constructed over migrated connections.

pub mod answer_repo;
mod error;
pub mod question_repo;
mod schema;

pub use error::{EntityRef, RepoError, RepoResult};
