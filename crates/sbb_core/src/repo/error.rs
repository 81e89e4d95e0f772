use crate::db::DbError;
use crate::model::{AnswerId, QuestionId, ValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Identity of a row targeted by a repository operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityRef {
    Question(QuestionId),
    Answer(AnswerId),
}

impl Display for EntityRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Question(id) => write!(f, "question {id}"),
            Self::Answer(id) => write!(f, "answer {id}"),
        }
    }
}

/// Generic repository error for board persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// Entity failed write-time validation.
    Validation(ValidationError),
    /// Underlying SQLite/bootstrap error, including constraint violations.
    Db(DbError),
    /// Update/delete target row does not exist.
    NotFound(EntityRef),
    /// Operation needs a saved entity but got one without an id.
    NotPersisted(&'static str),
    /// Single-result finder matched more than one row.
    NonUniqueResult { entity: &'static str, count: usize },
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Required column is missing from expected table.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    /// Persisted data cannot be converted to a valid entity.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(target) => write!(f, "{target} not found"),
            Self::NotPersisted(entity) => write!(f, "{entity} has not been saved yet"),
            Self::NonUniqueResult { entity, count } => {
                write!(f, "expected at most one {entity}, found {count}")
            }
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "board repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "board repository requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "board repository requires column `{column}` in table `{table}`"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted board data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}
