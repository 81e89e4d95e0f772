//! Answer repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD over the `answer` table plus lookup by owning question.
//!
//! # Invariants
//! - Write paths call `Answer::validate()` first, so no row is written without
//!   a question reference.
//! - A question reference to a missing row is rejected by the foreign key and
//!   surfaces as `RepoError::Db`.

use super::error::{EntityRef, RepoError, RepoResult};
use super::schema::{count_rows, delete_all_rows, ensure_table_ready, reset_sequence};
use crate::model::answer::Answer;
use crate::model::{AnswerId, QuestionId};
use log::debug;
use rusqlite::{params, Connection, Params, Row};

pub(crate) const ANSWER_SELECT_SQL: &str = "SELECT
    id,
    content,
    create_date,
    question_id
FROM answer";

/// Repository interface for answer CRUD operations.
pub trait AnswerRepository {
    /// Inserts or overwrites `answer`, assigning its id on insert.
    fn save(&self, answer: &mut Answer) -> RepoResult<AnswerId>;
    fn find_by_id(&self, id: AnswerId) -> RepoResult<Option<Answer>>;
    fn find_all(&self) -> RepoResult<Vec<Answer>>;
    /// All answers of one question, ordered by id.
    fn find_by_question(&self, question_id: QuestionId) -> RepoResult<Vec<Answer>>;
    fn delete(&self, answer: &Answer) -> RepoResult<()>;
    fn delete_by_id(&self, id: AnswerId) -> RepoResult<()>;
    fn delete_all(&self) -> RepoResult<u64>;
    fn count(&self) -> RepoResult<u64>;
    /// Resets the id sequence; test-fixture use only.
    fn clear_auto_increment(&self) -> RepoResult<()>;
}

/// SQLite-backed answer repository.
pub struct SqliteAnswerRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAnswerRepository<'conn> {
    /// Creates repository from migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_table_ready(
            conn,
            "answer",
            &["id", "content", "create_date", "question_id"],
        )?;
        Ok(Self { conn })
    }

    fn query_answers<P: Params>(&self, sql: &str, params: P) -> RepoResult<Vec<Answer>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut answers = Vec::new();
        while let Some(row) = rows.next()? {
            answers.push(parse_answer_row(row)?);
        }
        Ok(answers)
    }
}

impl AnswerRepository for SqliteAnswerRepository<'_> {
    fn save(&self, answer: &mut Answer) -> RepoResult<AnswerId> {
        answer.validate()?;

        let Some(id) = answer.id else {
            self.conn.execute(
                "INSERT INTO answer (content, create_date, question_id)
                 VALUES (?1, ?2, ?3);",
                params![
                    answer.content.as_str(),
                    answer.create_date,
                    answer.question_id,
                ],
            )?;
            let id = self.conn.last_insert_rowid();
            answer.id = Some(id);
            debug!("event=answer_insert module=repo status=ok id={id}");
            return Ok(id);
        };

        let changed = self.conn.execute(
            "UPDATE answer
             SET
                content = ?1,
                create_date = ?2,
                question_id = ?3
             WHERE id = ?4;",
            params![
                answer.content.as_str(),
                answer.create_date,
                answer.question_id,
                id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(EntityRef::Answer(id)));
        }

        debug!("event=answer_update module=repo status=ok id={id}");
        Ok(id)
    }

    fn find_by_id(&self, id: AnswerId) -> RepoResult<Option<Answer>> {
        let mut answers = self.query_answers(&format!("{ANSWER_SELECT_SQL} WHERE id = ?1;"), [id])?;
        Ok(answers.pop())
    }

    fn find_all(&self) -> RepoResult<Vec<Answer>> {
        self.query_answers(&format!("{ANSWER_SELECT_SQL} ORDER BY id ASC;"), [])
    }

    fn find_by_question(&self, question_id: QuestionId) -> RepoResult<Vec<Answer>> {
        self.query_answers(
            &format!("{ANSWER_SELECT_SQL} WHERE question_id = ?1 ORDER BY id ASC;"),
            [question_id],
        )
    }

    fn delete(&self, answer: &Answer) -> RepoResult<()> {
        let id = answer.id.ok_or(RepoError::NotPersisted("answer"))?;
        self.delete_by_id(id)
    }

    fn delete_by_id(&self, id: AnswerId) -> RepoResult<()> {
        let changed = self.conn.execute("DELETE FROM answer WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(EntityRef::Answer(id)));
        }

        Ok(())
    }

    fn delete_all(&self) -> RepoResult<u64> {
        delete_all_rows(self.conn, "answer")
    }

    fn count(&self) -> RepoResult<u64> {
        count_rows(self.conn, "answer")
    }

    fn clear_auto_increment(&self) -> RepoResult<()> {
        reset_sequence(self.conn, "answer")
    }
}

pub(crate) fn parse_answer_row(row: &Row<'_>) -> RepoResult<Answer> {
    let mut answer = Answer::with_create_date(
        row.get::<_, String>("content")?,
        row.get("create_date")?,
    );
    answer.id = Some(row.get("id")?);
    answer.question_id = Some(row.get("question_id")?);
    Ok(answer)
}
