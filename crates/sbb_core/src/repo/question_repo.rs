//! Question repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD plus declarative finders over the `question` table.
//! - Load each question's answers so reads return the full aggregate.
//!
//! # Invariants
//! - `save` inserts when the id is unset and overwrites by id otherwise.
//! - `save` never writes answers; they are persisted through `AnswerRepository`.
//! - List reads are ordered by `id ASC`; paged reads by `create_date DESC, id DESC`.

use super::answer_repo::{parse_answer_row, ANSWER_SELECT_SQL};
use super::error::{EntityRef, RepoError, RepoResult};
use super::schema::{count_rows, delete_all_rows, ensure_table_ready, reset_sequence};
use crate::model::answer::Answer;
use crate::model::page::{Page, PageRequest};
use crate::model::question::Question;
use crate::model::QuestionId;
use log::debug;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Params, Row};
use std::collections::HashMap;

const QUESTION_SELECT_SQL: &str = "SELECT
    id,
    subject,
    content,
    create_date
FROM question";

const ANSWER_LOAD_CHUNK: usize = 500;

/// Repository interface for question CRUD and finder operations.
pub trait QuestionRepository {
    /// Inserts or overwrites `question`, assigning its id on insert.
    fn save(&self, question: &mut Question) -> RepoResult<QuestionId>;
    fn find_by_id(&self, id: QuestionId) -> RepoResult<Option<Question>>;
    fn find_all(&self) -> RepoResult<Vec<Question>>;
    fn delete(&self, question: &Question) -> RepoResult<()>;
    fn delete_by_id(&self, id: QuestionId) -> RepoResult<()>;
    /// Removes every question (and, by cascade, every answer).
    fn delete_all(&self) -> RepoResult<u64>;
    fn count(&self) -> RepoResult<u64>;
    /// Exact subject match. More than one hit is `NonUniqueResult`.
    fn find_by_subject(&self, subject: &str) -> RepoResult<Option<Question>>;
    /// Exact subject and content match. More than one hit is `NonUniqueResult`.
    fn find_by_subject_and_content(
        &self,
        subject: &str,
        content: &str,
    ) -> RepoResult<Option<Question>>;
    /// SQL `LIKE` match on subject; wildcards come from the caller.
    fn find_by_subject_like(&self, pattern: &str) -> RepoResult<Vec<Question>>;
    /// Newest-first page of questions.
    fn find_page(&self, request: &PageRequest) -> RepoResult<Page<Question>>;
    /// Resets the id sequence; test-fixture use only.
    fn clear_auto_increment(&self) -> RepoResult<()>;
}

/// SQLite-backed question repository.
pub struct SqliteQuestionRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteQuestionRepository<'conn> {
    /// Creates repository from migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_table_ready(conn, "question", &["id", "subject", "content", "create_date"])?;
        Ok(Self { conn })
    }

    fn query_questions<P: Params>(&self, sql: &str, params: P) -> RepoResult<Vec<Question>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut questions = Vec::new();
        while let Some(row) = rows.next()? {
            questions.push(parse_question_row(row)?);
        }
        Ok(questions)
    }

    fn find_unique<P: Params>(&self, sql: &str, params: P) -> RepoResult<Option<Question>> {
        let mut questions = self.query_questions(sql, params)?;
        if questions.len() > 1 {
            return Err(RepoError::NonUniqueResult {
                entity: "question",
                count: questions.len(),
            });
        }
        attach_answers(self.conn, &mut questions)?;
        Ok(questions.pop())
    }

    fn find_many<P: Params>(&self, sql: &str, params: P) -> RepoResult<Vec<Question>> {
        let mut questions = self.query_questions(sql, params)?;
        attach_answers(self.conn, &mut questions)?;
        Ok(questions)
    }
}

impl QuestionRepository for SqliteQuestionRepository<'_> {
    fn save(&self, question: &mut Question) -> RepoResult<QuestionId> {
        question.validate()?;

        let Some(id) = question.id else {
            self.conn.execute(
                "INSERT INTO question (subject, content, create_date)
                 VALUES (?1, ?2, ?3);",
                params![
                    question.subject.as_str(),
                    question.content.as_str(),
                    question.create_date,
                ],
            )?;
            let id = self.conn.last_insert_rowid();
            question.id = Some(id);
            debug!("event=question_insert module=repo status=ok id={id}");
            return Ok(id);
        };

        let changed = self.conn.execute(
            "UPDATE question
             SET
                subject = ?1,
                content = ?2,
                create_date = ?3
             WHERE id = ?4;",
            params![
                question.subject.as_str(),
                question.content.as_str(),
                question.create_date,
                id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(EntityRef::Question(id)));
        }

        debug!("event=question_update module=repo status=ok id={id}");
        Ok(id)
    }

    fn find_by_id(&self, id: QuestionId) -> RepoResult<Option<Question>> {
        self.find_unique(&format!("{QUESTION_SELECT_SQL} WHERE id = ?1;"), [id])
    }

    fn find_all(&self) -> RepoResult<Vec<Question>> {
        self.find_many(&format!("{QUESTION_SELECT_SQL} ORDER BY id ASC;"), [])
    }

    fn delete(&self, question: &Question) -> RepoResult<()> {
        let id = question.id.ok_or(RepoError::NotPersisted("question"))?;
        self.delete_by_id(id)
    }

    fn delete_by_id(&self, id: QuestionId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM question WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(EntityRef::Question(id)));
        }

        Ok(())
    }

    fn delete_all(&self) -> RepoResult<u64> {
        delete_all_rows(self.conn, "question")
    }

    fn count(&self) -> RepoResult<u64> {
        count_rows(self.conn, "question")
    }

    fn find_by_subject(&self, subject: &str) -> RepoResult<Option<Question>> {
        self.find_unique(
            &format!("{QUESTION_SELECT_SQL} WHERE subject = ?1 ORDER BY id ASC;"),
            [subject],
        )
    }

    fn find_by_subject_and_content(
        &self,
        subject: &str,
        content: &str,
    ) -> RepoResult<Option<Question>> {
        self.find_unique(
            &format!(
                "{QUESTION_SELECT_SQL}
                 WHERE subject = ?1
                   AND content = ?2
                 ORDER BY id ASC;"
            ),
            [subject, content],
        )
    }

    fn find_by_subject_like(&self, pattern: &str) -> RepoResult<Vec<Question>> {
        self.find_many(
            &format!("{QUESTION_SELECT_SQL} WHERE subject LIKE ?1 ORDER BY id ASC;"),
            [pattern],
        )
    }

    fn find_page(&self, request: &PageRequest) -> RepoResult<Page<Question>> {
        let total_elements = self.count()?;
        let offset = i64::try_from(request.offset())
            .map_err(|_| RepoError::InvalidData(format!("page offset overflow: {request:?}")))?;
        let items = self.find_many(
            &format!(
                "{QUESTION_SELECT_SQL}
                 ORDER BY create_date DESC, id DESC
                 LIMIT ?1 OFFSET ?2;"
            ),
            params![i64::from(request.size), offset],
        )?;

        Ok(Page {
            items,
            page: request.page,
            size: request.size,
            total_elements,
        })
    }

    fn clear_auto_increment(&self) -> RepoResult<()> {
        reset_sequence(self.conn, "question")
    }
}

fn parse_question_row(row: &Row<'_>) -> RepoResult<Question> {
    let id: QuestionId = row.get("id")?;
    let mut question = Question::with_create_date(
        row.get::<_, String>("subject")?,
        row.get::<_, String>("content")?,
        row.get("create_date")?,
    );
    question.id = Some(id);
    question.validate().map_err(|err| {
        RepoError::InvalidData(format!("question {id} violates model invariants: {err}"))
    })?;
    Ok(question)
}

/// Fills `answers` for every question, ordered by answer id.
///
/// Ids are bound in chunks of `ANSWER_LOAD_CHUNK` so result sets of any size
/// stay under SQLite's bound-parameter limit.
fn attach_answers(conn: &Connection, questions: &mut [Question]) -> RepoResult<()> {
    let ids: Vec<QuestionId> = questions.iter().filter_map(Question::id).collect();
    let mut by_question: HashMap<QuestionId, Vec<Answer>> = HashMap::new();

    for chunk in ids.chunks(ANSWER_LOAD_CHUNK) {
        let placeholders = vec!["?"; chunk.len()].join(", ");
        let mut stmt = conn.prepare_cached(&format!(
            "{ANSWER_SELECT_SQL}
             WHERE question_id IN ({placeholders})
             ORDER BY question_id ASC, id ASC;"
        ))?;
        let mut rows = stmt.query(params_from_iter(chunk.iter().copied().map(Value::Integer)))?;
        while let Some(row) = rows.next()? {
            let answer = parse_answer_row(row)?;
            if let Some(question_id) = answer.question_id {
                by_question.entry(question_id).or_default().push(answer);
            }
        }
    }

    for question in questions.iter_mut() {
        question.answers = question
            .id
            .and_then(|id| by_question.remove(&id))
            .unwrap_or_default();
    }

    Ok(())
}
