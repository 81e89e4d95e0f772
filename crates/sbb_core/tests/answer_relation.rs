use rusqlite::Connection;
use sbb_core::db::open_db_in_memory;
use sbb_core::{
    Answer, AnswerRepository, EntityRef, Question, QuestionRepository, RepoError,
    SqliteAnswerRepository, SqliteQuestionRepository, ValidationError,
};

const ANSWER_CONTENT: &str = "네 자동으로 생성됩니다.";

/// Two questions; the second one owns one answer.
fn seeded_db() -> Connection {
    let conn = open_db_in_memory().unwrap();
    {
        let questions = SqliteQuestionRepository::try_new(&conn).unwrap();
        let answers = SqliteAnswerRepository::try_new(&conn).unwrap();

        let mut first = Question::new("sbb가 무엇인가요?", "sbb에 대해서 알고 싶습니다.");
        questions.save(&mut first).unwrap();
        let mut second = Question::new("스프링부트 모델 질문입니다.", "id는 자동으로 생성되나요?");
        questions.save(&mut second).unwrap();

        let answer = second.add_answer(Answer::new(ANSWER_CONTENT)).unwrap();
        answers.save(answer).unwrap();
    }
    conn
}

#[test]
fn seeded_answer_references_second_question() {
    let conn = seeded_db();
    let answers = SqliteAnswerRepository::try_new(&conn).unwrap();

    let answer = answers.find_by_id(1).unwrap().unwrap();
    assert_eq!(answer.question_id(), Some(2));
    assert_eq!(answer.content, ANSWER_CONTENT);
    assert!(answers.find_by_id(2).unwrap().is_none());
}

#[test]
fn loading_question_yields_its_answers() {
    let conn = seeded_db();
    let questions = SqliteQuestionRepository::try_new(&conn).unwrap();

    let question = questions.find_by_id(2).unwrap().unwrap();
    assert_eq!(question.answers().len(), 1);
    assert_eq!(question.answers()[0].content, ANSWER_CONTENT);
    assert_eq!(question.answers()[0].id(), Some(1));

    let other = questions.find_by_id(1).unwrap().unwrap();
    assert!(other.answers().is_empty());
}

#[test]
fn add_answer_links_both_sides_before_save() {
    let conn = seeded_db();
    let questions = SqliteQuestionRepository::try_new(&conn).unwrap();
    let answers = SqliteAnswerRepository::try_new(&conn).unwrap();

    let mut question = questions.find_by_id(1).unwrap().unwrap();
    let answer = question.add_answer(Answer::new("첫 답변")).unwrap();
    assert_eq!(answer.question_id(), Some(1));
    answers.save(answer).unwrap();

    assert_eq!(question.answers().len(), 1);
    assert_eq!(question.answers()[0].id(), Some(2));

    let reloaded = questions.find_by_id(1).unwrap().unwrap();
    assert_eq!(reloaded.answers(), question.answers());
}

#[test]
fn set_question_without_collection_update_still_persists_relation() {
    let conn = seeded_db();
    let questions = SqliteQuestionRepository::try_new(&conn).unwrap();
    let answers = SqliteAnswerRepository::try_new(&conn).unwrap();

    let question = questions.find_by_id(2).unwrap().unwrap();
    let mut answer = Answer::new("두 번째 답변");
    answer.set_question(&question).unwrap();
    answers.save(&mut answer).unwrap();

    assert_eq!(question.answers().len(), 1);
    let reloaded = questions.find_by_id(2).unwrap().unwrap();
    let contents: Vec<_> = reloaded
        .answers()
        .iter()
        .map(|answer| answer.content.as_str())
        .collect();
    assert_eq!(contents, vec![ANSWER_CONTENT, "두 번째 답변"]);
}

#[test]
fn answer_without_question_is_rejected() {
    let conn = seeded_db();
    let answers = SqliteAnswerRepository::try_new(&conn).unwrap();

    let mut orphan = Answer::new("고아 답변");
    let err = answers.save(&mut orphan).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::MissingQuestion)
    ));
    assert_eq!(answers.count().unwrap(), 1);
}

#[test]
fn unsaved_question_cannot_take_answers() {
    let mut question = Question::new("저장 전", "");
    let err = question.add_answer(Answer::new("답변")).unwrap_err();
    assert_eq!(err, ValidationError::QuestionNotPersisted);
    assert!(question.answers().is_empty());

    let mut answer = Answer::new("답변");
    assert_eq!(
        answer.set_question(&question),
        Err(ValidationError::QuestionNotPersisted)
    );
}

#[test]
fn answer_pointing_at_deleted_question_fails_foreign_key() {
    let conn = seeded_db();
    let questions = SqliteQuestionRepository::try_new(&conn).unwrap();
    let answers = SqliteAnswerRepository::try_new(&conn).unwrap();

    let question = questions.find_by_id(1).unwrap().unwrap();
    let mut answer = Answer::new("늦은 답변");
    answer.set_question(&question).unwrap();
    questions.delete(&question).unwrap();

    let err = answers.save(&mut answer).unwrap_err();
    assert!(matches!(err, RepoError::Db(_)));
    assert_eq!(answer.id(), None);
}

#[test]
fn deleting_question_cascades_to_answers() {
    let conn = seeded_db();
    let questions = SqliteQuestionRepository::try_new(&conn).unwrap();
    let answers = SqliteAnswerRepository::try_new(&conn).unwrap();

    questions.delete_by_id(2).unwrap();
    assert_eq!(answers.count().unwrap(), 0);
    assert!(answers.find_by_question(2).unwrap().is_empty());
}

#[test]
fn answer_save_overwrites_by_id() {
    let conn = seeded_db();
    let answers = SqliteAnswerRepository::try_new(&conn).unwrap();

    let mut answer = answers.find_by_id(1).unwrap().unwrap();
    answer.content = "수정된 답변".to_string();
    answers.save(&mut answer).unwrap();

    assert_eq!(answers.count().unwrap(), 1);
    let reloaded = answers.find_by_question(2).unwrap();
    assert_eq!(reloaded.len(), 1);
    assert_eq!(reloaded[0].content, "수정된 답변");
}

#[test]
fn answer_delete_paths_report_missing_rows() {
    let conn = seeded_db();
    let answers = SqliteAnswerRepository::try_new(&conn).unwrap();

    let answer = answers.find_by_id(1).unwrap().unwrap();
    answers.delete(&answer).unwrap();
    assert_eq!(answers.count().unwrap(), 0);

    assert!(matches!(
        answers.delete(&answer),
        Err(RepoError::NotFound(EntityRef::Answer(1)))
    ));
    assert!(matches!(
        answers.delete(&Answer::new("저장 전")),
        Err(RepoError::NotPersisted("answer"))
    ));
}

#[test]
fn answer_sequence_reset_restarts_at_one() {
    let conn = seeded_db();
    let questions = SqliteQuestionRepository::try_new(&conn).unwrap();
    let answers = SqliteAnswerRepository::try_new(&conn).unwrap();

    answers.delete_all().unwrap();
    answers.clear_auto_increment().unwrap();

    let mut question = questions.find_by_id(1).unwrap().unwrap();
    let answer = question.add_answer(Answer::new("새 답변")).unwrap();
    assert_eq!(answers.save(answer).unwrap(), 1);
}
