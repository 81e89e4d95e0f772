use sbb_core::db::open_db_in_memory;
use sbb_core::{
    AnswerRepository, AnswerService, QuestionRepository, QuestionService, RepoError,
    ServiceError, SqliteAnswerRepository, SqliteQuestionRepository, ValidationError,
    QUESTION_PAGE_SIZE,
};

#[test]
fn create_persists_and_get_question_reads_back() {
    let conn = open_db_in_memory().unwrap();
    let service = QuestionService::new(SqliteQuestionRepository::try_new(&conn).unwrap());

    let created = service.create("질문 제목", "질문 내용").unwrap();
    let id = created.id().expect("created question should have an id");

    let loaded = service.get_question(id).unwrap();
    assert_eq!(loaded, created);
}

#[test]
fn get_question_reports_missing_id() {
    let conn = open_db_in_memory().unwrap();
    let service = QuestionService::new(SqliteQuestionRepository::try_new(&conn).unwrap());

    let err = service.get_question(42).unwrap_err();
    assert!(matches!(err, ServiceError::QuestionNotFound(42)));
    assert_eq!(err.to_string(), "question not found: 42");
}

#[test]
fn create_rejects_blank_subject() {
    let conn = open_db_in_memory().unwrap();
    let service = QuestionService::new(SqliteQuestionRepository::try_new(&conn).unwrap());

    let err = service.create("", "내용").unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::BlankSubject)
    ));
}

#[test]
fn get_list_pages_newest_first() {
    let conn = open_db_in_memory().unwrap();
    let service = QuestionService::new(SqliteQuestionRepository::try_new(&conn).unwrap());
    for index in 1..=23 {
        service.create(format!("질문 {index:02}"), "").unwrap();
    }

    let first = service.get_list(0).unwrap();
    assert_eq!(first.size, QUESTION_PAGE_SIZE);
    assert_eq!(first.items.len(), 10);
    assert_eq!(first.total_elements, 23);
    assert_eq!(first.items[0].subject, "질문 23");

    let third = service.get_list(2).unwrap();
    assert_eq!(third.items.len(), 3);
    assert_eq!(third.items[2].subject, "질문 01");
    assert!(!third.has_next());
}

#[test]
fn modify_and_delete_go_through_repository() {
    let conn = open_db_in_memory().unwrap();
    let service = QuestionService::new(SqliteQuestionRepository::try_new(&conn).unwrap());

    let mut question = service.create("원래 제목", "원래 내용").unwrap();
    service.modify(&mut question, "새 제목", "새 내용").unwrap();
    let id = question.id().unwrap();

    let loaded = service.get_question(id).unwrap();
    assert_eq!(loaded.subject, "새 제목");
    assert_eq!(loaded.content, "새 내용");

    service.delete(&loaded).unwrap();
    assert!(matches!(
        service.get_question(id),
        Err(ServiceError::QuestionNotFound(missing)) if missing == id
    ));
    assert!(matches!(
        service.modify(&mut question, "유령", ""),
        Err(ServiceError::QuestionNotFound(missing)) if missing == id
    ));
    assert_eq!(question.subject, "새 제목");
    assert_eq!(question.content, "새 내용");
}

#[test]
fn rejected_modify_leaves_question_untouched() {
    let conn = open_db_in_memory().unwrap();
    let service = QuestionService::new(SqliteQuestionRepository::try_new(&conn).unwrap());

    let mut question = service.create("원래 제목", "원래 내용").unwrap();
    let before = question.clone();

    let err = service.modify(&mut question, "  ", "바뀐 내용").unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::BlankSubject)
    ));
    assert_eq!(question, before);
    assert_eq!(service.get_question(before.id().unwrap()).unwrap(), before);
}

#[test]
fn answer_create_links_saves_and_updates_question() {
    let conn = open_db_in_memory().unwrap();
    let questions = QuestionService::new(SqliteQuestionRepository::try_new(&conn).unwrap());
    let answers = AnswerService::new(SqliteAnswerRepository::try_new(&conn).unwrap());

    let mut question = questions.create("답변 받을 질문", "").unwrap();
    let answer = answers.create(&mut question, "첫 답변").unwrap();

    assert_eq!(answer.id(), Some(1));
    assert_eq!(answer.question_id(), question.id());
    assert_eq!(question.answers(), &[answer.clone()]);

    let reloaded = questions.get_question(question.id().unwrap()).unwrap();
    assert_eq!(reloaded.answers(), &[answer]);
}

#[test]
fn answer_create_on_unsaved_question_is_validation_error() {
    let conn = open_db_in_memory().unwrap();
    let answers = AnswerService::new(SqliteAnswerRepository::try_new(&conn).unwrap());

    let mut question = sbb_core::Question::new("저장 안 된 질문", "");
    let err = answers.create(&mut question, "답변").unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::QuestionNotPersisted)
    ));
    assert!(question.answers().is_empty());
}

#[test]
fn failed_answer_save_leaves_question_unchanged() {
    let conn = open_db_in_memory().unwrap();
    let question_repo = SqliteQuestionRepository::try_new(&conn).unwrap();
    let answers = AnswerService::new(SqliteAnswerRepository::try_new(&conn).unwrap());

    let mut question = sbb_core::Question::new("곧 삭제될 질문", "");
    question_repo.save(&mut question).unwrap();
    question_repo.delete(&question).unwrap();

    let err = answers.create(&mut question, "늦은 답변").unwrap_err();
    assert!(matches!(err, ServiceError::Repo(RepoError::Db(_))));
    assert!(question.answers().is_empty());

    let answer_repo = SqliteAnswerRepository::try_new(&conn).unwrap();
    assert_eq!(answer_repo.count().unwrap(), 0);
}
