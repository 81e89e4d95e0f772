//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `sbb_core` linkage and that the configured store opens.
//! - Keep output deterministic for quick local sanity checks.

use sbb_core::{
    AnswerRepository, BoardConfig, QuestionRepository, SqliteAnswerRepository,
    SqliteQuestionRepository,
};
use std::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("sbb_core ping={}", sbb_core::ping());
    println!("sbb_core version={}", sbb_core::core_version());

    match report_counts(&BoardConfig::from_env()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("event=cli_probe module=cli status=error error={err}");
            eprintln!("sbb_cli error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn report_counts(config: &BoardConfig) -> Result<(), Box<dyn Error>> {
    config.init_logging()?;
    let conn = config.open_db()?;
    let questions = SqliteQuestionRepository::try_new(&conn)?;
    let answers = SqliteAnswerRepository::try_new(&conn)?;

    let store = config
        .db_path
        .as_deref()
        .map_or_else(|| ":memory:".to_string(), |path| path.display().to_string());
    println!("sbb_core store={store}");
    println!("sbb_core questions={}", questions.count()?);
    println!("sbb_core answers={}", answers.count()?);
    log::info!("event=cli_probe module=cli status=ok");
    Ok(())
}
