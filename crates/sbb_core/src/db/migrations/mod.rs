//! Board schema migrations.
//!
//! # Responsibility
//! - Keep the ordered list of embedded SQL scripts for `question`/`answer`.
//! - Bring a connection from its stored version up to `latest_version()`.
//!
//! # Invariants
//! - Versions start at 1 and increase by exactly 1.
//! - The pending batch commits as a whole; `PRAGMA user_version` moves with it.

use crate::db::{DbError, DbResult};
use log::{error, info};
use rusqlite::Connection;

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "init",
        sql: include_str!("0001_init.sql"),
    },
    Migration {
        version: 2,
        name: "question_indexes",
        sql: include_str!("0002_question_indexes.sql"),
    },
];

/// Schema version produced by running every known migration.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Runs every migration newer than the stored schema version.
///
/// # Errors
/// - `UnsupportedSchemaVersion` when the file comes from a newer build.
/// - `Migration` naming the first script that failed.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let from_version = current_user_version(conn)?;
    let latest = latest_version();
    if from_version > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: from_version,
            latest_supported: latest,
        });
    }

    let pending: Vec<&Migration> = MIGRATIONS
        .iter()
        .filter(|migration| migration.version > from_version)
        .collect();
    if pending.is_empty() {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for migration in pending {
        let applied = tx
            .execute_batch(migration.sql)
            .and_then(|()| tx.pragma_update(None, "user_version", migration.version));
        if let Err(source) = applied {
            error!(
                "event=db_migrate module=db status=error version={} name={} error={}",
                migration.version, migration.name, source
            );
            return Err(DbError::Migration {
                version: migration.version,
                source,
            });
        }
    }
    tx.commit()?;

    info!("event=db_migrate module=db status=ok from_version={from_version} to_version={latest}");
    Ok(())
}

/// Reads the schema version stored in `PRAGMA user_version`.
pub fn current_user_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
}
