//! Shared SQL helpers: connection readiness checks and table maintenance.

use super::error::{RepoError, RepoResult};
use crate::db::migrations::{current_user_version, latest_version};
use log::info;
use rusqlite::Connection;

/// Rejects connections that were not opened through `db::open_*`.
pub(crate) fn ensure_table_ready(
    conn: &Connection,
    table: &'static str,
    columns: &[&'static str],
) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = current_user_version(conn)?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, table)? {
        return Err(RepoError::MissingRequiredTable(table));
    }

    for &column in columns {
        if !table_has_column(conn, table, column)? {
            return Err(RepoError::MissingRequiredColumn { table, column });
        }
    }

    Ok(())
}

pub(crate) fn count_rows(conn: &Connection, table: &str) -> RepoResult<u64> {
    let count: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {table};"), [], |row| {
        row.get(0)
    })?;
    u64::try_from(count)
        .map_err(|_| RepoError::InvalidData(format!("negative row count {count} in {table}")))
}

/// Deletes every row of `table` in one transaction and returns how many went.
pub(crate) fn delete_all_rows(conn: &Connection, table: &str) -> RepoResult<u64> {
    let tx = conn.unchecked_transaction()?;
    let removed = tx.execute(&format!("DELETE FROM {table};"), [])?;
    tx.commit()?;
    info!("event=delete_all module=repo status=ok table={table} removed={removed}");
    Ok(removed as u64)
}

/// Resets the AUTOINCREMENT sequence of `table`.
///
/// The next insert receives `max(id) + 1`, i.e. `1` on an empty table.
pub(crate) fn reset_sequence(conn: &Connection, table: &str) -> RepoResult<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute("DELETE FROM sqlite_sequence WHERE name = ?1;", [table])?;
    tx.commit()?;
    info!("event=clear_auto_increment module=repo status=ok table={table}");
    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
