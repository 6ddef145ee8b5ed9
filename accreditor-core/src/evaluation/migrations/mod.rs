//! Schema migrations for the evaluation database
//!
//! The schema version lives in `PRAGMA user_version`. Each migration and its
//! version bump commit together, so a failed step leaves the database at the
//! previous version with none of that step's changes.

use rusqlite::Connection;

use crate::evaluation::EvaluationError;

/// One schema step; its version is its 1-based position in [`MIGRATIONS`]
struct Migration {
    name: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    name: "v001_initial",
    sql: include_str!("v001_initial.sql"),
}];

/// Version recorded in the database header, 0 for a fresh file
pub fn schema_version(conn: &Connection) -> Result<i32, EvaluationError> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
}

/// Bring the schema up to date, returning how many migrations ran
pub fn migrate(conn: &Connection) -> Result<usize, EvaluationError> {
    apply(conn, MIGRATIONS)
}

fn apply(conn: &Connection, migrations: &[Migration]) -> Result<usize, EvaluationError> {
    let current = schema_version(conn)?;
    let mut applied = 0;

    for (version, migration) in (1..).zip(migrations) {
        if version <= current {
            continue;
        }
        let tx = conn.unchecked_transaction()?;
        tx.execute_batch(migration.sql)
            .map_err(|e| EvaluationError::Migration(format!("{}: {}", migration.name, e)))?;
        tx.pragma_update(None, "user_version", version)?;
        tx.commit()?;

        tracing::info!(version, name = migration.name, "Applied schema migration");
        applied += 1;
    }

    Ok(applied)
}
