//! Database migrations
//!
//! Schema versioning with the migration SQL embedded in this module.
//! Rollbacks are manual: fix the issue, repair the database if needed,
//! re-run.

use rusqlite::Connection;
use tracing::{debug, error, info};

use super::connection::DatabaseError;

/// Current schema version
const SCHEMA_VERSION: i32 = 1;

/// Run all pending migrations
///
/// # Errors
///
/// Returns an error when a migration statement fails.
pub fn run_migrations(conn: &Connection) -> Result<(), DatabaseError> {
    let current_version = get_schema_version(conn)?;

    if current_version < SCHEMA_VERSION {
        info!(
            from_version = current_version,
            to_version = SCHEMA_VERSION,
            "Running database migrations"
        );

        if current_version < 1 {
            if let Err(e) = migrate_v1(conn) {
                error!(version = 1, error = %e, "Migration V001 (calendars and events) failed");
                return Err(e);
            }
        }

        set_schema_version(conn, SCHEMA_VERSION)?;
        info!(version = SCHEMA_VERSION, "Database migrations complete");
    } else {
        debug!(version = current_version, "Database schema is up to date");
    }

    Ok(())
}

/// Get current schema version
fn get_schema_version(conn: &Connection) -> Result<i32, DatabaseError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY
        )",
        [],
    )?;

    let version: i32 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |row| row.get(0),
        )
        .unwrap_or(0);

    Ok(version)
}

/// Record the schema version
fn set_schema_version(conn: &Connection, version: i32) -> Result<(), DatabaseError> {
    conn.execute("DELETE FROM schema_version", [])?;
    conn.execute(
        "INSERT INTO schema_version (version) VALUES (?1)",
        [version],
    )?;
    Ok(())
}

/// V001: calendars and calendar events
fn migrate_v1(conn: &Connection) -> Result<(), DatabaseError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS calendars (
            uri         TEXT PRIMARY KEY,
            remote_id   TEXT
        );

        CREATE TABLE IF NOT EXISTS calendar_events (
            id            TEXT PRIMARY KEY,
            uri           TEXT NOT NULL,
            calendar_uri  TEXT NOT NULL,
            subject       TEXT NOT NULL,
            date          TEXT NOT NULL,
            description   TEXT,
            url           TEXT,
            location      TEXT,
            linked_kind   TEXT NOT NULL,
            linked_uri    TEXT NOT NULL,
            remote_id     TEXT,
            origin        TEXT,
            created_by    TEXT NOT NULL,
            modified_by   TEXT NOT NULL,
            created_at    TEXT NOT NULL,
            updated_at    TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_calendar_events_calendar
            ON calendar_events(calendar_uri);
        CREATE INDEX IF NOT EXISTS idx_calendar_events_remote
            ON calendar_events(remote_id);
        ",
    )?;
    Ok(())
}
