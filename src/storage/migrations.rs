//! Database migration management
//!
//! This module creates and updates the SQLite schema and tracks the applied
//! version in a `schema_version` table.

use rusqlite::Connection;

use crate::storage::StorageError;

/// Current database schema version
///
/// Increment this when you add new migrations
const CURRENT_VERSION: i32 = 1;

/// Initialize the database schema
///
/// This creates all required tables and indexes if they don't exist.
pub fn initialize_database(conn: &Connection) -> Result<(), StorageError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY
        )",
        [],
    )?;

    let current_version = get_current_version(conn)?;

    if current_version > CURRENT_VERSION {
        return Err(StorageError::Migration(format!(
            "Database schema version {} is newer than supported version {}",
            current_version, CURRENT_VERSION
        )));
    }

    if current_version < CURRENT_VERSION {
        run_migrations(conn, current_version)?;
        set_version(conn, CURRENT_VERSION)?;
    }

    Ok(())
}

/// Get the current database schema version, 0 for a fresh database
fn get_current_version(conn: &Connection) -> Result<i32, StorageError> {
    let version = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get::<_, i32>(0),
    )?;

    Ok(version)
}

fn set_version(conn: &Connection, version: i32) -> Result<(), StorageError> {
    conn.execute("DELETE FROM schema_version", [])?;
    conn.execute("INSERT INTO schema_version (version) VALUES (?1)", [version])?;
    Ok(())
}

/// Run database migrations from the current version to the latest
fn run_migrations(conn: &Connection, from_version: i32) -> Result<(), StorageError> {
    if from_version < 1 {
        migration_v1(conn)?;
    }

    Ok(())
}

/// Migration to version 1: habits, daily records and per-day habit states
///
/// `habit_states` has no foreign key to `habits`: history must outlive the
/// habit definitions it refers to.
fn migration_v1(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS habits (
            id TEXT PRIMARY KEY,
            label TEXT NOT NULL,
            description TEXT,
            category TEXT NOT NULL,
            emoji TEXT,
            position INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            is_active BOOLEAN NOT NULL DEFAULT TRUE
        );

        CREATE TABLE IF NOT EXISTS daily_records (
            day TEXT PRIMARY KEY,
            reflection TEXT,
            focus TEXT,
            is_holiday BOOLEAN NOT NULL DEFAULT FALSE,
            tasks TEXT NOT NULL DEFAULT '[]',
            updated_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS habit_states (
            day TEXT NOT NULL,
            habit_id TEXT NOT NULL,
            completed BOOLEAN NOT NULL,
            PRIMARY KEY (day, habit_id)
        );

        CREATE INDEX IF NOT EXISTS idx_habit_states_habit_day
            ON habit_states (habit_id, day);

        CREATE INDEX IF NOT EXISTS idx_habits_active
            ON habits (is_active, position);",
    )?;

    tracing::info!("Applied migration v1: Created initial database schema");
    Ok(())
}
