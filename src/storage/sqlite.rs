//! SQLite implementation of the calendar storage interface
//!
//! This module provides the concrete SQLite implementation for storing and
//! retrieving habit definitions and daily records. It handles all SQL
//! queries and row conversion.

use std::path::PathBuf;

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};

use crate::domain::{
    default_habits, Category, DailyRecord, DateWindow, DayTask, HabitDefinition, HabitId,
    RecordBook,
};
use crate::storage::{migrations, CalendarStorage, StorageError};

const HABIT_COLUMNS: &str =
    "id, label, description, category, emoji, position, created_at, is_active";

/// SQLite-based storage implementation
///
/// This struct holds a connection to the SQLite database and implements
/// all the storage operations defined in the CalendarStorage trait.
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Open (or create) the database file and bring the schema up to date
    pub fn new(db_path: PathBuf) -> Result<Self, StorageError> {
        let conn = Connection::open(&db_path)
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;

        migrations::initialize_database(&conn)?;

        tracing::info!("SQLite storage initialized at: {:?}", db_path);

        Ok(Self { conn })
    }

    /// In-memory database, used by tests and dry runs
    pub fn in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;
        migrations::initialize_database(&conn)?;
        Ok(Self { conn })
    }

    fn habit_from_row(row: &Row<'_>) -> rusqlite::Result<HabitDefinition> {
        let category_str: String = row.get(3)?;
        let category = category_str
            .parse::<Category>()
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))?;

        let created_at: DateTime<Utc> = row.get(6)?;

        Ok(HabitDefinition {
            id: HabitId::from(row.get::<_, String>(0)?),
            label: row.get(1)?,
            description: row.get(2)?,
            category,
            emoji: row.get(4)?,
            position: row.get(5)?,
            created_at,
            is_active: row.get(7)?,
        })
    }

    fn record_from_row(row: &Row<'_>) -> rusqlite::Result<DailyRecord> {
        let tasks_json: String = row.get(4)?;
        let tasks: Vec<DayTask> = serde_json::from_str(&tasks_json)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?;

        let mut record = DailyRecord::new(row.get(0)?);
        record.reflection = row.get(1)?;
        record.focus = row.get(2)?;
        record.is_holiday = row.get(3)?;
        record.tasks = tasks;
        Ok(record)
    }

    fn delete_day(&self, day: NaiveDate) -> Result<(), StorageError> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM habit_states WHERE day = ?1", params![day])?;
        tx.execute("DELETE FROM daily_records WHERE day = ?1", params![day])?;
        tx.commit()?;

        tracing::debug!("Removed empty day {}", day);
        Ok(())
    }
}

impl CalendarStorage for SqliteStorage {
    fn create_habit(&self, habit: &HabitDefinition) -> Result<(), StorageError> {
        let result = self.conn.execute(
            "INSERT INTO habits (id, label, description, category, emoji, position, created_at, is_active)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                habit.id.as_str(),
                habit.label,
                habit.description,
                habit.category.as_str(),
                habit.emoji,
                habit.position,
                habit.created_at,
                habit.is_active
            ],
        );

        match result {
            Ok(_) => {
                tracing::debug!("Created habit: {} ({})", habit.label, habit.id);
                Ok(())
            }
            Err(rusqlite::Error::SqliteFailure(e, _)) if e.code == ErrorCode::ConstraintViolation => {
                Err(StorageError::DuplicateHabit {
                    habit_id: habit.id.to_string(),
                })
            }
            Err(e) => Err(StorageError::Query(e)),
        }
    }

    fn get_habit(&self, habit_id: &HabitId) -> Result<HabitDefinition, StorageError> {
        let sql = format!("SELECT {} FROM habits WHERE id = ?1", HABIT_COLUMNS);
        self.conn
            .query_row(&sql, params![habit_id.as_str()], Self::habit_from_row)
            .optional()?
            .ok_or_else(|| StorageError::HabitNotFound {
                habit_id: habit_id.to_string(),
            })
    }

    fn update_habit(&self, habit: &HabitDefinition) -> Result<(), StorageError> {
        let rows_affected = self.conn.execute(
            "UPDATE habits SET
                label = ?2,
                description = ?3,
                category = ?4,
                emoji = ?5,
                position = ?6,
                is_active = ?7
             WHERE id = ?1",
            params![
                habit.id.as_str(),
                habit.label,
                habit.description,
                habit.category.as_str(),
                habit.emoji,
                habit.position,
                habit.is_active
            ],
        )?;

        if rows_affected == 0 {
            return Err(StorageError::HabitNotFound {
                habit_id: habit.id.to_string(),
            });
        }

        tracing::debug!("Updated habit: {} ({})", habit.label, habit.id);
        Ok(())
    }

    fn archive_habit(&self, habit_id: &HabitId) -> Result<(), StorageError> {
        let rows_affected = self.conn.execute(
            "UPDATE habits SET is_active = 0 WHERE id = ?1",
            params![habit_id.as_str()],
        )?;

        if rows_affected == 0 {
            return Err(StorageError::HabitNotFound {
                habit_id: habit_id.to_string(),
            });
        }

        tracing::debug!("Archived habit: {}", habit_id);
        Ok(())
    }

    fn list_habits(&self, active_only: bool) -> Result<Vec<HabitDefinition>, StorageError> {
        let mut sql = format!("SELECT {} FROM habits", HABIT_COLUMNS);
        if active_only {
            sql.push_str(" WHERE is_active = 1");
        }
        sql.push_str(" ORDER BY position ASC, created_at ASC");

        let mut stmt = self.conn.prepare(&sql)?;
        let habits = stmt
            .query_map([], Self::habit_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(habits)
    }

    fn seed_default_habits(&self) -> Result<usize, StorageError> {
        let existing: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM habits", [], |row| row.get(0))?;
        if existing > 0 {
            return Ok(0);
        }

        let defaults = default_habits();
        for habit in &defaults {
            self.create_habit(habit)?;
        }

        tracing::info!("Seeded {} default habits", defaults.len());
        Ok(defaults.len())
    }

    fn save_day(&self, record: &DailyRecord) -> Result<(), StorageError> {
        if record.is_empty() {
            return self.delete_day(record.date);
        }

        let tasks_json = serde_json::to_string(&record.tasks)?;

        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT OR REPLACE INTO daily_records (day, reflection, focus, is_holiday, tasks, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                record.date,
                record.reflection,
                record.focus,
                record.is_holiday,
                tasks_json,
                Utc::now()
            ],
        )?;
        tx.execute("DELETE FROM habit_states WHERE day = ?1", params![record.date])?;
        {
            let mut insert = tx.prepare(
                "INSERT INTO habit_states (day, habit_id, completed) VALUES (?1, ?2, ?3)",
            )?;
            for (habit_id, completed) in &record.habits {
                insert.execute(params![record.date, habit_id.as_str(), completed])?;
            }
        }
        tx.commit()?;

        tracing::debug!("Saved day {} with {} habit states", record.date, record.habits.len());
        Ok(())
    }

    fn get_day(&self, day: NaiveDate) -> Result<Option<DailyRecord>, StorageError> {
        let mut book = self.get_records(DateWindow::new(day, day))?;
        Ok(book.remove(&day))
    }

    fn get_records(&self, window: DateWindow) -> Result<RecordBook, StorageError> {
        let mut book = RecordBook::new();
        if window.is_empty() {
            return Ok(book);
        }

        let mut stmt = self.conn.prepare(
            "SELECT day, reflection, focus, is_holiday, tasks
             FROM daily_records WHERE day BETWEEN ?1 AND ?2",
        )?;
        let records = stmt.query_map(params![window.start, window.end], Self::record_from_row)?;
        for record in records {
            let record = record?;
            book.insert(record.date, record);
        }

        let mut stmt = self.conn.prepare(
            "SELECT day, habit_id, completed
             FROM habit_states WHERE day BETWEEN ?1 AND ?2",
        )?;
        let states = stmt.query_map(params![window.start, window.end], |row| {
            Ok((
                row.get::<_, NaiveDate>(0)?,
                HabitId::from(row.get::<_, String>(1)?),
                row.get::<_, bool>(2)?,
            ))
        })?;
        for state in states {
            let (day, habit_id, completed) = state?;
            book.entry(day)
                .or_insert_with(|| DailyRecord::new(day))
                .set_habit(habit_id, Some(completed));
        }

        Ok(book)
    }

    fn completion_dates(&self, habit_id: &HabitId) -> Result<Vec<NaiveDate>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT day FROM habit_states
             WHERE habit_id = ?1 AND completed = 1
             ORDER BY day ASC",
        )?;
        let dates = stmt
            .query_map(params![habit_id.as_str()], |row| row.get::<_, NaiveDate>(0))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(dates)
    }
}
