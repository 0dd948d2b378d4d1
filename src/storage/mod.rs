//! Storage layer for persisting habit data
//!
//! This module holds the snapshot store that feeds the statistics engine.
//! It persists habit definitions and daily records in SQLite and hands back
//! complete date ranges as `RecordBook`s.

pub mod migrations;
pub mod sqlite;

// Re-export the main storage types
pub use sqlite::*;

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::{DailyRecord, DateWindow, HabitDefinition, HabitId, RecordBook};

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database query error: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Habit not found: {habit_id}")]
    HabitNotFound { habit_id: String },

    #[error("Habit already exists: {habit_id}")]
    DuplicateHabit { habit_id: String },

    #[error("Migration error: {0}")]
    Migration(String),
}

/// Storage interface for habit definitions and daily records
///
/// Days without any logged information are never stored; `get_day` returns
/// `None` for them and `get_records` leaves them out of the book.
pub trait CalendarStorage {
    /// Create a new habit
    fn create_habit(&self, habit: &HabitDefinition) -> Result<(), StorageError>;

    /// Get a habit by ID, archived ones included
    fn get_habit(&self, habit_id: &HabitId) -> Result<HabitDefinition, StorageError>;

    /// Update an existing habit
    fn update_habit(&self, habit: &HabitDefinition) -> Result<(), StorageError>;

    /// Archive a habit; its history stays in place
    fn archive_habit(&self, habit_id: &HabitId) -> Result<(), StorageError>;

    /// List habits ordered by position
    fn list_habits(&self, active_only: bool) -> Result<Vec<HabitDefinition>, StorageError>;

    /// Insert the default habit set when no habits exist yet
    ///
    /// Returns how many habits were inserted.
    fn seed_default_habits(&self) -> Result<usize, StorageError>;

    /// Replace everything stored for the record's day
    ///
    /// An empty record deletes the day.
    fn save_day(&self, record: &DailyRecord) -> Result<(), StorageError>;

    fn get_day(&self, day: NaiveDate) -> Result<Option<DailyRecord>, StorageError>;

    /// All stored days inside the window
    fn get_records(&self, window: DateWindow) -> Result<RecordBook, StorageError>;

    /// Every day the habit was completed, ascending
    fn completion_dates(&self, habit_id: &HabitId) -> Result<Vec<NaiveDate>, StorageError>;

    /// Set or clear one habit's state on a day and return the updated record
    fn set_habit_state(
        &self,
        day: NaiveDate,
        habit_id: &HabitId,
        state: Option<bool>,
    ) -> Result<DailyRecord, StorageError> {
        let mut record = self.get_day(day)?.unwrap_or_else(|| DailyRecord::new(day));
        record.set_habit(habit_id.clone(), state);
        self.save_day(&record)?;
        Ok(record)
    }
}
