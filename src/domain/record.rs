//! Per-day records
//!
//! A `DailyRecord` holds everything logged for one calendar day. Days with no
//! activity are absent from a `RecordBook` entirely; readers treat a missing
//! day as "nothing tracked, no reflection".

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, HabitId};

const MAX_REFLECTION_CHARS: usize = 2000;
const MAX_FOCUS_CHARS: usize = 200;
const MAX_TASK_TITLE_CHARS: usize = 200;

/// All daily records of a user, keyed by day
pub type RecordBook = BTreeMap<NaiveDate, DailyRecord>;

/// A to-do item attached to a single day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayTask {
    pub title: String,
    #[serde(default)]
    pub done: bool,
}

impl DayTask {
    pub fn new(title: String, done: bool) -> Result<Self, DomainError> {
        let title = title.trim().to_string();
        if title.is_empty() {
            return Err(DomainError::Validation {
                message: "Task title cannot be empty".to_string(),
            });
        }
        if title.chars().count() > MAX_TASK_TITLE_CHARS {
            return Err(DomainError::Validation {
                message: format!("Task title cannot be longer than {} characters", MAX_TASK_TITLE_CHARS),
            });
        }
        Ok(Self { title, done })
    }
}

/// What the user logged for one day
///
/// `habits` only holds habits that were explicitly tracked that day. A habit
/// missing from the map was not tracked; `Some(false)` means tracked and
/// missed. The difference changes completion-rate denominators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRecord {
    pub date: NaiveDate,
    #[serde(default)]
    pub habits: BTreeMap<HabitId, bool>,
    pub reflection: Option<String>,
    pub focus: Option<String>,
    /// Rest day flag; stored and surfaced, streak math ignores it
    #[serde(default)]
    pub is_holiday: bool,
    #[serde(default)]
    pub tasks: Vec<DayTask>,
}

impl DailyRecord {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            habits: BTreeMap::new(),
            reflection: None,
            focus: None,
            is_holiday: false,
            tasks: Vec::new(),
        }
    }

    /// Tracked state of a habit on this day, `None` when not tracked
    pub fn habit_state(&self, habit: &HabitId) -> Option<bool> {
        self.habits.get(habit).copied()
    }

    pub fn is_completed(&self, habit: &HabitId) -> bool {
        self.habit_state(habit).unwrap_or(false)
    }

    /// Set or clear the tracked state of a habit
    pub fn set_habit(&mut self, habit: HabitId, state: Option<bool>) {
        match state {
            Some(done) => {
                self.habits.insert(habit, done);
            }
            None => {
                self.habits.remove(&habit);
            }
        }
    }

    pub fn set_reflection(&mut self, text: Option<String>) -> Result<(), DomainError> {
        self.reflection = normalize_text(text, MAX_REFLECTION_CHARS, "Reflection")?;
        Ok(())
    }

    pub fn set_focus(&mut self, text: Option<String>) -> Result<(), DomainError> {
        self.focus = normalize_text(text, MAX_FOCUS_CHARS, "Focus")?;
        Ok(())
    }

    /// Non-blank reflection text, trimmed
    pub fn reflection_text(&self) -> Option<&str> {
        self.reflection
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }

    /// True when the record carries no information and should not be stored
    pub fn is_empty(&self) -> bool {
        self.habits.is_empty()
            && self.reflection_text().is_none()
            && self.focus.as_deref().map_or(true, |f| f.trim().is_empty())
            && !self.is_holiday
            && self.tasks.is_empty()
    }
}

fn normalize_text(
    text: Option<String>,
    max_chars: usize,
    field: &str,
) -> Result<Option<String>, DomainError> {
    let text = text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty());
    if let Some(t) = &text {
        if t.chars().count() > max_chars {
            return Err(DomainError::Validation {
                message: format!("{} cannot be longer than {} characters", field, max_chars),
            });
        }
    }
    Ok(text)
}

/// Tracked state of a habit on a day, treating a missing day as untracked
pub fn habit_state_on(book: &RecordBook, day: NaiveDate, habit: &HabitId) -> Option<bool> {
    book.get(&day).and_then(|record| record.habit_state(habit))
}

/// Whether a habit was completed on a day; missing days count as incomplete
pub fn completed_on(book: &RecordBook, day: NaiveDate, habit: &HabitId) -> bool {
    habit_state_on(book, day, habit).unwrap_or(false)
}

/// Project a record book onto one habit's completion dates, ascending
pub fn completion_dates(book: &RecordBook, habit: &HabitId) -> Vec<NaiveDate> {
    book.iter()
        .filter(|(_, record)| record.is_completed(habit))
        .map(|(day, _)| *day)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    #[test]
    fn test_untracked_differs_from_missed() {
        let run = HabitId::from("run");
        let read = HabitId::from("read");
        let mut record = DailyRecord::new(day(1));
        record.set_habit(run.clone(), Some(false));

        assert_eq!(record.habit_state(&run), Some(false));
        assert_eq!(record.habit_state(&read), None);
        assert!(!record.is_completed(&run));
        assert!(!record.is_completed(&read));

        record.set_habit(run.clone(), None);
        assert!(record.habits.is_empty());
    }

    #[test]
    fn test_missing_day_reads_as_untracked() {
        let book = RecordBook::new();
        let run = HabitId::from("run");
        assert_eq!(habit_state_on(&book, day(3), &run), None);
        assert!(!completed_on(&book, day(3), &run));
    }

    #[test]
    fn test_empty_record_detection() {
        let mut record = DailyRecord::new(day(2));
        assert!(record.is_empty());

        record.set_reflection(Some("   ".to_string())).unwrap();
        assert!(record.is_empty());

        record.set_focus(Some("ship the release".to_string())).unwrap();
        assert!(!record.is_empty());
    }

    #[test]
    fn test_completion_dates_projection_ignores_misses() {
        let run = HabitId::from("run");
        let mut book = RecordBook::new();
        for (d, done) in [(1, true), (2, false), (4, true)] {
            let mut record = DailyRecord::new(day(d));
            record.set_habit(run.clone(), Some(done));
            book.insert(day(d), record);
        }
        assert_eq!(completion_dates(&book, &run), vec![day(1), day(4)]);
    }

    #[test]
    fn test_task_validation() {
        assert!(DayTask::new("  ".to_string(), false).is_err());
        let task = DayTask::new(" call mom ".to_string(), true).unwrap();
        assert_eq!(task.title, "call mom");
    }
}
