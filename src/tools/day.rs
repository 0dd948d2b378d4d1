//! Tool for logging a day on the calendar
//!
//! This module implements the day_log MCP tool. One call edits a single day:
//! habit states, reflection, focus, holiday flag and tasks. Fields left out
//! of the call keep their stored value. A day left with nothing on it is
//! removed from storage.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::analytics::current_streak;
use crate::domain::{format_day, parse_day, DailyRecord, DayTask, HabitId};
use crate::storage::CalendarStorage;
use crate::tools::{reference_day, ToolError};

/// A to-do item for the day
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct TaskParams {
    pub title: String,
    #[serde(default)]
    pub done: bool,
}

/// Parameters for logging a day
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct DayLogParams {
    /// Day to edit (YYYY-MM-DD), defaults to today
    pub date: Option<String>,
    /// Reference day (YYYY-MM-DD), defaults to today
    pub today: Option<String>,
    /// Habit states by habit ID: true = done, false = missed, null = clear
    #[serde(default)]
    pub habits: BTreeMap<String, Option<bool>>,
    /// Free-form reflection; an empty string clears it
    pub reflection: Option<String>,
    /// The day's main focus; an empty string clears it
    pub focus: Option<String>,
    pub is_holiday: Option<bool>,
    /// Replaces the day's task list when present
    pub tasks: Option<Vec<TaskParams>>,
}

/// Current streak of a habit touched by the call
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakUpdate {
    pub habit_id: HabitId,
    pub label: String,
    pub current_streak: u32,
}

/// Response from logging a day
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayLogResponse {
    pub success: bool,
    /// `None` when the day no longer holds anything
    pub record: Option<DailyRecord>,
    pub streaks: Vec<StreakUpdate>,
    pub message: String,
}

/// Apply the requested edits to one day using the provided storage
pub fn log_day<S: CalendarStorage>(
    storage: &S,
    params: DayLogParams,
) -> Result<DayLogResponse, ToolError> {
    let today = reference_day(params.today.as_deref())?;
    let date = match params.date.as_deref() {
        Some(s) => parse_day(s)?,
        None => today,
    };

    if date > today {
        return Err(ToolError::InvalidParams(format!(
            "Cannot log {} because it is after today ({})",
            format_day(date),
            format_day(today)
        )));
    }

    // Resolve every habit before writing anything
    let mut touched = Vec::with_capacity(params.habits.len());
    for (id, state) in &params.habits {
        let habit = storage.get_habit(&HabitId::from(id.trim()))?;
        touched.push((habit, *state));
    }

    let mut record = storage.get_day(date)?.unwrap_or_else(|| DailyRecord::new(date));

    for (habit, state) in &touched {
        record.set_habit(habit.id.clone(), *state);
    }
    if params.reflection.is_some() {
        record.set_reflection(params.reflection)?;
    }
    if params.focus.is_some() {
        record.set_focus(params.focus)?;
    }
    if let Some(is_holiday) = params.is_holiday {
        record.is_holiday = is_holiday;
    }
    if let Some(tasks) = params.tasks {
        record.tasks = tasks
            .into_iter()
            .map(|t| DayTask::new(t.title, t.done))
            .collect::<Result<Vec<_>, _>>()?;
    }

    storage.save_day(&record)?;
    tracing::debug!("Logged day {} ({} habit changes)", date, touched.len());

    let mut streaks = Vec::with_capacity(touched.len());
    for (habit, _) in touched {
        let dates = storage.completion_dates(&habit.id)?;
        streaks.push(StreakUpdate {
            current_streak: current_streak(&dates, today),
            habit_id: habit.id,
            label: habit.label,
        });
    }

    let mut message = format!("📅 Saved {}", format_day(date));
    for streak in &streaks {
        message.push_str(&format!(
            "\n🔥 {}: {} day{} streak",
            streak.label,
            streak.current_streak,
            if streak.current_streak == 1 { "" } else { "s" }
        ));
    }

    let record = if record.is_empty() { None } else { Some(record) };

    Ok(DayLogResponse {
        success: true,
        record,
        streaks,
        message,
    })
}
