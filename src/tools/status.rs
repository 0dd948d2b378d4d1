//! Tool for checking habit status and streaks
//!
//! This module implements the habit_status MCP tool: current and longest
//! streak plus week, month and year progress for one habit or every active
//! habit.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::analytics::{AnalyticsEngine, HabitReport};
use crate::domain::{format_day, HabitId};
use crate::storage::CalendarStorage;
use crate::tools::{reference_day, ToolError};

/// Parameters for checking habit status
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct StatusParams {
    /// ID of a specific habit; all active habits when omitted
    pub habit_id: Option<String>,
    /// Include the current month's calendar grid
    #[serde(default)]
    pub include_calendar: bool,
    /// Reference day (YYYY-MM-DD), defaults to today
    pub today: Option<String>,
}

/// Status of a single habit
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitStatus {
    #[serde(flatten)]
    pub report: HabitReport,
    pub motivation: String,
}

/// Response from checking habit status
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub today: String,
    pub habits: Vec<HabitStatus>,
    pub message: String,
}

/// Get status for habits using the provided storage
pub fn get_habit_status<S: CalendarStorage>(
    storage: &S,
    analytics: &AnalyticsEngine,
    params: StatusParams,
) -> Result<StatusResponse, ToolError> {
    let today = reference_day(params.today.as_deref())?;

    let habits = match params.habit_id.as_deref() {
        Some(id) => vec![storage.get_habit(&HabitId::from(id.trim()))?],
        None => storage.list_habits(true)?,
    };

    let mut statuses = Vec::with_capacity(habits.len());
    for habit in &habits {
        let dates = storage.completion_dates(&habit.id)?;
        let mut report = analytics.report_from_dates(habit, &dates, today);
        if !params.include_calendar {
            report.calendar.clear();
        }
        let motivation = report.streak.motivational_message();
        statuses.push(HabitStatus { report, motivation });
    }

    let message = if statuses.is_empty() {
        "No active habits yet. Create one to start tracking!".to_string()
    } else {
        statuses
            .iter()
            .map(|s| {
                format!(
                    "🎯 {}: 🔥 {} current | 🏆 {} best | 📅 week {}% | month {}% | year {}%",
                    s.report.label,
                    s.report.streak.current,
                    s.report.streak.longest,
                    s.report.periods.week.percentage,
                    s.report.periods.month.percentage,
                    s.report.periods.year.percentage
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    Ok(StatusResponse {
        today: format_day(today),
        habits: statuses,
        message,
    })
}
