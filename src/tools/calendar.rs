//! Tool for calendar views of a habit
//!
//! This module implements the habit_calendar MCP tool: the current month
//! grid, the current week strip or the twelve-month overview.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::analytics::{
    generate_month_calendar, week_strip, year_overview, CalendarDay, MonthSummary,
};
use crate::domain::{format_day, HabitId, WeekStart};
use crate::storage::CalendarStorage;
use crate::tools::{reference_day, ToolError};

/// Which calendar to render
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum CalendarView {
    #[default]
    Month,
    Week,
    Year,
}

/// Parameters for a calendar view
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct CalendarParams {
    pub habit_id: String,
    /// month (default), week or year
    #[serde(default)]
    pub view: CalendarView,
    /// Overrides the configured first day of the week (sunday or monday)
    pub week_start: Option<String>,
    /// Reference day (YYYY-MM-DD), defaults to today
    pub today: Option<String>,
}

/// Response with the requested calendar
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarResponse {
    pub habit_id: HabitId,
    pub label: String,
    pub view: CalendarView,
    /// Day cells for the month and week views
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub days: Vec<CalendarDay>,
    /// Month totals for the year view
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub months: Vec<MonthSummary>,
    pub message: String,
}

/// Render a calendar view for one habit
pub fn habit_calendar<S: CalendarStorage>(
    storage: &S,
    week_start: WeekStart,
    params: CalendarParams,
) -> Result<CalendarResponse, ToolError> {
    let today = reference_day(params.today.as_deref())?;
    let week_start = match params.week_start.as_deref() {
        Some(s) => s.parse::<WeekStart>()?,
        None => week_start,
    };

    let habit = storage.get_habit(&HabitId::from(params.habit_id.trim()))?;
    let dates = storage.completion_dates(&habit.id)?;

    let (days, months) = match params.view {
        CalendarView::Month => (generate_month_calendar(&dates, today), Vec::new()),
        CalendarView::Week => (week_strip(&dates, today, week_start), Vec::new()),
        CalendarView::Year => (Vec::new(), year_overview(&dates, today)),
    };

    let message = match params.view {
        CalendarView::Year => {
            let done: u32 = months.iter().map(|m| m.completed).sum();
            format!("📆 {} in {}: {} days done", habit.label, today.format("%Y"), done)
        }
        _ => {
            let marks: String = days
                .iter()
                .map(|d| match (d.completed, d.is_future) {
                    (true, _) => '■',
                    (false, true) => '·',
                    (false, false) => '□',
                })
                .collect();
            let from = days.first().map(|d| format_day(d.date)).unwrap_or_default();
            format!("📆 {} from {}: {}", habit.label, from, marks)
        }
    };

    Ok(CalendarResponse {
        habit_id: habit.id,
        label: habit.label,
        view: params.view,
        days,
        months,
        message,
    })
}
