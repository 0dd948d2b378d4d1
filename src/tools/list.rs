//! Tool for listing habits
//!
//! This module implements the habit_list MCP tool.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::analytics::current_streak;
use crate::domain::{Category, HabitDefinition};
use crate::storage::CalendarStorage;
use crate::tools::{reference_day, ToolError};

/// Parameters for listing habits
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct ListHabitsParams {
    /// Show only active habits (default: true)
    pub active_only: Option<bool>,
    /// Filter by category (health, work, family, learning, other)
    pub category: Option<String>,
    /// Reference day (YYYY-MM-DD), defaults to today
    pub today: Option<String>,
}

/// A habit in the list, with its headline numbers
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitListItem {
    #[serde(flatten)]
    pub habit: HabitDefinition,
    pub current_streak: u32,
    pub total_completions: u32,
    pub completed_today: bool,
}

/// Summary statistics for the listed habits
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitListSummary {
    pub total_habits: u32,
    pub active_habits: u32,
    pub completed_today: u32,
}

/// Response from listing habits
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListHabitsResponse {
    pub habits: Vec<HabitListItem>,
    pub summary: HabitListSummary,
    pub message: String,
}

/// List habits using the provided storage
pub fn list_habits<S: CalendarStorage>(
    storage: &S,
    params: ListHabitsParams,
) -> Result<ListHabitsResponse, ToolError> {
    let today = reference_day(params.today.as_deref())?;
    let category = params
        .category
        .as_deref()
        .map(str::parse::<Category>)
        .transpose()?;

    let habits = storage.list_habits(params.active_only.unwrap_or(true))?;

    let mut items = Vec::with_capacity(habits.len());
    for habit in habits {
        if category.is_some_and(|c| c != habit.category) {
            continue;
        }

        let dates = storage.completion_dates(&habit.id)?;
        items.push(HabitListItem {
            current_streak: current_streak(&dates, today),
            total_completions: dates.len() as u32,
            completed_today: dates.binary_search(&today).is_ok(),
            habit,
        });
    }

    let summary = HabitListSummary {
        total_habits: items.len() as u32,
        active_habits: items.iter().filter(|i| i.habit.is_active).count() as u32,
        completed_today: items.iter().filter(|i| i.completed_today).count() as u32,
    };

    let message = if items.is_empty() {
        "No habits found. Create your first habit to get started!".to_string()
    } else {
        format!(
            "📋 {} habits, {} done today",
            summary.total_habits, summary.completed_today
        )
    };

    Ok(ListHabitsResponse {
        habits: items,
        summary,
        message,
    })
}
