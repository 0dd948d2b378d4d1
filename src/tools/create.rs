//! Tool for creating new habits
//!
//! This module implements the habit_create MCP tool.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{Category, HabitDefinition};
use crate::storage::CalendarStorage;
use crate::tools::ToolError;

/// Parameters for creating a new habit
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateHabitParams {
    /// Short label shown on the calendar
    pub label: String,
    /// Optional longer description
    pub description: Option<String>,
    /// One of: health, work, family, learning, other
    pub category: String,
    /// Optional emoji shown next to the label
    pub emoji: Option<String>,
    /// Display position; defaults to the end of the list
    pub position: Option<u32>,
}

/// Response from creating a habit
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHabitResponse {
    pub success: bool,
    pub habit: HabitDefinition,
    pub message: String,
}

/// Create a new habit using the provided storage
pub fn create_habit<S: CalendarStorage>(
    storage: &S,
    params: CreateHabitParams,
) -> Result<CreateHabitResponse, ToolError> {
    let category: Category = params.category.parse()?;

    let position = match params.position {
        Some(position) => position,
        None => storage
            .list_habits(false)?
            .iter()
            .map(|h| h.position + 1)
            .max()
            .unwrap_or(0),
    };

    let habit = HabitDefinition::new(
        params.label,
        params.description,
        category,
        params.emoji,
        position,
    )?;

    storage.create_habit(&habit)?;

    Ok(CreateHabitResponse {
        success: true,
        message: format!(
            "✅ Created habit '{}'! Ready to start your streak!",
            habit.display_label()
        ),
        habit,
    })
}
