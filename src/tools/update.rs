//! Tool for updating existing habits
//!
//! This module implements the habit_update MCP tool to edit a habit's label,
//! description, category, emoji or position, and to archive or restore it.
//! Archiving never touches the habit's recorded history.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{Category, HabitChanges, HabitDefinition, HabitId};
use crate::storage::CalendarStorage;
use crate::tools::ToolError;

/// Parameters for updating an existing habit
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct UpdateHabitParams {
    pub habit_id: String,
    pub label: Option<String>,
    /// An empty string clears the description
    pub description: Option<String>,
    /// One of: health, work, family, learning, other
    pub category: Option<String>,
    /// An empty string clears the emoji
    pub emoji: Option<String>,
    pub position: Option<u32>,
    /// Set to false to archive, true to restore
    pub is_active: Option<bool>,
    /// Shorthand for `is_active: false`
    #[serde(default)]
    pub archive: bool,
}

/// Response from updating a habit
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHabitResponse {
    pub success: bool,
    pub habit: HabitDefinition,
    pub message: String,
}

/// Update an existing habit using the provided storage
pub fn update_habit<S: CalendarStorage>(
    storage: &S,
    params: UpdateHabitParams,
) -> Result<UpdateHabitResponse, ToolError> {
    if params.archive && params.is_active == Some(true) {
        return Err(ToolError::InvalidParams(
            "archive cannot be combined with is_active: true".to_string(),
        ));
    }

    let habit_id = HabitId::from(params.habit_id.trim());
    let mut habit = storage.get_habit(&habit_id)?;
    let was_active = habit.is_active;

    let category = params
        .category
        .as_deref()
        .map(str::parse::<Category>)
        .transpose()?;

    let is_active = if params.archive {
        Some(false)
    } else {
        params.is_active
    };

    habit.update(HabitChanges {
        label: params.label,
        description: params.description.map(Some),
        category,
        emoji: params.emoji.map(Some),
        position: params.position,
        is_active,
    })?;

    storage.update_habit(&habit)?;

    let message = match (was_active, habit.is_active) {
        (true, false) => format!(
            "🗄️ Archived habit '{}'. Its history is kept.",
            habit.label
        ),
        (false, true) => format!("▶️ Restored habit '{}'", habit.label),
        _ => format!("✅ Updated habit '{}'", habit.label),
    };

    Ok(UpdateHabitResponse {
        success: true,
        habit,
        message,
    })
}
