//! Habit definitions
//!
//! A habit definition is the user-facing description of something tracked
//! daily. Definitions can be edited and archived but never physically
//! removed, and completion history never depends on a definition existing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Category, DomainError, HabitId};

const MAX_LABEL_CHARS: usize = 60;
const MAX_DESCRIPTION_CHARS: usize = 280;
const MAX_EMOJI_CHARS: usize = 8;

/// A habit the user tracks day by day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitDefinition {
    pub id: HabitId,
    /// Display label (e.g., "Morning run")
    pub label: String,
    pub description: Option<String>,
    pub category: Category,
    pub emoji: Option<String>,
    /// Ordering within the user's habit list
    pub position: u32,
    pub created_at: DateTime<Utc>,
    /// Archived habits keep their history but leave the active list
    pub is_active: bool,
}

/// Field edits for an existing habit; `None` leaves a field untouched
#[derive(Debug, Clone, Default)]
pub struct HabitChanges {
    pub label: Option<String>,
    pub description: Option<Option<String>>,
    pub category: Option<Category>,
    pub emoji: Option<Option<String>>,
    pub position: Option<u32>,
    pub is_active: Option<bool>,
}

impl HabitDefinition {
    /// Create a new habit with a generated ID and validation
    pub fn new(
        label: String,
        description: Option<String>,
        category: Category,
        emoji: Option<String>,
        position: u32,
    ) -> Result<Self, DomainError> {
        Self::with_id(HabitId::generate(), label, description, category, emoji, position)
    }

    /// Create a habit with a caller-chosen ID (used for the default set)
    pub fn with_id(
        id: HabitId,
        label: String,
        description: Option<String>,
        category: Category,
        emoji: Option<String>,
        position: u32,
    ) -> Result<Self, DomainError> {
        let label = Self::validate_label(&label)?;
        let description = Self::validate_description(description)?;
        let emoji = Self::validate_emoji(emoji)?;

        Ok(Self {
            id,
            label,
            description,
            category,
            emoji,
            position,
            created_at: Utc::now(),
            is_active: true,
        })
    }

    /// Apply edits after validating every changed field
    ///
    /// Nothing is applied if any field fails validation.
    pub fn update(&mut self, changes: HabitChanges) -> Result<(), DomainError> {
        let label = changes
            .label
            .as_deref()
            .map(Self::validate_label)
            .transpose()?;
        let description = changes
            .description
            .map(Self::validate_description)
            .transpose()?;
        let emoji = changes.emoji.map(Self::validate_emoji).transpose()?;

        if let Some(label) = label {
            self.label = label;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(category) = changes.category {
            self.category = category;
        }
        if let Some(emoji) = emoji {
            self.emoji = emoji;
        }
        if let Some(position) = changes.position {
            self.position = position;
        }
        if let Some(is_active) = changes.is_active {
            self.is_active = is_active;
        }

        Ok(())
    }

    /// Label prefixed with the emoji when one is set
    pub fn display_label(&self) -> String {
        match &self.emoji {
            Some(emoji) => format!("{} {}", emoji, self.label),
            None => self.label.clone(),
        }
    }

    fn validate_label(label: &str) -> Result<String, DomainError> {
        let trimmed = label.trim();

        if trimmed.is_empty() {
            return Err(DomainError::InvalidHabitLabel(
                "Habit label cannot be empty".to_string(),
            ));
        }

        if trimmed.chars().count() > MAX_LABEL_CHARS {
            return Err(DomainError::InvalidHabitLabel(format!(
                "Habit label cannot be longer than {} characters",
                MAX_LABEL_CHARS
            )));
        }

        Ok(trimmed.to_string())
    }

    fn validate_description(description: Option<String>) -> Result<Option<String>, DomainError> {
        let description = description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        if let Some(desc) = &description {
            if desc.chars().count() > MAX_DESCRIPTION_CHARS {
                return Err(DomainError::Validation {
                    message: format!(
                        "Description cannot be longer than {} characters",
                        MAX_DESCRIPTION_CHARS
                    ),
                });
            }
        }
        Ok(description)
    }

    fn validate_emoji(emoji: Option<String>) -> Result<Option<String>, DomainError> {
        let emoji = emoji
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty());

        if let Some(e) = &emoji {
            if e.chars().count() > MAX_EMOJI_CHARS {
                return Err(DomainError::Validation {
                    message: "Emoji must be a single short symbol".to_string(),
                });
            }
        }
        Ok(emoji)
    }
}

/// The starter habits every new account is seeded with
pub fn default_habits() -> Vec<HabitDefinition> {
    let defaults = [
        ("exercise", "Exercise", Category::Health, "🏃"),
        ("deep-work", "Deep work", Category::Work, "💻"),
        ("family-time", "Family time", Category::Family, "👨‍👩‍👧"),
        ("reading", "Reading", Category::Learning, "📚"),
        ("journaling", "Journaling", Category::Other, "📝"),
    ];

    defaults
        .iter()
        .enumerate()
        .filter_map(|(position, (id, label, category, emoji))| {
            HabitDefinition::with_id(
                HabitId::from(*id),
                label.to_string(),
                None,
                *category,
                Some(emoji.to_string()),
                position as u32,
            )
            .ok()
        })
        .collect()
}
