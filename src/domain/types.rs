//! Core types and enums used throughout the domain layer
//!
//! This module defines the identifier type for habits and the closed
//! enumerations (Category, Tone) that are validated at the boundary instead of
//! being passed around as free-form strings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::DomainError;

/// Identifier for a habit
///
/// Default habits use stable slugs (`"exercise"`), user-created habits get a
/// random UUID string. The engine treats the value as opaque, so records that
/// reference a habit which no longer has a definition stay valid.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HabitId(pub String);

impl HabitId {
    /// Generate a new random habit ID
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for HabitId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for HabitId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for HabitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Life areas a habit can belong to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Exercise, sleep, diet
    Health,
    /// Deep work, career, side projects
    Work,
    /// Time with partner, kids, relatives
    Family,
    /// Reading, courses, practice
    Learning,
    /// Anything else
    Other,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Health,
        Category::Work,
        Category::Family,
        Category::Learning,
        Category::Other,
    ];

    /// Storage and wire name for this category
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Health => "health",
            Category::Work => "work",
            Category::Family => "family",
            Category::Learning => "learning",
            Category::Other => "other",
        }
    }

    /// Get the display name for this category
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Health => "Health",
            Category::Work => "Work",
            Category::Family => "Family",
            Category::Learning => "Learning",
            Category::Other => "Other",
        }
    }
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "health" => Ok(Category::Health),
            "work" => Ok(Category::Work),
            "family" => Ok(Category::Family),
            "learning" => Ok(Category::Learning),
            "other" => Ok(Category::Other),
            _ => Err(DomainError::InvalidCategory(s.to_string())),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Voice used when asking the text-generation service for insights
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Supportive,
    Direct,
    Analytical,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Supportive => "supportive",
            Tone::Direct => "direct",
            Tone::Analytical => "analytical",
        }
    }

    /// Style instruction handed to the model
    pub fn instruction(&self) -> &'static str {
        match self {
            Tone::Supportive => {
                "Be warm and encouraging. Celebrate progress before pointing at gaps."
            }
            Tone::Direct => "Be brief and blunt. Name the weakest habit and one concrete fix.",
            Tone::Analytical => {
                "Be precise. Reference the numbers and patterns in the data explicitly."
            }
        }
    }
}

impl FromStr for Tone {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "supportive" => Ok(Tone::Supportive),
            "direct" => Ok(Tone::Direct),
            "analytical" => Ok(Tone::Analytical),
            _ => Err(DomainError::InvalidTone(s.to_string())),
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
