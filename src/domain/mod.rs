//! Domain module containing the core data types of the life calendar
//!
//! This module defines habit definitions, daily records and the closed
//! enumerations (category, tone, week start) used throughout the crate, along
//! with calendar-correct date helpers. These types are what the statistics
//! engine consumes and what the storage layer persists.

pub mod date;
pub mod habit;
pub mod record;
pub mod types;

// Re-export public types for easy access
pub use date::*;
pub use habit::*;
pub use record::*;
pub use types::*;

use thiserror::Error;

/// Errors that can occur during domain operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid habit label: {0}")]
    InvalidHabitLabel(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid category '{0}'. Valid options: health, work, family, learning, other")]
    InvalidCategory(String),

    #[error("Invalid tone '{0}'. Valid options: supportive, direct, analytical")]
    InvalidTone(String),

    #[error("Invalid week start '{0}'. Valid options: sunday, monday")]
    InvalidWeekStart(String),
}
