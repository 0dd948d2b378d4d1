//! MCP tools for the life calendar
//!
//! This module contains the tools that MCP clients can call. Each tool takes
//! a typed parameter struct (deserialized from the call's `arguments` and
//! published as a JSON schema) and returns a serializable response.

pub mod calendar;
pub mod create;
pub mod day;
pub mod insights;
pub mod list;
pub mod status;
pub mod update;

// Re-export tool functions for easy access
pub use calendar::*;
pub use create::*;
pub use day::*;
pub use insights::*;
pub use list::*;
pub use status::*;
pub use update::*;

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::{resolve_today, DomainError};
use crate::storage::StorageError;

/// Errors returned by tool calls
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// Application error codes, in the JSON-RPC server error range
pub mod error_codes {
    /// The specified habit ID doesn't exist
    pub const HABIT_NOT_FOUND: i32 = -32001;
    /// The habit ID is already taken
    pub const DUPLICATE_HABIT: i32 = -32002;
    /// Input validation failed
    pub const VALIDATION_ERROR: i32 = -32003;
    /// Database or storage operation failed
    pub const STORAGE_ERROR: i32 = -32004;
    /// Internal JSON-RPC error
    pub const INTERNAL_ERROR: i32 = -32603;
}

impl ToolError {
    /// Classify the failure with an application error code
    pub fn code(&self) -> i32 {
        match self {
            ToolError::InvalidParams(_) | ToolError::Domain(_) => error_codes::VALIDATION_ERROR,
            ToolError::Storage(StorageError::HabitNotFound { .. }) => error_codes::HABIT_NOT_FOUND,
            ToolError::Storage(StorageError::DuplicateHabit { .. }) => error_codes::DUPLICATE_HABIT,
            ToolError::Storage(_) => error_codes::STORAGE_ERROR,
            ToolError::Serialization(_) => error_codes::INTERNAL_ERROR,
        }
    }
}

/// Resolve the optional `today` override shared by date-dependent tools
pub(crate) fn reference_day(today: Option<&str>) -> Result<NaiveDate, ToolError> {
    Ok(resolve_today(today)?)
}
