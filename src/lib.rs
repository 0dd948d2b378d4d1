//! Public library interface for the Life Calendar MCP server
//!
//! This module exports the statistics engine, the storage layer, the tools
//! and the server implementation so they can be used by other applications
//! or tests.

use std::path::PathBuf;

use thiserror::Error;

pub mod analytics;
pub mod domain;
pub mod insights;
pub mod mcp;
pub mod storage;
pub mod tools;

// Re-export public modules and types
pub use analytics::{AnalyticsConfig, AnalyticsEngine, HabitReport, HistoricalSummary};
pub use domain::*;
pub use insights::{build_insight_prompt, InsightPrompt};
pub use storage::{CalendarStorage, SqliteStorage, StorageError};
pub use tools::ToolError;

/// Errors that can occur during server operation
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Database error: {0}")]
    Database(#[from] storage::StorageError),

    #[error("Domain validation error: {0}")]
    Domain(#[from] domain::DomainError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Runtime preferences for the server
#[derive(Debug, Clone, Copy, Default)]
pub struct ServerConfig {
    pub analytics: AnalyticsConfig,
    /// First day of the week for the week strip
    pub week_start: WeekStart,
    /// Default voice of insight prompts
    pub tone: Tone,
}

/// Life calendar server that implements the MCP protocol
///
/// This server keeps habit definitions and daily records in a SQLite
/// database and exposes tools for logging days, reading streaks and
/// calendars, and building insight prompts.
pub struct LifeCalendarServer {
    storage: SqliteStorage,
    analytics: AnalyticsEngine,
    week_start: WeekStart,
    tone: Tone,
}

impl LifeCalendarServer {
    /// Create a new server with the specified database path
    ///
    /// This initializes the SQLite schema if needed and seeds the default
    /// habits into an empty database.
    pub async fn new(db_path: PathBuf, config: ServerConfig) -> Result<Self, ServerError> {
        tracing::info!("Initializing Life Calendar server with database: {:?}", db_path);

        let storage = SqliteStorage::new(db_path)?;
        Self::with_storage(storage, config)
    }

    /// Build a server around an already opened storage
    pub fn with_storage(storage: SqliteStorage, config: ServerConfig) -> Result<Self, ServerError> {
        let seeded = storage.seed_default_habits()?;
        if seeded > 0 {
            tracing::info!("Seeded {} starter habits", seeded);
        }

        Ok(Self {
            storage,
            analytics: AnalyticsEngine::with_config(config.analytics),
            week_start: config.week_start,
            tone: config.tone,
        })
    }

    /// Run the MCP server, handling JSON-RPC requests over stdin/stdout
    ///
    /// This method returns once stdin is closed or reading fails.
    pub async fn run(self) -> Result<(), ServerError> {
        tracing::info!("Starting MCP server...");

        let habits = self.storage.list_habits(true)?;
        tracing::info!("Server started successfully, found {} active habits", habits.len());

        let mut mcp_server = mcp::McpServer::new(self);
        mcp_server.run().await?;

        Ok(())
    }

    pub fn storage(&self) -> &SqliteStorage {
        &self.storage
    }

    pub fn analytics(&self) -> &AnalyticsEngine {
        &self.analytics
    }

    pub fn week_start(&self) -> WeekStart {
        self.week_start
    }

    pub fn tone(&self) -> Tone {
        self.tone
    }
}
