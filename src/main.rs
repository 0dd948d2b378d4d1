//! Main entry point for the Life Calendar MCP server
//!
//! This file sets up logging, parses command line arguments, and starts the MCP server.
//! The server listens for JSON-RPC requests over stdin/stdout following the MCP protocol.

use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use life_calendar::{AnalyticsConfig, LifeCalendarServer, ServerConfig, Tone, WeekStart};

/// Get the default database path, trying several locations in order
fn get_default_database_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let potential_paths = [
        dirs::home_dir().map(|p| p.join(".life_calendar")),
        dirs::data_dir().map(|p| p.join("life_calendar")),
        dirs::config_dir().map(|p| p.join("life_calendar")),
        std::env::current_dir().ok().map(|p| p.join(".life_calendar")),
    ];

    for potential_path in potential_paths.iter().flatten() {
        if std::fs::create_dir_all(potential_path).is_ok() {
            let test_file = potential_path.join(".test_write");
            if std::fs::write(&test_file, "test").is_ok() {
                let _ = std::fs::remove_file(&test_file);
                return Ok(potential_path.join("calendar.db"));
            }
        }
    }

    let temp_path = std::env::temp_dir().join("life_calendar");
    std::fs::create_dir_all(&temp_path)?;

    tracing::warn!("Using temporary directory for database: {}", temp_path.display());
    Ok(temp_path.join("calendar.db"))
}

/// Command line arguments for the Life Calendar MCP server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the SQLite database file
    /// If not provided, uses a default location in the user's home directory
    #[arg(long)]
    database: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable verbose output (implies debug)
    #[arg(short, long)]
    verbose: bool,

    /// Days covered by the insight summary
    #[arg(long, default_value_t = 30)]
    window_days: u32,

    /// Days scanned for reflection excerpts
    #[arg(long, default_value_t = 7)]
    reflection_days: u32,

    /// First day of the week in the week view (sunday or monday)
    #[arg(long, default_value = "monday")]
    week_start: WeekStart,

    /// Default insight tone (supportive, direct or analytical)
    #[arg(long, default_value = "supportive")]
    tone: Tone,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let log_level = if args.verbose {
        "debug"
    } else if args.debug {
        "info"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(format!("life_calendar={}", log_level))
        .with_writer(std::io::stderr) // stdout carries JSON-RPC
        .init();

    info!("Starting Life Calendar MCP server");

    if args.window_days == 0 {
        return Err("--window-days must be at least 1".into());
    }

    let db_path = match args.database {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            path
        }
        None => get_default_database_path()?,
    };

    info!("Using database at: {}", db_path.display());

    let config = ServerConfig {
        analytics: AnalyticsConfig {
            window_days: args.window_days,
            reflection_days: args.reflection_days,
        },
        week_start: args.week_start,
        tone: args.tone,
    };

    let server = LifeCalendarServer::new(db_path, config).await?;
    server.run().await?;

    info!("Life Calendar MCP server shutdown complete");
    Ok(())
}
