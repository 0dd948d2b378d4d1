//! MCP server implementation that handles JSON-RPC communication
//!
//! This module implements the actual MCP server that:
//! 1. Reads line-delimited JSON-RPC requests from stdin
//! 2. Dispatches tool calls to the life calendar tools
//! 3. Writes JSON-RPC responses to stdout

use schemars::{schema_for, JsonSchema};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Map, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, error, info, warn};

use crate::mcp::protocol::*;
use crate::tools::{self, ToolError};
use crate::{LifeCalendarServer, ServerError};

/// Name reported in the initialize handshake
pub const SERVER_NAME: &str = "Life Calendar MCP";

/// MCP server that handles communication with the client
pub struct McpServer {
    calendar: LifeCalendarServer,
    initialized: bool,
}

fn input_schema<T: JsonSchema>() -> Value {
    serde_json::to_value(schema_for!(T)).unwrap_or_else(|_| json!({"type": "object"}))
}

/// Every tool this server provides
pub fn tool_definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: "habit_create".to_string(),
            description: "Create a new habit to track on the life calendar".to_string(),
            input_schema: input_schema::<tools::CreateHabitParams>(),
        },
        ToolDefinition {
            name: "habit_update".to_string(),
            description: "Edit a habit's label, description, category, emoji or position, or archive and restore it. Archiving keeps the habit's history".to_string(),
            input_schema: input_schema::<tools::UpdateHabitParams>(),
        },
        ToolDefinition {
            name: "habit_list".to_string(),
            description: "List habits with their current streak and whether they are done today".to_string(),
            input_schema: input_schema::<tools::ListHabitsParams>(),
        },
        ToolDefinition {
            name: "day_log".to_string(),
            description: "Log one day: mark habits done, missed or untracked, and set the reflection, focus, holiday flag and tasks".to_string(),
            input_schema: input_schema::<tools::DayLogParams>(),
        },
        ToolDefinition {
            name: "habit_status".to_string(),
            description: "Current and longest streaks plus week, month and year progress for one or all habits".to_string(),
            input_schema: input_schema::<tools::StatusParams>(),
        },
        ToolDefinition {
            name: "habit_calendar".to_string(),
            description: "Month grid, week strip or twelve-month overview for a habit".to_string(),
            input_schema: input_schema::<tools::CalendarParams>(),
        },
        ToolDefinition {
            name: "habit_insights".to_string(),
            description: "Summarize recent history (rates, trends, correlations, weekday patterns, reflections) and build a coaching prompt from it".to_string(),
            input_schema: input_schema::<tools::InsightsParams>(),
        },
    ]
}

fn parse_arguments<T: DeserializeOwned>(arguments: Map<String, Value>) -> Result<T, JsonRpcError> {
    serde_json::from_value(Value::Object(arguments)).map_err(|e| JsonRpcError {
        code: error_codes::INVALID_PARAMS,
        message: format!("Invalid arguments: {}", e),
        data: None,
    })
}

/// Turn a tool outcome into the MCP result payload
fn render<R: Serialize>(tool: &str, outcome: Result<R, ToolError>) -> ToolCallResult {
    match outcome {
        Ok(response) => match serde_json::to_string_pretty(&response) {
            Ok(text) => ToolCallResult::success(text),
            Err(e) => ToolCallResult::error(e.to_string()),
        },
        Err(e) => {
            warn!("Tool {} failed with code {}: {}", tool, e.code(), e);
            ToolCallResult::error(e.to_string())
        }
    }
}

impl McpServer {
    pub fn new(calendar: LifeCalendarServer) -> Self {
        Self {
            calendar,
            initialized: false,
        }
    }

    /// Whether the client has completed the initialize handshake
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Run the MCP server, handling JSON-RPC over stdin/stdout
    pub async fn run(&mut self) -> Result<(), ServerError> {
        info!("Starting MCP server, waiting for JSON-RPC requests...");

        let stdin = tokio::io::stdin();
        let mut reader = BufReader::new(stdin);
        let mut stdout = tokio::io::stdout();

        let mut line = String::new();

        loop {
            line.clear();

            match reader.read_line(&mut line).await {
                Ok(0) => {
                    info!("MCP server shutting down (stdin closed)");
                    break;
                }
                Ok(_) => {
                    if let Some(response) = self.handle_line(&line).await {
                        let response_str = serde_json::to_string(&response)?;

                        stdout.write_all(response_str.as_bytes()).await?;
                        stdout.write_all(b"\n").await?;
                        stdout.flush().await?;

                        debug!("Sent response: {}", response_str);
                    }
                }
                Err(e) => {
                    error!("Failed to read from stdin: {}", e);
                    break;
                }
            }
        }

        Ok(())
    }

    /// Process a single line of JSON-RPC input
    ///
    /// Returns `None` for blank lines and notifications.
    pub async fn handle_line(&mut self, line: &str) -> Option<JsonRpcResponse> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        debug!("Processing request: {}", line);

        let value: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                error!("Failed to parse JSON-RPC request: {}", e);
                return Some(JsonRpcResponse::error(
                    Value::Null,
                    error_codes::PARSE_ERROR,
                    format!("Invalid JSON: {}", e),
                    None,
                ));
            }
        };

        let request: JsonRpcRequest = match serde_json::from_value(value.clone()) {
            Ok(request) => request,
            Err(e) => {
                let id = value.get("id").cloned().unwrap_or(Value::Null);
                return Some(JsonRpcResponse::error(
                    id,
                    error_codes::INVALID_REQUEST,
                    format!("Invalid request: {}", e),
                    None,
                ));
            }
        };

        if request.is_notification() {
            self.handle_notification(&request);
            return None;
        }

        Some(self.handle_request(request))
    }

    fn handle_notification(&mut self, request: &JsonRpcRequest) {
        match request.method.as_str() {
            "initialized" | "notifications/initialized" => {
                self.initialized = true;
                info!("MCP client initialized");
            }
            other => debug!("Ignoring notification '{}'", other),
        }
    }

    fn handle_request(&mut self, request: JsonRpcRequest) -> JsonRpcResponse {
        let id = request.id.clone().unwrap_or(Value::Null);

        let outcome = match request.method.as_str() {
            "initialize" => self.handle_initialize(),
            "initialized" | "notifications/initialized" => {
                self.initialized = true;
                Ok(json!({}))
            }
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!({ "tools": tool_definitions() })),
            "tools/call" => self.handle_tools_call(request.params),
            _ => Err(JsonRpcError {
                code: error_codes::METHOD_NOT_FOUND,
                message: format!("Method '{}' not found", request.method),
                data: None,
            }),
        };

        match outcome {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(e) => JsonRpcResponse::error(id, e.code, e.message, e.data),
        }
    }

    fn handle_initialize(&mut self) -> Result<Value, JsonRpcError> {
        info!("MCP client connected");

        let result = InitializeResult {
            protocol_version: MCP_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: false,
                }),
            },
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        serde_json::to_value(result).map_err(|e| JsonRpcError {
            code: error_codes::INTERNAL_ERROR,
            message: e.to_string(),
            data: None,
        })
    }

    fn handle_tools_call(&self, params: Option<Value>) -> Result<Value, JsonRpcError> {
        let params = params.ok_or_else(|| JsonRpcError {
            code: error_codes::INVALID_PARAMS,
            message: "Missing parameters".to_string(),
            data: None,
        })?;
        let call: ToolCallParams = serde_json::from_value(params).map_err(|e| JsonRpcError {
            code: error_codes::INVALID_PARAMS,
            message: format!("Invalid parameters: {}", e),
            data: None,
        })?;

        debug!("Calling tool {}", call.name);
        let storage = self.calendar.storage();
        let analytics = self.calendar.analytics();

        let result = match call.name.as_str() {
            "habit_create" => render(
                &call.name,
                tools::create_habit(storage, parse_arguments(call.arguments)?),
            ),
            "habit_update" => render(
                &call.name,
                tools::update_habit(storage, parse_arguments(call.arguments)?),
            ),
            "habit_list" => render(
                &call.name,
                tools::list_habits(storage, parse_arguments(call.arguments)?),
            ),
            "day_log" => render(
                &call.name,
                tools::log_day(storage, parse_arguments(call.arguments)?),
            ),
            "habit_status" => render(
                &call.name,
                tools::get_habit_status(storage, analytics, parse_arguments(call.arguments)?),
            ),
            "habit_calendar" => render(
                &call.name,
                tools::habit_calendar(
                    storage,
                    self.calendar.week_start(),
                    parse_arguments(call.arguments)?,
                ),
            ),
            "habit_insights" => render(
                &call.name,
                tools::get_habit_insights(
                    storage,
                    analytics,
                    self.calendar.tone(),
                    parse_arguments(call.arguments)?,
                ),
            ),
            _ => {
                return Err(JsonRpcError {
                    code: error_codes::INVALID_PARAMS,
                    message: format!("Unknown tool: {}", call.name),
                    data: None,
                })
            }
        };

        serde_json::to_value(result).map_err(|e| JsonRpcError {
            code: error_codes::INTERNAL_ERROR,
            message: e.to_string(),
            data: None,
        })
    }
}
