/// JSON-RPC round trips through the MCP server
use life_calendar::mcp::protocol::JsonRpcResponse;
use life_calendar::mcp::McpServer;
use life_calendar::*;
use serde_json::{json, Value};
use tempfile::NamedTempFile;

fn server() -> (NamedTempFile, McpServer) {
    let temp_file = NamedTempFile::new().expect("Failed to create temp file");
    let storage = SqliteStorage::new(temp_file.path().to_path_buf()).expect("Failed to create storage");
    let calendar = LifeCalendarServer::with_storage(storage, ServerConfig::default()).unwrap();
    (temp_file, McpServer::new(calendar))
}

fn send(server: &mut McpServer, request: Value) -> Option<JsonRpcResponse> {
    tokio_test::block_on(server.handle_line(&request.to_string()))
}

fn call(server: &mut McpServer, id: u64, name: &str, arguments: Value) -> JsonRpcResponse {
    send(
        server,
        json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": "tools/call",
            "params": {"name": name, "arguments": arguments}
        }),
    )
    .expect("requests get a response")
}

fn tool_text(response: &JsonRpcResponse) -> (bool, String) {
    let result = response.result.as_ref().expect("tool calls return a result");
    let is_error = result["isError"].as_bool().unwrap();
    let text = result["content"][0]["text"].as_str().unwrap().to_string();
    (is_error, text)
}

#[test]
fn test_initialize_handshake() {
    let (_db, mut server) = server();

    let response = send(
        &mut server,
        json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {
            "protocolVersion": "2024-11-05",
            "capabilities": {},
            "clientInfo": {"name": "test", "version": "0.0.1"}
        }}),
    )
    .unwrap();

    let result = response.result.unwrap();
    assert_eq!(result["protocolVersion"], json!("2024-11-05"));
    assert_eq!(result["serverInfo"]["name"], json!("Life Calendar MCP"));
    assert_eq!(result["capabilities"]["tools"]["listChanged"], json!(false));

    let notification = send(
        &mut server,
        json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
    );
    assert!(notification.is_none());
    assert!(server.is_initialized());

    let pong = send(&mut server, json!({"jsonrpc": "2.0", "id": 2, "method": "ping"})).unwrap();
    assert_eq!(pong.result, Some(json!({})));
}

#[test]
fn test_tools_list_publishes_schemas() {
    let (_db, mut server) = server();
    let response = send(&mut server, json!({"jsonrpc": "2.0", "id": 1, "method": "tools/list"})).unwrap();

    let tools = response.result.unwrap()["tools"].as_array().unwrap().clone();
    let names: Vec<&str> = tools.iter().map(|t| t["name"].as_str().unwrap()).collect();
    assert_eq!(
        names,
        vec![
            "habit_create",
            "habit_update",
            "habit_list",
            "day_log",
            "habit_status",
            "habit_calendar",
            "habit_insights"
        ]
    );
    for tool in &tools {
        assert_eq!(tool["inputSchema"]["type"], json!("object"));
    }
}

#[test]
fn test_protocol_errors() {
    let (_db, mut server) = server();

    let parse_error = tokio_test::block_on(server.handle_line("{not json")).unwrap();
    assert_eq!(parse_error.error.unwrap().code, -32700);

    let unknown = send(&mut server, json!({"jsonrpc": "2.0", "id": 3, "method": "resources/list"})).unwrap();
    assert_eq!(unknown.id, json!(3));
    assert_eq!(unknown.error.unwrap().code, -32601);

    let bad_args = call(&mut server, 4, "day_log", json!({"habits": "exercise"}));
    assert_eq!(bad_args.error.unwrap().code, -32602);

    let unknown_tool = call(&mut server, 5, "habit_delete", json!({}));
    assert_eq!(unknown_tool.error.unwrap().code, -32602);

    assert!(tokio_test::block_on(server.handle_line("   \n")).is_none());
}

#[test]
fn test_log_and_read_back_through_tools() {
    let (_db, mut server) = server();

    let created = call(
        &mut server,
        1,
        "habit_create",
        json!({"label": "Meditate", "category": "health", "emoji": "🧘"}),
    );
    let (is_error, text) = tool_text(&created);
    assert!(!is_error, "{}", text);
    let created: Value = serde_json::from_str(&text).unwrap();
    let habit_id = created["habit"]["id"].as_str().unwrap().to_string();

    let mut habits = serde_json::Map::new();
    habits.insert(habit_id.clone(), json!(true));
    for date in ["2025-09-01", "2025-09-02", "2025-09-03"] {
        let logged = call(
            &mut server,
            2,
            "day_log",
            json!({"date": date, "today": "2025-09-03", "habits": habits}),
        );
        assert!(!tool_text(&logged).0);
    }

    let status = call(
        &mut server,
        3,
        "habit_status",
        json!({"habit_id": habit_id, "today": "2025-09-03"}),
    );
    let (_, text) = tool_text(&status);
    let status: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(status["habits"][0]["streak"]["current"], json!(3));
    assert_eq!(status["habits"][0]["periods"]["month"]["percentage"], json!(100));

    let calendar = call(
        &mut server,
        4,
        "habit_calendar",
        json!({"habit_id": habit_id, "view": "week", "today": "2025-09-03"}),
    );
    let (_, text) = tool_text(&calendar);
    let calendar: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(calendar["days"].as_array().unwrap().len(), 7);
}

#[test]
fn test_tool_failures_are_error_results() {
    let (_db, mut server) = server();

    let response = call(
        &mut server,
        1,
        "habit_update",
        json!({"habit_id": "does-not-exist", "label": "Anything"}),
    );
    assert!(response.error.is_none());
    let (is_error, text) = tool_text(&response);
    assert!(is_error);
    assert!(text.contains("Habit not found"));

    let future = call(
        &mut server,
        2,
        "day_log",
        json!({"date": "2025-01-02", "today": "2025-01-01", "habits": {"exercise": true}}),
    );
    assert!(tool_text(&future).0);
}
