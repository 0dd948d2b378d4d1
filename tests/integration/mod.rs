//! Integration tests for the server, storage and MCP protocol

mod basic_integration;
mod mcp_server;
