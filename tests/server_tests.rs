//! End-to-end sessions through the newline-delimited JSON-RPC loop, driven
//! with in-memory buffers instead of stdio.

use std::path::Path;

use mip_mcp_server::config::ServerConfig;
use mip_mcp_server::memory::PromptLocale;
use mip_mcp_server::server::McpServer;
use serde_json::{json, Value};

fn test_config(dir: &Path) -> ServerConfig {
    ServerConfig {
        memory_path: dir.join("memory.json"),
        locale: PromptLocale::En,
    }
}

/// Feed `lines` to a fresh server and return every response line parsed.
async fn run_session(config: ServerConfig, lines: &[String]) -> Vec<Value> {
    let mut input = lines.join("\n");
    input.push('\n');

    let mut output: Vec<u8> = Vec::new();
    let mut server = McpServer::new(config);
    server.serve(input.as_bytes(), &mut output).await.unwrap();

    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

fn initialize(id: i64) -> String {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": "initialize",
        "params": {
            "protocolVersion": "2024-11-05",
            "clientInfo": { "name": "test", "version": "0" }
        }
    })
    .to_string()
}

fn ping(id: i64) -> String {
    json!({ "jsonrpc": "2.0", "id": id, "method": "ping" }).to_string()
}

fn initialized() -> String {
    json!({ "jsonrpc": "2.0", "method": "notifications/initialized" }).to_string()
}

#[tokio::test]
async fn full_session_update_then_context() {
    let tmp = tempfile::tempdir().unwrap();
    let lines = vec![
        initialize(1),
        initialized(),
        json!({
            "jsonrpc": "2.0", "id": 2, "method": "tools/call",
            "params": {
                "name": "mip_update_preference",
                "arguments": { "section": "identity", "key": "name", "value": "Ada" }
            }
        })
        .to_string(),
        json!({
            "jsonrpc": "2.0", "id": 3, "method": "tools/call",
            "params": { "name": "mip_get_context", "arguments": {} }
        })
        .to_string(),
    ];

    let responses = run_session(test_config(tmp.path()), &lines).await;
    assert_eq!(responses.len(), 3, "notification must not produce a response");

    assert_eq!(responses[0]["id"], json!(1));
    assert_eq!(responses[0]["result"]["serverInfo"]["name"], json!("mip-server"));
    assert_eq!(responses[0]["result"]["capabilities"]["resources"], json!({}));

    assert_eq!(
        responses[1]["result"]["content"][0]["text"],
        json!("Updated identity.name: undefined → \"Ada\"")
    );
    assert_eq!(
        responses[2]["result"]["content"][0]["text"],
        json!("## About this user (from MIP)\n- Name: Ada")
    );
}

#[tokio::test]
async fn requests_before_initialize_are_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    let lines = vec![
        json!({ "jsonrpc": "2.0", "id": 1, "method": "tools/list" }).to_string(),
        json!({ "jsonrpc": "2.0", "method": "notifications/initialized" }).to_string(),
        initialize(2),
        json!({ "jsonrpc": "2.0", "id": 3, "method": "ping" }).to_string(),
    ];

    let responses = run_session(test_config(tmp.path()), &lines).await;
    assert_eq!(responses.len(), 3);

    assert_eq!(responses[0]["id"], json!(1));
    assert_eq!(responses[0]["error"]["code"], json!(-32600));
    assert_eq!(responses[0]["error"]["message"], json!("Server not initialized"));

    assert_eq!(responses[1]["id"], json!(2));
    assert_eq!(responses[2]["result"], json!({}));
}

#[tokio::test]
async fn malformed_lines_get_parse_errors_and_blank_lines_are_skipped() {
    let tmp = tempfile::tempdir().unwrap();
    let lines = vec![
        initialize(1),
        String::new(),
        "{ this is not json".to_string(),
        json!({ "jsonrpc": "1.0", "id": 2, "method": "ping" }).to_string(),
    ];

    let responses = run_session(test_config(tmp.path()), &lines).await;
    assert_eq!(responses.len(), 3);

    assert_eq!(responses[1]["error"]["code"], json!(-32700));
    assert!(responses[1].get("id").is_none());

    assert_eq!(responses[2]["id"], json!(2));
    assert_eq!(responses[2]["error"]["code"], json!(-32600));
}

#[tokio::test]
async fn string_ids_are_echoed() {
    let tmp = tempfile::tempdir().unwrap();
    let lines = vec![
        initialize(1),
        json!({
            "jsonrpc": "2.0", "id": "read-1", "method": "resources/read",
            "params": { "uri": "mip://memory" }
        })
        .to_string(),
    ];

    let responses = run_session(test_config(tmp.path()), &lines).await;
    assert_eq!(responses[1]["id"], json!("read-1"));

    let text = responses[1]["result"]["contents"][0]["text"].as_str().unwrap();
    let doc: Value = serde_json::from_str(text).unwrap();
    assert_eq!(
        doc,
        json!({ "version": "0.1.0", "identity": {}, "preferences": {}, "custom": {} })
    );
}

#[tokio::test]
async fn empty_input_ends_cleanly() {
    let tmp = tempfile::tempdir().unwrap();
    let mut output: Vec<u8> = Vec::new();
    let mut server = McpServer::new(test_config(tmp.path()));

    server.serve(&b""[..], &mut output).await.unwrap();
    assert!(output.is_empty());
}

/// Run raw bytes through a fresh server and parse each response line.
async fn run_bytes(config: ServerConfig, input: &[u8]) -> Vec<Value> {
    let mut output: Vec<u8> = Vec::new();
    let mut server = McpServer::new(config);
    server.serve(input, &mut output).await.unwrap();

    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

#[tokio::test]
async fn oversized_line_gets_parse_error_and_session_continues() {
    let tmp = tempfile::tempdir().unwrap();

    let mut input = Vec::new();
    input.extend_from_slice(initialize(1).as_bytes());
    input.push(b'\n');
    input.extend_from_slice(b"{\"padding\":\"");
    input.extend(std::iter::repeat(b'x').take(1024 * 1024 + 16));
    input.extend_from_slice(b"\"}\n");
    input.extend_from_slice(ping(2).as_bytes());
    input.push(b'\n');

    let responses = run_bytes(test_config(tmp.path()), &input).await;
    assert_eq!(responses.len(), 3);

    assert_eq!(responses[1]["error"]["code"], json!(-32700));
    assert!(responses[1].get("id").is_none());

    assert_eq!(responses[2]["id"], json!(2));
    assert_eq!(responses[2]["result"], json!({}));
}

#[tokio::test]
async fn non_utf8_line_gets_parse_error() {
    let tmp = tempfile::tempdir().unwrap();

    let mut input = Vec::new();
    input.extend_from_slice(initialize(1).as_bytes());
    input.push(b'\n');
    input.extend_from_slice(&[0xff, 0xfe, b'{', 0xc3, b'}', b'\n']);
    input.extend_from_slice(ping(2).as_bytes());
    input.push(b'\n');

    let responses = run_bytes(test_config(tmp.path()), &input).await;
    assert_eq!(responses.len(), 3);

    assert_eq!(responses[1]["error"]["code"], json!(-32700));
    assert_eq!(responses[1]["error"]["message"], json!("Parse error"));
    assert!(responses[1].get("id").is_none());
    assert_eq!(responses[2]["id"], json!(2));
}
