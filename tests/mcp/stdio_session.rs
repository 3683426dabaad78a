use serde_json::{Value, json};
use tokio::io::BufReader;

use super::journal_harness::Harness;
use wellness_companion::config::ServerConfig;
use wellness_companion::mcp::{MCP_PROTOCOL_VERSION, McpServer};
use wellness_companion::tools::build_registry;

fn server(h: &Harness) -> McpServer {
    McpServer::new(build_registry(&h.journal), ServerConfig::default())
}

fn request(id: u64, method: &str, params: Value) -> String {
    let mut line = json!({"jsonrpc": "2.0", "id": id, "method": method, "params": params})
        .to_string();
    line.push('\n');
    line
}

async fn run_session(server: &McpServer, input: &str) -> Vec<Value> {
    let mut output = Vec::new();
    server
        .serve(input.as_bytes(), &mut output)
        .await
        .expect("session should run to EOF");
    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).expect("each line is one JSON message"))
        .collect()
}

fn tool_payload(response: &Value) -> Value {
    let text = response["result"]["content"][0]["text"].as_str().unwrap();
    serde_json::from_str(text).unwrap()
}

#[tokio::test]
async fn exact_bytes_for_ping() {
    let h = Harness::new();
    let server = server(&h);

    let reader = tokio_test::io::Builder::new()
        .read(b"{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"ping\"}\n")
        .build();
    let writer = tokio_test::io::Builder::new()
        .write(b"{\"id\":1,\"jsonrpc\":\"2.0\",\"result\":{}}\n")
        .build();

    server.serve(BufReader::new(reader), writer).await.unwrap();
}

#[tokio::test]
async fn handshake_then_list() {
    let h = Harness::new();
    let server = server(&h);
    let input = [
        request(1, "initialize", json!({"protocolVersion": MCP_PROTOCOL_VERSION})),
        "{\"jsonrpc\":\"2.0\",\"method\":\"notifications/initialized\"}\n".to_string(),
        request(2, "tools/list", json!({})),
    ]
    .concat();

    let responses = run_session(&server, &input).await;
    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0]["result"]["protocolVersion"], MCP_PROTOCOL_VERSION);
    assert_eq!(responses[0]["result"]["serverInfo"]["name"], "Wellness-Companion");

    let tools = responses[1]["result"]["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 12);
    let names: Vec<_> = tools.iter().map(|t| t["name"].as_str().unwrap()).collect();
    assert!(names.contains(&"set_checkin_field"));
    assert!(names.contains(&"get_checkin_file_info"));
    assert!(tools.iter().all(|t| t["inputSchema"]["type"] == "object"));
}

#[tokio::test]
async fn full_checkin_over_the_wire() {
    let h = Harness::new();
    let server = server(&h);
    let call = |id, name: &str, arguments: Value| {
        request(id, "tools/call", json!({"name": name, "arguments": arguments}))
    };
    let input = [
        call(1, "set_checkin_field", json!({"field": "mood_score", "value": 8})),
        call(2, "set_checkin_field", json!({"field": "objectives", "value": "walk, read"})),
        call(3, "create_tasks_from_objectives", json!({})),
        call(4, "save_checkin", json!({"client_entry_id": "wire-1"})),
        call(5, "save_checkin", json!({"client_entry_id": "wire-1"})),
        call(6, "summary", json!({})),
        call(7, "mark_task_done", json!({"task_id": "missing"})),
    ]
    .concat();

    let responses = run_session(&server, &input).await;
    assert_eq!(responses.len(), 7);
    for (n, response) in responses.iter().enumerate() {
        assert_eq!(response["id"], n + 1);
    }

    assert_eq!(tool_payload(&responses[0])["updatedState"]["mood_score"], 8);
    assert_eq!(tool_payload(&responses[2])["count"], 2);
    assert_eq!(tool_payload(&responses[3])["success"], true);
    assert_eq!(tool_payload(&responses[4])["info"], "already_saved");
    assert_eq!(tool_payload(&responses[5])["avg_mood_score"], 8.0);

    assert_eq!(responses[6]["result"]["isError"], true);
    assert_eq!(tool_payload(&responses[6])["error"], "task_not_found");
    assert!(responses[..6].iter().all(|r| r["result"]["isError"] == false));
}

#[tokio::test]
async fn bad_lines_do_not_stop_the_session() {
    let h = Harness::new();
    let server = server(&h);
    let input = [
        "garbage\n".to_string(),
        request(1, "resources/list", json!({})),
        request(2, "tools/call", json!({"arguments": {}})),
        request(3, "ping", json!({})),
    ]
    .concat();

    let responses = run_session(&server, &input).await;
    assert_eq!(responses.len(), 4);
    assert_eq!(responses[0]["error"]["code"], -32700);
    assert_eq!(responses[1]["error"]["code"], -32601);
    assert_eq!(responses[2]["error"]["code"], -32602);
    assert_eq!(responses[3]["result"], json!({}));
}

#[cfg(unix)]
#[tokio::test]
async fn storage_fault_is_internal_error_for_that_call_only() {
    let h = Harness::new();
    let server = server(&h);

    // A directory where the history file should go makes the rename fail.
    let log = h.tmp.path().join("wellness_log.json");
    std::fs::remove_file(&log).unwrap();
    std::fs::create_dir(&log).unwrap();
    std::fs::write(log.join("occupied"), "x").unwrap();

    let input = [
        request(1, "tools/call", json!({"name": "save_checkin", "arguments": {}})),
        request(2, "tools/call", json!({"name": "get_current_checkin"})),
    ]
    .concat();

    let responses = run_session(&server, &input).await;
    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0]["error"]["code"], -32603);
    assert!(responses[1]["result"]["isError"] == false);
    assert_eq!(tool_payload(&responses[1])["meta"]["status"], "in_progress");
}
