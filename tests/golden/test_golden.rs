use std::fs;
use std::path::PathBuf;

use serde_json::{json, Value};

use spiker_mcp_server::catalog::Catalog;
use spiker_mcp_server::config::ServerConfig;
use spiker_mcp_server::handlers;
use spiker_mcp_server::protocol::{JsonRpcRequest, RpcId};

fn expected_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/golden/expected")
        .join(name)
}

fn read_expected(name: &str) -> String {
    fs::read_to_string(expected_path(name))
        .expect("expected file missing")
        .trim_end()
        .to_string()
}

fn read_expected_json(name: &str) -> Value {
    serde_json::from_str(&read_expected(name)).expect("expected file is not JSON")
}

fn shipped_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".into(),
        port: 0,
        methodology_path: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("SPIKE_METHODOLOGY.md"),
    }
}

async fn result_of(method: &str, params: Option<Value>) -> Value {
    let req = JsonRpcRequest {
        jsonrpc: "2.0".into(),
        id: Some(RpcId::Number(1)),
        method: method.into(),
        params,
    };
    handlers::dispatch(&req, &Catalog::new(), &shipped_config())
        .await
        .unwrap()
        .result
        .expect("expected a successful result")
}

#[tokio::test]
async fn golden_analyze_spiker_prompt() {
    let result = result_of(
        "tools/call",
        Some(json!({
            "name": "analyze_spiker",
            "arguments": {
                "code": "fn refund(id: u64) -> Result<(), Error> {\n    db::delete(id)\n}",
                "context": "payments-service: handles card refunds"
            }
        })),
    )
    .await;

    let text = result["content"][0]["text"].as_str().unwrap();
    assert!(text.starts_with('\n'), "Prompt opens with a blank line");
    assert_eq!(text.trim_end(), read_expected("analyze_spiker_prompt.txt"));
}

#[tokio::test]
async fn golden_tools_list() {
    let result = result_of("tools/list", None).await;
    assert_eq!(result, read_expected_json("tools_list.json"));
}

#[tokio::test]
async fn golden_resources_list() {
    let result = result_of("resources/list", None).await;
    assert_eq!(result, read_expected_json("resources_list.json"));
}

#[tokio::test]
async fn shipped_methodology_is_served_verbatim() {
    let on_disk = fs::read_to_string(shipped_config().methodology_path).unwrap();
    let result = result_of("resources/read", Some(json!({ "uri": "spiker://docs" }))).await;

    assert_eq!(result["contents"][0]["text"].as_str().unwrap(), on_disk);
    for pillar in ["Spike", "Purge", "Isolate", "Kinetic", "Enzymatic", "Refine"] {
        assert!(on_disk.contains(pillar), "Methodology must describe the {pillar} pillar");
    }
}
