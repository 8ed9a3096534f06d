//! Session loop tests: initialization gate, ordering, and shutdown.
//!
//! Sessions are driven directly through their channels, without HTTP.

use std::sync::Arc;

use serde_json::json;
use tokio::sync::mpsc;
use uuid::Uuid;

use spiker_mcp_server::catalog::Catalog;
use spiker_mcp_server::config::ServerConfig;
use spiker_mcp_server::protocol::{JsonRpcRequest, RpcId};
use spiker_mcp_server::transport::{Session, SessionMessage, SessionRegistry};

fn new_session() -> Session {
    let config = ServerConfig {
        host: "127.0.0.1".into(),
        port: 0,
        methodology_path: "does-not-exist.md".into(),
    };
    Session::new(Uuid::new_v4(), Arc::new(Catalog::new()), Arc::new(config))
}

fn message(id: Option<i64>, method: &str, params: Option<serde_json::Value>) -> SessionMessage {
    SessionMessage::Request(JsonRpcRequest {
        jsonrpc: "2.0".into(),
        id: id.map(RpcId::Number),
        method: method.into(),
        params,
    })
}

fn initialize(id: i64) -> SessionMessage {
    message(
        Some(id),
        "initialize",
        Some(json!({ "protocolVersion": "2024-11-05", "capabilities": {} })),
    )
}

#[tokio::test]
async fn requests_before_initialize_are_rejected() {
    let mut session = new_session();

    let resp = session.handle(message(Some(1), "tools/list", None)).await.unwrap();
    let error = resp.error.unwrap();
    assert_eq!(error.code, -32600);
    assert_eq!(error.message, "Server not initialized");

    // Notifications before the handshake are dropped silently.
    assert!(session
        .handle(message(None, "notifications/initialized", None))
        .await
        .is_none());
}

#[tokio::test]
async fn initialize_opens_the_gate() {
    let mut session = new_session();

    let init = session.handle(initialize(1)).await.unwrap();
    assert!(init.error.is_none());

    let list = session.handle(message(Some(2), "tools/list", None)).await.unwrap();
    assert_eq!(list.result.unwrap()["tools"][0]["name"], "analyze_spiker");
}

#[tokio::test]
async fn initialize_notification_does_not_open_the_gate() {
    let mut session = new_session();

    let init = message(
        None,
        "initialize",
        Some(json!({ "protocolVersion": "2024-11-05", "capabilities": {} })),
    );
    assert!(session.handle(init).await.is_none(), "Notifications never get a reply");

    let resp = session.handle(message(Some(2), "tools/list", None)).await.unwrap();
    assert!(resp.result.is_none());
    assert_eq!(resp.error.unwrap().message, "Server not initialized");
}

#[tokio::test]
async fn wrong_jsonrpc_version_is_invalid_request() {
    let mut session = new_session();

    let resp = session
        .handle(SessionMessage::Request(JsonRpcRequest {
            jsonrpc: "1.0".into(),
            id: Some(RpcId::Str("abc".into())),
            method: "initialize".into(),
            params: None,
        }))
        .await
        .unwrap();

    assert_eq!(resp.id, Some(RpcId::Str("abc".into())));
    assert_eq!(resp.error.unwrap().code, -32600);
}

#[tokio::test]
async fn malformed_message_yields_parse_error() {
    let mut session = new_session();

    let resp = session.handle(SessionMessage::Malformed).await.unwrap();
    assert!(resp.id.is_none());
    assert_eq!(resp.error.unwrap().code, -32700);
}

#[tokio::test]
async fn run_emits_responses_in_receipt_order() {
    let (inbound_tx, inbound_rx) = mpsc::channel(16);
    let (outbound_tx, mut outbound_rx) = mpsc::channel(16);
    let task = tokio::spawn(new_session().run(inbound_rx, outbound_tx));

    inbound_tx.send(initialize(1)).await.unwrap();
    inbound_tx.send(message(None, "notifications/initialized", None)).await.unwrap();
    for id in 2..=6 {
        let params = json!({ "name": "analyze_spiker", "arguments": { "code": format!("snippet {id}") } });
        inbound_tx.send(message(Some(id), "tools/call", Some(params))).await.unwrap();
    }
    drop(inbound_tx);

    let mut ids = Vec::new();
    while let Some(resp) = outbound_rx.recv().await {
        ids.push(resp.id.clone());
        if let Some(RpcId::Number(n)) = resp.id {
            if n >= 2 {
                let text = resp.result.unwrap()["content"][0]["text"].as_str().unwrap().to_string();
                assert!(text.contains(&format!("snippet {n}")));
            }
        }
    }

    let expected: Vec<Option<RpcId>> = (1..=6).map(|n| Some(RpcId::Number(n))).collect();
    assert_eq!(ids, expected, "Notification must not produce a response; order must hold");

    task.await.unwrap();
}

#[tokio::test]
async fn dropping_registry_entry_ends_session() {
    let registry = SessionRegistry::new();
    let id = Uuid::new_v4();
    let (inbound_tx, inbound_rx) = mpsc::channel(4);
    let (outbound_tx, _outbound_rx) = mpsc::channel(4);

    let guard = registry.register(id, inbound_tx);
    assert_eq!(guard.id(), id);
    let task = tokio::spawn(new_session().run(inbound_rx, outbound_tx));

    assert_eq!(registry.len(), 1);
    assert!(registry.get(&id).is_some());

    drop(guard);

    assert!(registry.is_empty(), "Guard must unregister the session");
    task.await.expect("session loop should finish once its inbound queue closes");
}

#[tokio::test]
async fn session_stops_when_event_stream_is_gone() {
    let (inbound_tx, inbound_rx) = mpsc::channel(4);
    let (outbound_tx, outbound_rx) = mpsc::channel(4);
    drop(outbound_rx);

    let task = tokio::spawn(new_session().run(inbound_rx, outbound_tx));
    inbound_tx.send(initialize(1)).await.unwrap();

    // The sender is still alive; the loop must exit on its own.
    task.await.unwrap();
    drop(inbound_tx);
}
