pub mod analyze_spiker;
pub mod methodology;
pub mod redact;

use serde::Serialize;
use tracing::{debug, info};

use crate::catalog::{Catalog, ANALYZE_SPIKER_TOOL};
use crate::config::ServerConfig;
use crate::error::ServiceError;
use crate::protocol::{
    InitializeParams, JsonRpcError, JsonRpcRequest, JsonRpcResponse, ResourceReadParams,
    ToolCallParams, ToolResult, PROTOCOL_VERSION,
};

/// Name advertised in `serverInfo` during the handshake.
pub const SERVER_NAME: &str = "SPIKER-Sensei";

/// Dispatch a JSON-RPC request to the appropriate handler.
///
/// Returns `None` for notifications (no response required).
pub async fn dispatch(
    req: &JsonRpcRequest,
    catalog: &Catalog,
    config: &ServerConfig,
) -> Option<JsonRpcResponse> {
    if req.is_notification() {
        debug!(method = %req.method, "Notification received");
        return None;
    }

    match req.method.as_str() {
        "initialize" => {
            if let Some(params) = req
                .params
                .clone()
                .and_then(|v| serde_json::from_value::<InitializeParams>(v).ok())
            {
                let client = params.client_info.as_ref();
                info!(
                    client_name = client.and_then(|c| c.name.as_deref()).unwrap_or("unknown"),
                    client_version = client.and_then(|c| c.version.as_deref()).unwrap_or("unknown"),
                    protocol_version = params.protocol_version.as_deref().unwrap_or("unspecified"),
                    "Client initializing"
                );
            }

            let result = serde_json::json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": {
                    "experimental": {},
                    "tools": {
                        "listChanged": false
                    },
                    "resources": {
                        "subscribe": false,
                        "listChanged": false
                    }
                },
                "serverInfo": {
                    "name": SERVER_NAME,
                    "version": env!("CARGO_PKG_VERSION")
                }
            });
            Some(JsonRpcResponse::success(req.id.clone(), result))
        }

        "ping" => Some(JsonRpcResponse::success(req.id.clone(), serde_json::json!({}))),

        "tools/list" => {
            info!("Listing tools...");
            let result = serde_json::json!({ "tools": catalog.tools() });
            Some(JsonRpcResponse::success(req.id.clone(), result))
        }

        "tools/call" => {
            let params: ToolCallParams = match parse_params(req, "tools/call") {
                Ok(p) => p,
                Err(err) => return Some(JsonRpcResponse::error(req.id.clone(), err)),
            };

            Some(respond(req, dispatch_tool_call(&params, catalog).await))
        }

        "resources/list" => {
            info!("Listing resources...");
            let result = serde_json::json!({ "resources": catalog.resources() });
            Some(JsonRpcResponse::success(req.id.clone(), result))
        }

        "resources/read" => {
            let params: ResourceReadParams = match parse_params(req, "resources/read") {
                Ok(p) => p,
                Err(err) => return Some(JsonRpcResponse::error(req.id.clone(), err)),
            };

            info!(uri = %params.uri, "Reading resource");
            let result = methodology::handle(&params.uri, catalog, &config.methodology_path).await;
            Some(respond(req, result))
        }

        _ => Some(JsonRpcResponse::error(
            req.id.clone(),
            JsonRpcError::method_not_found(&req.method),
        )),
    }
}

async fn dispatch_tool_call(params: &ToolCallParams, catalog: &Catalog) -> Result<ToolResult, ServiceError> {
    let safe_args = redact::loggable_arguments(params.arguments.as_ref());
    info!("Tool called: {} with arguments: {}", params.name, safe_args);

    match params.name.as_str() {
        ANALYZE_SPIKER_TOOL => analyze_spiker::handle(params.arguments.as_ref(), catalog).await,
        _ => Err(ServiceError::UnknownTool(params.name.clone())),
    }
}

fn parse_params<T: serde::de::DeserializeOwned>(req: &JsonRpcRequest, method: &str) -> Result<T, JsonRpcError> {
    match &req.params {
        Some(v) => serde_json::from_value(v.clone())
            .map_err(|e| JsonRpcError::invalid_params(format!("Invalid {method} params: {e}"))),
        None => Err(JsonRpcError::invalid_params(format!("Missing params for {method}"))),
    }
}

/// Wrap a handler outcome: success becomes `result`, failure becomes `error`.
fn respond<T: Serialize>(req: &JsonRpcRequest, outcome: Result<T, ServiceError>) -> JsonRpcResponse {
    match outcome {
        Ok(value) => {
            let result = serde_json::to_value(&value).expect("handler result must serialize to JSON Value");
            JsonRpcResponse::success(req.id.clone(), result)
        }
        Err(err) => {
            info!(code = ?err.code(), "Request failed: {err}");
            JsonRpcResponse::error(req.id.clone(), err.into())
        }
    }
}
