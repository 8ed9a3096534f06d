use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::config::ServerConfig;
use crate::handlers;
use crate::protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};

/// A message queued for a session by the POST endpoint.
#[derive(Debug, Clone)]
pub enum SessionMessage {
    /// A well-formed JSON-RPC request or notification.
    Request(JsonRpcRequest),
    /// A body that could not be parsed; answered with a parse error in order.
    Malformed,
}

/// Protocol loop for a single SSE connection.
///
/// Messages are handled one at a time, so responses leave in the order
/// their requests arrived.
pub struct Session {
    id: Uuid,
    catalog: Arc<Catalog>,
    config: Arc<ServerConfig>,
    initialized: bool,
}

impl Session {
    pub fn new(id: Uuid, catalog: Arc<Catalog>, config: Arc<ServerConfig>) -> Self {
        Self {
            id,
            catalog,
            config,
            initialized: false,
        }
    }

    /// Run until the inbound queue closes or the outbound stream goes away.
    pub async fn run(
        mut self,
        mut inbound: mpsc::Receiver<SessionMessage>,
        outbound: mpsc::Sender<JsonRpcResponse>,
    ) {
        while let Some(message) = inbound.recv().await {
            let Some(resp) = self.handle(message).await else {
                continue;
            };

            if outbound.send(resp).await.is_err() {
                debug!(session_id = %self.id.simple(), "Event stream dropped; stopping session");
                break;
            }
        }

        debug!(session_id = %self.id.simple(), "Session loop finished");
    }

    /// Handle one inbound message, returning the response to emit (if any).
    pub async fn handle(&mut self, message: SessionMessage) -> Option<JsonRpcResponse> {
        let req = match message {
            SessionMessage::Request(req) => req,
            SessionMessage::Malformed => {
                return Some(JsonRpcResponse::error(None, JsonRpcError::parse_error()));
            }
        };

        // Validate jsonrpc version
        if req.jsonrpc != "2.0" {
            warn!(session_id = %self.id.simple(), version = %req.jsonrpc, "Rejecting non-2.0 request");
            return Some(JsonRpcResponse::error(req.id.clone(), JsonRpcError::invalid_request()));
        }

        // Initialization gate: only `initialize` is allowed before handshake completes
        if !self.initialized && req.method != "initialize" {
            if req.is_notification() {
                return None;
            }
            return Some(JsonRpcResponse::error(
                req.id.clone(),
                JsonRpcError::invalid_request_with("Server not initialized"),
            ));
        }

        let resp = handlers::dispatch(&req, &self.catalog, &self.config).await;

        // Only a completed handshake opens the gate; an `initialize` sent as a
        // notification gets no reply and leaves the session uninitialized.
        if req.method == "initialize" && resp.as_ref().is_some_and(|r| r.error.is_none()) {
            self.initialized = true;
        }

        resp
    }
}
