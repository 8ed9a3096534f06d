use std::convert::Infallible;

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::{self, Stream, StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::session::{Session, SessionMessage};
use super::{AppState, MESSAGES_PATH};
use crate::protocol::JsonRpcRequest;

/// Capacity of each per-session queue.
const SESSION_QUEUE_CAPACITY: usize = 32;

/// Query string accepted by the message endpoint.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub session_id: Option<String>,
}

/// `GET /sse` — open a streaming session.
///
/// The first event tells the client where to POST its messages; every
/// response after that arrives as a `message` event.
pub async fn handle_sse(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let session_id = Uuid::new_v4();
    let (inbound_tx, inbound_rx) = mpsc::channel(SESSION_QUEUE_CAPACITY);
    let (outbound_tx, outbound_rx) = mpsc::channel(SESSION_QUEUE_CAPACITY);

    let guard = state.sessions.register(session_id, inbound_tx);
    info!(session_id = %session_id.simple(), "SSE session opened");

    let session = Session::new(session_id, state.catalog.clone(), state.config.clone());
    tokio::spawn(session.run(inbound_rx, outbound_tx));

    let endpoint = format!("{MESSAGES_PATH}?session_id={}", session_id.simple());
    let endpoint_event = stream::once(async move { Event::default().event("endpoint").data(endpoint) });

    let messages = ReceiverStream::new(outbound_rx).filter_map(|resp| async move {
        match serde_json::to_string(&resp) {
            Ok(json) => Some(Event::default().event("message").data(json)),
            Err(e) => {
                error!("Failed to serialize response: {e}");
                None
            }
        }
    });

    // The guard lives inside the stream, so the session is unregistered
    // however the stream ends.
    let events = endpoint_event.chain(messages).map(move |event| {
        let _guard = &guard;
        Ok::<_, Infallible>(event)
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}

/// `POST /messages/?session_id=<hex>` — submit a message into an open session.
pub async fn handle_post_message(
    State(state): State<AppState>,
    Query(query): Query<MessageQuery>,
    body: Bytes,
) -> (StatusCode, &'static str) {
    let Some(raw_id) = query.session_id else {
        warn!("Message received without session_id");
        return (StatusCode::BAD_REQUEST, "session_id is required");
    };

    let Ok(session_id) = Uuid::try_parse(&raw_id) else {
        warn!(session_id = %raw_id, "Received invalid session ID");
        return (StatusCode::BAD_REQUEST, "Invalid session ID");
    };

    let Some(inbound) = state.sessions.get(&session_id) else {
        warn!(session_id = %session_id.simple(), "Could not find session");
        return (StatusCode::NOT_FOUND, "Could not find session");
    };

    let (message, status) = match parse_message(&body) {
        Ok(Some(req)) => (SessionMessage::Request(req), (StatusCode::ACCEPTED, "Accepted")),
        Ok(None) => {
            debug!(session_id = %session_id.simple(), "Ignoring client response message");
            return (StatusCode::ACCEPTED, "Accepted");
        }
        Err(e) => {
            warn!(session_id = %session_id.simple(), "Failed to parse message: {e}");
            (SessionMessage::Malformed, (StatusCode::BAD_REQUEST, "Could not parse message"))
        }
    };

    if inbound.send(message).await.is_err() {
        return (StatusCode::NOT_FOUND, "Could not find session");
    }

    status
}

/// Parse a POSTed body.
///
/// Returns `Ok(None)` for JSON-RPC responses sent by the client; this server
/// never issues requests, so those carry nothing to act on.
fn parse_message(body: &[u8]) -> Result<Option<JsonRpcRequest>, serde_json::Error> {
    let value: serde_json::Value = serde_json::from_slice(body)?;

    let is_response = value.get("method").is_none()
        && (value.get("result").is_some() || value.get("error").is_some());
    if is_response {
        return Ok(None);
    }

    serde_json::from_value(value).map(Some)
}
