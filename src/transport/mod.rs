//! HTTP+SSE transport.
//!
//! `GET /sse` opens a session and streams responses back as server-sent
//! events; `POST /messages/` feeds client messages into that session.

pub mod registry;
pub mod session;
pub mod sse;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::catalog::Catalog;
use crate::config::ServerConfig;

pub use registry::{SessionGuard, SessionRegistry};
pub use session::{Session, SessionMessage};

/// Path of the streaming endpoint.
pub const SSE_PATH: &str = "/sse";

/// Path clients POST protocol messages to.
pub const MESSAGES_PATH: &str = "/messages/";

/// Maximum bytes per posted JSON-RPC message (1 MiB).
pub const MAX_MESSAGE_BYTES: usize = 1024 * 1024;

/// State shared by the HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub config: Arc<ServerConfig>,
    pub sessions: SessionRegistry,
}

impl AppState {
    pub fn new(catalog: Catalog, config: ServerConfig) -> Self {
        Self {
            catalog: Arc::new(catalog),
            config: Arc::new(config),
            sessions: SessionRegistry::new(),
        }
    }
}

/// Build the two-route transport router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(SSE_PATH, get(sse::handle_sse))
        .route(MESSAGES_PATH, post(sse::handle_post_message))
        .layer(DefaultBodyLimit::max(MAX_MESSAGE_BYTES))
        .with_state(state)
}
