use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::catalog::Catalog;
use crate::config::ServerConfig;
use crate::transport::{self, AppState};

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// MCP server that communicates over HTTP using server-sent events.
pub struct McpServer {
    state: AppState,
}

impl McpServer {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            state: AppState::new(Catalog::new(), config),
        }
    }

    /// Router with request tracing applied.
    pub fn router(&self) -> Router {
        transport::router(self.state.clone()).layer(TraceLayer::new_for_http())
    }

    pub async fn run(self) -> Result<(), ServerError> {
        let addr = self.state.config.bind_address();
        let listener = TcpListener::bind(addr.as_str())
            .await
            .map_err(|source| ServerError::Bind { addr: addr.clone(), source })?;

        info!(
            methodology = %self.state.config.methodology_path.display(),
            "Listening on http://{addr}"
        );

        axum::serve(listener, self.router())
            .await
            .map_err(ServerError::Serve)
    }
}
