use std::path::PathBuf;

use crate::protocol::{JsonRpcError, McpErrorCode, McpErrorResponse};

/// Failure raised by a tool or resource handler.
///
/// Handlers never recover from these locally; dispatch turns them into a
/// JSON-RPC error response for the caller.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
    #[error("Unknown resource: {0}")]
    UnknownResource(String),
    #[error("Methodology file not found.")]
    ResourceNotFound(PathBuf),
    #[error("Invalid arguments for {tool}: {detail}")]
    InvalidArguments { tool: String, detail: String },
    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ServiceError {
    pub fn code(&self) -> McpErrorCode {
        match self {
            Self::UnknownTool(_) => McpErrorCode::UnknownTool,
            Self::UnknownResource(_) => McpErrorCode::UnknownResource,
            Self::ResourceNotFound(_) => McpErrorCode::ResourceNotFound,
            Self::InvalidArguments { .. } => McpErrorCode::InvalidArguments,
            Self::Io { .. } => McpErrorCode::IoError,
        }
    }
}

impl From<ServiceError> for McpErrorResponse {
    fn from(err: ServiceError) -> Self {
        // Filesystem paths stay in the server log, not in the client-visible message.
        let message = match &err {
            ServiceError::Io { .. } => "I/O error occurred".to_string(),
            other => other.to_string(),
        };
        McpErrorResponse::new(err.code(), message)
    }
}

impl From<ServiceError> for JsonRpcError {
    fn from(err: ServiceError) -> Self {
        McpErrorResponse::from(err).into()
    }
}
