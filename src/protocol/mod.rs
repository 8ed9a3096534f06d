pub mod request;
pub mod response;

pub use request::{
    AnalyzeSpikerArgs, ClientInfo, InitializeParams, JsonRpcRequest, ResourceReadParams, RpcId,
    ToolCallParams,
};
pub use response::{
    JsonRpcError, JsonRpcResponse, McpError, McpErrorCode, McpErrorResponse, ReadResourceResult,
    TextResourceContents, ToolResult, ToolResultContent,
};

/// MCP protocol revision implemented by this server (HTTP+SSE transport).
pub const PROTOCOL_VERSION: &str = "2024-11-05";
