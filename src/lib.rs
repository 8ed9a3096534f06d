//! MCP server for the S.P.I.K.E.R. code-audit methodology.
//!
//! Exposes the `analyze_spiker` tool and the `spiker://docs` resource over
//! the MCP HTTP+SSE transport (`GET /sse`, `POST /messages/`).

pub mod catalog;
pub mod config;
pub mod error;
pub mod handlers;
pub mod protocol;
pub mod server;
pub mod transport;

pub mod schema;
