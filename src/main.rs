use spiker_mcp_server::config::ServerConfig;
use spiker_mcp_server::server::McpServer;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stdout))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match ServerConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("spiker-mcp-server: configuration error: {e}");
            std::process::exit(1);
        }
    };

    info!("Starting spiker-mcp-server v{}", env!("CARGO_PKG_VERSION"));

    let server = McpServer::new(config);
    if let Err(e) = server.run().await {
        error!("fatal error: {e}");
        std::process::exit(1);
    }
}
