use clap::Parser;
use tracing_subscriber::EnvFilter;

use mip_mcp_server::config::{Cli, ServerConfig};
use mip_mcp_server::server::McpServer;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    // stdout carries the protocol; logs go to stderr only.
    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = match ServerConfig::from_cli(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("mip-mcp-server: configuration error: {e}");
            std::process::exit(1);
        }
    };

    let mut server = McpServer::new(config);
    if let Err(e) = server.run().await {
        eprintln!("mip-mcp-server: fatal error: {e}");
        std::process::exit(1);
    }
}
