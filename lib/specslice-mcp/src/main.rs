#![allow(missing_docs)]
use anyhow::Result;
use specslice_mcp::SpecSliceServer;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries the MCP transport; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    info!("starting OpenAPI slice server on stdio");
    SpecSliceServer::new().serve_stdio().await?;
    info!("Bye!");
    Ok(())
}
