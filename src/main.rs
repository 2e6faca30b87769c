//! vaas-monitor: live GPU and camera telemetry from the VaaS admin API.
//!
//! Run with:  `RUST_LOG=info vaas-monitor [path/to/monitor.toml]`

mod app;
mod command;

use anyhow::Result;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // RUST_LOG controls verbosity (default: info).
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("vaas-monitor v{} starting", env!("CARGO_PKG_VERSION"));

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(vaas_config::default_path);

    app::run(config_path).await
}
