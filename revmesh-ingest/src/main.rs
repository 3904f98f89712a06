//! RevMesh ingest tool - Main entry point

use anyhow::Result;
use clap::Parser;
use revmesh_common::config::load_toml_config;
use revmesh_ingest::{run, Cli};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Bootstrap config decides the default log level, so it loads before tracing
    let toml_config = load_toml_config(cli.config.as_deref())?;

    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&toml_config.logging.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting revmesh-ingest v{}", env!("CARGO_PKG_VERSION"));

    run(cli, &toml_config)
}
