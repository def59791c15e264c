//! mend - AI-powered code remediation with security validation.
//!
//! Accepts vulnerability reports over HTTP, asks a local model for a
//! fixed snippet, and verifies each candidate with an external security
//! scanner before returning it.

use anyhow::Result;
use clap::Parser;
use mend_adapters::Config;
use mend_app::routes;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "mend",
    about = "AI-powered code remediation service",
    long_about = "Generates secure replacement code for reported vulnerabilities\n\
                  and verifies every candidate with a security scanner before\n\
                  returning it.",
    version
)]
struct Args {
    /// Bind address (overrides MEND_HOST)
    #[arg(long)]
    host: Option<String>,

    /// Bind port (overrides MEND_PORT)
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let mut config = Config::from_env();
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    info!("model endpoint: {}", config.generator.base_url());
    info!("scanner path: {}", config.scanner.path.display());
    info!("max retries: {}", config.remediation.max_retries);
    info!(
        "supported languages: {}",
        config.remediation.supported_languages()
    );

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let state = Arc::new(routes::AppState::new(config)?);
    let app = routes::build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
