use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;

use xbar::api::{AppState, app};
use xbar::config::AppConfig;
use xbar::telemetry::init_tracing;

/// Serve X-bar control charts over HTTP
#[derive(Parser, Debug)]
#[command(name = "xbar-server", version, about)]
struct Args {
    /// TOML config file (defaults to ./xbar.toml when present)
    #[arg(short, long, env = "XBAR_CONFIG")]
    config: Option<PathBuf>,

    /// Bind address, overrides server.host
    #[arg(long)]
    host: Option<IpAddr>,

    /// Bind port, overrides server.port
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = AppConfig::load_from(args.config.as_deref())
        .context("failed to load configuration")?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    init_tracing(&config.logging).context("failed to initialize tracing")?;

    let addr: SocketAddr = config.server.bind_addr();
    tracing::info!(
        factor = ?config.chart.factor,
        clamp_lcl_at_zero = config.chart.clamp_lcl_at_zero,
        seed = ?config.generator.seed,
        "starting {} v{}",
        xbar::NAME,
        xbar::VERSION
    );

    let state = AppState::from_config(config).context("failed to build sample generator")?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
