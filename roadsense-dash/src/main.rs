//! roadsense-dash - Road-event map dashboard
//!
//! Fetches the Ontario 511 road-event feed, classifies each event and serves
//! a clustered, date-filtered map of Toronto road events.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use roadsense_common::config::{ConfigOverrides, ConfigResolver, ConfigSource};
use roadsense_common::feed::{CachedSource, FeedClient};
use roadsense_common::IngestOptions;
use roadsense_dash::{build_router, AppState};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Command-line arguments for roadsense-dash
#[derive(Parser, Debug)]
#[command(name = "roadsense-dash")]
#[command(about = "Interactive map of live road events")]
#[command(version)]
struct Args {
    /// Path to config.toml (default: platform config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to bind
    #[arg(long)]
    bind: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Road-event feed URL
    #[arg(long)]
    feed_url: Option<String>,

    /// Fetch cache lifetime in seconds (0 disables caching)
    #[arg(long)]
    cache_ttl_secs: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Resolve configuration first so the log level can come from it
    let resolved = ConfigResolver::new(ConfigOverrides {
        config_path: args.config,
        bind: args.bind,
        port: args.port,
        feed_url: args.feed_url,
        cache_ttl_secs: args.cache_ttl_secs,
    })
    .resolve()
    .context("Failed to load configuration")?;
    let config = resolved.config;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting RoadSense dashboard (roadsense-dash) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    match &resolved.source {
        ConfigSource::File(path) => info!("Config file: {}", path.display()),
        ConfigSource::Defaults => warn!("No config file found; using compiled defaults"),
    }

    config.validate().context("Invalid configuration")?;

    let client = FeedClient::new(&config.feed).context("Failed to build feed client")?;
    info!("Feed: {}", client.url());

    let ttl = config.feed.cache_ttl();
    if ttl.is_zero() {
        info!("Fetch cache disabled");
    } else {
        info!("Fetch cache TTL: {}s", ttl.as_secs());
    }
    let feed = Arc::new(CachedSource::new(Arc::new(client), ttl));

    let ingest = IngestOptions {
        display_offset: config.feed.display_offset(),
    };
    if let Some(offset) = ingest.display_offset {
        info!("Dating offset-bearing timestamps in UTC{}", offset);
    }

    let state = AppState::new(feed, ingest, config.map.clone());
    let app = build_router(state);

    let addr = format!("{}:{}", config.server.bind, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("roadsense-dash listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("roadsense-dash stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
