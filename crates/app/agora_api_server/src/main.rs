//! Agora API server binary.
//!
//! Connects to PostgreSQL, applies migrations and serves the HTTP API until
//! Ctrl-C.

use std::sync::Arc;

use agora_api::AppState;
use agora_api::config::{ApiConfig, DEFAULT_TOKEN_TTL_SECS, MAX_TOKEN_TTL_SECS};
use agora_core::db::PgStore;
use clap::Parser;
use tracing::{info, warn};

/// CLI arguments for the API server.
#[derive(Parser, Debug)]
#[command(name = "agora_api_server", about = "Agora forum and chat API server")]
struct Args {
    /// Port to listen on (0 = ephemeral). Overrides `BIND_ADDR` when set.
    #[arg(long)]
    port: Option<u16>,

    /// PostgreSQL connection URL.
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "postgres://localhost:5432/agora"
    )]
    database_url: String,

    /// Maximum number of database connections in the pool.
    #[arg(long, default_value_t = 5)]
    max_connections: u32,

    /// Lifetime of issued tokens, in seconds.
    #[arg(
        long,
        env = "TOKEN_TTL_SECS",
        default_value_t = DEFAULT_TOKEN_TTL_SECS,
        value_parser = clap::value_parser!(i64).range(1..=MAX_TOKEN_TTL_SECS)
    )]
    token_ttl_secs: i64,

    /// Username of the bootstrap administrator.
    #[arg(long, env = "ADMIN_USERNAME")]
    admin_username: Option<String>,

    /// Password of the bootstrap administrator.
    #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
    admin_password: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,agora_api=debug,agora_core=debug".into()),
        )
        .init();

    let args = Args::parse();

    let mut config = ApiConfig::from_env();
    if let Some(port) = args.port {
        config.bind_addr = format!("127.0.0.1:{port}");
    }
    config.database_url = args.database_url;
    config.token_ttl_secs = args.token_ttl_secs;

    info!(
        bind_addr = %config.bind_addr,
        max_connections = args.max_connections,
        "starting agora_api_server"
    );

    let store = PgStore::connect(&config.database_url, args.max_connections).await?;

    info!("running database migrations");
    agora_api::migrate(store.pool()).await?;

    let state = AppState::new(Arc::new(store), config.clone());

    match (args.admin_username, args.admin_password) {
        (Some(username), Some(password)) => {
            state.auth.ensure_admin(&username, &password).await?;
        }
        (Some(_), None) | (None, Some(_)) => {
            warn!("admin bootstrap needs both --admin-username and --admin-password, skipping");
        }
        (None, None) => {}
    }

    let app = agora_api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %listener.local_addr()?, "REST API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
