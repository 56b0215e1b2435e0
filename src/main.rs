//! dados-api server binary.
//!
//! Starts an axum HTTP server with structured logging, a degraded-tolerant
//! database pool, and graceful shutdown on SIGTERM/SIGINT.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use dados_api::api::{AppState, app};
use dados_api::config::AppConfig;
use dados_api::pool::DbPool;

#[tokio::main]
async fn main() {
    // Best-effort .env load for local development.
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();

    // Initialize tracing
    let filter =
        EnvFilter::try_new(&config.logging.level).unwrap_or_else(|_| EnvFilter::new("info"));

    if config.logging.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    // Initialize the database pool. A failed initialization is permanent for
    // the process lifetime; the server still starts and answers /dados with
    // 503 until restarted.
    let db = DbPool::initialize(&config.database).await;

    let state = AppState {
        db,
        request_timeout: Duration::from_secs(config.server.request_timeout_secs),
    };

    let app = app(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = SocketAddr::new(config.server.host, config.server.port);

    tracing::info!(%addr, "starting dados-api server");

    let listener = TcpListener::bind(addr)
        .await
        .expect("failed to bind to address — is another process using this port?");

    // Serve with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");

    tracing::info!("dados-api shut down");
}

/// Waits for a SIGINT (Ctrl+C) or SIGTERM signal for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => { tracing::info!("received SIGINT, initiating graceful shutdown"); }
        () = terminate => { tracing::info!("received SIGTERM, initiating graceful shutdown"); }
    }
}
