//! natureheal-server – entry point.
//!
//! Startup order:
//! 1. Load `.env` (if any) and parse configuration from environment variables.
//! 2. Initialise structured tracing (JSON or plain, optional rotating file).
//! 3. Open the SQLite database and run pending migrations.
//! 4. Build the language-model gateway (unconfigured without an API key).
//! 5. Build the Axum router and start the HTTP server with graceful shutdown.

mod ai;
mod config;
mod entities;
mod error;
mod handlers;
mod middleware;
mod routes;
mod schemas;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, prelude::*};

use crate::ai::Gateway;
use crate::config::Config;
use crate::entities::SqliteStore;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Configuration ───────────────────────────────────────────────────────
    let dotenv = dotenvy::dotenv();
    let cfg = Config::from_env();

    // ── 2. Tracing ─────────────────────────────────────────────────────────────
    let _log_guard = init_tracing(&cfg);
    if let Ok(path) = dotenv {
        info!(path = %path.display(), "loaded environment file");
    }
    info!(version = env!("CARGO_PKG_VERSION"), "natureheal-server starting");

    // ── 3. Database ────────────────────────────────────────────────────────────
    let store = SqliteStore::connect(&cfg.database_url).await?;
    info!(database_url = %cfg.database_url, "database ready");

    // ── 4. Language-model gateway ──────────────────────────────────────────────
    let gateway = Gateway::from_config(&cfg.ai)?;
    if gateway.is_configured() {
        info!(model = %cfg.ai.model, endpoint = %cfg.ai.endpoint, "AI gateway configured");
    } else {
        warn!("GOOGLE_AI_API_KEY not set; AI endpoints will serve fallback responses");
    }
    if cfg.jwt_secret.is_none() {
        warn!("JWT_SECRET not set; authenticated routes will answer 401");
    }

    // ── 5. Shared application state ────────────────────────────────────────────
    let state = Arc::new(AppState {
        config: Arc::new(cfg.clone()),
        store: Arc::new(store),
        gateway,
    });

    // ── 6. HTTP server with graceful shutdown ──────────────────────────────────
    let app = routes::build(Arc::clone(&state));
    let addr: SocketAddr = cfg.bind_address.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("natureheal-server stopped");
    Ok(())
}

/// Install the global subscriber. The returned guard flushes the file sink on drop.
fn init_tracing(cfg: &Config) -> Option<WorkerGuard> {
    // RUST_LOG wins; then NATUREHEAL_LOG; then "info" with a warning.
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(f) => f,
        Err(_) => match cfg.log_level.parse::<EnvFilter>() {
            Ok(f) => f,
            Err(e) => {
                eprintln!(
                    "WARN: NATUREHEAL_LOG='{}' is not a valid tracing filter ({}); \
                     falling back to 'info'",
                    cfg.log_level, e
                );
                EnvFilter::new("info")
            }
        },
    };

    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();
    let stdout = fmt::layer().with_target(true).with_thread_ids(true);
    if cfg.log_json {
        layers.push(stdout.json().boxed());
    } else {
        layers.push(stdout.boxed());
    }

    let guard = cfg.log_dir.as_ref().map(|dir| {
        let appender = tracing_appender::rolling::daily(dir, "natureheal-server.log");
        let (writer, guard) = tracing_appender::non_blocking(appender);
        layers.push(
            fmt::layer()
                .json()
                .with_writer(writer)
                .with_ansi(false)
                .boxed(),
        );
        guard
    });

    tracing_subscriber::registry()
        .with(layers)
        .with(env_filter)
        .init();
    guard
}

/// Returns a future that resolves when SIGINT (Ctrl-C) or SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to install CTRL+C signal handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut s) => {
                s.recv().await;
            }
            Err(e) => warn!(error = %e, "failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c   => {}
        _ = terminate => {}
    }

    info!("shutdown signal received; starting graceful shutdown");
}
