//! HTTP surface of the portfolio backend.
//!
//! # Endpoints
//! - `GET /publications`: memoized publication catalog.
//! - `POST /contact`: validated contact intake, one stored row per accepted call.
//! - `GET /health`: liveness probe.
//!
//! # Configuration
//! Read from the environment, optionally seeded from a `.env` file:
//! `DATABASE_URL`, `FRONTEND_ORIGIN`, `HOST`, `PORT`, `PORTFOLIO_LOG_LEVEL`,
//! `PORTFOLIO_LOG_DIR`. See [`config::Config`].
//!
//! # Startup
//! 1. Logging.
//! 2. Schema ensure against `DATABASE_URL` (idempotent, every start).
//! 3. Bind and serve until Ctrl+C or SIGTERM; in-flight requests finish.

use std::{future::Future, io, sync::Arc, time::Duration};

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use log::{error, info};
use portfolio_core::{core_version, ensure_schema};
use tokio::{net::TcpListener, signal, task::spawn_blocking};
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use config::Config;
use routes::{contact_handler, health_handler, publications_handler};
use state::AppState;

pub fn build_router(state: Arc<AppState>) -> Router {
    // Credentials forbid wildcard lists, so methods and headers are mirrored.
    // A one-entry list echoes the origin only when the request carries it.
    let cors = CorsLayer::new()
        .allow_origin([state.frontend_origin.clone()])
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/publications", get(publications_handler))
        .route("/contact", post(contact_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .with_state(state)
}

/// Serves the API on `listener` until `shutdown` resolves.
pub async fn serve(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> io::Result<()> {
    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown)
        .await
}

pub async fn start_server(config: Config) -> anyhow::Result<()> {
    config.log_summary();

    info!("Ensuring database schema...");
    let database = config.database.clone();
    spawn_blocking(move || ensure_schema(&database))
        .await
        .context("schema worker failed")?
        .context("failed to ensure database schema")?;

    let state = AppState::new(&config);

    let address = config.bind_address();
    info!("Binding to {address}");
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;
    info!(
        "event=server_start module=server status=ok address={} version={}",
        address,
        core_version()
    );

    serve(listener, state, shutdown_signal())
        .await
        .context("server error")?;

    info!("event=server_stop module=server status=ok");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(err) => {
                error!("Failed to install Ctrl+C handler: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(err) => {
                error!("Failed to install terminate handler: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
