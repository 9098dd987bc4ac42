//! Drowse Control API
//!
//! HTTP surface for the presentation layer: pin toggles, protection
//! queries, settings updates, and the resource snapshot feed. One POST
//! endpoint dispatches action-tagged control messages; a GET endpoint
//! reports engine health.

#![warn(missing_docs)]

pub mod config;
pub mod handlers;
pub mod messages;

use config::ApiConfig;
use drowse_domain::ResourceHost;
use handlers::{create_router, AppState};
use tokio::net::TcpListener;
use tracing::info;

/// Control API error
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Start the control API server.
///
/// Initializes tracing, binds the configured address, and serves the
/// control surface over the shared engine state. The caller assembles
/// the state (store, settings, host adapter, clock); this function owns
/// the HTTP lifecycle.
pub async fn start_server<H>(config: ApiConfig, state: AppState<H>) -> Result<(), ApiError>
where
    H: ResourceHost + 'static,
{
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting drowse control API");
    info!("Bind address: {}", config.bind_addr());
    info!("Tracked records: {}", state.store.len());

    let app = create_router(state);

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Control API listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| ApiError::Server(e.to_string()))?;

    Ok(())
}
