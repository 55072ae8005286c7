//! HTTP server.
//!
//! | Route | Handler |
//! |---|---|
//! | `GET /` | [`handlers::index`] |
//! | `GET /oauth/callback` | [`handlers::oauth_callback`] |
//! | `GET /stock` | [`handlers::stock`] |
//! | `GET /products` | [`handlers::products`] |
//! | `GET /token` | [`handlers::token`] |
//!
//! Every route sits behind a permissive CORS layer and a request trace layer.
//!
//! # Example
//!
//! ```rust,ignore
//! use imweb_proxy::{server, ProxyConfig};
//!
//! let config = ProxyConfig::from_env()?;
//! server::serve(config).await?;
//! ```

pub mod handlers;
mod jsonp;

pub use jsonp::{JsonpCallback, JsonpResponse, DEFAULT_CALLBACK, JAVASCRIPT_CONTENT_TYPE};

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::TokenStore;
use crate::clients::{HttpError, ImwebClient};
use crate::config::ProxyConfig;

/// Errors that stop the server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The listen address could not be bound.
    #[error("Failed to bind to {addr}: {source}")]
    Bind {
        /// The address that was requested.
        addr: SocketAddr,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The outbound HTTP client could not be created.
    #[error("Failed to create provider client: {0}")]
    Client(#[from] HttpError),

    /// The accept loop failed.
    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shared handler state.
///
/// Cloned per request; every field is reference-counted.
#[derive(Clone, Debug)]
pub struct AppState {
    config: Arc<ProxyConfig>,
    client: ImwebClient,
    tokens: Arc<TokenStore>,
}

// Verify AppState is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AppState>();
};

impl AppState {
    /// Creates state with a fresh, empty token store.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the provider client cannot be created.
    pub fn new(config: ProxyConfig) -> Result<Self, HttpError> {
        Self::with_token_store(config, Arc::new(TokenStore::new()))
    }

    /// Creates state around an existing token store.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the provider client cannot be created.
    pub fn with_token_store(
        config: ProxyConfig,
        tokens: Arc<TokenStore>,
    ) -> Result<Self, HttpError> {
        let client = ImwebClient::new(&config)?;
        Ok(Self {
            config: Arc::new(config),
            client,
            tokens,
        })
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }

    /// Returns the provider client.
    #[must_use]
    pub const fn client(&self) -> &ImwebClient {
        &self.client
    }

    /// Returns the token store.
    #[must_use]
    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/oauth/callback", get(handlers::oauth_callback))
        .route("/stock", get(handlers::stock))
        .route("/products", get(handlers::products))
        .route("/token", get(handlers::token))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Binds `0.0.0.0:{port}` and serves until Ctrl-C or SIGTERM.
///
/// # Errors
///
/// Returns [`ServerError`] if the client cannot be built, the port cannot be
/// bound, or the accept loop fails.
pub async fn serve(config: ProxyConfig) -> Result<(), ServerError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port()));
    let state = AppState::new(config)?;

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;

    run(listener, state).await
}

/// Serves on an already-bound listener until Ctrl-C or SIGTERM.
///
/// # Errors
///
/// Returns [`ServerError::Io`] if the accept loop fails.
pub async fn run(listener: TcpListener, state: AppState) -> Result<(), ServerError> {
    let local_addr = listener.local_addr()?;
    tracing::info!(
        "서버 실행 중: http://localhost:{}",
        local_addr.port()
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
