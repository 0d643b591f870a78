//! HTTP server for the todo list.
//!
//! The store is owned by [`AppState`] and injected at construction, so every
//! [`Server`] (and every test) starts from its own list.

use std::net::{SocketAddr, ToSocketAddrs};
use std::sync::Arc;

use axum::middleware;
use axum::routing::{get, post, put};
use axum::Router;
use tower_http::normalize_path::NormalizePathLayer;
use tower_http::trace::TraceLayer;

use todolist_core::{Error, Result, TodoStore};

use crate::handlers;
use crate::method_override::normalize_method;
use crate::views::{HtmlRenderer, ViewRenderer};

/// Port used when none is configured.
pub const DEFAULT_PORT: u16 = 8000;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen address.
    pub addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
        }
    }
}

impl ServerConfig {
    /// Creates a new server config builder.
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }

    /// Resolves `host` and `port` into a listen address.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the host does not resolve.
    pub fn from_host_port(host: &str, port: u16) -> Result<Self> {
        let addr = (host, port)
            .to_socket_addrs()
            .map_err(|e| Error::invalid_config(format!("cannot resolve {host}:{port}: {e}")))?
            .next()
            .ok_or_else(|| Error::invalid_config(format!("no address for {host}:{port}")))?;

        Ok(Self { addr })
    }
}

/// Builder for ServerConfig.
#[derive(Debug, Default)]
pub struct ServerConfigBuilder {
    addr: Option<SocketAddr>,
    port: Option<u16>,
}

impl ServerConfigBuilder {
    /// Sets the listen address.
    pub fn addr(mut self, addr: SocketAddr) -> Self {
        self.addr = Some(addr);
        self
    }

    /// Overrides the port of the listen address.
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Builds the server config.
    pub fn build(self) -> ServerConfig {
        let mut addr = self.addr.unwrap_or(ServerConfig::default().addr);
        if let Some(port) = self.port {
            addr.set_port(port);
        }
        ServerConfig { addr }
    }
}

/// Shared application state.
pub struct AppState {
    /// The todo items.
    pub store: Arc<TodoStore>,
    /// Page renderer.
    pub renderer: Arc<dyn ViewRenderer>,
}

impl AppState {
    /// Creates state around an existing store, rendering with [`HtmlRenderer`].
    pub fn new(store: Arc<TodoStore>) -> Self {
        Self {
            store,
            renderer: Arc::new(HtmlRenderer),
        }
    }
}

/// Builds the routing table.
///
/// Paths are registered without trailing slashes; [`app`] trims them from
/// incoming requests first. Known paths answer unsupported methods with the list redirect instead of
/// `405`, and unknown paths get the same redirect instead of `404`.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/todo",
            get(handlers::list).fallback(handlers::fallback),
        )
        .route(
            "/todo/add",
            post(handlers::create).fallback(handlers::fallback),
        )
        .route(
            "/todo/delete/:id",
            get(handlers::delete).fallback(handlers::fallback),
        )
        .route(
            "/todo/edit/:id",
            put(handlers::update).fallback(handlers::fallback),
        )
        .route(
            "/todo/:id",
            get(handlers::show).fallback(handlers::fallback),
        )
        .fallback(handlers::fallback)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Wraps the router so trailing slashes are trimmed and method overrides are
/// applied before routing.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .fallback_service(router(state))
        .layer(middleware::from_fn(normalize_method))
        .layer(NormalizePathLayer::trim_trailing_slash())
}

/// The HTTP server.
pub struct Server {
    config: ServerConfig,
    state: Arc<AppState>,
}

impl Server {
    /// Creates a new server with an empty store.
    pub fn new(config: ServerConfig) -> Self {
        Self::with_store(config, Arc::new(TodoStore::new()))
    }

    /// Creates a new server around an existing store.
    pub fn with_store(config: ServerConfig, store: Arc<TodoStore>) -> Self {
        Self {
            config,
            state: Arc::new(AppState::new(store)),
        }
    }

    /// Replaces the page renderer.
    #[must_use]
    pub fn with_renderer(self, renderer: Arc<dyn ViewRenderer>) -> Self {
        let state = AppState {
            store: Arc::clone(&self.state.store),
            renderer,
        };
        Self {
            config: self.config,
            state: Arc::new(state),
        }
    }

    /// Returns the store served by this server.
    pub fn store(&self) -> Arc<TodoStore> {
        Arc::clone(&self.state.store)
    }

    /// Returns the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Returns the complete application service.
    pub fn app(&self) -> Router {
        app(Arc::clone(&self.state))
    }

    /// Runs the server until Ctrl+C or SIGTERM.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot be bound or serving fails.
    pub async fn run(self) -> Result<()> {
        let app = self.app();

        let listener = tokio::net::TcpListener::bind(self.config.addr).await?;
        let addr = listener.local_addr()?;

        tracing::info!(addr = %addr, "Todolist running on http://{}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| Error::internal(e.to_string()))?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        () = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
