//! HTTP server: configuration, shared state, routing, and lifecycle.

use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Instant;

use axum::routing::{delete, get, post, put, MethodRouter};
use axum::Router;
use contacts_core::Result;
use contacts_store::ContactStore;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;

const DEFAULT_PORT: u16 = 8080;

fn default_addr() -> SocketAddr {
    SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT))
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen address.
    pub addr: SocketAddr,
    /// Enable CORS.
    pub cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_addr(),
            cors: true,
        }
    }
}

impl ServerConfig {
    /// Creates a new server config builder.
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }
}

/// Builder for ServerConfig.
#[derive(Debug, Default)]
pub struct ServerConfigBuilder {
    addr: Option<SocketAddr>,
    cors: Option<bool>,
}

impl ServerConfigBuilder {
    /// Sets the listen address.
    pub fn addr(mut self, addr: SocketAddr) -> Self {
        self.addr = Some(addr);
        self
    }

    /// Sets whether CORS is enabled.
    pub fn cors(mut self, enabled: bool) -> Self {
        self.cors = Some(enabled);
        self
    }

    /// Builds the server config.
    pub fn build(self) -> ServerConfig {
        ServerConfig {
            addr: self.addr.unwrap_or_else(default_addr),
            cors: self.cors.unwrap_or(true),
        }
    }
}

/// Shared application state.
pub struct AppState {
    /// The contact store, opened at startup.
    pub store: Arc<dyn ContactStore>,
    /// Server start time.
    pub start_time: Instant,
}

impl AppState {
    /// Creates new app state around an open store.
    pub fn new(store: Arc<dyn ContactStore>) -> Self {
        Self {
            store,
            start_time: Instant::now(),
        }
    }
}

/// The HTTP server.
pub struct Server {
    config: ServerConfig,
    state: Arc<AppState>,
}

impl Server {
    /// Creates a new server over the given store.
    pub fn new(config: ServerConfig, store: Arc<dyn ContactStore>) -> Self {
        let state = Arc::new(AppState::new(store));
        Self { config, state }
    }

    /// Creates the router.
    pub fn router(&self) -> Router {
        let contacts = Router::new()
            .route("/add", only(post(handlers::add_contact)))
            .route("/view", only(get(handlers::view_contacts)))
            .route("/update/:id", only(put(handlers::update_contact)))
            .route("/delete/:id", only(delete(handlers::delete_contact)))
            .route("/search", only(get(handlers::search_contacts)));

        let mut router = Router::new()
            .route("/health", only(get(handlers::health)))
            .route("/api/v1/status", only(get(handlers::server_status)))
            .nest("/api/v1/contacts", contacts)
            .fallback(handlers::not_found)
            .with_state(self.state.clone());

        router = router.layer(TraceLayer::new_for_http());

        if self.config.cors {
            router = router.layer(CorsLayer::permissive());
        }

        router
    }

    /// Runs the server until Ctrl+C or SIGTERM, then closes the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot bind, the server fails, or the
    /// store cannot be closed cleanly.
    pub async fn run(self) -> Result<()> {
        let router = self.router();

        tracing::info!(
            addr = %self.config.addr,
            backend = self.state.store.backend(),
            "Starting contacts server"
        );

        let listener = tokio::net::TcpListener::bind(self.config.addr).await?;
        eprintln!(
            "\n\x1b[32m✓\x1b[0m Server listening on http://{}",
            listener.local_addr()?
        );
        eprintln!("  Press Ctrl+C to stop\n");

        let served = axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await;

        finish(self.state.store.as_ref(), served).await?;

        tracing::info!("Server shutdown complete");
        eprintln!("\x1b[32m✓\x1b[0m Server stopped");

        Ok(())
    }
}

/// Closes the store, then reports the serve result ahead of any close error.
async fn finish(store: &dyn ContactStore, served: std::io::Result<()>) -> Result<()> {
    let closed = store.close().await;
    if let Err(e) = &served {
        tracing::error!(error = %e, "Server stopped with an error");
    }
    served?;
    closed
}

/// Answers any other method on the route with a JSON 405.
fn only(route: MethodRouter<Arc<AppState>>) -> MethodRouter<Arc<AppState>> {
    route.fallback(handlers::method_not_allowed)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            eprintln!("\n\x1b[33m⚡\x1b[0m Received Ctrl+C, shutting down gracefully...");
        },
        () = terminate => {
            eprintln!("\n\x1b[33m⚡\x1b[0m Received SIGTERM, shutting down gracefully...");
        },
    }
}
