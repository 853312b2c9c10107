//! HTTP server for the ltigate LTI tool provider.
//!
//! This crate provides a native Rust HTTP server using axum, serving:
//! - The LTI launch endpoint (POST /lti): extracts the launch context,
//!   stores it in the browser session and redirects to the requested tool
//! - The launch context read model (GET /lti): the stored context as JSON
//! - The content-item return endpoint (POST /lti/ci): signs the selection
//!   payload and renders the form POSTing it back to the LMS
//!
//! OAuth verification of the inbound launch is expected to happen in a
//! filter/proxy in front of this server; by the time a request reaches
//! the launch handler it is trusted.
//!
//! # Quick Start
//!
//! ```ignore
//! use ltigate_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         host: "127.0.0.1".to_string(),
//!         port: 8080,
//!         tools_path: "/ltitools".to_string(),
//!         consumers: vec![("consumerkey".to_string(), "consumersecret".to_string())],
//!     };
//!
//!     run_server(config).await.unwrap();
//! }
//! ```

mod app;
mod error;
mod handlers;
mod middleware;
mod session;
mod state;

use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;

use ltigate_core::StaticCredentialStore;
use session::MemorySessionStore;
use state::AppState;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Default tool path for launches without a valid `custom_tool`.
    pub tools_path: String,
    /// Registered consumer `(key, secret)` pairs.
    pub consumers: Vec<(String, String)>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 8080,
            tools_path: "/ltitools".to_owned(),
            consumers: Vec::new(),
        }
    }
}

/// Run the server.
///
/// # Arguments
///
/// * `config` - Server configuration
///
/// # Errors
///
/// Returns an error if the server fails to start.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let credentials = Arc::new(StaticCredentialStore::new(config.consumers.clone()));
    if credentials.is_empty() {
        tracing::warn!("no consumers configured; content-item returns will fail");
    }

    let state = Arc::new(AppState {
        credentials,
        sessions: Arc::new(MemorySessionStore::default()),
        tools_path: config.tools_path.clone(),
    });

    let app = app::create_router(state);

    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(address = %addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from ltigate config.
#[must_use]
pub fn server_config_from_config(config: &ltigate_config::Config) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        tools_path: config.lti.tools_path.clone(),
        consumers: config
            .consumers
            .iter()
            .map(|c| (c.key.clone(), c.secret.clone()))
            .collect(),
    }
}
