/*!
 * HTTP server.
 *
 * - `routes`: route table
 * - `handlers`: request handlers and error-to-response mapping
 * - `types`: request, response and state types
 */

use axum::Router;
use log::info;
use std::sync::Arc;

use crate::app_config::ServerConfig;
use crate::errors::AppError;
use crate::translation::TranslationHandler;

pub mod handlers;
pub mod routes;
pub mod types;

pub use routes::create_router;
pub use types::AppState;

/// HTTP server exposing the translation handler
pub struct TranslationServer {
    config: ServerConfig,
    state: Arc<AppState>,
}

impl TranslationServer {
    /// Create a new server
    pub fn new(config: ServerConfig, handler: TranslationHandler) -> Self {
        Self {
            config,
            state: AppState::shared(handler),
        }
    }

    /// Router serving this server's routes
    pub fn router(&self) -> Router {
        create_router(self.state.clone())
    }

    /// Bind and serve until Ctrl-C
    pub async fn start(self) -> Result<(), AppError> {
        let addr = self.config.socket_addr();
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| AppError::Server(format!("Failed to bind {}: {}", addr, e)))?;

        info!("Listening on http://{}", addr);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
