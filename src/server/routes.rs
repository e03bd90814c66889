/*!
 * Route definitions.
 */

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::server::handlers::{health, translate};
use crate::server::types::AppState;

/// Create the route table
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/translate", post(translate))
        .route("/health", get(health))
}

/// Create the router with its state attached
pub fn create_router(state: Arc<AppState>) -> Router {
    create_routes().with_state(state)
}
