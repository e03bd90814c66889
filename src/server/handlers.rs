/*!
 * HTTP handlers.
 */

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use log::{error, warn};
use std::sync::Arc;

use crate::errors::TranslateError;
use crate::server::types::{AppState, ErrorResponse, HealthResponse, TranslateRequest, TranslateResponse};

/// Header carrying the handler's processing time in seconds
pub const RESPONSE_TIME_HEADER: &str = "x-response-time";

/// `POST /translate`
pub async fn translate(
    State(state): State<Arc<AppState>>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Response {
    let request = match body {
        Ok(Json(value)) => TranslateRequest::from_value(&value),
        Err(rejection) => {
            warn!("Rejected malformed translate request: {}", rejection.body_text());
            return (rejection.status(), Json(ErrorResponse::new(rejection.body_text()))).into_response();
        }
    };

    match state.handler.handle(request.text).await {
        Ok(outcome) => {
            let elapsed = format!("{:.4}", outcome.elapsed.as_secs_f64());
            let mut response = (StatusCode::OK, Json(TranslateResponse::from(outcome))).into_response();
            if let Ok(value) = HeaderValue::from_str(&elapsed) {
                response.headers_mut().insert(RESPONSE_TIME_HEADER, value);
            }
            response
        }
        Err(e) => e.into_response(),
    }
}

/// `GET /health`
///
/// Always answers 200; the cache state is informational.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let cache = state.handler.cache();

    let cache_state = match cache.ping().await {
        Ok(()) => "up",
        Err(e) => {
            warn!("Health check: cache unreachable: {}", e);
            "down"
        }
    };

    Json(HealthResponse {
        status: "ok".to_string(),
        cache: cache_state.to_string(),
        cache_backend: cache.backend_name().to_string(),
    })
}

impl IntoResponse for TranslateError {
    fn into_response(self) -> Response {
        if self.is_client_error() {
            return (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(self.to_string()))).into_response();
        }

        error!("Translation request failed: {}", self);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new("internal server error")),
        )
            .into_response()
    }
}
