/*!
 * Request and response bodies of the HTTP API.
 */

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::translation::{Provenance, TranslationHandler, TranslationOutcome};

/// Shared state of the HTTP server
#[derive(Clone)]
pub struct AppState {
    pub handler: TranslationHandler,
}

impl AppState {
    /// Wrap a handler into shareable state
    pub fn shared(handler: TranslationHandler) -> Arc<Self> {
        Arc::new(Self { handler })
    }
}

/// Body of `POST /translate`
///
/// Parsed from a JSON value so that a missing or non-string `text` field is
/// reported as "no text provided" instead of a framework rejection.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslateRequest {
    pub text: Option<String>,
}

impl TranslateRequest {
    /// Extract the text field from an arbitrary JSON body
    pub fn from_value(value: &serde_json::Value) -> Self {
        Self {
            text: value.get("text").and_then(|t| t.as_str()).map(str::to_string),
        }
    }
}

/// Successful translation response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TranslateResponse {
    pub status: String,
    pub received_text: String,
    pub detected_language: String,
    pub translated_text: String,
    /// Present only when the translation came from the cache
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl From<TranslationOutcome> for TranslateResponse {
    fn from(outcome: TranslationOutcome) -> Self {
        let source = match outcome.provenance {
            Provenance::Cache => Some(Provenance::Cache.to_string()),
            Provenance::New => None,
        };

        Self {
            status: "success".to_string(),
            received_text: outcome.received_text,
            detected_language: outcome.detected_language,
            translated_text: outcome.translated_text,
            source,
        }
    }
}

/// Error response body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { error: message.into() }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthResponse {
    pub status: String,
    /// "up" or "down"
    pub cache: String,
    /// Cache backend name
    pub cache_backend: String,
}
