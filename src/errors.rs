/*!
 * Error types for the transmem service.
 *
 * This module contains custom error types for each collaborator of the
 * request handler, using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when talking to the result cache
#[derive(Error, Debug)]
pub enum CacheError {
    /// Error establishing or maintaining a connection
    #[error("Cache connection error: {0}")]
    Connection(String),

    /// Error returned while executing a cache command
    #[error("Cache command failed: {0}")]
    Command(String),
}

impl From<redis::RedisError> for CacheError {
    fn from(error: redis::RedisError) -> Self {
        if error.is_connection_refusal() || error.is_connection_dropped() || error.is_io_error() {
            Self::Connection(error.to_string())
        } else {
            Self::Command(error.to_string())
        }
    }
}

/// Errors that can occur when reading or writing the translation store
#[derive(Error, Debug)]
pub enum StoreError {
    /// Error reported by the underlying database
    #[error("Database error: {0}")]
    Database(String),
}

impl From<anyhow::Error> for StoreError {
    fn from(error: anyhow::Error) -> Self {
        // {:#} keeps the context chain on one line
        Self::Database(format!("{:#}", error))
    }
}

/// Errors returned by a language detector
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DetectionError {
    /// Not enough letters to classify
    #[error("Text too short to detect language ({found} letters, need {required})")]
    TooShort {
        /// Number of alphabetic characters found
        found: usize,
        /// Minimum number required
        required: usize,
    },

    /// The detector could not pick a language
    #[error("No language could be identified")]
    Unidentified,

    /// A language was found, but below the configured confidence
    #[error("Detection confidence {confidence:.2} below threshold {threshold:.2}")]
    LowConfidence {
        /// Confidence reported by the detector
        confidence: f64,
        /// Configured minimum confidence
        threshold: f64,
    },
}

/// Errors that terminate a single translation request
#[derive(Error, Debug)]
pub enum TranslateError {
    /// The request carried no text field
    #[error("no text provided")]
    MissingText,

    /// The detector rejected the input
    #[error("could not detect language")]
    UndetectableLanguage(#[source] DetectionError),

    /// Failure of the result cache
    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    /// Failure of the translation store
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl TranslateError {
    /// Whether the error was caused by the client's input
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::MissingText | Self::UndetectableLanguage(_))
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from the result cache
    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    /// Error from the translation store
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Error while serving requests
    #[error("Server error: {0}")]
    Server(String),
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::Server(error.to_string())
    }
}
