/*!
 * Translation request handler.
 *
 * Orchestrates one request: normalize, cache lookup, language detection,
 * store lookup, phrase-table fallback, store insert, cache write.
 *
 * Concurrent requests for the same text are not coordinated. Two misses
 * racing each other both detect, both insert a record and both write the
 * same cache entry.
 */

use log::{debug, info};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::cache::ResultCache;
use crate::database::{NewTranslationRecord, TranslationStore};
use crate::errors::TranslateError;
use crate::language_utils::{get_language_name, LanguageDetector};
use crate::normalizer::normalize;
use crate::phrase_table::PhraseTable;

/// Language reported for cache hits, where detection is skipped
pub const CACHED_LANGUAGE: &str = "cached";

/// Where a translation came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    /// Served from the result cache
    Cache,
    /// Computed for this request (store or phrase table)
    New,
}

impl Provenance {
    /// Label used in request logs
    pub fn log_label(&self) -> &'static str {
        match self {
            Self::Cache => "cache",
            Self::New => "new translation",
        }
    }
}

impl std::fmt::Display for Provenance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cache => write!(f, "cache"),
            Self::New => write!(f, "new"),
        }
    }
}

/// Result of a successful translation request
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationOutcome {
    /// Raw text as sent by the client
    pub received_text: String,
    /// Detected language code, or `"cached"` on a cache hit
    pub detected_language: String,
    /// Translation returned to the client
    pub translated_text: String,
    /// Where the translation came from
    pub provenance: Provenance,
    /// Time spent handling the request
    pub elapsed: Duration,
}

impl TranslationOutcome {
    /// Whether the translation was served from the cache
    pub fn is_cached(&self) -> bool {
        self.provenance == Provenance::Cache
    }
}

/// Request handler wired to its collaborators
#[derive(Clone)]
pub struct TranslationHandler {
    cache: Arc<dyn ResultCache>,
    store: Arc<dyn TranslationStore>,
    detector: Arc<dyn LanguageDetector>,
    phrases: Arc<PhraseTable>,
}

impl TranslationHandler {
    /// Create a handler using the preset phrase table
    pub fn new(
        cache: Arc<dyn ResultCache>,
        store: Arc<dyn TranslationStore>,
        detector: Arc<dyn LanguageDetector>,
    ) -> Self {
        Self {
            cache,
            store,
            detector,
            phrases: PhraseTable::preset(),
        }
    }

    /// Replace the phrase table
    pub fn with_phrase_table(mut self, phrases: PhraseTable) -> Self {
        self.phrases = Arc::new(phrases);
        self
    }

    /// The cache this handler writes through
    pub fn cache(&self) -> &Arc<dyn ResultCache> {
        &self.cache
    }

    /// Handle one translation request
    ///
    /// # Arguments
    /// * `text` - The `text` field of the request, `None` when absent
    ///
    /// # Returns
    /// * `Ok(TranslationOutcome)` - translation and its provenance
    /// * `Err(TranslateError)` - missing text, undetectable language, or a
    ///   cache/store failure
    pub async fn handle(&self, text: Option<String>) -> Result<TranslationOutcome, TranslateError> {
        let start = Instant::now();

        let Some(received_text) = text else {
            info!("Rejected request without text field");
            return Err(TranslateError::MissingText);
        };

        let normalized = normalize(&received_text);

        if let Some(translated_text) = self.cache.get(&normalized).await? {
            let elapsed = start.elapsed();
            info!(
                "Request: '{}', Language: {}, Source: {}, Response time: {:.4} seconds",
                received_text,
                CACHED_LANGUAGE,
                Provenance::Cache.log_label(),
                elapsed.as_secs_f64()
            );

            return Ok(TranslationOutcome {
                received_text,
                detected_language: CACHED_LANGUAGE.to_string(),
                translated_text,
                provenance: Provenance::Cache,
                elapsed,
            });
        }

        let detected_language = match self.detector.detect(&normalized) {
            Ok(code) => code,
            Err(e) => {
                info!("Could not detect language of '{}': {}", received_text, e);
                return Err(TranslateError::UndetectableLanguage(e));
            }
        };
        debug!(
            "Detected {} ({})",
            detected_language,
            get_language_name(&detected_language).unwrap_or("unknown")
        );

        let translated_text = match self.store.find_translation(&normalized).await? {
            Some(stored) => {
                debug!("Translation memory hit for '{}'", received_text);
                stored
            }
            None => {
                let translated = self.phrases.translate(&normalized).to_string();
                let record = NewTranslationRecord::new(
                    normalized.clone(),
                    detected_language.clone(),
                    translated.clone(),
                );
                let id = self.store.insert_translation(&record).await?;
                debug!("Stored translation record {} for '{}'", id, received_text);
                translated
            }
        };

        // The record is persisted before the cache is populated
        self.cache.set(&normalized, &translated_text).await?;

        let elapsed = start.elapsed();
        info!(
            "Request: '{}', Language: {}, Source: {}, Response time: {:.4} seconds",
            received_text,
            detected_language,
            Provenance::New.log_label(),
            elapsed.as_secs_f64()
        );

        Ok(TranslationOutcome {
            received_text,
            detected_language,
            translated_text,
            provenance: Provenance::New,
            elapsed,
        })
    }
}
