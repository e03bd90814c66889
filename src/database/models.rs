/*!
 * Database entity models.
 *
 * These structures map directly to the `translation_memory` table and
 * provide type-safe access to persisted data.
 */

use serde::{Deserialize, Serialize};

/// A persisted translation record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationRecord {
    /// Surrogate key assigned by the database
    pub id: i64,
    /// Normalized source text
    pub original_text: String,
    /// Language code reported by the detector
    pub detected_language: String,
    /// Translation returned to the client
    pub translated_text: String,
}

/// A translation record that has not been inserted yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTranslationRecord {
    /// Normalized source text
    pub original_text: String,
    /// Language code reported by the detector
    pub detected_language: String,
    /// Translation returned to the client
    pub translated_text: String,
}

impl NewTranslationRecord {
    /// Create a new record
    pub fn new(
        original_text: impl Into<String>,
        detected_language: impl Into<String>,
        translated_text: impl Into<String>,
    ) -> Self {
        Self {
            original_text: original_text.into(),
            detected_language: detected_language.into(),
            translated_text: translated_text.into(),
        }
    }

    /// Attach the id assigned on insert
    pub fn with_id(self, id: i64) -> TranslationRecord {
        TranslationRecord {
            id,
            original_text: self.original_text,
            detected_language: self.detected_language,
            translated_text: self.translated_text,
        }
    }
}
