/*!
 * Language detection and ISO language code utilities.
 *
 * The request handler only depends on the `LanguageDetector` trait;
 * `WhatlangDetector` is the implementation used by the server.
 *
 * whatlang's trigram model is unreliable on two or three word inputs
 * ("Guten Morgen" scores as Norwegian), so phrases whose language is
 * recorded in the phrase table are answered from the table.
 */

use isolang::Language;
use std::fmt::Debug;
use std::sync::Arc;

use crate::errors::DetectionError;
use crate::phrase_table::PhraseTable;

/// Default minimum number of alphabetic characters for detection
pub const DEFAULT_MIN_LETTERS: usize = 2;

/// Common trait for language detectors
///
/// Implementations must be usable from concurrent requests.
pub trait LanguageDetector: Send + Sync + Debug {
    /// Detect the language of already normalized text
    ///
    /// # Returns
    /// * `Ok(code)` - ISO 639-1 code, or ISO 639-3 when no 2-letter code exists
    /// * `Err(DetectionError)` - when the text cannot be classified
    fn detect(&self, text: &str) -> Result<String, DetectionError>;
}

/// Detector backed by the whatlang trigram/script classifier
#[derive(Debug, Clone)]
pub struct WhatlangDetector {
    /// Minimum number of alphabetic characters required
    min_letters: usize,
    /// Minimum confidence reported by whatlang (0.0 accepts any guess)
    min_confidence: f64,
    /// Phrases with a known source language
    known_phrases: Arc<PhraseTable>,
}

impl WhatlangDetector {
    /// Create a detector with explicit thresholds and the preset phrases
    pub fn new(min_letters: usize, min_confidence: f64) -> Self {
        Self {
            min_letters: min_letters.max(1),
            min_confidence,
            known_phrases: PhraseTable::preset(),
        }
    }

    /// Replace the phrases whose language bypasses the classifier
    pub fn with_known_phrases(mut self, phrases: Arc<PhraseTable>) -> Self {
        self.known_phrases = phrases;
        self
    }
}

impl Default for WhatlangDetector {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_LETTERS, 0.0)
    }
}

impl LanguageDetector for WhatlangDetector {
    fn detect(&self, text: &str) -> Result<String, DetectionError> {
        let letters = text.chars().filter(|c| c.is_alphabetic()).count();
        if letters < self.min_letters {
            return Err(DetectionError::TooShort {
                found: letters,
                required: self.min_letters,
            });
        }

        if let Some(code) = self.known_phrases.language_of(text) {
            return Ok(code.to_string());
        }

        let info = whatlang::detect(text).ok_or(DetectionError::Unidentified)?;

        if info.confidence() < self.min_confidence {
            return Err(DetectionError::LowConfidence {
                confidence: info.confidence(),
                threshold: self.min_confidence,
            });
        }

        Ok(to_language_code(info.lang()))
    }
}

/// Convert a whatlang language to the code reported to clients
///
/// Mandarin is reported as "zh"; other languages use their ISO 639-1 code
/// when one exists and fall back to ISO 639-3.
pub fn to_language_code(lang: whatlang::Lang) -> String {
    let part3 = lang.code();
    if part3 == "cmn" {
        return "zh".to_string();
    }

    Language::from_639_3(part3)
        .and_then(|language| language.to_639_1())
        .unwrap_or(part3)
        .to_string()
}

/// Get the English language name for an ISO 639-1 or 639-3 code
pub fn get_language_name(code: &str) -> Option<&'static str> {
    let normalized_code = code.trim().to_lowercase();

    let language = match normalized_code.len() {
        2 => Language::from_639_1(&normalized_code),
        3 => Language::from_639_3(&normalized_code),
        _ => None,
    }?;

    Some(language.to_name())
}
