/*!
 * Static phrase table used as the translation fallback.
 *
 * The table is built once on first access and never modified afterwards.
 * Keys are stored in normalized form.
 */

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::normalizer::normalize;

/// Returned when neither the store nor the table knows a phrase
pub const TRANSLATION_UNAVAILABLE: &str = "Translation not available";

/// Source phrases, their language and their English translations
const PRESET_PHRASES: &[(&str, &str, &str)] = &[
    ("Hola, ¿cómo estás?", "es", "Hello, how are you?"),
    ("Bonjour tout le monde", "fr", "Hello everyone"),
    ("Guten Morgen", "de", "Good morning"),
    ("안녕하세요", "ko", "Hello"),
    ("你好", "zh", "Hello"),
    ("おはようございます", "ja", "Good morning"),
];

static DEFAULT_TABLE: Lazy<Arc<PhraseTable>> =
    Lazy::new(|| Arc::new(PhraseTable::from_entries(PRESET_PHRASES.iter().copied())));

#[derive(Debug, Clone)]
struct PhraseEntry {
    translation: String,
    language: Option<String>,
}

/// Immutable mapping from normalized source phrases to translations
#[derive(Debug, Clone, Default)]
pub struct PhraseTable {
    entries: HashMap<String, PhraseEntry>,
}

impl PhraseTable {
    /// The process-wide preset table
    pub fn preset() -> Arc<PhraseTable> {
        Arc::clone(&*DEFAULT_TABLE)
    }

    /// Build a table from (source, translation) pairs, normalizing sources
    ///
    /// The source language of these phrases is left to the detector.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        Self::build(pairs.into_iter().map(|(source, translation)| (source, None, translation)))
    }

    /// Build a table from (source, language code, translation) triples
    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str, &'a str)>,
    {
        Self::build(
            entries
                .into_iter()
                .map(|(source, language, translation)| (source, Some(language), translation)),
        )
    }

    fn build<'a, I>(entries: I) -> Self
    where
        I: Iterator<Item = (&'a str, Option<&'a str>, &'a str)>,
    {
        let entries = entries
            .map(|(source, language, translation)| {
                let entry = PhraseEntry {
                    translation: translation.to_string(),
                    language: language.map(str::to_string),
                };
                (normalize(source), entry)
            })
            .collect();

        Self { entries }
    }

    /// Look up an already normalized phrase
    pub fn lookup(&self, normalized_text: &str) -> Option<&str> {
        self.entries
            .get(normalized_text)
            .map(|entry| entry.translation.as_str())
    }

    /// Source language of an already normalized phrase, when the table records one
    pub fn language_of(&self, normalized_text: &str) -> Option<&str> {
        self.entries
            .get(normalized_text)
            .and_then(|entry| entry.language.as_deref())
    }

    /// Look up an already normalized phrase, falling back to the sentinel
    pub fn translate(&self, normalized_text: &str) -> &str {
        self.lookup(normalized_text).unwrap_or(TRANSLATION_UNAVAILABLE)
    }

    /// Number of phrases in the table
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
