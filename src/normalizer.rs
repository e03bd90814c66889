/*!
 * Text normalization used to derive lookup keys.
 *
 * Every cache, store and phrase-table access keys on the NFKC form of the
 * input so that equivalent but differently encoded text maps to one entry.
 */

use unicode_normalization::UnicodeNormalization;

/// Normalize text to Unicode NFKC
pub fn normalize(text: &str) -> String {
    text.nfkc().collect()
}

/// Check whether text is already in NFKC form
pub fn is_normalized(text: &str) -> bool {
    unicode_normalization::is_nfkc(text)
}
