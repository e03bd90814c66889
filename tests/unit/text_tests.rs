/*!
 * Tests for key normalization and the phrase table
 */

use transmem::normalizer::{is_normalized, normalize};
use transmem::phrase_table::{PhraseTable, TRANSLATION_UNAVAILABLE};

#[test]
fn test_normalize_withPresetPhrases_shouldBeStable() {
    for phrase in ["Hola, ¿cómo estás?", "Bonjour tout le monde", "Guten Morgen", "안녕하세요", "你好", "おはようございます"] {
        assert_eq!(normalize(phrase), phrase);
        assert!(is_normalized(phrase));
    }
}

#[test]
fn test_normalize_withDecomposedInput_shouldMatchPresetKey() {
    let decomposed = "Hola, \u{bf}co\u{301}mo esta\u{301}s?";
    let table = PhraseTable::preset();

    assert_eq!(table.translate(&normalize(decomposed)), "Hello, how are you?");
}

#[test]
fn test_normalize_withFullwidthLatin_shouldFoldToAscii() {
    assert_eq!(normalize("Ｇｕｔｅｎ Ｍｏｒｇｅｎ"), "Guten Morgen");
}

#[test]
fn test_normalize_withEmptyString_shouldStayEmpty() {
    assert_eq!(normalize(""), "");
}

#[test]
fn test_phraseTable_preset_shouldHoldSixPhrases() {
    let table = PhraseTable::preset();

    assert_eq!(table.len(), 6);
    assert_eq!(table.lookup("你好"), Some("Hello"));
    assert_eq!(table.lookup("おはようございます"), Some("Good morning"));
    assert_eq!(table.lookup("Bonjour tout le monde"), Some("Hello everyone"));
}

#[test]
fn test_phraseTable_translate_withUnknownPhrase_shouldReturnSentinel() {
    let table = PhraseTable::preset();

    assert_eq!(table.lookup("Buenas noches"), None);
    assert_eq!(table.translate("Buenas noches"), TRANSLATION_UNAVAILABLE);
    // Lookups are exact; case differences are not folded
    assert_eq!(table.translate("guten morgen"), TRANSLATION_UNAVAILABLE);
}
