/*!
 * Tests for language code utilities
 */

use contextual_translator::language_utils::{get_language_name, normalize_to_part2t, resolve_language};
use contextual_translator::speech::VoiceCatalog;

#[test]
fn test_normalizeToPart2t_withTwoLetterCode_shouldReturnThreeLetterCode() {
    assert_eq!(normalize_to_part2t("es").unwrap(), "spa");
    assert_eq!(normalize_to_part2t("ja").unwrap(), "jpn");
}

#[test]
fn test_getLanguageName_withValidCodes_shouldReturnEnglishName() {
    assert_eq!(get_language_name("fr").unwrap(), "French");
    assert_eq!(get_language_name("deu").unwrap(), "German");
    assert!(get_language_name("zz").is_err());
}

#[test]
fn test_resolveLanguage_withEveryCatalogName_shouldRoundTrip() {
    let catalog = VoiceCatalog::default();
    for name in catalog.language_names() {
        assert_eq!(resolve_language(name, &catalog).unwrap(), name);
    }
}

#[test]
fn test_resolveLanguage_withBibliographicCode_shouldResolve() {
    let catalog = VoiceCatalog::default();
    assert_eq!(resolve_language("ger", &catalog).unwrap(), "german");
    assert_eq!(resolve_language("dut", &catalog).unwrap(), "dutch");
}

#[test]
fn test_resolveLanguage_withLanguageOutsideCatalog_shouldListSupported() {
    let catalog = VoiceCatalog::default();
    let err = resolve_language("fi", &catalog).unwrap_err();
    assert!(err.to_string().contains("Supported languages"));
    assert!(err.to_string().contains("swedish"));
}
