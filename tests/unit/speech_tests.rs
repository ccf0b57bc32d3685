/*!
 * Tests for the voice catalog and speech synthesis service
 */

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use contextual_translator::errors::SpeechError;
use contextual_translator::providers::mock::MockSpeech;
use contextual_translator::speech::{SpeechService, VoiceCatalog};
use contextual_translator::translation::RequestGate;

#[test]
fn test_voiceCatalog_languageNames_shouldBeSortedAndComplete() {
    let catalog = VoiceCatalog::default();
    let names = catalog.language_names();

    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
    assert_eq!(names.len(), 14);
    for expected in ["arabic", "chinese", "dutch", "english", "hindi", "polish", "swedish"] {
        assert!(names.contains(&expected), "{} missing", expected);
    }
}

#[test]
fn test_voiceCatalog_languageForIso_shouldMapCodes() {
    let catalog = VoiceCatalog::default();
    assert_eq!(catalog.language_for_iso("zho"), Some("chinese"));
    assert_eq!(catalog.language_for_iso("fin"), None);
}

#[tokio::test]
async fn test_synthesize_withEveryCatalogLanguage_shouldUseItsVoice() {
    let speech = MockSpeech::working();
    let service = SpeechService::new(Arc::new(speech.clone()));

    for (language, voice) in VoiceCatalog::default().entries() {
        service.synthesize("text", language).await.unwrap();
        assert_eq!(speech.last_request().unwrap().voice_id, voice);
    }
    assert_eq!(speech.call_count(), 14);
}

#[tokio::test]
async fn test_synthesize_withCustomCatalogAndFormat_shouldForwardSettings() {
    let mut overrides = HashMap::new();
    overrides.insert("spanish".to_string(), "Lucia".to_string());

    let speech = MockSpeech::working();
    let service = SpeechService::new(Arc::new(speech.clone()))
        .with_catalog(VoiceCatalog::with_overrides(&overrides))
        .with_format("ogg_vorbis", "standard");

    service.synthesize("Hola", "spanish").await.unwrap();

    let request = speech.last_request().unwrap();
    assert_eq!(request.voice_id, "Lucia");
    assert_eq!(request.output_format, "ogg_vorbis");
    assert_eq!(request.engine, "standard");
}

#[tokio::test]
async fn test_synthesize_emptyText_shouldStillCallBackend() {
    let speech = MockSpeech::working();
    let service = SpeechService::new(Arc::new(speech.clone()));

    let audio = service.synthesize("", "english").await.unwrap().unwrap();
    assert_eq!(&audio[..], b"ID3");
    assert_eq!(speech.call_count(), 1);
}

#[tokio::test]
async fn test_synthesize_unsupportedLanguage_shouldNameIt() {
    let service = SpeechService::new(Arc::new(MockSpeech::working()));

    let err = service.synthesize("Hei", "finnish").await.unwrap_err();
    assert_eq!(err, SpeechError::UnsupportedLanguage { language: "finnish".to_string() });
    assert!(err.to_string().contains("finnish"));
}

#[tokio::test]
async fn test_synthesize_slowBackend_shouldTimeOutToNone() {
    let service = SpeechService::new(Arc::new(MockSpeech::slow(500)))
        .with_gate(RequestGate::sequential(Duration::from_millis(20)));

    assert_eq!(service.synthesize("Hi", "english").await, Ok(None));
}

#[test]
fn test_synthesize_onBlockingRuntime_shouldReturnAudio() {
    let service = SpeechService::new(Arc::new(MockSpeech::working()));

    let result = tokio_test::block_on(service.synthesize("Hej", "swedish"));

    let audio = tokio_test::assert_ok!(result);
    assert_eq!(audio.as_deref(), Some(&b"ID3Hej"[..]));
}
