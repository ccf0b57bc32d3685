/*!
 * Tests for the translation and follow-up services
 */

use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use contextual_translator::errors::SessionError;
use contextual_translator::providers::mock::{MockLlm, MockSpeech};
use contextual_translator::session::ChatTurn;
use contextual_translator::translation::{FollowUpService, LlmClient, RequestGate, TranslationCache, TranslationService};
use crate::common;

#[tokio::test]
async fn test_translate_identicalRequests_shouldCallBackendOnce() {
    let llm = MockLlm::counting();
    let service = TranslationService::new(common::mock_client(&llm));

    let first = service.translate("Hello", "english", "spanish").await;
    let second = service.translate("Hello", "english", "spanish").await;

    assert_eq!(first, second);
    assert_eq!(llm.call_count(), 1);
    assert_eq!(service.cache().stats().hits, 1);
}

#[tokio::test]
async fn test_translate_differentLanguagePair_shouldCallBackendAgain() {
    let llm = MockLlm::counting();
    let service = TranslationService::new(common::mock_client(&llm));

    service.translate("Hello", "english", "spanish").await;
    service.translate("Hello", "english", "french").await;

    assert_eq!(llm.call_count(), 2);
}

#[tokio::test]
async fn test_translate_101DistinctRequests_shouldEvictTheFirst() {
    let llm = MockLlm::counting();
    let service = TranslationService::new(common::mock_client(&llm));

    for i in 0..101 {
        service.translate(&format!("text {}", i), "english", "spanish").await;
    }
    assert_eq!(llm.call_count(), 101);
    assert_eq!(service.cache().len(), 100);

    // The most recent entry is still memoized
    service.translate("text 100", "english", "spanish").await;
    assert_eq!(llm.call_count(), 101);

    // The first one was evicted
    service.translate("text 0", "english", "spanish").await;
    assert_eq!(llm.call_count(), 102);
}

#[tokio::test]
async fn test_translate_backendFailure_shouldReturnNoneAndNotCache() {
    let llm = MockLlm::failing();
    let service = TranslationService::new(common::mock_client(&llm));

    assert!(service.translate("Hello", "english", "spanish").await.is_none());
    assert!(service.translate("Hello", "english", "spanish").await.is_none());

    assert_eq!(llm.call_count(), 2);
    assert!(service.cache().is_empty());
}

#[tokio::test]
async fn test_translate_withCacheDisabled_shouldAlwaysCallBackend() {
    let llm = MockLlm::counting();
    let service = TranslationService::new(common::mock_client(&llm))
        .with_cache(TranslationCache::new(false, 100));

    let first = service.translate("Hello", "english", "spanish").await.unwrap();
    let second = service.translate("Hello", "english", "spanish").await.unwrap();

    assert_ne!(first, second);
    assert_eq!(llm.call_count(), 2);
}

#[tokio::test]
async fn test_translate_shouldSendThreeTurnPromptWithLanguages() {
    let llm = MockLlm::fixed("Bonjour");
    let service = TranslationService::new(common::mock_client(&llm));

    service.translate("Good morning", "english", "french").await;

    let messages = llm.last_messages().unwrap();
    assert_eq!(messages.len(), 3);
    assert!(messages[2].content.contains("english text to french"));
    assert!(messages[2].content.ends_with("Good morning"));
}

#[tokio::test]
async fn test_translate_emptyCompletion_shouldReturnNoneAndNotCache() {
    let llm = MockLlm::fixed("");
    let service = TranslationService::new(common::mock_client(&llm));

    assert!(service.translate("Hello", "english", "spanish").await.is_none());
    assert!(service.cache().is_empty());
    assert_eq!(service.cache().stats().hits, 0);
}

#[tokio::test]
async fn test_sessionTranslate_emptyCompletion_shouldLeaveLedgerUntouched() {
    let llm = MockLlm::fixed("");
    let mut session = common::mock_session(&llm, &MockSpeech::working());

    assert_eq!(session.translate("Hello", "english", "spanish").await, Ok(None));
    assert!(session.ledger().is_empty());
    assert_eq!(session.ledger().render_for_prompt(), "Previous translations:\n");
    assert!(session.last_translation().is_none());
    assert_eq!(session.speak().await, Err(SessionError::NothingToSpeak));
}

#[tokio::test]
async fn test_sessionAsk_emptyCompletion_shouldNotRecordAssistantTurn() {
    let llm = MockLlm::sequence(&["Hola", ""]);
    let mut session = common::mock_session(&llm, &MockSpeech::working());

    session.translate("Hello", "english", "spanish").await.unwrap();
    assert_eq!(session.ask("Why?").await, Ok(None));

    assert_eq!(session.transcript(), &[ChatTurn::user("Why?")]);
}

#[tokio::test]
async fn test_translate_slowBackend_shouldTimeOutToNone() {
    let llm = MockLlm::slow(500, "late");
    let client = LlmClient::new(Arc::new(llm.clone()), "test-model")
        .with_gate(RequestGate::sequential(Duration::from_millis(20)));
    let service = TranslationService::new(client);

    assert!(service.translate("Hello", "english", "spanish").await.is_none());
    assert!(service.cache().is_empty());
}

#[tokio::test]
async fn test_translate_cancelled_shouldReturnNone() {
    let llm = MockLlm::slow(5_000, "late");
    let service = TranslationService::new(common::mock_client(&llm));
    let token = CancellationToken::new();

    let canceller = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        canceller.cancel();
    });

    let result = service.translate_with_cancel("Hello", "english", "spanish", &token).await;
    assert!(result.is_none());
}

#[tokio::test]
async fn test_answerFollowUp_shouldUseSourceLanguageAndBlock() {
    let llm = MockLlm::fixed("Parce que c'est poli.");
    let service = FollowUpService::new(common::mock_client(&llm));

    let answer = service.answer_follow_up("Previous translations:\n\nUser Question:\nPourquoi?", "french").await;

    assert_eq!(answer.as_deref(), Some("Parce que c'est poli."));
    let messages = llm.last_messages().unwrap();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].content.contains("reply in french"));
    assert!(messages[0].content.ends_with("User Question:\nPourquoi?"));
}

#[tokio::test]
async fn test_answerFollowUp_backendFailure_shouldReturnNone() {
    let service = FollowUpService::new(common::mock_client(&MockLlm::failing()));
    assert!(service.answer_follow_up("block", "english").await.is_none());
}
