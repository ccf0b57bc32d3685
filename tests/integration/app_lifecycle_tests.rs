/*!
 * Integration tests for controller wiring and the interactive chat
 */

use anyhow::Result;
use tokio::io::BufReader;

use contextual_translator::app_config::LlmProvider;
use contextual_translator::app_controller::Controller;
use contextual_translator::providers::mock::{MockLlm, MockSpeech};
use crate::common;

async fn run_chat(controller: &Controller, script: &str) -> Result<String> {
    let mut output = Vec::new();
    controller
        .run_chat(BufReader::new(script.as_bytes()), &mut output, "english", "spanish")
        .await?;
    Ok(String::from_utf8(output)?)
}

#[test]
fn test_controller_withConfig_shouldBuildRealBackends() -> Result<()> {
    let mut config = common::test_config();
    config.llm.provider = LlmProvider::Anthropic;
    config.llm.api_key = "sk-test".to_string();
    assert!(Controller::with_config(config).is_ok());

    assert!(Controller::with_config(common::test_config()).is_ok());
    Ok(())
}

#[test]
fn test_controller_withConfig_invalidOllamaEndpoint_shouldFail() {
    let mut config = common::test_config();
    config.llm.endpoint = "not a url".to_string();
    assert!(Controller::with_config(config).is_err());
}

#[test]
fn test_controller_resolveLanguages_shouldFallBackToConfig() -> Result<()> {
    let controller = common::mock_controller(&MockLlm::fixed("x"), &MockSpeech::working());

    assert_eq!(controller.resolve_languages(None, None)?, ("english".to_string(), "spanish".to_string()));
    assert_eq!(controller.resolve_languages(Some("fr"), Some("Japanese"))?, ("french".to_string(), "japanese".to_string()));
    assert!(controller.resolve_languages(Some("xx"), None).is_err());
    Ok(())
}

#[test]
fn test_controller_renderVoices_shouldListEveryLanguage() {
    let controller = common::mock_controller(&MockLlm::fixed("x"), &MockSpeech::working());
    let listing = controller.render_voices();

    assert_eq!(listing.lines().count(), 14);
    assert!(listing.lines().any(|line| line.starts_with("spanish") && line.ends_with("Pedro")));
}

#[tokio::test]
async fn test_controller_sessions_shouldShareCache() {
    let llm = MockLlm::counting();
    let controller = common::mock_controller(&llm, &MockSpeech::working());

    let mut first = controller.new_session("english");
    let mut second = controller.new_session("english");
    first.translate("Hello", "english", "spanish").await.unwrap();
    second.translate("Hello", "english", "spanish").await.unwrap();

    assert_eq!(llm.call_count(), 1);
    assert_eq!(controller.cache().stats().hits, 1);
    assert_eq!(second.ledger().len(), 1);
}

#[tokio::test]
async fn test_translateOnce_withAudioPath_shouldWriteAudioFile() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let audio_path = dir.path().join("out.mp3");
    let controller = common::mock_controller(&MockLlm::fixed("Hola\nGreeting."), &MockSpeech::working());

    let outcome = controller.translate_once("Hello", "english", "spanish", Some(&audio_path)).await?;

    assert_eq!(outcome.translation, "Hola");
    assert_eq!(outcome.explanation, "Greeting.");
    assert_eq!(std::fs::read(&audio_path)?, b"ID3Hola");
    Ok(())
}

#[tokio::test]
async fn test_translateOnce_backendFailure_shouldError() {
    let controller = common::mock_controller(&MockLlm::failing(), &MockSpeech::working());
    assert!(controller.translate_once("Hello", "english", "spanish", None).await.is_err());
}

#[tokio::test]
async fn test_runChat_shouldTranslateAskAndQuit() -> Result<()> {
    let llm = MockLlm::sequence(&["Hola\nInformal greeting.", "Use 'Buenos días' for formal."]);
    let controller = common::mock_controller(&llm, &MockSpeech::working());

    let output = run_chat(&controller, "Hi\n?How do I say it formally?\n/quit\nignored\n").await?;

    assert!(output.contains("Hola\n\nInformal greeting."));
    assert!(output.contains("Use 'Buenos días' for formal."));
    assert_eq!(llm.call_count(), 2);
    Ok(())
}

#[tokio::test]
async fn test_runChat_historyAndSpeak_shouldReportState() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let audio_path = dir.path().join("chat.mp3");
    let controller = common::mock_controller(&MockLlm::fixed("Hola"), &MockSpeech::working());

    let script = format!("/history\n/speak {}\nHi\n/history\n/speak {}\n", audio_path.display(), audio_path.display());
    let output = run_chat(&controller, &script).await?;

    assert!(output.contains("No translations yet."));
    assert!(output.contains("No translation available to speak"));
    assert!(output.contains("From english to spanish: 'Hi' -> 'Hola'"));
    assert!(output.contains("Audio saved to"));
    assert_eq!(std::fs::read(&audio_path)?, b"ID3Hola");
    Ok(())
}

#[tokio::test]
async fn test_runChat_session_shouldBeReturnedWithTranscript() -> Result<()> {
    let controller = common::mock_controller(&MockLlm::fixed("Sure."), &MockSpeech::working());

    let mut output = Vec::new();
    let session = controller
        .run_chat(BufReader::new("?Can you help?\n/unknown\n".as_bytes()), &mut output, "english", "spanish")
        .await?;

    assert_eq!(session.transcript().len(), 2);
    assert!(String::from_utf8(output)?.contains("Unknown command: /unknown"));
    Ok(())
}
