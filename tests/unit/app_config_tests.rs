/*!
 * Tests for application configuration loading and validation
 */

use anyhow::Result;
use contextual_translator::app_config::{Config, LlmProvider, LogLevel};
use crate::common;

#[test]
fn test_config_saveThenLoad_shouldPreserveSettings() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let path = dir.path().join("conf.json");

    let mut config = common::test_config();
    config.target_language = "french".to_string();
    config.llm.temperature = Some(0.2);
    config.speech.voices.insert("french".to_string(), "Lea".to_string());
    config.log_level = LogLevel::Debug;
    config.save(&path)?;

    let loaded = Config::from_file(&path)?;
    assert_eq!(loaded, config);
    Ok(())
}

#[test]
fn test_config_fromFile_withMinimalJson_shouldApplyDefaults() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let path = common::create_test_file(dir.path(), "conf.json", r#"{"llm": {"provider": "ollama"}}"#)?;

    let config = Config::from_file(&path)?;

    assert_eq!(config.llm.provider, LlmProvider::Ollama);
    assert_eq!(config.llm.model, "claude-3-5-sonnet-20240620");
    assert_eq!(config.cache.capacity, 100);
    assert_eq!(config.concurrency.request_timeout_secs, 60);
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.validate().is_ok());
    Ok(())
}

#[test]
fn test_config_fromFile_withInvalidJson_shouldFail() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let path = common::create_test_file(dir.path(), "conf.json", "{ not json")?;

    let err = Config::from_file(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config file"));
    Ok(())
}

#[test]
fn test_config_fromFile_withMissingFile_shouldFail() {
    assert!(Config::from_file("/nonexistent/conf.json").is_err());
}

#[test]
fn test_config_validate_withUnknownProviderString_shouldRejectAtParse() {
    let result: Result<Config, _> = serde_json::from_str(r#"{"llm": {"provider": "openai"}}"#);
    assert!(result.is_err());
}

#[test]
fn test_config_validate_withZeroCapacity_shouldFailOnlyWhenEnabled() {
    let mut config = common::test_config();
    config.cache.capacity = 0;
    assert!(config.validate().is_err());

    config.cache.enabled = false;
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_validate_withVoiceOverrideForNewLanguage_shouldAcceptThatLanguage() {
    let mut config = common::test_config();
    config.target_language = "welsh".to_string();
    assert!(config.validate().is_err());

    config.speech.voices.insert("welsh".to_string(), "Gwyneth".to_string());
    assert!(config.validate().is_ok());
}
