/*!
 * Common test utilities for the contextual translator test suite
 */

use std::path::{Path, PathBuf};
use std::sync::Arc;
use anyhow::Result;
use tempfile::TempDir;

use contextual_translator::app_config::{Config, LlmProvider};
use contextual_translator::app_controller::Controller;
use contextual_translator::providers::mock::{MockLlm, MockSpeech};
use contextual_translator::session::Session;
use contextual_translator::speech::SpeechService;
use contextual_translator::translation::{FollowUpService, LlmClient, TranslationService};

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    std::fs::write(&file_path, content)?;
    Ok(file_path)
}

/// A configuration that passes validation without network credentials
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.llm.provider = LlmProvider::Ollama;
    config.llm.model = "test-model".to_string();
    config
}

/// LLM client over a mock backend
pub fn mock_client(llm: &MockLlm) -> LlmClient {
    LlmClient::new(Arc::new(llm.clone()), "test-model")
}

/// Session wired to the given mocks, with the default cache and catalog
pub fn mock_session(llm: &MockLlm, speech: &MockSpeech) -> Session {
    let client = mock_client(llm);
    Session::new(
        TranslationService::new(client.clone()),
        FollowUpService::new(client),
        SpeechService::new(Arc::new(speech.clone())),
        "english",
    )
}

/// Controller wired to the given mocks
pub fn mock_controller(llm: &MockLlm, speech: &MockSpeech) -> Controller {
    Controller::with_backends(test_config(), Arc::new(llm.clone()), Arc::new(speech.clone()))
}

/// Enable test logging once; repeated calls are ignored
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
