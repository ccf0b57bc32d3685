/*!
 * Backend implementations for the translation assistant.
 *
 * This module defines the two external boundaries the core talks to and
 * contains client implementations for them:
 * - Anthropic: hosted Claude models over the Messages API
 * - Ollama: local LLM server over the chat API
 * - Speech: hosted text-to-speech endpoint returning compressed audio
 * - Mock: scriptable fakes used by the test suite
 */

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::errors::ProviderError;

/// A single conversational turn sent to an LLM backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Role of the message sender (user, assistant)
    pub role: String,

    /// Content of the message
    pub content: String,
}

impl Message {
    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

/// Common trait for all LLM backends
///
/// One non-streaming completion per call. Implementations report every
/// transport, auth or quota problem as a `ProviderError`.
#[async_trait]
pub trait LlmBackend: Send + Sync + Debug {
    /// Short backend name used in log lines
    fn name(&self) -> &str;

    /// Run a completion and return the generated text
    ///
    /// # Arguments
    /// * `model` - Model identifier understood by the backend
    /// * `messages` - Ordered conversation turns
    /// * `max_tokens` - Ceiling on generated output
    async fn invoke(&self, model: &str, messages: &[Message], max_tokens: u32) -> Result<String, ProviderError>;
}

/// Parameters for one speech synthesis call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechRequest {
    /// Backend-specific voice identifier
    pub voice_id: String,

    /// Text to speak
    pub text: String,

    /// Audio encoding, e.g. "mp3"
    pub output_format: String,

    /// Voice engine tier, e.g. "neural"
    pub engine: String,
}

/// Common trait for text-to-speech backends
#[async_trait]
pub trait SpeechBackend: Send + Sync + Debug {
    /// Short backend name used in log lines
    fn name(&self) -> &str;

    /// Synthesize the request and return the raw audio stream
    async fn synthesize(&self, request: &SpeechRequest) -> Result<Bytes, ProviderError>;
}

pub mod anthropic;
pub mod mock;
pub mod ollama;
pub mod speech_http;
