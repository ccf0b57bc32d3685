/*!
 * Mock backend implementations for testing.
 *
 * This module provides fakes that simulate different behaviors:
 * - `MockLlm::fixed(..)` - Always answers with the same text
 * - `MockLlm::counting()` - Answers differently on every call
 * - `MockLlm::failing()` - Always fails with an error
 * - `MockLlm::slow(..)` - Answers after a delay (for timeout testing)
 * - `MockSpeech` - The same behaviors for speech synthesis
 *
 * Clones share their call counters and request history.
 */

use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::errors::ProviderError;
use crate::providers::{LlmBackend, Message, SpeechBackend, SpeechRequest};

/// Behavior mode for the mock LLM
#[derive(Debug, Clone, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds with this text
    Fixed(String),
    /// Succeeds with "Response #n" where n is the 1-based call number
    Counting,
    /// Replays these responses in order, repeating the last one
    Sequence(Vec<String>),
    /// Always fails with an error
    Failing,
    /// Simulates a slow backend, then succeeds with this text
    Slow { delay_ms: u64, text: String },
}

/// Mock LLM backend
#[derive(Debug, Clone)]
pub struct MockLlm {
    behavior: MockBehavior,
    call_count: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<Vec<Message>>>>,
}

impl MockLlm {
    /// Create a new mock with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            call_count: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Always answer with `text`
    pub fn fixed(text: impl Into<String>) -> Self {
        Self::new(MockBehavior::Fixed(text.into()))
    }

    /// Answer differently on every call
    pub fn counting() -> Self {
        Self::new(MockBehavior::Counting)
    }

    /// Replay `responses` in order
    pub fn sequence(responses: &[&str]) -> Self {
        Self::new(MockBehavior::Sequence(responses.iter().map(|s| s.to_string()).collect()))
    }

    /// Always fail
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Answer with `text` after `delay_ms`
    pub fn slow(delay_ms: u64, text: impl Into<String>) -> Self {
        Self::new(MockBehavior::Slow { delay_ms, text: text.into() })
    }

    /// Number of times the backend was invoked
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Messages received by the most recent invocation
    pub fn last_messages(&self) -> Option<Vec<Message>> {
        self.requests.lock().last().cloned()
    }
}

#[async_trait]
impl LlmBackend for MockLlm {
    fn name(&self) -> &str {
        "mock"
    }

    async fn invoke(&self, _model: &str, messages: &[Message], _max_tokens: u32) -> Result<String, ProviderError> {
        let count = self.call_count.fetch_add(1, Ordering::SeqCst) + 1;
        self.requests.lock().push(messages.to_vec());

        match &self.behavior {
            MockBehavior::Fixed(text) => Ok(text.clone()),
            MockBehavior::Counting => Ok(format!("Response #{}", count)),
            MockBehavior::Sequence(responses) => {
                let index = (count - 1).min(responses.len().saturating_sub(1));
                responses.get(index).cloned().ok_or_else(|| {
                    ProviderError::ParseError("Mock sequence is empty".to_string())
                })
            }
            MockBehavior::Failing => Err(ProviderError::ApiError {
                status_code: 500,
                message: "Simulated backend failure".to_string(),
            }),
            MockBehavior::Slow { delay_ms, text } => {
                tokio::time::sleep(Duration::from_millis(*delay_ms)).await;
                Ok(text.clone())
            }
        }
    }
}

/// Mock speech backend
#[derive(Debug, Clone)]
pub struct MockSpeech {
    failing: bool,
    delay_ms: u64,
    call_count: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<SpeechRequest>>>,
}

impl MockSpeech {
    /// Speech backend that returns a fake MP3 frame followed by the text
    pub fn working() -> Self {
        Self {
            failing: false,
            delay_ms: 0,
            call_count: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Speech backend that always fails
    pub fn failing() -> Self {
        Self { failing: true, ..Self::working() }
    }

    /// Speech backend that answers after `delay_ms`
    pub fn slow(delay_ms: u64) -> Self {
        Self { delay_ms, ..Self::working() }
    }

    /// Number of times the backend was invoked
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// The most recent request
    pub fn last_request(&self) -> Option<SpeechRequest> {
        self.requests.lock().last().cloned()
    }
}

#[async_trait]
impl SpeechBackend for MockSpeech {
    fn name(&self) -> &str {
        "mock-speech"
    }

    async fn synthesize(&self, request: &SpeechRequest) -> Result<Bytes, ProviderError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().push(request.clone());

        if self.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        }

        if self.failing {
            return Err(ProviderError::ConnectionError("Simulated speech outage".to_string()));
        }

        let mut audio = b"ID3".to_vec();
        audio.extend_from_slice(request.text.as_bytes());
        Ok(Bytes::from(audio))
    }
}
