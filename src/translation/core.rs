/*!
 * Core translation service implementation.
 *
 * This module contains the `TranslationService`, which builds the translator
 * prompt, sends it to the configured LLM backend, splits the answer into a
 * translation and an explanation, and memoizes resolved results.
 */

use std::sync::Arc;
use std::time::Instant;
use log::{debug, error};
use tokio_util::sync::CancellationToken;

use crate::errors::ProviderError;
use crate::providers::{LlmBackend, Message};
use super::cache::TranslationCache;
use super::concurrency::RequestGate;
use super::parser::{self, ParsedResponse};
use super::prompts;

/// Output ceiling for every completion request
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

/// Handle on an LLM backend plus the settings every call shares
#[derive(Debug, Clone)]
pub struct LlmClient {
    /// Backend implementation
    backend: Arc<dyn LlmBackend>,

    /// Model identifier
    model: String,

    /// Maximum output tokens per call
    max_tokens: u32,

    /// Concurrency, timeout and cancellation gate
    gate: RequestGate,
}

impl LlmClient {
    /// Create a client with default token ceiling and gate
    pub fn new(backend: Arc<dyn LlmBackend>, model: impl Into<String>) -> Self {
        Self {
            backend,
            model: model.into(),
            max_tokens: DEFAULT_MAX_TOKENS,
            gate: RequestGate::default(),
        }
    }

    /// Set the output ceiling
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Route calls through `gate`
    pub fn with_gate(mut self, gate: RequestGate) -> Self {
        self.gate = gate;
        self
    }

    /// Model identifier
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Backend name
    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Run one completion through the gate
    pub async fn complete(
        &self,
        label: &str,
        messages: &[Message],
        cancel: &CancellationToken,
    ) -> Result<String, ProviderError> {
        let start_time = Instant::now();
        let result = self.gate
            .run(label, cancel, self.backend.invoke(&self.model, messages, self.max_tokens))
            .await;

        debug!("{} via {} ({}) finished in {:?}",
               label, self.backend.name(), self.model, start_time.elapsed());
        result
    }
}

/// Translation service with memoization
#[derive(Debug, Clone)]
pub struct TranslationService {
    /// LLM access
    client: LlmClient,

    /// Translation cache for storing and retrieving resolved results
    cache: TranslationCache,
}

impl TranslationService {
    /// Create a new translation service with a default cache
    pub fn new(client: LlmClient) -> Self {
        Self {
            client,
            cache: TranslationCache::default(),
        }
    }

    /// Replace the cache
    pub fn with_cache(mut self, cache: TranslationCache) -> Self {
        self.cache = cache;
        self
    }

    /// The memoization cache
    pub fn cache(&self) -> &TranslationCache {
        &self.cache
    }

    /// The underlying LLM client
    pub fn client(&self) -> &LlmClient {
        &self.client
    }

    /// Translate `text`, returning `None` if the backend fails
    pub async fn translate(&self, text: &str, source_language: &str, target_language: &str) -> Option<ParsedResponse> {
        self.translate_with_cancel(text, source_language, target_language, &CancellationToken::new()).await
    }

    /// Translate `text`, abandoning the backend call when `cancel` fires
    pub async fn translate_with_cancel(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
        cancel: &CancellationToken,
    ) -> Option<ParsedResponse> {
        if let Some(cached) = self.cache.get(text, source_language, target_language) {
            return Some(cached);
        }

        let messages = prompts::build_translation_messages(text, source_language, target_language);

        match self.client.complete("Translation", &messages, cancel).await {
            Ok(raw_response) if raw_response.trim().is_empty() => {
                error!("Error in translation ({} -> {}): backend returned an empty completion", source_language, target_language);
                None
            },
            Ok(raw_response) => {
                let parsed = parser::parse(&raw_response);
                self.cache.store(text, source_language, target_language, &parsed);
                Some(parsed)
            },
            Err(e) => {
                error!("Error in translation ({} -> {}): {}", source_language, target_language, e);
                None
            }
        }
    }
}
