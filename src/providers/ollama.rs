use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;
use log::error;

use crate::errors::ProviderError;
use super::{LlmBackend, Message};

/// Ollama client for interacting with a local Ollama server
#[derive(Debug)]
pub struct Ollama {
    /// Base URL of the Ollama API
    base_url: String,
    /// HTTP client for making requests
    client: Client,
    /// Sampling temperature applied to every request
    temperature: Option<f32>,
}

/// Generation options for the Ollama API
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Temperature for generation
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    /// Maximum number of tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
}

/// Chat request for the Ollama API
#[derive(Debug, Serialize)]
pub struct ChatRequest {
    /// Model name to use for generation
    model: String,
    /// Messages of the conversation
    messages: Vec<Message>,
    /// Additional model parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<GenerationOptions>,
    /// Whether to stream the response
    stream: bool,
}

/// Chat response from the Ollama API
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    /// Model name
    pub model: String,
    /// Response message
    pub message: Message,
    /// Whether the generation is complete
    pub done: bool,
    /// Number of prompt tokens
    #[serde(default)]
    pub prompt_eval_count: Option<u64>,
    /// Number of generated tokens
    #[serde(default)]
    pub eval_count: Option<u64>,
}

impl ChatRequest {
    /// Create a new non-streaming chat request
    pub fn new(model: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            model: model.into(),
            messages,
            options: None,
            stream: false,
        }
    }

    /// Set the temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.options.get_or_insert_with(GenerationOptions::default).temperature = Some(temperature);
        self
    }

    /// Cap the number of generated tokens
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.options.get_or_insert_with(GenerationOptions::default).num_predict = Some(max_tokens);
        self
    }
}

/// Parse an endpoint string into a base URL with scheme and port
pub fn parse_endpoint(endpoint: &str) -> Result<String, ProviderError> {
    if endpoint.trim().is_empty() {
        return Err(ProviderError::RequestFailed("Endpoint cannot be empty".to_string()));
    }

    let url = if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        Url::parse(endpoint)
    } else {
        Url::parse(&format!("http://{}", endpoint))
    }
    .map_err(|e| ProviderError::RequestFailed(format!("Invalid endpoint '{}': {}", endpoint, e)))?;

    let host = url.host_str()
        .ok_or_else(|| ProviderError::RequestFailed(format!("Invalid host in endpoint: {}", endpoint)))?;
    let port = url.port().unwrap_or(if url.scheme() == "https" { 443 } else { 11434 });

    Ok(format!("{}://{}:{}", url.scheme(), host, port))
}

impl Ollama {
    /// Create a new Ollama client for the given endpoint
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, ProviderError> {
        Ok(Self {
            base_url: parse_endpoint(endpoint)?,
            client: Client::builder()
                .timeout(timeout)
                // Ollama uses HTTP/1.1
                .http1_only()
                .pool_idle_timeout(Duration::from_secs(90))
                .build()
                .unwrap_or_default(),
            temperature: None,
        })
    }

    /// Apply a fixed sampling temperature to every request
    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    /// Base URL the client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Chat with the Ollama API
    pub async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, ProviderError> {
        let url = format!("{}/api/chat", self.base_url);

        let response = self.client.post(&url)
            .json(&request)
            .send()
            .await
            .map_err(ProviderError::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Ollama API error ({}): {}", status, error_text);
            return Err(ProviderError::from_status(status.as_u16(), error_text));
        }

        response.json::<ChatResponse>().await
            .map_err(|e| ProviderError::ParseError(format!("Failed to parse Ollama chat response: {}", e)))
    }
}

#[async_trait]
impl LlmBackend for Ollama {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn invoke(&self, model: &str, messages: &[Message], max_tokens: u32) -> Result<String, ProviderError> {
        let mut request = ChatRequest::new(model, messages.to_vec()).max_tokens(max_tokens);
        if let Some(temperature) = self.temperature {
            request = request.temperature(temperature);
        }

        let response = self.chat(request).await?;
        Ok(response.message.content)
    }
}
