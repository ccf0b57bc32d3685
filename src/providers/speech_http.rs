/*!
 * Hosted text-to-speech client.
 *
 * Sends a `SynthesizeSpeech`-shaped JSON body (`VoiceId`, `Text`,
 * `OutputFormat`, `Engine`) to `{endpoint}/v1/speech` and returns the
 * response body untouched as the audio stream.
 */

use std::time::Duration;
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use serde::Serialize;
use log::{debug, error};

use crate::errors::ProviderError;
use super::{SpeechBackend, SpeechRequest};

/// Wire body for the speech endpoint
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SynthesizeSpeechBody<'a> {
    pub voice_id: &'a str,
    pub text: &'a str,
    pub output_format: &'a str,
    pub engine: &'a str,
}

impl<'a> From<&'a SpeechRequest> for SynthesizeSpeechBody<'a> {
    fn from(request: &'a SpeechRequest) -> Self {
        Self {
            voice_id: &request.voice_id,
            text: &request.text,
            output_format: &request.output_format,
            engine: &request.engine,
        }
    }
}

/// HTTP client for the speech service
#[derive(Debug)]
pub struct HttpSpeech {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl HttpSpeech {
    /// Create a new speech client
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }

    /// Full URL of the synthesis endpoint
    pub fn speech_url(&self) -> String {
        format!("{}/v1/speech", self.endpoint.trim_end_matches('/'))
    }
}

#[async_trait]
impl SpeechBackend for HttpSpeech {
    fn name(&self) -> &str {
        "speech-http"
    }

    async fn synthesize(&self, request: &SpeechRequest) -> Result<Bytes, ProviderError> {
        let body = SynthesizeSpeechBody::from(request);

        let mut builder = self.client.post(self.speech_url()).json(&body);
        if !self.api_key.is_empty() {
            builder = builder.bearer_auth(&self.api_key);
        }

        let response = builder.send().await.map_err(ProviderError::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Speech API error ({}): {}", status, error_text);
            return Err(ProviderError::from_status(status.as_u16(), error_text));
        }

        let audio = response.bytes().await.map_err(ProviderError::from_transport)?;
        debug!("Received {} bytes of {} audio for voice {}", audio.len(), request.output_format, request.voice_id);
        Ok(audio)
    }
}
