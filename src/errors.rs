/*!
 * Error types for the contextual translator.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when talking to an LLM or TTS backend
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting or quota
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// The call did not complete within the configured deadline
    #[error("Request timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// The caller cancelled the request before it completed
    #[error("Request cancelled")]
    Cancelled,
}

impl ProviderError {
    /// Classify a non-success HTTP status into the matching variant
    pub fn from_status(status_code: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status_code {
            401 | 403 => Self::AuthenticationError(message),
            429 => Self::RateLimitExceeded(message),
            _ => Self::ApiError { status_code, message },
        }
    }

    /// Classify a reqwest transport error
    pub fn from_transport(error: reqwest::Error) -> Self {
        if error.is_timeout() || error.is_connect() {
            Self::ConnectionError(error.to_string())
        } else if error.is_decode() {
            Self::ParseError(error.to_string())
        } else {
            Self::RequestFailed(error.to_string())
        }
    }
}

/// Errors that can occur while synthesizing speech
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SpeechError {
    /// The language has no voice in the catalog
    #[error("Unsupported language for speech synthesis: {language}")]
    UnsupportedLanguage {
        /// The language that was requested
        language: String,
    },
}

/// Errors raised by the session controller before any backend is involved
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionError {
    /// The user submitted no text
    #[error("Input text is empty")]
    EmptyInput,

    /// Audio was requested before anything was translated
    #[error("No translation available to speak")]
    NothingToSpeak,

    /// Speech synthesis rejected the request
    #[error(transparent)]
    Speech(#[from] SpeechError),
}
