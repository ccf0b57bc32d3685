use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use crate::language_utils::resolve_language;
use crate::speech::{VoiceCatalog, DEFAULT_ENGINE, DEFAULT_OUTPUT_FORMAT};
use crate::translation::cache::DEFAULT_CACHE_CAPACITY;
use crate::translation::core::DEFAULT_MAX_TOKENS;

/// Application configuration module
/// This module handles loading, validating and saving the translator settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Default source language (catalog name or ISO code)
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Default target language (catalog name or ISO code)
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// LLM backend settings
    #[serde(default)]
    pub llm: LlmConfig,

    /// Speech backend settings
    #[serde(default)]
    pub speech: SpeechConfig,

    /// Memo cache settings
    #[serde(default)]
    pub cache: CacheConfig,

    /// Request gating settings
    #[serde(default)]
    pub concurrency: ConcurrencyConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// LLM provider type
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    /// Hosted Messages API
    #[default]
    Anthropic,
    /// Local Ollama server
    Ollama,
}

impl LlmProvider {
    /// Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Anthropic => "Anthropic",
            Self::Ollama => "Ollama",
        }
    }

    /// Lowercase provider identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Anthropic => "anthropic",
            Self::Ollama => "ollama",
        }
    }

    /// Whether requests need an API key
    pub fn requires_api_key(&self) -> bool {
        matches!(self, Self::Anthropic)
    }
}

impl std::fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for LlmProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "anthropic" => Ok(Self::Anthropic),
            "ollama" => Ok(Self::Ollama),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// LLM backend configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LlmConfig {
    /// Backend to use
    #[serde(default)]
    pub provider: LlmProvider,

    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// API key, required for hosted providers
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Service endpoint URL; empty means the provider default
    #[serde(default = "String::new")]
    pub endpoint: String,

    /// Completion token cap
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// HTTP timeout in seconds
    #[serde(default = "default_llm_timeout_secs")]
    pub timeout_secs: u64,

    /// Sampling temperature; provider default when unset
    #[serde(default)]
    pub temperature: Option<f32>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: LlmProvider::default(),
            model: default_model(),
            api_key: String::new(),
            endpoint: String::new(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_llm_timeout_secs(),
            temperature: None,
        }
    }
}

impl LlmConfig {
    /// Configured endpoint, or the provider's default
    pub fn effective_endpoint(&self) -> String {
        if !self.endpoint.trim().is_empty() {
            return self.endpoint.clone();
        }

        match self.provider {
            LlmProvider::Anthropic => default_anthropic_endpoint(),
            LlmProvider::Ollama => default_ollama_endpoint(),
        }
    }

    /// HTTP timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Speech backend configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SpeechConfig {
    /// Speech service endpoint URL
    #[serde(default = "default_speech_endpoint")]
    pub endpoint: String,

    /// Bearer token for the speech service, if it needs one
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Audio encoding
    #[serde(default = "default_output_format")]
    pub output_format: String,

    /// Voice engine tier
    #[serde(default = "default_engine")]
    pub engine: String,

    /// HTTP timeout in seconds
    #[serde(default = "default_speech_timeout_secs")]
    pub timeout_secs: u64,

    /// Voice overrides (language name -> voice id) merged over the built-in catalog
    #[serde(default)]
    pub voices: HashMap<String, String>,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            endpoint: default_speech_endpoint(),
            api_key: String::new(),
            output_format: default_output_format(),
            engine: default_engine(),
            timeout_secs: default_speech_timeout_secs(),
            voices: HashMap::new(),
        }
    }
}

impl SpeechConfig {
    /// Built-in catalog with the configured overrides applied
    pub fn voice_catalog(&self) -> VoiceCatalog {
        VoiceCatalog::with_overrides(&self.voices)
    }

    /// HTTP timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Memo cache configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CacheConfig {
    /// Whether translation results are memoized
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Maximum number of memoized results
    #[serde(default = "default_cache_capacity")]
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            capacity: default_cache_capacity(),
        }
    }
}

/// Request gating configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ConcurrencyConfig {
    /// Backend calls allowed in flight at once
    #[serde(default = "default_max_concurrent_requests")]
    pub max_concurrent_requests: usize,

    /// Upper bound on one backend call, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for ConcurrencyConfig {
    fn default() -> Self {
        Self {
            max_concurrent_requests: default_max_concurrent_requests(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl ConcurrencyConfig {
    /// Per-call timeout
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Matching `log` filter
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_source_language() -> String {
    "english".to_string()
}

fn default_target_language() -> String {
    "spanish".to_string()
}

fn default_model() -> String {
    "claude-3-5-sonnet-20240620".to_string()
}

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

fn default_llm_timeout_secs() -> u64 {
    60
}

fn default_anthropic_endpoint() -> String {
    "https://api.anthropic.com".to_string()
}

fn default_ollama_endpoint() -> String {
    "http://localhost:11434".to_string()
}

fn default_speech_endpoint() -> String {
    "http://localhost:5002".to_string()
}

fn default_output_format() -> String {
    DEFAULT_OUTPUT_FORMAT.to_string()
}

fn default_engine() -> String {
    DEFAULT_ENGINE.to_string()
}

fn default_speech_timeout_secs() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

fn default_cache_capacity() -> usize {
    DEFAULT_CACHE_CAPACITY
}

fn default_max_concurrent_requests() -> usize {
    1
}

fn default_request_timeout_secs() -> u64 {
    60
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Write configuration as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let catalog = self.speech.voice_catalog();

        resolve_language(&self.source_language, &catalog)
            .context("Invalid source language")?;
        resolve_language(&self.target_language, &catalog)
            .context("Invalid target language")?;

        if self.llm.provider.requires_api_key() && self.llm.api_key.trim().is_empty() {
            return Err(anyhow!("API key is required for {} provider", self.llm.provider.display_name()));
        }

        if self.llm.model.trim().is_empty() {
            return Err(anyhow!("Model name must not be empty"));
        }

        if self.llm.max_tokens == 0 {
            return Err(anyhow!("max_tokens must be greater than zero"));
        }

        if self.cache.enabled && self.cache.capacity == 0 {
            return Err(anyhow!("Cache capacity must be greater than zero"));
        }

        if self.concurrency.max_concurrent_requests == 0 {
            return Err(anyhow!("max_concurrent_requests must be greater than zero"));
        }

        if self.concurrency.request_timeout_secs == 0 {
            return Err(anyhow!("request_timeout_secs must be greater than zero"));
        }

        if let Some((language, _)) = self.speech.voices.iter().find(|(_, voice)| voice.trim().is_empty()) {
            return Err(anyhow!("Voice override for '{}' is empty", language));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: default_source_language(),
            target_language: default_target_language(),
            llm: LlmConfig::default(),
            speech: SpeechConfig::default(),
            cache: CacheConfig::default(),
            concurrency: ConcurrencyConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
