use anyhow::{anyhow, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio_util::sync::CancellationToken;

use crate::app_config::{Config, LlmProvider};
use crate::language_utils::resolve_language;
use crate::providers::anthropic::Anthropic;
use crate::providers::ollama::Ollama;
use crate::providers::speech_http::HttpSpeech;
use crate::providers::{LlmBackend, SpeechBackend};
use crate::session::{Session, TranslationOutcome};
use crate::speech::SpeechService;
use crate::translation::{FollowUpService, LlmClient, RequestGate, TranslationCache, TranslationService};

/// One line of input in the interactive chat
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    /// Plain text to translate
    Translate(String),
    /// Follow-up question (line starting with `?`)
    Ask(String),
    /// Write audio for the last translation to a file
    Speak(PathBuf),
    /// Print the context ledger
    History,
    /// Print the command list
    Help,
    /// Leave the chat
    Quit,
    /// Blank line
    Empty,
    /// Unrecognised slash command
    Unknown(String),
}

impl ChatCommand {
    /// Interpret one input line
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Self::Empty;
        }

        if let Some(question) = line.strip_prefix('?') {
            return Self::Ask(question.trim().to_string());
        }

        let Some(command) = line.strip_prefix('/') else {
            return Self::Translate(line.to_string());
        };

        let (name, argument) = command
            .split_once(char::is_whitespace)
            .map(|(name, argument)| (name, argument.trim()))
            .unwrap_or((command, ""));

        match name {
            "speak" if !argument.is_empty() => Self::Speak(PathBuf::from(argument)),
            "history" => Self::History,
            "help" => Self::Help,
            "quit" | "exit" => Self::Quit,
            _ => Self::Unknown(line.to_string()),
        }
    }
}

const CHAT_HELP: &str = "Type text to translate it.
  ?QUESTION     ask about the recent translations
  /speak FILE   write audio of the last translation to FILE
  /history      show the translations kept as context
  /quit         leave";

/// Main application controller wiring configuration to services
pub struct Controller {
    config: Config,
    llm: Arc<dyn LlmBackend>,
    speech: Arc<dyn SpeechBackend>,
    gate: RequestGate,
    cache: TranslationCache,
}

impl Controller {
    /// Build real backends from the configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let llm: Arc<dyn LlmBackend> = match config.llm.provider {
            LlmProvider::Anthropic => Arc::new(
                Anthropic::new(&config.llm.api_key, config.llm.effective_endpoint(), config.llm.timeout())
                    .with_temperature(config.llm.temperature),
            ),
            LlmProvider::Ollama => Arc::new(
                Ollama::new(&config.llm.effective_endpoint(), config.llm.timeout())?
                    .with_temperature(config.llm.temperature),
            ),
        };

        let speech: Arc<dyn SpeechBackend> = Arc::new(HttpSpeech::new(
            &config.speech.endpoint,
            &config.speech.api_key,
            config.speech.timeout(),
        ));

        Ok(Self::with_backends(config, llm, speech))
    }

    /// Use the given backends instead of building them from the configuration
    pub fn with_backends(config: Config, llm: Arc<dyn LlmBackend>, speech: Arc<dyn SpeechBackend>) -> Self {
        let gate = RequestGate::new(
            config.concurrency.max_concurrent_requests,
            config.concurrency.request_timeout(),
        );
        let cache = TranslationCache::new(config.cache.enabled, config.cache.capacity);

        Self { config, llm, speech, gate, cache }
    }

    /// The active configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The memo cache shared by every session of this controller
    pub fn cache(&self) -> &TranslationCache {
        &self.cache
    }

    /// Create a fresh session sharing this controller's backends, gate and cache
    pub fn new_session(&self, source_language: &str) -> Session {
        let client = LlmClient::new(Arc::clone(&self.llm), &self.config.llm.model)
            .with_max_tokens(self.config.llm.max_tokens)
            .with_gate(self.gate.clone());

        let translator = TranslationService::new(client.clone()).with_cache(self.cache.clone());
        let follow_up = FollowUpService::new(client);
        let speech = SpeechService::new(Arc::clone(&self.speech))
            .with_catalog(self.config.speech.voice_catalog())
            .with_format(&self.config.speech.output_format, &self.config.speech.engine)
            .with_gate(self.gate.clone());

        Session::new(translator, follow_up, speech, source_language)
    }

    /// Resolve optional CLI languages against the configured defaults
    pub fn resolve_languages(&self, source: Option<&str>, target: Option<&str>) -> Result<(String, String)> {
        let catalog = self.config.speech.voice_catalog();
        let source = source.unwrap_or(&self.config.source_language);
        let target = target.unwrap_or(&self.config.target_language);

        Ok((
            resolve_language(source, &catalog).context("Invalid source language")?,
            resolve_language(target, &catalog).context("Invalid target language")?,
        ))
    }

    /// Translate one text, optionally writing its audio to `audio_path`
    pub async fn translate_once(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
        audio_path: Option<&Path>,
    ) -> Result<TranslationOutcome> {
        let mut session = self.new_session(source_language);
        let cancel = cancel_on_ctrl_c();

        info!("Translating with {} - {}", self.llm.name(), self.config.llm.model);

        let spinner = Self::spinner(format!("Translating {} -> {}", source_language, target_language));
        let outcome = session
            .translate_with_cancel(text, source_language, target_language, &cancel)
            .await;
        spinner.finish_and_clear();

        let outcome = outcome?.ok_or_else(|| anyhow!("Translation failed"))?;

        if let Some(path) = audio_path {
            let audio = session
                .speak_with_cancel(&cancel)
                .await?
                .ok_or_else(|| anyhow!("Speech synthesis failed"))?;
            tokio::fs::write(path, &audio)
                .await
                .with_context(|| format!("Failed to write audio file: {}", path.display()))?;
            info!("Audio saved to {}", path.display());
        }

        Ok(outcome)
    }

    /// Run the interactive chat until `/quit` or end of input
    pub async fn run_chat<R, W>(
        &self,
        input: R,
        mut output: W,
        source_language: &str,
        target_language: &str,
    ) -> Result<Session>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut session = self.new_session(source_language);
        let mut lines = input.lines();

        output
            .write_all(format!("Translating {} -> {}. Type /help for commands.\n", source_language, target_language).as_bytes())
            .await?;
        output.flush().await?;

        while let Some(line) = lines.next_line().await? {
            let reply = match ChatCommand::parse(&line) {
                ChatCommand::Empty => continue,
                ChatCommand::Quit => break,
                ChatCommand::Help => CHAT_HELP.to_string(),
                ChatCommand::Unknown(command) => format!("Unknown command: {}", command),
                ChatCommand::History => Self::render_history(&session),
                ChatCommand::Translate(text) => {
                    match session.translate(&text, source_language, target_language).await? {
                        Some(outcome) => Self::render_outcome(&outcome),
                        None => "Translation failed, see log for details.".to_string(),
                    }
                }
                ChatCommand::Ask(question) => match session.ask(&question).await {
                    Ok(Some(answer)) => answer,
                    Ok(None) => "Follow-up failed, see log for details.".to_string(),
                    Err(e) => e.to_string(),
                },
                ChatCommand::Speak(path) => match session.speak().await {
                    Ok(Some(audio)) => {
                        tokio::fs::write(&path, &audio)
                            .await
                            .with_context(|| format!("Failed to write audio file: {}", path.display()))?;
                        format!("Audio saved to {}", path.display())
                    }
                    Ok(None) => "Speech synthesis failed, see log for details.".to_string(),
                    Err(e) => e.to_string(),
                },
            };

            output.write_all(reply.as_bytes()).await?;
            output.write_all(b"\n").await?;
            output.flush().await?;
        }

        let stats = self.cache.stats();
        debug!(
            "Chat ended: {} translations in context, cache hit rate {:.0}%",
            session.ledger().len(),
            stats.hit_rate * 100.0
        );

        Ok(session)
    }

    /// Supported languages and their voices, one per line
    pub fn render_voices(&self) -> String {
        self.config
            .speech
            .voice_catalog()
            .entries()
            .map(|(language, voice)| format!("{:<12} {}", language, voice))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Translation followed by its explanation, if any
    pub fn render_outcome(outcome: &TranslationOutcome) -> String {
        if outcome.has_explanation() {
            format!("{}\n\n{}", outcome.translation, outcome.explanation)
        } else {
            outcome.translation.clone()
        }
    }

    fn render_history(session: &Session) -> String {
        if session.ledger().is_empty() {
            return "No translations yet.".to_string();
        }

        session
            .ledger()
            .records()
            .map(|record| record.render_line())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn spinner(message: String) -> ProgressBar {
        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        spinner.set_style(style);
        spinner.set_message(message);
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner
    }
}

/// Token cancelled on the first Ctrl-C
fn cancel_on_ctrl_c() -> CancellationToken {
    let token = CancellationToken::new();
    let child = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling request");
            child.cancel();
        }
    });
    token
}
