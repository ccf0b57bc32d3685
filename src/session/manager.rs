/*!
 * Translation session controller.
 *
 * A `Session` owns the per-user state: the context ledger, the follow-up
 * transcript, and the last translation and audio. Operations run one at a
 * time (`&mut self`), so a ledger append always happens before the next
 * follow-up renders the context.
 */

use bytes::Bytes;
use log::{debug, info, warn};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::errors::SessionError;
use crate::speech::SpeechService;
use crate::translation::{ContextLedger, FollowUpService, TranslationService};

use super::models::{ChatTurn, TranslationOutcome};

/// Separator placed between the rendered context and the user's question
pub const QUESTION_SEPARATOR: &str = "\nUser Question:\n";

/// Per-user translation session
#[derive(Debug)]
pub struct Session {
    /// Session identifier for log correlation
    id: String,

    translator: TranslationService,
    follow_up: FollowUpService,
    speech: SpeechService,

    ledger: ContextLedger,
    transcript: Vec<ChatTurn>,
    last_translation: Option<TranslationOutcome>,
    last_audio: Option<Bytes>,

    /// Language follow-up answers are written in
    source_language: String,
}

impl Session {
    /// Create an empty session
    pub fn new(
        translator: TranslationService,
        follow_up: FollowUpService,
        speech: SpeechService,
        source_language: impl Into<String>,
    ) -> Self {
        let id = Uuid::new_v4().to_string();
        debug!("Created session {}", &id[..8]);

        Self {
            id,
            translator,
            follow_up,
            speech,
            ledger: ContextLedger::new(),
            transcript: Vec::new(),
            last_translation: None,
            last_audio: None,
            source_language: source_language.into(),
        }
    }

    /// Session identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Translate `text` and record the exchange in the ledger
    ///
    /// Returns `Ok(None)` when the backend failed; nothing is recorded then.
    pub async fn translate(
        &mut self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<Option<TranslationOutcome>, SessionError> {
        self.translate_with_cancel(text, source_language, target_language, &CancellationToken::new()).await
    }

    /// Like `translate`, abandoning the backend call when `cancel` fires
    pub async fn translate_with_cancel(
        &mut self,
        text: &str,
        source_language: &str,
        target_language: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<TranslationOutcome>, SessionError> {
        if text.trim().is_empty() {
            return Err(SessionError::EmptyInput);
        }

        self.source_language = source_language.to_string();

        let Some(parsed) = self.translator
            .translate_with_cancel(text, source_language, target_language, cancel)
            .await
        else {
            warn!("Session {}: translation failed", &self.id[..8]);
            return Ok(None);
        };

        let outcome = TranslationOutcome::new(text, parsed, source_language, target_language);
        if let Some(evicted) = self.ledger.append(outcome.to_record()) {
            debug!("Session {}: dropped oldest context entry '{}'", &self.id[..8], evicted.input_text);
        }

        info!("Translated {} -> {} ({} entries in context)", source_language, target_language, self.ledger.len());

        self.last_translation = Some(outcome.clone());
        self.last_audio = None;
        Ok(Some(outcome))
    }

    /// Prompt block sent to the follow-up service for `question`
    pub fn follow_up_prompt(&self, question: &str) -> String {
        format!("{}{}{}", self.ledger.render_for_prompt(), QUESTION_SEPARATOR, question)
    }

    /// Ask a follow-up question grounded in the ledger
    ///
    /// The question is always added to the transcript; the answer only on success.
    pub async fn ask(&mut self, question: &str) -> Result<Option<String>, SessionError> {
        self.ask_with_cancel(question, &CancellationToken::new()).await
    }

    /// Like `ask`, abandoning the backend call when `cancel` fires
    pub async fn ask_with_cancel(
        &mut self,
        question: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<String>, SessionError> {
        if question.trim().is_empty() {
            return Err(SessionError::EmptyInput);
        }

        self.transcript.push(ChatTurn::user(question));

        let prompt = self.follow_up_prompt(question);
        let answer = self.follow_up
            .answer_follow_up_with_cancel(&prompt, &self.source_language, cancel)
            .await;

        if let Some(answer) = &answer {
            self.transcript.push(ChatTurn::assistant(answer.clone()));
        }
        Ok(answer)
    }

    /// Synthesize the last translation in its target language
    pub async fn speak(&mut self) -> Result<Option<Bytes>, SessionError> {
        self.speak_with_cancel(&CancellationToken::new()).await
    }

    /// Like `speak`, abandoning the backend call when `cancel` fires
    pub async fn speak_with_cancel(&mut self, cancel: &CancellationToken) -> Result<Option<Bytes>, SessionError> {
        let outcome = self.last_translation.as_ref().ok_or(SessionError::NothingToSpeak)?;

        let audio = self.speech
            .synthesize_with_cancel(&outcome.translation, &outcome.target_language, cancel)
            .await?;

        if audio.is_some() {
            self.last_audio = audio.clone();
        }
        Ok(audio)
    }

    /// The context ledger
    pub fn ledger(&self) -> &ContextLedger {
        &self.ledger
    }

    /// Follow-up chat turns in order
    pub fn transcript(&self) -> &[ChatTurn] {
        &self.transcript
    }

    /// Most recent successful translation
    pub fn last_translation(&self) -> Option<&TranslationOutcome> {
        self.last_translation.as_ref()
    }

    /// Audio for the most recent translation, if synthesized
    pub fn last_audio(&self) -> Option<&Bytes> {
        self.last_audio.as_ref()
    }

    /// The speech service, for catalog access
    pub fn speech(&self) -> &SpeechService {
        &self.speech
    }
}
