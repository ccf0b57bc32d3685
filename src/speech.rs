/*!
 * Speech synthesis for translated text.
 *
 * The voice catalog maps each supported language name to a voice
 * identifier of the TTS backend. Synthesis for a language outside the
 * catalog is rejected before any backend call.
 */

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use bytes::Bytes;
use log::{debug, error};
use once_cell::sync::Lazy;
use tokio_util::sync::CancellationToken;

use crate::errors::SpeechError;
use crate::providers::{SpeechBackend, SpeechRequest};
use crate::translation::RequestGate;

/// Built-in catalog: language name, ISO 639-2/T code, voice identifier
const BUILTIN_VOICES: [(&str, &str, &str); 14] = [
    ("arabic", "ara", "Hala"),
    ("dutch", "nld", "Lisa"),
    ("chinese", "zho", "Zhiyu"),
    ("english", "eng", "Emma"),
    ("french", "fra", "Remi"),
    ("german", "deu", "Daniel"),
    ("hindi", "hin", "Kajal"),
    ("italian", "ita", "Bianca"),
    ("japanese", "jpn", "Takumi"),
    ("korean", "kor", "Seoyeon"),
    ("polish", "pol", "Ola"),
    ("portuguese", "por", "Vitoria"),
    ("spanish", "spa", "Pedro"),
    ("swedish", "swe", "Elin"),
];

static BUILTIN_CATALOG: Lazy<VoiceCatalog> = Lazy::new(|| {
    let mut catalog = VoiceCatalog { voices: BTreeMap::new() };
    for (language, iso_639_3, voice_id) in BUILTIN_VOICES {
        catalog.voices.insert(language.to_string(), VoiceEntry {
            voice_id: voice_id.to_string(),
            iso_639_3: Some(iso_639_3.to_string()),
        });
    }
    catalog
});

/// Default audio encoding
pub const DEFAULT_OUTPUT_FORMAT: &str = "mp3";

/// Default voice engine tier
pub const DEFAULT_ENGINE: &str = "neural";

#[derive(Debug, Clone, PartialEq, Eq)]
struct VoiceEntry {
    voice_id: String,
    iso_639_3: Option<String>,
}

/// Mapping from language name to voice identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceCatalog {
    voices: BTreeMap<String, VoiceEntry>,
}

impl VoiceCatalog {
    /// Built-in catalog with `overrides` (language name -> voice id) merged on top
    pub fn with_overrides(overrides: &HashMap<String, String>) -> Self {
        let mut catalog = Self::default();
        for (language, voice_id) in overrides {
            let language = language.trim().to_lowercase();
            let iso_639_3 = catalog.voices.get(&language).and_then(|entry| entry.iso_639_3.clone());
            catalog.voices.insert(language, VoiceEntry {
                voice_id: voice_id.clone(),
                iso_639_3,
            });
        }
        catalog
    }

    /// Voice identifier for a language name, case-insensitive
    pub fn voice_for(&self, language: &str) -> Option<&str> {
        self.voices
            .get(&language.trim().to_lowercase())
            .map(|entry| entry.voice_id.as_str())
    }

    /// Check if a lowercase language name is in the catalog
    pub fn contains(&self, language: &str) -> bool {
        self.voices.contains_key(language)
    }

    /// Catalog language name for an ISO 639-2/T code
    pub fn language_for_iso(&self, iso_639_3: &str) -> Option<&str> {
        self.voices
            .iter()
            .find(|(_, entry)| entry.iso_639_3.as_deref() == Some(iso_639_3))
            .map(|(language, _)| language.as_str())
    }

    /// Sorted language names
    pub fn language_names(&self) -> Vec<&str> {
        self.voices.keys().map(String::as_str).collect()
    }

    /// (language, voice id) pairs, sorted by language
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.voices.iter().map(|(language, entry)| (language.as_str(), entry.voice_id.as_str()))
    }

    /// Number of languages
    pub fn len(&self) -> usize {
        self.voices.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.voices.is_empty()
    }
}

impl Default for VoiceCatalog {
    fn default() -> Self {
        BUILTIN_CATALOG.clone()
    }
}

/// Speech synthesis service
#[derive(Debug, Clone)]
pub struct SpeechService {
    backend: Arc<dyn SpeechBackend>,
    catalog: VoiceCatalog,
    output_format: String,
    engine: String,
    gate: RequestGate,
}

impl SpeechService {
    /// Create a service using the built-in catalog, mp3 output and the neural engine
    pub fn new(backend: Arc<dyn SpeechBackend>) -> Self {
        Self {
            backend,
            catalog: VoiceCatalog::default(),
            output_format: DEFAULT_OUTPUT_FORMAT.to_string(),
            engine: DEFAULT_ENGINE.to_string(),
            gate: RequestGate::default(),
        }
    }

    /// Use `catalog` for voice lookup
    pub fn with_catalog(mut self, catalog: VoiceCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Override audio encoding and engine tier
    pub fn with_format(mut self, output_format: impl Into<String>, engine: impl Into<String>) -> Self {
        self.output_format = output_format.into();
        self.engine = engine.into();
        self
    }

    /// Route calls through `gate`
    pub fn with_gate(mut self, gate: RequestGate) -> Self {
        self.gate = gate;
        self
    }

    /// The voice catalog
    pub fn catalog(&self) -> &VoiceCatalog {
        &self.catalog
    }

    /// Synthesize `text` in `language`
    ///
    /// Returns `Err` for a language outside the catalog and `Ok(None)` when
    /// the backend fails.
    pub async fn synthesize(&self, text: &str, language: &str) -> Result<Option<Bytes>, SpeechError> {
        self.synthesize_with_cancel(text, language, &CancellationToken::new()).await
    }

    /// Like `synthesize`, abandoning the call when `cancel` fires
    pub async fn synthesize_with_cancel(
        &self,
        text: &str,
        language: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<Bytes>, SpeechError> {
        let voice_id = self.catalog.voice_for(language).ok_or_else(|| SpeechError::UnsupportedLanguage {
            language: language.to_string(),
        })?;

        let request = SpeechRequest {
            voice_id: voice_id.to_string(),
            text: text.to_string(),
            output_format: self.output_format.clone(),
            engine: self.engine.clone(),
        };

        debug!("Synthesizing {} chars with voice {} via {}", text.chars().count(), voice_id, self.backend.name());

        match self.gate.run("Speech synthesis", cancel, self.backend.synthesize(&request)).await {
            Ok(audio) => Ok(Some(audio)),
            Err(e) => {
                error!("Error in audio synthesis: {}", e);
                Ok(None)
            }
        }
    }
}
