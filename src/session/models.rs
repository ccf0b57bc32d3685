/*!
 * Session-specific models.
 */

use serde::{Deserialize, Serialize};

use crate::translation::{ParsedResponse, TranslationRecord};

/// Who authored a transcript turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    /// Lowercase role name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for ChatRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One turn of the follow-up chat
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    /// Author of the turn
    pub role: ChatRole,
    /// Text of the turn
    pub content: String,
}

impl ChatTurn {
    /// Create a user turn
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: ChatRole::User, content: content.into() }
    }

    /// Create an assistant turn
    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: ChatRole::Assistant, content: content.into() }
    }
}

/// Result of one successful translation in a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationOutcome {
    /// Text the user submitted
    pub input_text: String,
    /// Translated text
    pub translation: String,
    /// Notes on the translation, possibly empty
    pub explanation: String,
    /// Source language name
    pub source_language: String,
    /// Target language name
    pub target_language: String,
}

impl TranslationOutcome {
    /// Combine the request with the parsed completion
    pub fn new(input_text: &str, parsed: ParsedResponse, source_language: &str, target_language: &str) -> Self {
        Self {
            input_text: input_text.to_string(),
            translation: parsed.translation,
            explanation: parsed.explanation,
            source_language: source_language.to_string(),
            target_language: target_language.to_string(),
        }
    }

    /// Ledger record for this outcome
    pub fn to_record(&self) -> TranslationRecord {
        TranslationRecord::new(
            self.input_text.clone(),
            self.translation.clone(),
            self.source_language.clone(),
            self.target_language.clone(),
        )
    }

    /// Check if the model returned notes
    pub fn has_explanation(&self) -> bool {
        !self.explanation.is_empty()
    }
}
