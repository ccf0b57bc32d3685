/*!
 * Splits a raw model completion into a translation and an explanation.
 *
 * The translation is the first line that is not blank. The explanation is
 * every raw line from index 1 onward, joined and trimmed. When the
 * completion starts with blank lines the explanation therefore still
 * contains the translation line; callers rely on this slicing and it is
 * kept as is.
 */

use serde::{Deserialize, Serialize};

/// A completion split into its two parts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedResponse {
    /// The translated text
    pub translation: String,

    /// Notes on the translation, possibly empty
    pub explanation: String,
}

/// Parse a raw completion. Never fails.
pub fn parse(raw_response: &str) -> ParsedResponse {
    let lines: Vec<&str> = raw_response.split('\n').collect();

    let translation = lines
        .iter()
        .map(|line| line.trim())
        .find(|line| !line.is_empty())
        .unwrap_or_default()
        .to_string();

    let explanation = lines
        .get(1..)
        .map(|rest| rest.join("\n"))
        .unwrap_or_default()
        .trim()
        .to_string();

    ParsedResponse { translation, explanation }
}
