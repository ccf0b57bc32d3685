/*!
 * Conversation context for follow-up questions.
 *
 * This module keeps a short, bounded history of recent translations and
 * renders it into a text block that grounds follow-up answers.
 */

pub mod ledger;

// Re-export main types
pub use ledger::{ContextLedger, TranslationRecord, LEDGER_CAPACITY};
