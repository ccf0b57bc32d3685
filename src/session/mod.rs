/*!
 * Session management for interactive translation.
 *
 * This module provides:
 * - The per-user `Session` controller
 * - Transcript and translation result models
 */

pub mod manager;
pub mod models;

// Re-export main types
pub use manager::{Session, QUESTION_SEPARATOR};
pub use models::{ChatRole, ChatTurn, TranslationOutcome};
