/*!
 * # ctxtrans - Contextual Translation Assistant
 *
 * A Rust library for LLM-backed translation with follow-up questions and
 * speech synthesis.
 *
 * ## Features
 *
 * - Translate text between languages using an LLM:
 *   - Anthropic Messages API
 *   - Ollama (local LLM)
 * - Split completions into the translation and its explanatory notes
 * - Memoize recent translations in a bounded LRU cache
 * - Keep the last five translations as context for follow-up questions
 * - Read translations aloud through a per-language voice catalog
 * - Bounded, cancellable backend calls with explicit timeouts
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `translation`: LLM-backed services:
 *   - `translation::core`: Translation service and shared LLM client
 *   - `translation::follow_up`: Follow-up question answering
 *   - `translation::parser`: Completion parsing
 *   - `translation::cache`: Memoization of translation results
 *   - `translation::context`: Ledger of recent translations
 *   - `translation::concurrency`: Request gating
 * - `speech`: Voice catalog and speech synthesis
 * - `session`: Per-user session state
 * - `app_controller`: Main application controller
 * - `language_utils`: ISO language code utilities
 * - `providers`: Backend boundaries and clients:
 *   - `providers::anthropic`: Anthropic API client
 *   - `providers::ollama`: Ollama API client
 *   - `providers::speech_http`: Speech service client
 *   - `providers::mock`: Scriptable backends for tests
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod language_utils;
pub mod providers;
pub mod session;
pub mod speech;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use errors::{ProviderError, SessionError, SpeechError};
pub use language_utils::{get_language_name, normalize_to_part2t, resolve_language};
pub use session::{Session, TranslationOutcome};
pub use speech::{SpeechService, VoiceCatalog};
pub use translation::{ContextLedger, FollowUpService, ParsedResponse, TranslationService};
