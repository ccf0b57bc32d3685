/*!
 * Translation services backed by an LLM.
 *
 * - `core`: Translation service and shared LLM client
 * - `follow_up`: Follow-up question answering
 * - `parser`: Splitting completions into translation and explanation
 * - `prompts`: Prompt construction
 * - `cache`: Bounded LRU memoization of resolved results
 * - `context`: Bounded ledger of recent translations
 * - `concurrency`: Request gating with timeout and cancellation
 */

// Re-export main types for easier usage
pub use self::cache::TranslationCache;
pub use self::concurrency::RequestGate;
pub use self::context::{ContextLedger, TranslationRecord};
pub use self::core::{LlmClient, TranslationService};
pub use self::follow_up::FollowUpService;
pub use self::parser::ParsedResponse;

// Submodules
pub mod cache;
pub mod concurrency;
pub mod context;
pub mod core;
pub mod follow_up;
pub mod parser;
pub mod prompts;
