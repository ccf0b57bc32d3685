/*!
 * Bounded history of recent translations.
 *
 * The ledger keeps the last `LEDGER_CAPACITY` exchanges in insertion order
 * and drops the oldest one when a new record would exceed the capacity.
 */

use std::collections::VecDeque;
use serde::{Deserialize, Serialize};

/// Number of records retained for follow-up context
pub const LEDGER_CAPACITY: usize = 5;

/// One completed translation exchange
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationRecord {
    /// Text the user submitted
    pub input_text: String,

    /// Translation returned for it
    pub output_text: String,

    /// Source language name
    pub source_language: String,

    /// Target language name
    pub target_language: String,
}

impl TranslationRecord {
    /// Create a new record
    pub fn new(
        input_text: impl Into<String>,
        output_text: impl Into<String>,
        source_language: impl Into<String>,
        target_language: impl Into<String>,
    ) -> Self {
        Self {
            input_text: input_text.into(),
            output_text: output_text.into(),
            source_language: source_language.into(),
            target_language: target_language.into(),
        }
    }

    /// Render as a single context line
    pub fn render_line(&self) -> String {
        format!(
            "From {} to {}: '{}' -> '{}'",
            self.source_language, self.target_language, self.input_text, self.output_text
        )
    }
}

/// FIFO ledger holding at most `LEDGER_CAPACITY` records
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContextLedger {
    records: VecDeque<TranslationRecord>,
}

impl ContextLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self {
            records: VecDeque::with_capacity(LEDGER_CAPACITY),
        }
    }

    /// Append a record, evicting the oldest one if the ledger is full.
    /// Returns the evicted record, if any.
    pub fn append(&mut self, record: TranslationRecord) -> Option<TranslationRecord> {
        let evicted = if self.records.len() == LEDGER_CAPACITY {
            self.records.pop_front()
        } else {
            None
        };
        self.records.push_back(record);
        evicted
    }

    /// Render the header line followed by one line per record, oldest first
    pub fn render_for_prompt(&self) -> String {
        let mut context = String::from("Previous translations:\n");
        for record in &self.records {
            context.push_str(&record.render_line());
            context.push('\n');
        }
        context
    }

    /// Records in ledger order
    pub fn records(&self) -> impl Iterator<Item = &TranslationRecord> {
        self.records.iter()
    }

    /// Most recently appended record
    pub fn latest(&self) -> Option<&TranslationRecord> {
        self.records.back()
    }

    /// Number of records held
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the ledger is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
