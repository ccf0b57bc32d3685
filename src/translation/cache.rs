/*!
 * Translation caching functionality.
 *
 * Memoizes resolved translation results keyed by the exact
 * (text, source language, target language) triple. The cache is bounded
 * and evicts the least recently used entry when full. There is no other
 * invalidation: a cached answer is served for as long as it stays in the
 * cache, even if the backend would now answer differently.
 */

use std::collections::HashMap;
use std::sync::Arc;
use parking_lot::Mutex;
use log::debug;

use super::parser::ParsedResponse;

/// Default number of distinct triples kept in the cache
pub const DEFAULT_CACHE_CAPACITY: usize = 100;

/// Cache key combining source text, source language, and target language
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    /// Source text to translate
    source_text: String,

    /// Source language
    source_language: String,

    /// Target language
    target_language: String,
}

impl CacheKey {
    /// Create a new cache key
    fn new(source_text: &str, source_language: &str, target_language: &str) -> Self {
        Self {
            source_text: source_text.to_string(),
            source_language: source_language.to_string(),
            target_language: target_language.to_string(),
        }
    }
}

/// A cached value with its recency stamp
#[derive(Debug)]
struct CacheEntry {
    value: ParsedResponse,
    last_used: u64,
}

/// Mutable state guarded by the cache lock
#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<CacheKey, CacheEntry>,
    clock: u64,
    hits: usize,
    misses: usize,
    evictions: usize,
}

impl CacheState {
    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }
}

/// Snapshot of cache counters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
    pub evictions: usize,
    pub hit_rate: f64,
}

/// Bounded LRU cache of parsed translation results
///
/// Clones share storage.
#[derive(Debug, Clone)]
pub struct TranslationCache {
    /// Internal cache storage
    state: Arc<Mutex<CacheState>>,

    /// Maximum number of entries
    capacity: usize,

    /// Whether caching is enabled
    enabled: bool,
}

impl TranslationCache {
    /// Create a new translation cache holding at most `capacity` entries
    pub fn new(enabled: bool, capacity: usize) -> Self {
        Self {
            state: Arc::new(Mutex::new(CacheState::default())),
            capacity,
            enabled: enabled && capacity > 0,
        }
    }

    /// Get a translation from the cache, marking it most recently used
    pub fn get(&self, source_text: &str, source_language: &str, target_language: &str) -> Option<ParsedResponse> {
        if !self.enabled {
            return None;
        }

        let key = CacheKey::new(source_text, source_language, target_language);
        let mut state = self.state.lock();
        let now = state.tick();

        let found = state.entries.get_mut(&key).map(|entry| {
            entry.last_used = now;
            entry.value.clone()
        });

        match found {
            Some(value) => {
                state.hits += 1;
                debug!("Cache hit for '{}' ({} -> {})",
                       truncate_text(source_text, 30),
                       source_language,
                       target_language);
                Some(value)
            },
            None => {
                state.misses += 1;
                debug!("Cache miss for '{}' ({} -> {})",
                       truncate_text(source_text, 30),
                       source_language,
                       target_language);
                None
            }
        }
    }

    /// Store a resolved translation, evicting the least recently used entry when full
    pub fn store(&self, source_text: &str, source_language: &str, target_language: &str, value: &ParsedResponse) {
        if !self.enabled {
            return;
        }

        let key = CacheKey::new(source_text, source_language, target_language);
        let mut state = self.state.lock();
        let now = state.tick();

        if !state.entries.contains_key(&key) && state.entries.len() >= self.capacity {
            let oldest = state.entries
                .iter()
                .min_by_key(|(_, entry)| entry.last_used)
                .map(|(key, _)| key.clone());

            if let Some(oldest) = oldest {
                state.entries.remove(&oldest);
                state.evictions += 1;
                debug!("Evicted least recently used translation for '{}'",
                       truncate_text(&oldest.source_text, 30));
            }
        }

        state.entries.insert(key, CacheEntry { value: value.clone(), last_used: now });

        debug!("Cached translation for '{}' ({} -> {})",
               truncate_text(source_text, 30),
               source_language,
               target_language);
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        let state = self.state.lock();
        let total = state.hits + state.misses;

        let hit_rate = if total > 0 {
            state.hits as f64 / total as f64
        } else {
            0.0
        };

        CacheStats {
            hits: state.hits,
            misses: state.misses,
            evictions: state.evictions,
            hit_rate,
        }
    }

    /// Clear the cache and its counters
    pub fn clear(&self) {
        *self.state.lock() = CacheState::default();
        debug!("Translation cache cleared");
    }

    /// Get the number of entries in the cache
    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.state.lock().entries.is_empty()
    }

    /// Maximum number of entries
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Check if the cache is enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Default for TranslationCache {
    fn default() -> Self {
        Self::new(true, DEFAULT_CACHE_CAPACITY)
    }
}

/// Truncate text to a maximum number of characters with ellipsis
fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        format!("{}...", text.chars().take(max_chars).collect::<String>())
    }
}
