//! Compiled rule set cache
//!
//! Keyed by declaration fingerprint. Entries are never evicted: a cached
//! rule set owns the dynamic functions its fingerprint may refer to by
//! address, which keeps those addresses from being reused.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use swatch_css::CompiledRuleSet;

/// Hit/miss counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// Unbounded map from fingerprint to compiled rule set
#[derive(Debug)]
pub struct RuleSetCache<T> {
    entries: FxHashMap<String, Arc<CompiledRuleSet<T>>>,
    hits: u64,
    misses: u64,
}

impl<T> RuleSetCache<T> {
    pub fn new() -> Self {
        Self {
            entries: FxHashMap::default(),
            hits: 0,
            misses: 0,
        }
    }

    /// Look up a fingerprint, counting the hit or miss
    pub fn get(&mut self, fingerprint: &str) -> Option<Arc<CompiledRuleSet<T>>> {
        match self.entries.get(fingerprint) {
            Some(set) => {
                self.hits += 1;
                Some(Arc::clone(set))
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    pub fn insert(&mut self, fingerprint: String, set: Arc<CompiledRuleSet<T>>) {
        self.entries.insert(fingerprint, set);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            entries: self.entries.len(),
        }
    }
}

impl<T> Default for RuleSetCache<T> {
    fn default() -> Self {
        Self::new()
    }
}
