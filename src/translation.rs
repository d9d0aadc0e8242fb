// File: src/translation.rs
//! The translation collaborator boundary and its memoizing cache.
//!
//! The engine never translates anything itself. A [`Translator`] hands it a
//! ranked list of English phrases; [`CachedTranslator`] puts a bounded
//! least-recently-used cache in front of any translator.

use std::collections::HashMap;
use std::num::NonZeroUsize;

use lru::LruCache;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::types::TranslationCandidate;
use crate::errors::Result;

pub trait Translator {
    /// Ranked candidates for `text`. An empty list means "no suggestions",
    /// not failure.
    fn translate(&mut self, text: &str) -> Result<Vec<TranslationCandidate>>;
}

/// Passes Latin-script input through unchanged as a single candidate.
/// Anything containing non-ASCII letters yields no candidates.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityTranslator;

impl Translator for IdentityTranslator {
    fn translate(&mut self, text: &str) -> Result<Vec<TranslationCandidate>> {
        let trimmed = text.trim();
        if trimmed.is_empty() || !trimmed.is_ascii() {
            return Ok(Vec::new());
        }
        Ok(vec![TranslationCandidate::new(trimmed, 1.0, "identity")])
    }
}

/// A fixed phrase → candidates table, e.g. a team glossary loaded from JSON.
/// Phrases missing from the table fall through to [`IdentityTranslator`].
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhraseTable {
    entries: HashMap<String, Vec<TranslationCandidate>>,
}

impl PhraseTable {
    pub fn insert(&mut self, phrase: impl Into<String>, candidates: Vec<TranslationCandidate>) {
        self.entries.insert(phrase.into(), candidates);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Translator for PhraseTable {
    fn translate(&mut self, text: &str) -> Result<Vec<TranslationCandidate>> {
        match self.entries.get(text.trim()) {
            Some(candidates) => Ok(candidates.clone()),
            None => IdentityTranslator.translate(text),
        }
    }
}

/// Bounded LRU cache keyed by the raw input text.
#[derive(Debug, Clone)]
pub struct TranslationCache {
    entries: LruCache<String, Vec<TranslationCandidate>>,
}

/// Serializable form of a [`TranslationCache`]. Entries are least recently
/// used first, so replaying them in order restores the recency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheSnapshot {
    pub capacity: usize,
    pub entries: Vec<(String, Vec<TranslationCandidate>)>,
}

fn bound(capacity: usize) -> NonZeroUsize {
    NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN)
}

impl TranslationCache {
    /// Storage grows with use; a large bound read from a snapshot does not
    /// allocate up front.
    pub fn new(capacity: usize) -> Self {
        let mut entries = LruCache::unbounded();
        entries.resize(bound(capacity));
        Self { entries }
    }

    pub fn get(&mut self, key: &str) -> Option<Vec<TranslationCandidate>> {
        self.entries.get(key).cloned()
    }

    pub fn insert(&mut self, key: impl Into<String>, candidates: Vec<TranslationCandidate>) {
        let key = key.into();
        if let Some((evicted, _)) = self.entries.push(key.clone(), candidates) {
            if evicted != key {
                debug!("Evicting cached translation for '{}'", evicted);
            }
        }
    }

    pub fn capacity(&self) -> usize {
        self.entries.cap().get()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Shrinks or grows the bound, evicting the oldest entries if needed.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.entries.resize(bound(capacity));
    }

    pub fn snapshot(&self) -> CacheSnapshot {
        CacheSnapshot {
            capacity: self.capacity(),
            entries: self
                .entries
                .iter()
                .rev()
                .map(|(key, candidates)| (key.clone(), candidates.clone()))
                .collect(),
        }
    }

    pub fn from_snapshot(snapshot: CacheSnapshot) -> Self {
        let mut cache = Self::new(snapshot.capacity);
        for (key, candidates) in snapshot.entries {
            cache.insert(key, candidates);
        }
        cache
    }
}

pub struct CachedTranslator<T> {
    inner: T,
    cache: TranslationCache,
}

impl<T: Translator> CachedTranslator<T> {
    pub fn new(inner: T, cache: TranslationCache) -> Self {
        Self { inner, cache }
    }

    pub fn cache(&self) -> &TranslationCache {
        &self.cache
    }

    pub fn into_cache(self) -> TranslationCache {
        self.cache
    }
}

impl<T: Translator> Translator for CachedTranslator<T> {
    fn translate(&mut self, text: &str) -> Result<Vec<TranslationCandidate>> {
        if let Some(hit) = self.cache.get(text) {
            debug!("Translation cache hit for '{}'", text);
            return Ok(hit);
        }
        let candidates = self.inner.translate(text)?;
        // empty answers are not cached so a retry can reach the collaborator
        if !candidates.is_empty() {
            self.cache.insert(text, candidates.clone());
        }
        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Counts how often it is asked.
    struct CountingTranslator {
        calls: usize,
        answer: Vec<TranslationCandidate>,
    }

    impl Translator for CountingTranslator {
        fn translate(&mut self, _text: &str) -> Result<Vec<TranslationCandidate>> {
            self.calls += 1;
            Ok(self.answer.clone())
        }
    }

    fn candidates(text: &str) -> Vec<TranslationCandidate> {
        vec![TranslationCandidate::new(text, 0.9, "test")]
    }

    #[test]
    fn test_identity_translator() {
        let mut translator = IdentityTranslator;
        assert_eq!(translator.translate(" user name ").unwrap()[0].text, "user name");
        assert!(translator.translate("用户数量").unwrap().is_empty());
        assert!(translator.translate("   ").unwrap().is_empty());
    }

    #[test]
    fn test_phrase_table_falls_through() {
        let mut table = PhraseTable::default();
        table.insert("用户数量", candidates("userCount"));
        assert_eq!(table.translate("用户数量").unwrap()[0].text, "userCount");
        assert_eq!(table.translate("item list").unwrap()[0].origin, "identity");
    }

    #[test]
    fn test_cache_evicts_least_recently_used() {
        let mut cache = TranslationCache::new(2);
        cache.insert("a", candidates("a"));
        cache.insert("b", candidates("b"));
        assert!(cache.get("a").is_some());
        cache.insert("c", candidates("c"));

        assert_eq!(cache.len(), 2);
        assert!(cache.get("b").is_none());
        assert!(cache.get("a").is_some());
        assert!(cache.get("c").is_some());
    }

    #[test]
    fn test_cache_reinsert_does_not_grow() {
        let mut cache = TranslationCache::new(2);
        cache.insert("a", candidates("a"));
        cache.insert("a", candidates("aa"));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("a").unwrap()[0].text, "aa");
    }

    #[test]
    fn test_set_capacity_evicts() {
        let mut cache = TranslationCache::new(3);
        for key in ["a", "b", "c"] {
            cache.insert(key, candidates(key));
        }
        cache.set_capacity(1);
        assert_eq!(cache.len(), 1);
        assert!(cache.get("c").is_some());
    }

    #[test]
    fn test_zero_capacity_keeps_one_entry() {
        let mut cache = TranslationCache::new(0);
        cache.insert("a", candidates("a"));
        cache.insert("b", candidates("b"));
        assert_eq!(cache.capacity(), 1);
        assert!(cache.get("a").is_none());
        assert!(cache.get("b").is_some());
    }

    #[test]
    fn test_huge_snapshot_bound_is_lazy() {
        let snapshot = CacheSnapshot {
            capacity: usize::MAX,
            entries: vec![("a".to_string(), candidates("a"))],
        };
        let cache = TranslationCache::from_snapshot(snapshot);
        assert_eq!(cache.capacity(), usize::MAX);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_snapshot_preserves_recency() {
        let mut cache = TranslationCache::new(2);
        cache.insert("a", candidates("a"));
        cache.insert("b", candidates("b"));
        assert!(cache.get("a").is_some());

        let snapshot = cache.snapshot();
        let keys: Vec<&str> = snapshot.entries.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["b", "a"]);

        // "b" is the oldest after the restore, so it goes first
        let mut restored = TranslationCache::from_snapshot(snapshot);
        restored.insert("c", candidates("c"));
        assert!(restored.get("b").is_none());
        assert!(restored.get("a").is_some());
    }

    #[test]
    fn test_cached_translator_memoizes() {
        let inner = CountingTranslator {
            calls: 0,
            answer: candidates("userCount"),
        };
        let mut translator = CachedTranslator::new(inner, TranslationCache::new(4));
        translator.translate("用户数量").unwrap();
        translator.translate("用户数量").unwrap();
        assert_eq!(translator.inner.calls, 1);
    }

    #[test]
    fn test_empty_answers_are_not_cached() {
        let inner = CountingTranslator {
            calls: 0,
            answer: Vec::new(),
        };
        let mut translator = CachedTranslator::new(inner, TranslationCache::new(4));
        assert!(translator.translate("x").unwrap().is_empty());
        assert!(translator.translate("x").unwrap().is_empty());
        assert_eq!(translator.inner.calls, 2);
        assert!(translator.cache().is_empty());
    }
}
