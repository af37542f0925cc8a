//! Backing storage for pairwise similarities.

use std::collections::HashMap;
use std::hash::Hash;

/// Directional storage of similarity scores.
///
/// The store knows nothing about symmetry: [`PairwiseCache`](super::PairwiseCache)
/// writes each unordered pair once, in one direction, and probes both
/// directions on lookup. Implementations may keep scores in memory, on disk,
/// or sharded across processes.
pub trait SimilarityStore<T> {
    /// Score stored for exactly `(from, to)`, or `None`.
    fn get(&self, from: &T, to: &T) -> Option<f64>;

    /// Store a score for `(from, to)`.
    fn insert(&mut self, from: T, to: T, similarity: f64);

    /// Number of stored pairs.
    fn len(&self) -> usize;

    /// Whether nothing has been stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Default store: a two-level hash map, `from -> to -> score`.
#[derive(Debug, Clone)]
pub struct InMemoryStore<T> {
    map: HashMap<T, HashMap<T, f64>>,
    len: usize,
}

impl<T> InMemoryStore<T> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
            len: 0,
        }
    }
}

impl<T> Default for InMemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Eq + Hash> SimilarityStore<T> for InMemoryStore<T> {
    fn get(&self, from: &T, to: &T) -> Option<f64> {
        self.map.get(from)?.get(to).copied()
    }

    fn insert(&mut self, from: T, to: T, similarity: f64) {
        if self
            .map
            .entry(from)
            .or_default()
            .insert(to, similarity)
            .is_none()
        {
            self.len += 1;
        }
    }

    fn len(&self) -> usize {
        self.len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_is_directional() {
        let mut store = InMemoryStore::new();
        store.insert("a", "b", 0.5);

        assert_eq!(store.get(&"a", &"b"), Some(0.5));
        assert_eq!(store.get(&"b", &"a"), None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_overwrite_does_not_grow() {
        let mut store = InMemoryStore::new();
        store.insert("a", "b", 0.5);
        store.insert("a", "b", 0.25);

        assert_eq!(store.get(&"a", &"b"), Some(0.25));
        assert_eq!(store.len(), 1);
        assert!(!store.is_empty());
    }
}
