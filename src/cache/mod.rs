//! Memoized pairwise similarities.
//!
//! k-medoids queries the same pairs over and over: every assignment pass
//! compares each item to every medoid, and every medoid update sums a
//! group's internal similarities. [`PairwiseCache`] evaluates the similarity
//! once per unordered pair up front and answers everything else from storage.
//!
//! Scores are rounded to 6 decimal places before they are stored, so sums
//! and ties do not drift with floating-point noise between runs.
//!
//! ```rust
//! use strcluster::cache::PairwiseCache;
//! use strcluster::similarity::JaroWinkler;
//!
//! let items = vec!["MARTHA".to_string(), "MARHTA".to_string()];
//! let cache = PairwiseCache::new(&items, &JaroWinkler::new());
//!
//! assert_eq!(cache.lookup(&items[0], &items[1]), Some(0.961111));
//! assert_eq!(cache.lookup(&items[1], &items[0]), Some(0.961111));
//! assert_eq!(cache.lookup(&items[0], &"DUANE".to_string()), None);
//! ```

mod store;

pub use store::{InMemoryStore, SimilarityStore};

use std::collections::HashSet;
use std::hash::Hash;
use std::marker::PhantomData;

use tracing::debug;

use crate::similarity::Similarity;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Number of decimal places kept for each stored score.
pub const SCORE_PRECISION: i32 = 6;

/// Symmetric, write-once cache of similarities over a fixed item set.
///
/// Only one direction of each pair is stored; [`lookup`](Self::lookup)
/// probes both. Pairs involving an item outside the construction set yield
/// `None`.
#[derive(Debug, Clone)]
pub struct PairwiseCache<T, St = InMemoryStore<T>> {
    store: St,
    n_items: usize,
    _items: PhantomData<fn() -> T>,
}

impl<T> PairwiseCache<T>
where
    T: Eq + Hash + Clone + Sync,
{
    /// Build an in-memory cache over `items`.
    pub fn new<S>(items: &[T], similarity: &S) -> Self
    where
        S: Similarity<T> + Sync + ?Sized,
    {
        Self::with_store(items, similarity, InMemoryStore::new())
    }
}

impl<T, St> PairwiseCache<T, St>
where
    T: Eq + Hash + Clone + Sync,
    St: SimilarityStore<T>,
{
    /// Build a cache over `items`, writing into `store`.
    ///
    /// Duplicate items collapse to their first occurrence. For `n` distinct
    /// items the similarity is evaluated exactly `n(n+1)/2` times, self-pairs
    /// included.
    pub fn with_store<S>(items: &[T], similarity: &S, mut store: St) -> Self
    where
        S: Similarity<T> + Sync + ?Sized,
    {
        let mut seen = HashSet::with_capacity(items.len());
        let distinct: Vec<&T> = items.iter().filter(|item| seen.insert(*item)).collect();
        let n = distinct.len();

        let pairs: Vec<(usize, usize)> = (0..n).flat_map(|i| (i..n).map(move |j| (i, j))).collect();
        debug!(items = n, pairs = pairs.len(), "building pairwise similarity cache");

        #[cfg(feature = "parallel")]
        let scores: Vec<f64> = pairs
            .par_iter()
            .map(|&(i, j)| round_score(similarity.similarity(distinct[i], distinct[j])))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let scores: Vec<f64> = pairs
            .iter()
            .map(|&(i, j)| round_score(similarity.similarity(distinct[i], distinct[j])))
            .collect();

        for (&(i, j), score) in pairs.iter().zip(scores) {
            store.insert(distinct[i].clone(), distinct[j].clone(), score);
        }

        Self {
            store,
            n_items: n,
            _items: PhantomData,
        }
    }
}

impl<T, St: SimilarityStore<T>> PairwiseCache<T, St> {
    /// Similarity between `a` and `b`, in either order.
    ///
    /// Returns `None` when the pair was never stored, i.e. when `a` or `b`
    /// was not part of the construction set.
    pub fn lookup(&self, a: &T, b: &T) -> Option<f64> {
        self.store.get(a, b).or_else(|| self.store.get(b, a))
    }

    /// Whether `item` was part of the construction set.
    pub fn contains(&self, item: &T) -> bool {
        self.store.get(item, item).is_some()
    }

    /// Number of distinct items the cache was built over.
    pub fn n_items(&self) -> usize {
        self.n_items
    }

    /// Number of stored pairs.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Whether the cache holds no pairs.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// The underlying store.
    pub fn store(&self) -> &St {
        &self.store
    }
}

/// Round a score to [`SCORE_PRECISION`] decimal places.
pub fn round_score(score: f64) -> f64 {
    let scale = 10f64.powi(SCORE_PRECISION);
    (score * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::similarity::{jaro_winkler, JaroWinkler};
    use proptest::prelude::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_lookup_is_symmetric_and_rounded() {
        let items = strings(&["DWAYNE", "DUANE", "DIXON", "DICKSONX"]);
        let cache = PairwiseCache::new(&items, &JaroWinkler::new());

        for a in &items {
            for b in &items {
                let expected = round_score(jaro_winkler(a, b));
                assert_eq!(cache.lookup(a, b), Some(expected));
                assert_eq!(cache.lookup(b, a), Some(expected));
            }
        }
        assert_eq!(cache.lookup(&items[2], &items[3]), Some(0.813333));
    }

    #[test]
    fn test_absent_items_are_not_found() {
        let items = strings(&["cat", "hat"]);
        let cache = PairwiseCache::new(&items, &JaroWinkler::new());
        let dog = "dog".to_string();

        assert_eq!(cache.lookup(&items[0], &dog), None);
        assert_eq!(cache.lookup(&dog, &items[0]), None);
        assert_eq!(cache.lookup(&dog, &dog), None);
        assert!(!cache.contains(&dog));
        assert!(cache.contains(&items[1]));
    }

    #[test]
    fn test_empty_cache_finds_nothing() {
        let items: Vec<String> = vec![];
        let cache = PairwiseCache::new(&items, &JaroWinkler::new());

        assert!(cache.is_empty());
        assert_eq!(cache.n_items(), 0);
        assert_eq!(cache.lookup(&"a".to_string(), &"a".to_string()), None);
    }

    #[test]
    fn test_each_unordered_pair_evaluated_once() {
        let calls = AtomicUsize::new(0);
        let counting = |a: &u32, b: &u32| {
            calls.fetch_add(1, Ordering::Relaxed);
            if a == b {
                1.0
            } else {
                0.5
            }
        };

        let items: Vec<u32> = (0..7).collect();
        let cache = PairwiseCache::new(&items, &counting);

        assert_eq!(calls.load(Ordering::Relaxed), 7 * 8 / 2);
        assert_eq!(cache.len(), 7 * 8 / 2);
    }

    #[test]
    fn test_duplicates_collapse() {
        let calls = AtomicUsize::new(0);
        let counting = |_: &&str, _: &&str| {
            calls.fetch_add(1, Ordering::Relaxed);
            0.5
        };

        let cache = PairwiseCache::new(&["a", "b", "a", "b", "a"], &counting);

        assert_eq!(cache.n_items(), 2);
        assert_eq!(calls.load(Ordering::Relaxed), 3);
        assert_eq!(cache.lookup(&"b", &"a"), Some(0.5));
    }

    #[test]
    fn test_self_pair_is_not_special_cased() {
        let odd = |_: &u8, _: &u8| 0.25;
        let cache = PairwiseCache::new(&[1u8, 2], &odd);
        assert_eq!(cache.lookup(&1, &1), Some(0.25));
    }

    #[test]
    fn test_scores_rounded_to_six_places() {
        let noisy = |_: &u8, _: &u8| 0.123_456_789;
        let cache = PairwiseCache::new(&[1u8], &noisy);
        assert_eq!(cache.lookup(&1, &1), Some(0.123457));
        assert_eq!(round_score(0.999_999_9), 1.0);
    }

    #[test]
    fn test_custom_store_receives_one_direction() {
        let items = strings(&["ab", "ba", "abc"]);
        let cache = PairwiseCache::with_store(&items, &JaroWinkler::new(), InMemoryStore::new());

        let store = cache.store();
        for (i, a) in items.iter().enumerate() {
            for b in &items[i + 1..] {
                let forward = store.get(a, b).is_some();
                let backward = store.get(b, a).is_some();
                assert!(forward ^ backward, "pair ({a}, {b}) stored {forward}/{backward}");
            }
        }
    }

    proptest! {
        #[test]
        fn lookup_symmetry_holds(items in proptest::collection::vec("[a-e]{0,6}", 0..12)) {
            let cache = PairwiseCache::new(&items, &JaroWinkler::new());
            for a in &items {
                for b in &items {
                    let ab = cache.lookup(a, b);
                    prop_assert!(ab.is_some());
                    prop_assert_eq!(ab, cache.lookup(b, a));
                    prop_assert_eq!(ab, Some(round_score(jaro_winkler(a, b))));
                }
            }
        }
    }
}
