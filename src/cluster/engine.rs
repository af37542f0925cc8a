//! Stateful clustering over a fixed item set.
//!
//! [`ClusterEngine`] owns its items and the [`PairwiseCache`] built over
//! them at construction. Results are only readable once [`cluster`] has
//! run; before that every accessor fails with [`Error::NotReady`].
//!
//! ```rust
//! use strcluster::{ClusterEngine, Error};
//!
//! let items = vec!["cat".to_string(), "hat".to_string(), "dog".to_string()];
//! let mut engine = ClusterEngine::new(2, items);
//! assert_eq!(engine.as_text(), Err(Error::NotReady));
//!
//! let grouping = engine.cluster().unwrap();
//! assert_eq!(grouping.n_groups(), 2);
//! assert!(engine.as_text().unwrap().starts_with("Group 0:\n"));
//! ```
//!
//! [`cluster`]: ClusterEngine::cluster

use std::fmt;
use std::hash::Hash;

use rand::Rng;

use super::grouping::Grouping;
use super::kmedoids::KMedoids;
use crate::cache::{InMemoryStore, PairwiseCache, SimilarityStore};
use crate::config::ClusterConfig;
use crate::error::{Error, Result};
use crate::similarity::{JaroWinkler, Similarity, StringMetric};

/// Where an engine is in its lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum Phase<T> {
    /// No result yet.
    Unclustered,
    /// A result from the latest successful run.
    Clustered(Grouping<T>),
}

/// k-medoids engine with a cache built once over its items.
#[derive(Debug)]
pub struct ClusterEngine<T, S = JaroWinkler, St = InMemoryStore<T>> {
    model: KMedoids<S>,
    items: Vec<T>,
    cache: PairwiseCache<T, St>,
    phase: Phase<T>,
}

impl ClusterEngine<String> {
    /// Engine grouping `items` into `k` groups under Jaro-Winkler.
    pub fn new(k: usize, items: Vec<String>) -> Self {
        Self::with_model(KMedoids::new(k), items)
    }
}

impl ClusterEngine<String, StringMetric> {
    /// Engine configured from a [`ClusterConfig`].
    pub fn from_config(config: &ClusterConfig, items: Vec<String>) -> Result<Self> {
        Ok(Self::with_model(KMedoids::from_config(config)?, items))
    }
}

impl<T, S> ClusterEngine<T, S>
where
    T: Eq + Hash + Clone + Sync,
    S: Similarity<T> + Sync,
{
    /// Engine running `model` over `items` with an in-memory cache.
    pub fn with_model(model: KMedoids<S>, items: Vec<T>) -> Self {
        Self::with_store(model, items, InMemoryStore::new())
    }
}

impl<T, S, St> ClusterEngine<T, S, St>
where
    T: Eq + Hash + Clone + Sync,
    S: Similarity<T> + Sync,
    St: SimilarityStore<T> + Sync,
{
    /// Engine running `model` over `items`, caching similarities in `store`.
    pub fn with_store(model: KMedoids<S>, items: Vec<T>, store: St) -> Self {
        let cache = PairwiseCache::with_store(&items, model.similarity(), store);
        Self {
            model,
            items,
            cache,
            phase: Phase::Unclustered,
        }
    }

    /// Run k-medoids, drawing initial medoids from the model's seed.
    ///
    /// On failure the previous phase is left untouched.
    pub fn cluster(&mut self) -> Result<&Grouping<T>> {
        let mut rng = self.model.rng();
        self.cluster_with_rng(&mut rng)
    }

    /// Run k-medoids, drawing initial medoids from `rng`.
    pub fn cluster_with_rng<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<&Grouping<T>> {
        let grouping = self.model.fit_cached(&self.items, &self.cache, rng)?;
        self.phase = Phase::Clustered(grouping);
        self.result()
    }

    /// Run k-medoids from the medoids at the `initial` item indices.
    pub fn cluster_from_medoids(&mut self, initial: &[usize]) -> Result<&Grouping<T>> {
        let grouping = self
            .model
            .fit_cached_from(&self.items, &self.cache, initial)?;
        self.phase = Phase::Clustered(grouping);
        self.result()
    }
}

impl<T, S, St> ClusterEngine<T, S, St> {
    /// The latest result.
    pub fn result(&self) -> Result<&Grouping<T>> {
        match &self.phase {
            Phase::Clustered(grouping) => Ok(grouping),
            Phase::Unclustered => Err(Error::NotReady),
        }
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> &Phase<T> {
        &self.phase
    }

    /// Whether a result is available.
    pub fn is_clustered(&self) -> bool {
        matches!(self.phase, Phase::Clustered(_))
    }

    /// Items being clustered, in input order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// The similarity cache.
    pub fn cache(&self) -> &PairwiseCache<T, St> {
        &self.cache
    }

    /// The clustering model.
    pub fn model(&self) -> &KMedoids<S> {
        &self.model
    }
}

impl<T: fmt::Display, S, St> ClusterEngine<T, S, St> {
    /// The latest result rendered as text.
    pub fn as_text(&self) -> Result<String> {
        Ok(self.result()?.to_text())
    }

    /// The latest result rendered as CSV.
    pub fn as_csv(&self) -> Result<String> {
        Ok(self.result()?.to_csv())
    }
}
