//! k-medoids clustering.
//!
//! K-means needs a vector space to average in. k-medoids only needs a
//! pairwise score, so it works for strings under Jaro-Winkler, where no
//! "mean string" exists. Each group is represented by one of its own members,
//! the **medoid**.
//!
//! # The Objective
//!
//! Maximize total within-group similarity to the medoid:
//!
//! ```text
//! J = Σₖ Σᵢ∈Cₖ sim(xᵢ, mₖ)
//! ```
//!
//! # Algorithm
//!
//! 1. Draw k distinct values uniformly at random as the initial medoids
//! 2. **Assign**: each non-medoid item → medoid with the *highest* similarity
//!    (ties go to the lowest group index)
//! 3. **Update**: each group's new medoid is the member whose summed
//!    similarity to the other members is largest (ties go to the earliest
//!    member)
//! 4. Stop when the new medoids equal the old ones as a multiset; otherwise
//!    repeat from 2
//!
//! Both steps are deterministic given the medoids, so the loop either reaches
//! a fixed point or cycles. A non-metric similarity can cycle, so the loop is
//! capped at `max_iter` passes; hitting the cap is reported on the result,
//! not raised as an error.
//!
//! All similarities come from a [`PairwiseCache`] built once per input.
//!
//! # Failure Modes
//!
//! - **Local optima**: the result depends on the initial draw
//! - **Ties at zero**: an item sharing nothing with any medoid lands in group 0

use std::collections::HashSet;
use std::hash::Hash;

use rand::prelude::*;
use rand::seq::index;
use tracing::{debug, info, warn};

use super::grouping::Grouping;
use super::traits::Clustering;
use crate::cache::{PairwiseCache, SimilarityStore};
use crate::config::{ClusterConfig, DEFAULT_MAX_ITER};
use crate::error::{Error, Result};
use crate::similarity::{JaroWinkler, Similarity, StringMetric};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// k-medoids clustering over an arbitrary similarity.
#[derive(Debug, Clone)]
pub struct KMedoids<S = JaroWinkler> {
    /// Number of groups.
    k: usize,
    /// Maximum assignment passes.
    max_iter: usize,
    /// Random seed.
    seed: Option<u64>,
    /// Pairwise similarity.
    similarity: S,
}

impl KMedoids {
    /// Create a k-medoids clusterer using Jaro-Winkler similarity.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            max_iter: DEFAULT_MAX_ITER,
            seed: None,
            similarity: JaroWinkler::new(),
        }
    }
}

impl KMedoids<StringMetric> {
    /// Create a clusterer from validated configuration.
    pub fn from_config(config: &ClusterConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            k: config.k,
            max_iter: config.max_iter,
            seed: config.seed,
            similarity: config.similarity(),
        })
    }
}

impl<S> KMedoids<S> {
    /// Replace the similarity measure.
    pub fn with_similarity<S2>(self, similarity: S2) -> KMedoids<S2> {
        KMedoids {
            k: self.k,
            max_iter: self.max_iter,
            seed: self.seed,
            similarity,
        }
    }

    /// Set maximum assignment passes.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of groups.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Maximum assignment passes.
    pub fn max_iter(&self) -> usize {
        self.max_iter
    }

    /// The similarity measure.
    pub fn similarity(&self) -> &S {
        &self.similarity
    }

    /// RNG for the initial draw: seeded if a seed is set, else the thread RNG.
    pub(crate) fn rng(&self) -> Box<dyn RngCore> {
        match self.seed {
            Some(s) => Box::new(StdRng::seed_from_u64(s)),
            None => Box::new(rand::rng()),
        }
    }

    fn validate(&self, n_items: usize, n_distinct: usize) -> Result<()> {
        if n_items == 0 {
            return Err(Error::EmptyInput);
        }
        if self.max_iter == 0 {
            return Err(Error::InvalidParameter {
                name: "max_iter",
                message: "must be at least 1",
            });
        }
        if self.k == 0 || self.k > n_distinct {
            return Err(Error::InvalidClusterCount {
                requested: self.k,
                n_items: n_distinct,
            });
        }
        Ok(())
    }

    /// Cluster against an existing cache, drawing initial medoids from `rng`.
    pub(crate) fn fit_cached<T, St, R>(
        &self,
        items: &[T],
        cache: &PairwiseCache<T, St>,
        rng: &mut R,
    ) -> Result<Grouping<T>>
    where
        T: Eq + Hash + Clone + Sync,
        St: SimilarityStore<T> + Sync,
        R: Rng + ?Sized,
    {
        // Seeds are drawn from the first occurrence of each distinct value, so
        // no two groups can start from equal medoids.
        let mut seen = HashSet::with_capacity(items.len());
        let candidates: Vec<usize> = (0..items.len())
            .filter(|&i| seen.insert(&items[i]))
            .collect();
        self.validate(items.len(), candidates.len())?;

        let medoids = index::sample(rng, candidates.len(), self.k)
            .into_iter()
            .map(|i| candidates[i])
            .collect();
        self.iterate(items, cache, medoids)
    }

    /// Cluster against an existing cache from explicit initial medoids.
    pub(crate) fn fit_cached_from<T, St>(
        &self,
        items: &[T],
        cache: &PairwiseCache<T, St>,
        initial: &[usize],
    ) -> Result<Grouping<T>>
    where
        T: Eq + Hash + Clone + Sync,
        St: SimilarityStore<T> + Sync,
    {
        self.validate(items.len(), cache.n_items())?;
        if initial.len() != self.k {
            return Err(Error::InvalidParameter {
                name: "initial",
                message: "exactly k initial medoids are required",
            });
        }
        if initial.iter().any(|&i| i >= items.len()) {
            return Err(Error::InvalidParameter {
                name: "initial",
                message: "medoid index out of bounds",
            });
        }
        let unique: HashSet<usize> = initial.iter().copied().collect();
        if unique.len() != initial.len() {
            return Err(Error::InvalidParameter {
                name: "initial",
                message: "medoid indices must be distinct",
            });
        }
        self.iterate(items, cache, initial.to_vec())
    }

    fn iterate<T, St>(
        &self,
        items: &[T],
        cache: &PairwiseCache<T, St>,
        mut medoids: Vec<usize>,
    ) -> Result<Grouping<T>>
    where
        T: Eq + Hash + Clone + Sync,
        St: SimilarityStore<T> + Sync,
    {
        let mut iteration = 0;
        loop {
            iteration += 1;

            let groups = assign(items, cache, &medoids)?;
            let next = groups
                .iter()
                .map(|group| best_medoid(items, cache, group))
                .collect::<Result<Vec<_>>>()?;

            let converged = same_multiset(&medoids, &next);
            if converged {
                info!(iterations = iteration, k = self.k, "k-medoids converged");
            } else if iteration >= self.max_iter {
                warn!(
                    max_iter = self.max_iter,
                    k = self.k,
                    "k-medoids stopped before medoids settled"
                );
            } else {
                debug!(iteration, ?next, "medoids changed");
                medoids = next;
                continue;
            }

            return Ok(Grouping::from_indices(items, &groups, iteration, converged));
        }
    }
}

impl<S> KMedoids<S> {
    /// Cluster `items`, drawing the initial medoids from the configured seed.
    pub fn fit<T>(&self, items: &[T]) -> Result<Grouping<T>>
    where
        T: Eq + Hash + Clone + Sync,
        S: Similarity<T> + Sync,
    {
        let mut rng = self.rng();
        self.fit_with_rng(items, &mut rng)
    }

    /// Cluster `items`, drawing the initial medoids from `rng`.
    pub fn fit_with_rng<T, R>(&self, items: &[T], rng: &mut R) -> Result<Grouping<T>>
    where
        T: Eq + Hash + Clone + Sync,
        S: Similarity<T> + Sync,
        R: Rng + ?Sized,
    {
        if items.is_empty() {
            return Err(Error::EmptyInput);
        }
        let cache = PairwiseCache::new(items, &self.similarity);
        self.fit_cached(items, &cache, rng)
    }

    /// Cluster `items` starting from the medoids at the `initial` indices.
    pub fn fit_from_medoids<T>(&self, items: &[T], initial: &[usize]) -> Result<Grouping<T>>
    where
        T: Eq + Hash + Clone + Sync,
        S: Similarity<T> + Sync,
    {
        if items.is_empty() {
            return Err(Error::EmptyInput);
        }
        let cache = PairwiseCache::new(items, &self.similarity);
        self.fit_cached_from(items, &cache, initial)
    }
}

impl<T, S> Clustering<T> for KMedoids<S>
where
    T: Eq + Hash + Clone + Sync,
    S: Similarity<T> + Sync,
{
    fn fit_predict(&self, items: &[T]) -> Result<Vec<usize>> {
        Ok(self.fit(items)?.labels().to_vec())
    }

    fn n_clusters(&self) -> usize {
        self.k
    }
}

fn pair_similarity<T, St>(
    items: &[T],
    cache: &PairwiseCache<T, St>,
    first: usize,
    second: usize,
) -> Result<f64>
where
    St: SimilarityStore<T>,
{
    cache
        .lookup(&items[first], &items[second])
        .ok_or(Error::MissingSimilarity { first, second })
}

/// Group index of the medoid most similar to `item`; first wins ties.
fn closest_medoid<T, St>(
    items: &[T],
    cache: &PairwiseCache<T, St>,
    medoids: &[usize],
    item: usize,
) -> Result<usize>
where
    St: SimilarityStore<T>,
{
    let mut best_group = 0;
    let mut best_score = f64::NEG_INFINITY;
    for (group, &medoid) in medoids.iter().enumerate() {
        let score = pair_similarity(items, cache, medoid, item)?;
        if score > best_score {
            best_group = group;
            best_score = score;
        }
    }
    Ok(best_group)
}

/// Seed one group per medoid and append every other item to its closest one.
fn assign<T, St>(
    items: &[T],
    cache: &PairwiseCache<T, St>,
    medoids: &[usize],
) -> Result<Vec<Vec<usize>>>
where
    T: Sync,
    St: SimilarityStore<T> + Sync,
{
    let mut is_medoid = vec![false; items.len()];
    for &m in medoids {
        is_medoid[m] = true;
    }
    let members: Vec<usize> = (0..items.len()).filter(|&i| !is_medoid[i]).collect();

    #[cfg(feature = "parallel")]
    let choices: Vec<usize> = members
        .par_iter()
        .map(|&i| closest_medoid(items, cache, medoids, i))
        .collect::<Result<_>>()?;

    #[cfg(not(feature = "parallel"))]
    let choices: Vec<usize> = members
        .iter()
        .map(|&i| closest_medoid(items, cache, medoids, i))
        .collect::<Result<_>>()?;

    let mut groups: Vec<Vec<usize>> = medoids.iter().map(|&m| vec![m]).collect();
    for (item, group) in members.into_iter().zip(choices) {
        groups[group].push(item);
    }
    Ok(groups)
}

/// Member with the largest summed similarity to the rest of its group.
fn best_medoid<T, St>(items: &[T], cache: &PairwiseCache<T, St>, group: &[usize]) -> Result<usize>
where
    St: SimilarityStore<T>,
{
    let mut best = group[0];
    let mut best_sum = f64::NEG_INFINITY;
    for (pos, &candidate) in group.iter().enumerate() {
        let mut sum = 0.0;
        for (other_pos, &other) in group.iter().enumerate() {
            if other_pos != pos {
                sum += pair_similarity(items, cache, candidate, other)?;
            }
        }
        if sum > best_sum {
            best = candidate;
            best_sum = sum;
        }
    }
    Ok(best)
}

fn same_multiset(a: &[usize], b: &[usize]) -> bool {
    let mut a = a.to_vec();
    let mut b = b.to_vec();
    a.sort_unstable();
    b.sort_unstable();
    a == b
}
