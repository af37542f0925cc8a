//! # strcluster
//!
//! Group strings into k clusters by mutual similarity.
//!
//! Three layers, leaves first:
//!
//! - [`similarity`]: Jaro and Jaro-Winkler scores in `[0, 1]`.
//! - [`cache`]: every pairwise score computed once, stored one-way, looked up
//!   symmetrically.
//! - [`cluster`]: k-medoids over the cache, with seeded or injected randomness.
//!
//! ```rust
//! use strcluster::ClusterEngine;
//!
//! let items = ["cat", "dog", "man", "worker", "potato", "salad"]
//!     .iter()
//!     .map(|s| s.to_string())
//!     .collect();
//!
//! let mut engine = ClusterEngine::new(1, items);
//! let grouping = engine.cluster().unwrap();
//! assert_eq!(grouping.groups()[0].len(), 6);
//! ```
//!
//! The `parallel` feature evaluates the cache and the assignment step on
//! rayon. Results are identical to the sequential build.

pub mod cache;
pub mod cluster;
pub mod config;
/// Error types used across `strcluster`.
pub mod error;
pub mod similarity;

pub use cache::{InMemoryStore, PairwiseCache, SimilarityStore};
pub use cluster::{ClusterEngine, Clustering, Grouping, KMedoids, Phase};
pub use config::{ClusterConfig, Metric};
pub use error::{Error, Result};
pub use similarity::{jaro, jaro_winkler, Jaro, JaroWinkler, Similarity, StringMetric};
