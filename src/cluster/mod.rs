//! Clustering of items under a pairwise similarity.
//!
//! This module groups items that live in no vector space, such as strings,
//! using only a similarity score between pairs.
//!
//! ## Why k-medoids
//!
//! K-means represents each cluster by the *mean* of its points. There is no
//! mean of `"DWAYNE"` and `"DUANE"`, so k-means does not apply. k-medoids
//! instead picks an actual member, the **medoid**, as each cluster's
//! representative, and needs nothing beyond `sim(a, b)`.
//!
//! **Objective**: maximize within-cluster similarity to the medoid:
//!
//! ```text
//! J = Σ_k Σ_{x ∈ C_k} sim(x, m_k)
//! ```
//!
//! **Assumptions**:
//! - Similarity is symmetric and bounded in [0, 1]
//! - You know k in advance
//!
//! ## Two entry points
//!
//! - [`KMedoids`]: a stateless builder; `fit` returns a [`Grouping`].
//! - [`ClusterEngine`]: owns its items and cache; results are read back after
//!   `cluster()` and fail with [`Error::NotReady`](crate::Error::NotReady)
//!   before it.
//!
//! ## Usage
//!
//! ```rust
//! use strcluster::cluster::{Clustering, KMedoids};
//!
//! let names: Vec<String> = ["MARTHA", "MARHTA", "DWAYNE", "DUANE"]
//!     .iter()
//!     .map(|s| s.to_string())
//!     .collect();
//!
//! let grouping = KMedoids::new(2).with_seed(42).fit(&names).unwrap();
//! assert_eq!(grouping.n_groups(), 2);
//!
//! let labels = KMedoids::new(2).with_seed(42).fit_predict(&names).unwrap();
//! assert_eq!(labels.len(), 4);
//! ```

mod engine;
mod grouping;
mod kmedoids;
mod traits;

pub use engine::{ClusterEngine, Phase};
pub use grouping::Grouping;
pub use kmedoids::KMedoids;
pub use traits::Clustering;
