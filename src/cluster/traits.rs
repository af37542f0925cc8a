//! Clustering traits.

use crate::error::Result;

/// Trait for hard clustering algorithms over arbitrary items.
pub trait Clustering<T> {
    /// Fit the model to `items` and return cluster assignments.
    ///
    /// Returns a vector of group labels, one per input item.
    fn fit_predict(&self, items: &[T]) -> Result<Vec<usize>>;

    /// Get the number of clusters.
    fn n_clusters(&self) -> usize;
}
