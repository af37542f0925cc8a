//! Similarity traits.

/// A bounded, symmetric similarity between two items.
///
/// Implementations return values in `[0.0, 1.0]`, where `1.0` means identical
/// and `0.0` means maximally dissimilar. The clustering engine maximizes this
/// score, so it must not be a distance.
pub trait Similarity<T: ?Sized> {
    /// Similarity between `a` and `b`.
    fn similarity(&self, a: &T, b: &T) -> f64;
}

impl<T: ?Sized, F> Similarity<T> for F
where
    F: Fn(&T, &T) -> f64,
{
    fn similarity(&self, a: &T, b: &T) -> f64 {
        self(a, b)
    }
}
