//! String similarity measures.
//!
//! Every measure here is a *similarity*: `1.0` is identical, `0.0` is
//! maximally dissimilar. The clustering engine assigns items to the medoid
//! with the highest score, so plugging in a distance (where smaller is
//! closer) silently inverts the result.
//!
//! ## Measures
//!
//! | Measure | Good for |
//! |---------|----------|
//! | [`Jaro`] | Short strings, typos, transpositions |
//! | [`JaroWinkler`] | Names and identifiers that share prefixes |
//!
//! Any `Fn(&T, &T) -> f64` is also a [`Similarity`], so custom measures can
//! be passed as closures.
//!
//! ```rust
//! use strcluster::similarity::{jaro, jaro_winkler};
//!
//! assert!((jaro("MARTHA", "MARHTA") - 0.944444).abs() < 1e-6);
//! assert!((jaro_winkler("MARTHA", "MARHTA") - 0.961111).abs() < 1e-6);
//! assert_eq!(jaro("", ""), 0.0);
//! ```

mod jaro;
mod traits;

pub use jaro::{
    jaro, jaro_winkler, Jaro, JaroWeights, JaroWinkler, WinklerParams, DEFAULT_BOOST_THRESHOLD,
    DEFAULT_PREFIX_LIMIT, DEFAULT_SCALING_FACTOR, DEFAULT_WEIGHT_A, DEFAULT_WEIGHT_B,
    DEFAULT_WEIGHT_TRANSPOSITION,
};
pub use traits::Similarity;

/// A string measure selected at runtime, e.g. from configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StringMetric {
    /// Plain Jaro.
    Jaro(Jaro),
    /// Jaro-Winkler.
    JaroWinkler(JaroWinkler),
}

impl Default for StringMetric {
    fn default() -> Self {
        StringMetric::JaroWinkler(JaroWinkler::default())
    }
}

impl<T: AsRef<str> + ?Sized> Similarity<T> for StringMetric {
    fn similarity(&self, a: &T, b: &T) -> f64 {
        match self {
            StringMetric::Jaro(m) => m.similarity(a, b),
            StringMetric::JaroWinkler(m) => m.similarity(a, b),
        }
    }
}
