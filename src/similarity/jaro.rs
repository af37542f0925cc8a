//! Jaro and Jaro-Winkler similarity.
//!
//! # Jaro
//!
//! Two characters match when they are equal and no farther apart than the
//! match window:
//!
//! ```text
//! window = max(0, floor(max(|a|, |b|) / 2) - 1)
//! ```
//!
//! Each character of `a` claims the first unclaimed equal character of `b`
//! inside its window. With `m` matches and `t` half-transpositions (matched
//! characters that disagree when both sides are read in order):
//!
//! ```text
//! jaro = wa·m/|a| + wb·m/|b| + wt·(m - floor(t/2))/m
//! ```
//!
//! with `wa = wb = wt = 1/3` by default.
//!
//! # Jaro-Winkler
//!
//! Boosts scores above a threshold (0.7) by the length `p` of the common
//! prefix, capped at 4 characters:
//!
//! ```text
//! jw = jaro + 0.1 · p · (1 - jaro)
//! ```
//!
//! Strings are compared by Unicode scalar value. An empty string is
//! completely dissimilar to everything, itself included.
//!
//! # References
//!
//! Winkler, W. E. (1990). "String Comparator Metrics and Enhanced Decision
//! Rules in the Fellegi-Sunter Model of Record Linkage."

use serde::{Deserialize, Serialize};

use super::traits::Similarity;

/// Default weight of the matched-fraction term for the first string.
pub const DEFAULT_WEIGHT_A: f64 = 1.0 / 3.0;
/// Default weight of the matched-fraction term for the second string.
pub const DEFAULT_WEIGHT_B: f64 = 1.0 / 3.0;
/// Default weight of the transposition term.
pub const DEFAULT_WEIGHT_TRANSPOSITION: f64 = 1.0 / 3.0;
/// Default number of leading characters inspected for the Winkler boost.
pub const DEFAULT_PREFIX_LIMIT: usize = 4;
/// Default Winkler scaling factor.
pub const DEFAULT_SCALING_FACTOR: f64 = 0.1;
/// Jaro score a pair must exceed before the Winkler boost applies.
pub const DEFAULT_BOOST_THRESHOLD: f64 = 0.7;

/// Term weights for the Jaro formula.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JaroWeights {
    /// Weight of `m / |a|`.
    pub a: f64,
    /// Weight of `m / |b|`.
    pub b: f64,
    /// Weight of `(m - t) / m`.
    pub transposition: f64,
}

impl Default for JaroWeights {
    fn default() -> Self {
        Self {
            a: DEFAULT_WEIGHT_A,
            b: DEFAULT_WEIGHT_B,
            transposition: DEFAULT_WEIGHT_TRANSPOSITION,
        }
    }
}

/// Prefix-boost parameters for Jaro-Winkler.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WinklerParams {
    /// Maximum common-prefix length that earns a boost.
    pub prefix_limit: usize,
    /// Boost per prefix character.
    pub scaling_factor: f64,
    /// Jaro score that must be exceeded for the boost to apply.
    pub boost_threshold: f64,
}

impl Default for WinklerParams {
    fn default() -> Self {
        Self {
            prefix_limit: DEFAULT_PREFIX_LIMIT,
            scaling_factor: DEFAULT_SCALING_FACTOR,
            boost_threshold: DEFAULT_BOOST_THRESHOLD,
        }
    }
}

/// Jaro similarity.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Jaro {
    weights: JaroWeights,
}

impl Jaro {
    /// Jaro with the standard 1/3 weights.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set term weights.
    pub fn with_weights(mut self, weights: JaroWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Score two strings.
    pub fn score(&self, a: &str, b: &str) -> f64 {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();
        jaro_chars(&self.weights, &a, &b)
    }
}

impl<T: AsRef<str> + ?Sized> Similarity<T> for Jaro {
    fn similarity(&self, a: &T, b: &T) -> f64 {
        self.score(a.as_ref(), b.as_ref())
    }
}

/// Jaro-Winkler similarity.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct JaroWinkler {
    weights: JaroWeights,
    params: WinklerParams,
}

impl JaroWinkler {
    /// Jaro-Winkler with standard parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the underlying Jaro term weights.
    pub fn with_weights(mut self, weights: JaroWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Set the prefix-boost parameters.
    pub fn with_params(mut self, params: WinklerParams) -> Self {
        self.params = params;
        self
    }

    /// Score two strings.
    pub fn score(&self, a: &str, b: &str) -> f64 {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();

        let d = jaro_chars(&self.weights, &a, &b);
        if d <= self.params.boost_threshold {
            return d;
        }

        let prefix = a
            .iter()
            .zip(b.iter())
            .take(self.params.prefix_limit)
            .take_while(|(x, y)| x == y)
            .count();

        d + self.params.scaling_factor * prefix as f64 * (1.0 - d)
    }
}

impl<T: AsRef<str> + ?Sized> Similarity<T> for JaroWinkler {
    fn similarity(&self, a: &T, b: &T) -> f64 {
        self.score(a.as_ref(), b.as_ref())
    }
}

/// Jaro similarity with default weights.
pub fn jaro(a: &str, b: &str) -> f64 {
    Jaro::new().score(a, b)
}

/// Jaro-Winkler similarity with default parameters.
pub fn jaro_winkler(a: &str, b: &str) -> f64 {
    JaroWinkler::new().score(a, b)
}

fn jaro_chars(weights: &JaroWeights, a: &[char], b: &[char]) -> f64 {
    let (len_a, len_b) = (a.len(), b.len());
    if len_a == 0 || len_b == 0 {
        return 0.0;
    }

    let window = (len_a.max(len_b) / 2).saturating_sub(1);

    let mut a_matched = vec![false; len_a];
    let mut b_matched = vec![false; len_b];
    let mut matches = 0usize;

    for (i, ca) in a.iter().enumerate() {
        let start = i.saturating_sub(window);
        if start >= len_b {
            // Every later window starts past the end of `b` too.
            break;
        }
        let end = (i + window + 1).min(len_b);

        if let Some(j) = (start..end).find(|&j| !b_matched[j] && b[j] == *ca) {
            a_matched[i] = true;
            b_matched[j] = true;
            matches += 1;
        }
    }

    if matches == 0 {
        return 0.0;
    }

    let a_seq = a.iter().zip(&a_matched).filter(|(_, &m)| m).map(|(c, _)| c);
    let b_seq = b.iter().zip(&b_matched).filter(|(_, &m)| m).map(|(c, _)| c);
    let transpositions = a_seq.zip(b_seq).filter(|(x, y)| x != y).count();

    let m = matches as f64;
    weights.a * m / len_a as f64
        + weights.b * m / len_b as f64
        + weights.transposition * (m - (transpositions / 2) as f64) / m
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 5e-7,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_reference_fixtures() {
        assert_close(jaro("MARTHA", "MARHTA"), 0.944444);
        assert_close(jaro_winkler("MARTHA", "MARHTA"), 0.961111);
        assert_close(jaro("DWAYNE", "DUANE"), 0.822222);
        assert_close(jaro_winkler("DWAYNE", "DUANE"), 0.84);
        assert_close(jaro("DIXON", "DICKSONX"), 0.766667);
        assert_close(jaro_winkler("DIXON", "DICKSONX"), 0.813333);
    }

    #[test]
    fn test_identical_strings() {
        assert_eq!(jaro("cat", "cat"), 1.0);
        assert_eq!(jaro_winkler("cat", "cat"), 1.0);
    }

    #[test]
    fn test_empty_strings_are_dissimilar() {
        assert_eq!(jaro("", ""), 0.0);
        assert_eq!(jaro("", "abc"), 0.0);
        assert_eq!(jaro("abc", ""), 0.0);
        assert_eq!(jaro_winkler("", ""), 0.0);
    }

    #[test]
    fn test_no_common_characters() {
        assert_eq!(jaro("cat", "dog"), 0.0);
        assert_eq!(jaro_winkler("abc", "xyz"), 0.0);
    }

    #[test]
    fn test_matches_outside_window_are_ignored() {
        // window = 5/2 - 1 = 1; the 'a' at index 0 of "abcde" can only reach
        // indices 0..2 of "xxxxa".
        assert_eq!(jaro("abcde", "xxxxa"), 0.0);
    }

    #[test]
    fn test_no_boost_below_threshold() {
        // jaro("cat", "hat") = 7/9 which is above 0.7, but there is no
        // common prefix, so the score is unchanged.
        assert_eq!(jaro_winkler("cat", "hat"), jaro("cat", "hat"));

        let strict = JaroWinkler::new().with_params(WinklerParams {
            boost_threshold: 0.99,
            ..WinklerParams::default()
        });
        assert_eq!(strict.score("MARTHA", "MARHTA"), jaro("MARTHA", "MARHTA"));
    }

    #[test]
    fn test_prefix_limit_bounds_boost() {
        let d = jaro("abcdefgh", "abcdefgx");
        let expected = d + 0.1 * 4.0 * (1.0 - d);
        assert_close(jaro_winkler("abcdefgh", "abcdefgx"), expected);

        let two = JaroWinkler::new().with_params(WinklerParams {
            prefix_limit: 2,
            ..WinklerParams::default()
        });
        assert_close(two.score("abcdefgh", "abcdefgx"), d + 0.1 * 2.0 * (1.0 - d));
    }

    #[test]
    fn test_custom_weights() {
        let only_a = Jaro::new().with_weights(JaroWeights {
            a: 1.0,
            b: 0.0,
            transposition: 0.0,
        });
        // 4 of 5 characters of "DIXON" match.
        assert_close(only_a.score("DIXON", "DICKSONX"), 0.8);
    }

    #[test]
    fn test_similarity_trait_on_owned_strings() {
        let a = "DWAYNE".to_string();
        let b = "DUANE".to_string();
        assert_eq!(JaroWinkler::new().similarity(&a, &b), jaro_winkler("DWAYNE", "DUANE"));
        assert_eq!(Jaro::new().similarity("DWAYNE", "DUANE"), jaro("DWAYNE", "DUANE"));
    }

    #[test]
    fn test_multibyte_characters_count_as_one() {
        assert_eq!(jaro("héllo", "héllo"), 1.0);
        assert_close(jaro("naïve", "naive"), jaro("naXve", "naive"));
    }

    proptest! {
        #[test]
        fn jaro_is_commutative(a in "[a-d]{0,12}", b in "[a-d]{0,12}") {
            prop_assert_eq!(jaro(&a, &b), jaro(&b, &a));
            prop_assert_eq!(jaro_winkler(&a, &b), jaro_winkler(&b, &a));
        }

        #[test]
        fn scores_are_bounded(a in ".{0,16}", b in ".{0,16}") {
            let d = jaro(&a, &b);
            let jw = jaro_winkler(&a, &b);
            prop_assert!((0.0..=1.0 + 1e-12).contains(&d));
            prop_assert!((0.0..=1.0 + 1e-12).contains(&jw));
            prop_assert!(jw >= d);
        }

        #[test]
        fn nonempty_self_similarity_is_one(a in ".{1,16}") {
            prop_assert!((jaro(&a, &a) - 1.0).abs() < 1e-12);
        }
    }
}
