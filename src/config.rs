//! Clustering configuration.
//!
//! ```rust
//! use strcluster::config::{ClusterConfig, Metric};
//!
//! let config = ClusterConfig::from_toml_str(
//!     r#"
//!     k = 3
//!     seed = 7
//!     metric = "jaro"
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.k, 3);
//! assert_eq!(config.metric, Metric::Jaro);
//! assert_eq!(config.max_iter, 100);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::similarity::{Jaro, JaroWeights, JaroWinkler, StringMetric, WinklerParams};

/// Default number of groups.
pub const DEFAULT_K: usize = 2;
/// Default cap on assignment passes.
pub const DEFAULT_MAX_ITER: usize = 100;

/// Which string measure to cluster with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Plain Jaro.
    Jaro,
    /// Jaro-Winkler.
    #[default]
    JaroWinkler,
}

/// Settings for a k-medoids run over strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    /// Number of groups.
    pub k: usize,
    /// Maximum assignment passes before giving up on convergence.
    pub max_iter: usize,
    /// Seed for the initial medoid draw. `None` draws from the thread RNG.
    pub seed: Option<u64>,
    /// String measure.
    pub metric: Metric,
    /// Jaro term weights.
    pub jaro: JaroWeights,
    /// Winkler prefix boost. Ignored for [`Metric::Jaro`].
    pub winkler: WinklerParams,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            k: DEFAULT_K,
            max_iter: DEFAULT_MAX_ITER,
            seed: None,
            metric: Metric::default(),
            jaro: JaroWeights::default(),
            winkler: WinklerParams::default(),
        }
    }
}

impl ClusterConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Check parameter ranges that do not depend on the input.
    pub fn validate(&self) -> Result<()> {
        if self.k == 0 {
            return Err(Error::InvalidParameter {
                name: "k",
                message: "must be at least 1",
            });
        }
        if self.max_iter == 0 {
            return Err(Error::InvalidParameter {
                name: "max_iter",
                message: "must be at least 1",
            });
        }
        let JaroWeights {
            a,
            b,
            transposition,
        } = self.jaro;
        if [a, b, transposition].iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(Error::InvalidParameter {
                name: "jaro",
                message: "weights must be finite and non-negative",
            });
        }
        if (a + b + transposition - 1.0).abs() > 1e-9 {
            return Err(Error::InvalidParameter {
                name: "jaro",
                message: "weights must sum to 1",
            });
        }
        let boost = self.winkler.scaling_factor * self.winkler.prefix_limit as f64;
        if !(0.0..=1.0).contains(&boost) {
            return Err(Error::InvalidParameter {
                name: "winkler",
                message: "scaling_factor * prefix_limit must lie in [0, 1]",
            });
        }
        Ok(())
    }

    /// The configured string measure.
    pub fn similarity(&self) -> StringMetric {
        match self.metric {
            Metric::Jaro => StringMetric::Jaro(Jaro::new().with_weights(self.jaro)),
            Metric::JaroWinkler => StringMetric::JaroWinkler(
                JaroWinkler::new()
                    .with_weights(self.jaro)
                    .with_params(self.winkler),
            ),
        }
    }
}
