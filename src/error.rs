use thiserror::Error;

/// Result alias for `strcluster`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the similarity cache and clustering engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Input was empty.
    #[error("empty input provided")]
    EmptyInput,

    /// Invalid number of clusters requested.
    #[error("cannot create {requested} clusters from {n_items} distinct items")]
    InvalidClusterCount {
        /// Requested count.
        requested: usize,
        /// Number of distinct items.
        n_items: usize,
    },

    /// Invalid parameter value.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Error message.
        message: &'static str,
    },

    /// A result accessor was called before clustering completed.
    #[error("result is not materialized; call cluster() first")]
    NotReady,

    /// The cache has no entry for a pair the engine needed.
    #[error("no cached similarity for item pair ({first}, {second})")]
    MissingSimilarity {
        /// Index of the first item.
        first: usize,
        /// Index of the second item.
        second: usize,
    },

    /// Configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}
