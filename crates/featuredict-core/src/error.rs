// crates/featuredict-core/src/error.rs
use thiserror::Error;

/// Errors raised while building indexes or talking to a catalog.
///
/// Absence of a match is never an error: queries return an empty list.
#[derive(Debug, Error)]
pub enum DictionaryError {
    /// A tree index was configured with a zero depth or bucket size.
    #[error("invalid tree parameters: max_depth={max_depth}, min_bucket_size={min_bucket_size} (both must be >= 1)")]
    InvalidTreeParams {
        max_depth: usize,
        min_bucket_size: usize,
    },

    #[error("not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "json")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failure reported by a caller-supplied catalog implementation.
    #[error("catalog error: {0}")]
    Catalog(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[cfg(feature = "fetch")]
    #[error("fetch error: {0}")]
    Fetch(String),
}

impl DictionaryError {
    /// Wrap any error coming out of a foreign catalog implementation.
    pub fn catalog<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        DictionaryError::Catalog(Box::new(err))
    }
}

pub type Result<T> = std::result::Result<T, DictionaryError>;
