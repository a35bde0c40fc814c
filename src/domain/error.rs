//! Error types for petscout.
//!
//! Two layers of errors live here. [`FetchError`] is the taxonomy every remote
//! call reports (search pages and favorites alike) and is what the result sink
//! sees when a page load fails. [`PetscoutError`] is the crate-level error for
//! everything else: configuration, I/O, and the runtime's event channel.

use thiserror::Error;

/// Failure of a single request against the search or favorites service.
///
/// None of these are retried automatically. Retry policy belongs to the
/// caller, which is why every variant is reported and the session stays usable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// No response was received (connection refused, DNS failure, timeout).
    ///
    /// Usually transient; the user may retry the same operation.
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-success status code.
    #[error("server responded with HTTP {0}")]
    HttpStatus(u16),

    /// A response arrived but its body does not have the expected shape.
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl FetchError {
    /// Whether the failure happened before any response was received.
    #[must_use]
    pub const fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            Self::HttpStatus(status.as_u16())
        } else if err.is_decode() {
            Self::Malformed(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// Failure of a favorites operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FavoritesError {
    /// The request itself failed.
    #[error(transparent)]
    Request(#[from] FetchError),

    /// The server (or the client-side precheck) refused the operation.
    #[error("favorite rejected: {0}")]
    Rejected(String),
}

/// The main error type for petscout operations outside of individual requests.
///
/// # Examples
///
/// ```
/// use petscout::domain::PetscoutError;
///
/// fn validate_base_url(url: &str) -> Result<(), PetscoutError> {
///     if url.is_empty() {
///         return Err(PetscoutError::Config("base_url must not be empty".to_string()));
///     }
///     Ok(())
/// }
/// assert!(validate_base_url("").is_err());
/// ```
#[derive(Debug, Error)]
pub enum PetscoutError {
    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem or terminal I/O failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A remote request failed outside of the search session flow.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// A favorites operation failed outside of the event loop.
    #[error(transparent)]
    Favorites(#[from] FavoritesError),

    /// The runtime's event channel was closed while still in use.
    #[error("Runtime error: {0}")]
    Runtime(String),
}

/// A specialized `Result` type for petscout operations.
pub type Result<T> = std::result::Result<T, PetscoutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn favorites_error_wraps_fetch_error_transparently() {
        let err = FavoritesError::from(FetchError::HttpStatus(404));
        assert_eq!(err.to_string(), "server responded with HTTP 404");
    }

    #[test]
    fn only_network_errors_are_network() {
        assert!(FetchError::Network("refused".into()).is_network());
        assert!(!FetchError::HttpStatus(500).is_network());
        assert!(!FetchError::Malformed("missing items".into()).is_network());
    }
}
