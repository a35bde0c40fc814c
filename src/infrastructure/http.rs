//! Shared HTTP plumbing for the search and favorites clients.
//!
//! Both clients talk to the same service, so they share one `reqwest::Client`
//! (connection pool, timeout) and the same rules for joining endpoint paths
//! and classifying failed responses.

use crate::domain::{FetchError, PetscoutError, Result};
use reqwest::{Client, Response, Url};
use std::time::Duration;

/// Builds the HTTP client used by every remote call.
///
/// # Errors
///
/// Returns [`PetscoutError::Config`] if the TLS backend cannot be initialised.
pub fn build_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .user_agent(concat!("petscout/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .build()
        .map_err(|e| PetscoutError::Config(format!("failed to create HTTP client: {e}")))
}

/// Joins a service base URL and an endpoint path.
///
/// Exactly one slash separates the two, regardless of how either side is
/// written.
///
/// # Errors
///
/// Returns [`PetscoutError::Config`] when the result is not an absolute URL.
///
/// # Examples
///
/// ```
/// use petscout::infrastructure::endpoint;
///
/// let url = endpoint("http://localhost:5000/", "/api/search").unwrap();
/// assert_eq!(url.as_str(), "http://localhost:5000/api/search");
/// ```
pub fn endpoint(base_url: &str, path: &str) -> Result<Url> {
    let joined = format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    Url::parse(&joined).map_err(|e| PetscoutError::Config(format!("invalid endpoint {joined}: {e}")))
}

/// Sends a prepared request, mapping transport failures to [`FetchError::Network`].
pub(crate) async fn send(request: reqwest::RequestBuilder) -> std::result::Result<Response, FetchError> {
    request.send().await.map_err(|e| {
        if e.is_timeout() {
            FetchError::Network(format!("request timed out: {e}"))
        } else {
            FetchError::Network(e.to_string())
        }
    })
}

/// Reads the full response body.
pub(crate) async fn read_body(response: Response) -> std::result::Result<Vec<u8>, FetchError> {
    response
        .bytes()
        .await
        .map(|b| b.to_vec())
        .map_err(|e| FetchError::Network(format!("failed to read response body: {e}")))
}

/// Rejects non-success responses with [`FetchError::HttpStatus`].
pub(crate) fn ensure_success(response: &Response) -> std::result::Result<(), FetchError> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(FetchError::HttpStatus(status.as_u16()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_normalises_slashes() {
        for (base, path) in [
            ("http://svc", "api/search"),
            ("http://svc/", "/api/search"),
            ("http://svc//", "api/search"),
        ] {
            assert_eq!(endpoint(base, path).unwrap().as_str(), "http://svc/api/search");
        }
    }

    #[test]
    fn endpoint_rejects_relative_base() {
        assert!(matches!(
            endpoint("localhost", "/api/search"),
            Err(PetscoutError::Config(_))
        ));
    }
}
