//! Page fetcher abstraction.
//!
//! The [`PageFetcher`] trait is the seam between the search session and the
//! network. The runtime only ever holds an `Arc<dyn PageFetcher>`, so tests can
//! script responses (including slow or out-of-order ones) without a server.

use crate::domain::{FetchError, PageResponse, Query};
use futures_util::future::BoxFuture;

/// Retrieves a single page of search results.
///
/// Implementations must not mutate shared state: each call is an independent,
/// idempotent read, and the caller decides whether the result is still wanted.
///
/// # Implementations
///
/// - [`HttpPageFetcher`](super::HttpPageFetcher): `GET` against the search endpoint
///
/// # Examples
///
/// ```no_run
/// use petscout::domain::{build_query, Filters};
/// use petscout::fetch::{HttpPageFetcher, PageFetcher};
/// use petscout::Config;
///
/// # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
/// let fetcher = HttpPageFetcher::from_config(&Config::default())?;
/// let query = build_query(&Filters::default());
/// let page = fetcher.fetch_page(&query, 2).await?;
/// println!("{} of {}", page.page, page.total_pages);
/// # Ok(())
/// # }
/// ```
pub trait PageFetcher: Send + Sync {
    /// Fetches `page_number` of `query`. The query's own `page` is ignored.
    ///
    /// # Errors
    ///
    /// - [`FetchError::Network`] when no response is received (including timeouts)
    /// - [`FetchError::HttpStatus`] for non-success status codes
    /// - [`FetchError::Malformed`] when the body is not a valid page
    fn fetch_page<'a>(
        &'a self,
        query: &'a Query,
        page_number: u32,
    ) -> BoxFuture<'a, Result<PageResponse, FetchError>>;
}
