//! Worker executing page and favorites requests against the remote backends.
//!
//! The worker is cheap to clone (two `Arc`s) so the runtime can move a copy
//! into every spawned task. It never touches session state: it turns a request
//! into an outcome and nothing else.

use crate::domain::FavoritesError;
use crate::favorites::FavoritesBackend;
use crate::fetch::PageFetcher;
use crate::worker::{FavoritesOutcome, FavoritesRequest, PageOutcome, PageRequest};
use std::fmt;
use std::sync::Arc;

/// Executes requests produced by the event handler.
#[derive(Clone)]
pub struct SearchWorker {
    fetcher: Arc<dyn PageFetcher>,
    favorites: Arc<dyn FavoritesBackend>,
}

impl fmt::Debug for SearchWorker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchWorker").finish_non_exhaustive()
    }
}

impl SearchWorker {
    #[must_use]
    pub fn new(fetcher: Arc<dyn PageFetcher>, favorites: Arc<dyn FavoritesBackend>) -> Self {
        Self { fetcher, favorites }
    }

    /// Fetches one page.
    ///
    /// The outcome carries the request's generation and page number whether
    /// the fetch succeeded or not.
    pub async fn handle_page(&self, request: PageRequest) -> PageOutcome {
        let PageRequest {
            generation,
            query,
            page,
        } = request;

        let result = self.fetcher.fetch_page(&query, page).await;

        match &result {
            Ok(response) => tracing::debug!(
                generation,
                page,
                items = response.items.len(),
                total_pages = response.total_pages,
                "page fetched"
            ),
            Err(e) => tracing::debug!(generation, page, error = %e, "page fetch failed"),
        }

        PageOutcome {
            generation,
            page,
            result,
        }
    }

    /// Performs one favorites call.
    pub async fn handle_favorites(&self, request: FavoritesRequest) -> FavoritesOutcome {
        let operation = request.operation();
        match request {
            FavoritesRequest::Add(pet) => {
                let result = self.favorites.add(&pet).await;
                Self::handle_result(operation, result, |()| FavoritesOutcome::Added { pet })
            }
            FavoritesRequest::List => {
                let result = self.favorites.list().await;
                Self::handle_result(operation, result, |pets| FavoritesOutcome::Listed { pets })
            }
            FavoritesRequest::Remove(id) => {
                let result = self.favorites.remove(&id).await;
                Self::handle_result(operation, result, |()| FavoritesOutcome::Removed { id })
            }
        }
    }

    /// Maps a backend result to an outcome with consistent logging.
    fn handle_result<T, F>(
        operation: &'static str,
        result: Result<T, FavoritesError>,
        on_success: F,
    ) -> FavoritesOutcome
    where
        F: FnOnce(T) -> FavoritesOutcome,
    {
        match result {
            Ok(value) => {
                tracing::debug!(operation, "favorites operation successful");
                on_success(value)
            }
            Err(error) => {
                tracing::debug!(operation, error = %error, "favorites operation failed");
                FavoritesOutcome::Failed { operation, error }
            }
        }
    }
}
