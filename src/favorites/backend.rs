//! Favorites backend abstraction.
//!
//! Mirrors [`PageFetcher`](crate::fetch::PageFetcher): the runtime holds an
//! `Arc<dyn FavoritesBackend>` and every method maps to one endpoint.

use crate::domain::{FavoritesError, Pet};
use futures_util::future::BoxFuture;

/// Remote store of the user's saved pets.
///
/// # Implementations
///
/// - [`HttpFavorites`](super::HttpFavorites): JSON endpoints under `favorites_path`
pub trait FavoritesBackend: Send + Sync {
    /// Saves a pet, sending its record unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`FavoritesError::Rejected`] if the pet lacks an id or name or
    /// the server answers `ok: false`; otherwise a request error.
    fn add<'a>(&'a self, pet: &'a Pet) -> BoxFuture<'a, Result<(), FavoritesError>>;

    /// Lists every saved pet.
    ///
    /// # Errors
    ///
    /// Returns a request error on transport, status, or body failures.
    fn list(&self) -> BoxFuture<'_, Result<Vec<Pet>, FavoritesError>>;

    /// Removes the favorite stored under `id`.
    ///
    /// # Errors
    ///
    /// Returns a request error, or [`FavoritesError::Rejected`] if the server
    /// answers `ok: false`.
    fn remove<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<(), FavoritesError>>;

    /// Downloads all favorites as CSV.
    ///
    /// # Errors
    ///
    /// Returns a request error on transport or status failures.
    fn export_csv(&self) -> BoxFuture<'_, Result<Vec<u8>, FavoritesError>>;
}
