//! Central application state.
//!
//! One [`AppState`] exists per runtime. It is only ever mutated by
//! [`handle_event`](super::handle_event), on the event loop.

use super::favorites::FavoritesBook;
use super::session::SearchSession;
use crate::domain::{Pet, QueryBuilder};

#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// The current search and its accumulated results.
    pub session: SearchSession,

    /// Favorites as last fetched, with the active filter.
    pub favorites: FavoritesBook,

    /// Set once the initial all-animals search has been issued.
    pub initialized: bool,
}

impl AppState {
    #[must_use]
    pub fn new(builder: QueryBuilder) -> Self {
        Self {
            session: SearchSession::new(builder),
            favorites: FavoritesBook::default(),
            initialized: false,
        }
    }

    /// Looks up an accumulated search result by zero-based position.
    #[must_use]
    pub fn result_at(&self, index: usize) -> Option<&Pet> {
        self.session.accumulated().get(index)
    }
}
