//! Side effects requested by the event handler.
//!
//! The handler never performs I/O. It mutates [`AppState`](super::AppState)
//! and returns a `Vec<Action>`; the runtime executes the actions in order.
//!
//! # Example
//!
//! ```
//! use petscout::app::{handle_event, Action, AppState, Event};
//!
//! let mut state = AppState::default();
//! let (changed, actions) = handle_event(&mut state, &Event::LoadMore)?;
//! assert!(!changed);
//! assert!(matches!(actions.as_slice(), [Action::Notify(_)]));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use super::favorites::FavoritesView;
use super::session::{IdleReason, PageUpdate};
use super::sink::ResultSink;
use crate::domain::{FavoritesError, FetchError, Pet, Query};
use crate::worker::{FavoritesRequest, PageRequest};

/// Commands executed by the runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Fetch a page on a background task.
    ///
    /// The completion returns as [`Event::PageFetched`](super::Event::PageFetched).
    FetchPage(PageRequest),

    /// Call the favorites service on a background task.
    Favorites(FavoritesRequest),

    /// Deliver a notification to the result sink.
    Notify(Notification),
}

/// Everything the result sink can be told.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    /// A new search was issued and its first page is loading.
    SearchStarted { generation: u64, query: Query },

    /// A page of the current search was appended.
    Page(PageUpdate),

    /// A page request of the current search failed.
    SearchFailed(FetchError),

    /// A "load more" request was not issued.
    Idle(IdleReason),

    /// The favorites list or its filter changed.
    Favorites(FavoritesView),

    FavoriteSaved(Pet),

    FavoriteRemoved(String),

    FavoritesFailed {
        operation: &'static str,
        error: FavoritesError,
    },
}

impl Notification {
    /// Calls the matching sink callback.
    pub fn deliver(&self, sink: &mut dyn ResultSink) {
        match self {
            Self::SearchStarted { query, .. } => sink.on_search_started(query),
            Self::Page(update) => sink.on_page(update),
            Self::SearchFailed(error) => sink.on_error(error),
            Self::Idle(reason) => sink.on_idle(*reason),
            Self::Favorites(view) => sink.on_favorites(view),
            Self::FavoriteSaved(pet) => sink.on_favorite_saved(pet),
            Self::FavoriteRemoved(id) => sink.on_favorite_removed(id),
            Self::FavoritesFailed { operation, error } => {
                sink.on_favorites_error(operation, error);
            }
        }
    }
}
