//! Consumer of session and favorites notifications.

use super::favorites::FavoritesView;
use super::session::{IdleReason, PageUpdate};
use crate::domain::{FavoritesError, FetchError, Pet, Query};

/// Receives everything the user should see.
///
/// Only page results and search errors are mandatory; the remaining callbacks
/// default to no-ops so a sink interested in search alone stays small.
///
/// # Implementations
///
/// - [`TerminalSink`](crate::ui::TerminalSink): renders text to a writer
pub trait ResultSink {
    /// A page of the current search was appended.
    fn on_page(&mut self, update: &PageUpdate);

    /// A page load of the current search failed.
    fn on_error(&mut self, error: &FetchError);

    fn on_search_started(&mut self, _query: &Query) {}

    fn on_idle(&mut self, _reason: IdleReason) {}

    fn on_favorites(&mut self, _view: &FavoritesView) {}

    fn on_favorite_saved(&mut self, _pet: &Pet) {}

    fn on_favorite_removed(&mut self, _id: &str) {}

    fn on_favorites_error(&mut self, _operation: &str, _error: &FavoritesError) {}
}

impl<S: ResultSink + ?Sized> ResultSink for Box<S> {
    fn on_page(&mut self, update: &PageUpdate) {
        (**self).on_page(update);
    }

    fn on_error(&mut self, error: &FetchError) {
        (**self).on_error(error);
    }

    fn on_search_started(&mut self, query: &Query) {
        (**self).on_search_started(query);
    }

    fn on_idle(&mut self, reason: IdleReason) {
        (**self).on_idle(reason);
    }

    fn on_favorites(&mut self, view: &FavoritesView) {
        (**self).on_favorites(view);
    }

    fn on_favorite_saved(&mut self, pet: &Pet) {
        (**self).on_favorite_saved(pet);
    }

    fn on_favorite_removed(&mut self, id: &str) {
        (**self).on_favorite_removed(id);
    }

    fn on_favorites_error(&mut self, operation: &str, error: &FavoritesError) {
        (**self).on_favorites_error(operation, error);
    }
}
