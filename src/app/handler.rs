//! Event handling and state transition logic.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow:
//! 1. Events arrive from the command interface or from finished worker tasks
//! 2. [`handle_event`] pattern-matches the event
//! 3. State mutations go through [`SearchSession`](super::SearchSession) and
//!    [`FavoritesBook`](super::FavoritesBook)
//! 4. Actions are collected and returned for the runtime to execute
//!
//! # Event Types
//!
//! - **Search**: `Initialize`, `Submit`, `SelectCategory`, `LoadMore`
//! - **Favorites**: `SaveFavorite`, `SaveResult`, `RemoveFavorite`,
//!   `RefreshFavorites`, `FilterFavorites`
//! - **Completions**: `PageFetched`, `FavoritesResponse`

use super::favorites::FavoritesFilter;
use super::session::{Completion, LoadNext};
use super::{Action, AppState, Notification};
use crate::domain::{Category, FavoritesError, Filters, Pet, Result};
use crate::worker::{FavoritesOutcome, FavoritesRequest, PageOutcome};

/// Events triggered by user commands or by completed background requests.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Issues the initial all-animals search. Ignored after the first time.
    Initialize,

    /// Starts a new search from raw filter values.
    Submit(Filters),

    /// Starts a new search for a category with the default location.
    SelectCategory(Category),

    /// Requests the next page of the current search.
    LoadMore,

    /// A page request finished.
    PageFetched(PageOutcome),

    /// Saves a pet as a favorite.
    SaveFavorite(Pet),

    /// Saves the accumulated search result at this zero-based position.
    SaveResult(usize),

    /// Deletes the favorite with this id.
    RemoveFavorite(String),

    /// Re-fetches the favorites list.
    RefreshFavorites,

    /// Changes which favorites are shown.
    FilterFavorites(FavoritesFilter),

    /// A favorites request finished.
    FavoritesResponse(FavoritesOutcome),
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Returns
///
/// Whether observable state changed, and the actions to run in order.
///
/// # Errors
///
/// Currently infallible; the signature leaves room for events that validate
/// input against state.
///
/// # Example
///
/// ```
/// use petscout::app::{handle_event, Action, AppState, Event};
///
/// let mut state = AppState::default();
/// let (_, actions) = handle_event(&mut state, &Event::Initialize)?;
/// assert!(actions.iter().any(|a| matches!(a, Action::FetchPage(r) if r.page == 1)));
///
/// let (_, again) = handle_event(&mut state, &Event::Initialize)?;
/// assert!(again.is_empty());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = event.name()).entered();

    match event {
        Event::Initialize => {
            if state.initialized {
                tracing::debug!("already initialized");
                return Ok((false, vec![]));
            }
            state.initialized = true;
            Ok((true, start_search(state, &Filters::default())))
        }
        Event::Submit(filters) => Ok((true, start_search(state, filters))),
        Event::SelectCategory(category) => {
            tracing::debug!(category = ?category, "category selected");
            Ok((true, start_search(state, &category.filters())))
        }
        Event::LoadMore => match state.session.load_next_page() {
            LoadNext::Requested(request) => Ok((true, vec![Action::FetchPage(request)])),
            LoadNext::Idle(reason) => {
                tracing::debug!(reason = %reason, "nothing to load");
                Ok((false, vec![Action::Notify(Notification::Idle(reason))]))
            }
        },
        Event::PageFetched(outcome) => match state.session.complete(outcome.clone()) {
            Completion::Applied(update) => {
                Ok((true, vec![Action::Notify(Notification::Page(update))]))
            }
            Completion::Failed(error) => {
                Ok((true, vec![Action::Notify(Notification::SearchFailed(error))]))
            }
            Completion::Stale => Ok((false, vec![])),
        },
        Event::SaveFavorite(pet) => Ok((
            false,
            vec![Action::Favorites(FavoritesRequest::Add(pet.clone()))],
        )),
        Event::SaveResult(index) => {
            let Some(pet) = state.result_at(*index) else {
                tracing::debug!(index, results = state.session.accumulated().len(), "no such result");
                return Ok((
                    false,
                    vec![Action::Notify(Notification::FavoritesFailed {
                        operation: "add favorite",
                        error: FavoritesError::Rejected(format!("no search result #{}", index + 1)),
                    })],
                ));
            };
            Ok((false, vec![Action::Favorites(FavoritesRequest::Add(pet.clone()))]))
        }
        Event::RemoveFavorite(id) => Ok((
            false,
            vec![Action::Favorites(FavoritesRequest::Remove(id.clone()))],
        )),
        Event::RefreshFavorites => Ok((false, vec![Action::Favorites(FavoritesRequest::List)])),
        Event::FilterFavorites(filter) => {
            tracing::debug!(filter = %filter, "favorites filter changed");
            state.favorites.set_filter(filter.clone());
            Ok((true, vec![Action::Notify(Notification::Favorites(state.favorites.view()))]))
        }
        Event::FavoritesResponse(outcome) => Ok(handle_favorites_outcome(state, outcome)),
    }
}

fn start_search(state: &mut AppState, filters: &Filters) -> Vec<Action> {
    let request = state.session.start_search(filters);
    vec![
        Action::Notify(Notification::SearchStarted {
            generation: request.generation,
            query: request.query.clone(),
        }),
        Action::FetchPage(request),
    ]
}

fn handle_favorites_outcome(state: &mut AppState, outcome: &FavoritesOutcome) -> (bool, Vec<Action>) {
    match outcome {
        FavoritesOutcome::Added { pet } => (
            false,
            vec![Action::Notify(Notification::FavoriteSaved(pet.clone()))],
        ),
        FavoritesOutcome::Listed { pets } => {
            state.favorites.replace(pets.clone());
            (
                true,
                vec![Action::Notify(Notification::Favorites(state.favorites.view()))],
            )
        }
        FavoritesOutcome::Removed { id } => {
            let changed = state.favorites.remove(id);
            (
                changed,
                vec![
                    Action::Notify(Notification::FavoriteRemoved(id.clone())),
                    Action::Notify(Notification::Favorites(state.favorites.view())),
                ],
            )
        }
        FavoritesOutcome::Failed { operation, error } => (
            false,
            vec![Action::Notify(Notification::FavoritesFailed {
                operation: *operation,
                error: error.clone(),
            })],
        ),
    }
}

impl Event {
    /// Variant name for spans.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Initialize => "initialize",
            Self::Submit(_) => "submit",
            Self::SelectCategory(_) => "select_category",
            Self::LoadMore => "load_more",
            Self::PageFetched(_) => "page_fetched",
            Self::SaveFavorite(_) => "save_favorite",
            Self::SaveResult(_) => "save_result",
            Self::RemoveFavorite(_) => "remove_favorite",
            Self::RefreshFavorites => "refresh_favorites",
            Self::FilterFavorites(_) => "filter_favorites",
            Self::FavoritesResponse(_) => "favorites_response",
        }
    }

    /// Whether this event reports the end of a spawned request.
    #[must_use]
    pub const fn is_completion(&self) -> bool {
        matches!(self, Self::PageFetched(_) | Self::FavoritesResponse(_))
    }
}
