//! Request and completion types exchanged between the event loop and workers.
//!
//! Every page request carries the session generation it was issued for. The
//! completion echoes it back, which is how the session recognises (and drops)
//! responses that belong to a search the user has already replaced.

use crate::domain::{FavoritesError, FetchError, PageResponse, Pet, Query};

/// A page fetch the session wants performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Session generation this request belongs to.
    pub generation: u64,

    /// Canonical query of that generation.
    pub query: Query,

    /// Page to fetch; overrides `query.page`.
    pub page: u32,
}

/// Result of a [`PageRequest`], tagged with the originating generation.
#[derive(Debug, Clone, PartialEq)]
pub struct PageOutcome {
    pub generation: u64,
    pub page: u32,
    pub result: Result<PageResponse, FetchError>,
}

/// A favorites call the event loop wants performed.
#[derive(Debug, Clone, PartialEq)]
pub enum FavoritesRequest {
    /// Save a pet.
    Add(Pet),

    /// Fetch the full favorites list.
    List,

    /// Delete the favorite stored under this id.
    Remove(String),
}

impl FavoritesRequest {
    /// Short operation name for logs.
    #[must_use]
    pub const fn operation(&self) -> &'static str {
        match self {
            Self::Add(_) => "add favorite",
            Self::List => "list favorites",
            Self::Remove(_) => "remove favorite",
        }
    }
}

/// Completion of a [`FavoritesRequest`].
#[derive(Debug, Clone, PartialEq)]
pub enum FavoritesOutcome {
    /// The pet was saved.
    Added { pet: Pet },

    /// The favorites list was fetched.
    Listed { pets: Vec<Pet> },

    /// The favorite was deleted.
    Removed { id: String },

    /// The call failed.
    Failed {
        operation: &'static str,
        error: FavoritesError,
    },
}
