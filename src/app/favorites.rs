//! Local view of the saved favorites: filtering and summary counts.

use crate::domain::Pet;
use std::fmt;

/// Which favorites are shown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FavoritesFilter {
    #[default]
    All,

    /// Lowercase tag matched against the pet's type or age.
    Tag(String),
}

impl FavoritesFilter {
    /// Parses user input. Blank input and `all` select everything.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let tag = raw.trim().to_lowercase();
        if tag.is_empty() || tag == "all" {
            Self::All
        } else {
            Self::Tag(tag)
        }
    }

    #[must_use]
    pub fn matches(&self, pet: &Pet) -> bool {
        match self {
            Self::All => true,
            Self::Tag(tag) => [pet.kind(), pet.age()]
                .into_iter()
                .flatten()
                .any(|value| value.eq_ignore_ascii_case(tag)),
        }
    }
}

impl fmt::Display for FavoritesFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Tag(tag) => f.write_str(tag),
        }
    }
}

/// Counts shown above the favorites list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FavoritesStats {
    pub total: usize,
    pub dogs: usize,
    pub cats: usize,

    /// Number of recently added favorites; at most three.
    pub recent: usize,
}

const RECENT_LIMIT: usize = 3;

/// Favorites list as last fetched from the server, plus the active filter.
#[derive(Debug, Clone, Default)]
pub struct FavoritesBook {
    items: Vec<Pet>,
    filter: FavoritesFilter,
}

/// Snapshot handed to the result sink.
#[derive(Debug, Clone, PartialEq)]
pub struct FavoritesView {
    pub filter: FavoritesFilter,
    pub visible: Vec<Pet>,
    pub stats: FavoritesStats,
}

impl FavoritesBook {
    /// Replaces the list with a fresh copy from the server.
    pub fn replace(&mut self, items: Vec<Pet>) {
        self.items = items;
    }

    /// Drops the favorite with `id`. Returns whether anything was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|pet| pet.id().as_deref() != Some(id));
        self.items.len() != before
    }

    pub fn set_filter(&mut self, filter: FavoritesFilter) {
        self.filter = filter;
    }

    #[must_use]
    pub const fn filter(&self) -> &FavoritesFilter {
        &self.filter
    }

    #[must_use]
    pub fn items(&self) -> &[Pet] {
        &self.items
    }

    pub fn visible(&self) -> impl Iterator<Item = &Pet> {
        self.items.iter().filter(|pet| self.filter.matches(pet))
    }

    /// Counts over the filtered view.
    #[must_use]
    pub fn stats(&self) -> FavoritesStats {
        let mut stats = FavoritesStats::default();
        for pet in self.visible() {
            stats.total += 1;
            match pet.kind().map(str::to_lowercase).as_deref() {
                Some("dog") => stats.dogs += 1,
                Some("cat") => stats.cats += 1,
                _ => {}
            }
        }
        stats.recent = stats.total.min(RECENT_LIMIT);
        stats
    }

    #[must_use]
    pub fn view(&self) -> FavoritesView {
        FavoritesView {
            filter: self.filter.clone(),
            visible: self.visible().cloned().collect(),
            stats: self.stats(),
        }
    }
}
