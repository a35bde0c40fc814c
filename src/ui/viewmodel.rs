//! Display-ready view models computed from notifications.
//!
//! View models hold only strings and flags. All fallbacks for missing pet
//! fields are applied here so the renderer never has to look inside a [`Pet`].
//!
//! # Example
//!
//! ```
//! use petscout::domain::AnimalType;
//! use petscout::ui::viewmodel::results_title;
//!
//! assert_eq!(results_title(Some(AnimalType::Dog), 1), "Found 1 dog");
//! assert_eq!(results_title(None, 12), "Available Pets (12)");
//! assert_eq!(results_title(Some(AnimalType::Cat), 0), "No cats found");
//! ```

use crate::app::{FavoritesFilter, FavoritesView, PageInfo};
use crate::domain::{AnimalType, Pet};

/// Fallback shown when a pet has no name.
pub const UNNAMED: &str = "Sweet Pet";

/// Fallback shown when a pet has no breed.
pub const UNKNOWN_BREED: &str = "Mixed";

/// Fallback shown when a pet has no age.
pub const UNKNOWN_AGE: &str = "Unknown";

/// Fallback shown when a pet has no type.
pub const UNKNOWN_KIND: &str = "Pet";

/// One pet, ready to print.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PetCard {
    /// One-based position in the list the card belongs to.
    pub position: usize,
    pub id: Option<String>,
    pub name: String,
    pub breed: String,
    pub age: String,
    pub kind: String,
    pub gender: Option<String>,
    pub size: Option<String>,
    pub description: Option<String>,
    pub contact: Option<String>,
    pub phone: Option<String>,
}

impl PetCard {
    #[must_use]
    pub fn new(position: usize, pet: &Pet) -> Self {
        let owned = |value: Option<&str>| value.map(String::from);
        Self {
            position,
            id: pet.id(),
            name: pet.name().unwrap_or(UNNAMED).to_string(),
            breed: pet.breed().unwrap_or(UNKNOWN_BREED).to_string(),
            age: pet.age().unwrap_or(UNKNOWN_AGE).to_string(),
            kind: pet.kind().unwrap_or(UNKNOWN_KIND).to_string(),
            gender: owned(pet.gender()),
            size: owned(pet.size()),
            description: owned(pet.description()),
            contact: owned(pet.contact()),
            phone: owned(pet.phone()),
        }
    }
}

/// Heading above the search results.
///
/// Searches without an animal type are titled "Available Pets"; typed searches
/// report the count with a pluralised type.
#[must_use]
pub fn results_title(animal: Option<AnimalType>, count: usize) -> String {
    match (animal, count) {
        (None, 0) => "Available Pets".to_string(),
        (None, n) => format!("Available Pets ({n})"),
        (Some(animal), 0) => format!("No {}s found", animal.as_str()),
        (Some(animal), 1) => format!("Found 1 {}", animal.as_str()),
        (Some(animal), n) => format!("Found {n} {}s", animal.as_str()),
    }
}

/// Line shown under a page of results.
#[must_use]
pub fn page_footer(info: &PageInfo) -> String {
    if info.has_more() {
        format!(
            "Page {} of {} · {} loaded · `more` for the next page",
            info.page, info.total_pages, info.total_items
        )
    } else {
        format!(
            "Page {} of {} · {} loaded · end of results",
            info.page, info.total_pages, info.total_items
        )
    }
}

/// Results block for one page update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsView {
    pub title: String,

    /// Cards for the newly appended items only, numbered by their position
    /// in the accumulated list.
    pub cards: Vec<PetCard>,

    pub footer: String,
    pub is_empty: bool,
}

impl ResultsView {
    #[must_use]
    pub fn new(
        animal: Option<AnimalType>,
        accumulated: usize,
        appended: &[Pet],
        info: &PageInfo,
    ) -> Self {
        let first = accumulated.saturating_sub(appended.len()) + 1;
        Self {
            title: results_title(animal, accumulated),
            cards: appended
                .iter()
                .enumerate()
                .map(|(i, pet)| PetCard::new(first + i, pet))
                .collect(),
            footer: page_footer(info),
            is_empty: accumulated == 0,
        }
    }
}

/// Favorites block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoritesPanel {
    pub heading: String,
    pub stats: String,
    pub cards: Vec<PetCard>,
}

impl From<&FavoritesView> for FavoritesPanel {
    fn from(view: &FavoritesView) -> Self {
        let heading = match &view.filter {
            FavoritesFilter::All => "Favorites".to_string(),
            FavoritesFilter::Tag(tag) => format!("Favorites ({tag})"),
        };
        let stats = format!(
            "{} total · {} dogs · {} cats · {} recent",
            view.stats.total, view.stats.dogs, view.stats.cats, view.stats.recent
        );
        Self {
            heading,
            stats,
            cards: view
                .visible
                .iter()
                .enumerate()
                .map(|(i, pet)| PetCard::new(i + 1, pet))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::FavoritesStats;
    use serde_json::json;

    #[test]
    fn card_fallbacks() {
        let pet = Pet::from_value(json!({"id": 9, "name": "  ", "gender": "Female"})).unwrap();
        let card = PetCard::new(1, &pet);

        assert_eq!(card.name, "Sweet Pet");
        assert_eq!(card.breed, "Mixed");
        assert_eq!(card.age, "Unknown");
        assert_eq!(card.kind, "Pet");
        assert_eq!(card.gender.as_deref(), Some("Female"));
        assert_eq!(card.id.as_deref(), Some("9"));
        assert_eq!(card.size, None);
    }

    #[test]
    fn titles() {
        assert_eq!(results_title(None, 0), "Available Pets");
        assert_eq!(results_title(Some(AnimalType::Dog), 0), "No dogs found");
        assert_eq!(results_title(Some(AnimalType::Cat), 2), "Found 2 cats");
    }

    #[test]
    fn appended_cards_continue_numbering() {
        let pets: Vec<Pet> = (0..3)
            .map(|i| Pet::from_value(json!({"id": i})).unwrap())
            .collect();
        let info = PageInfo {
            generation: 1,
            page: 2,
            total_pages: 2,
            total_items: 13,
        };
        let view = ResultsView::new(Some(AnimalType::Dog), 13, &pets, &info);

        let positions: Vec<_> = view.cards.iter().map(|c| c.position).collect();
        assert_eq!(positions, vec![11, 12, 13]);
        assert_eq!(view.title, "Found 13 dogs");
        assert!(view.footer.contains("end of results"));
    }

    #[test]
    fn favorites_panel() {
        let view = FavoritesView {
            filter: FavoritesFilter::Tag("dog".into()),
            visible: vec![Pet::from_value(json!({"id": 1, "name": "Rex"})).unwrap()],
            stats: FavoritesStats {
                total: 1,
                dogs: 1,
                cats: 0,
                recent: 1,
            },
        };
        let panel = FavoritesPanel::from(&view);
        assert_eq!(panel.heading, "Favorites (dog)");
        assert_eq!(panel.stats, "1 total · 1 dogs · 0 cats · 1 recent");
        assert_eq!(panel.cards[0].name, "Rex");
    }
}
