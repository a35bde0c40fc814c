//! Plain-text [`ResultSink`] for terminals.
//!
//! Each notification is turned into a view model and written as a few lines
//! of text. Write failures are logged and otherwise ignored: a broken stdout
//! must not take the event loop down.

use super::viewmodel::{FavoritesPanel, PetCard, ResultsView};
use crate::app::{FavoritesView, IdleReason, PageUpdate, ResultSink};
use crate::domain::{AnimalType, FavoritesError, FetchError, Pet, Query};
use std::fmt::Write as _;
use std::io::{self, Write};

/// Renders notifications as text to any writer.
#[derive(Debug)]
pub struct TerminalSink<W> {
    out: W,
}

impl TerminalSink<io::Stdout> {
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalSink<W> {
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{text}").and_then(|()| self.out.flush()) {
            tracing::warn!(error = %e, "failed to write output");
        }
    }
}

/// Formats a card as an indented block.
#[must_use]
pub fn render_card(card: &PetCard) -> String {
    let mut lines = vec![format!(
        "{:>3}. {} [{}]",
        card.position,
        card.name,
        card.id.as_deref().unwrap_or("-")
    )];
    lines.push(format!(
        "     {} · {} · {}",
        card.kind, card.breed, card.age
    ));

    let extras: Vec<String> = [
        card.gender.as_ref().map(|g| format!("Gender: {g}")),
        card.size.as_ref().map(|s| format!("Size: {s}")),
    ]
    .into_iter()
    .flatten()
    .collect();
    if !extras.is_empty() {
        lines.push(format!("     {}", extras.join(" · ")));
    }

    if let Some(description) = &card.description {
        lines.push(format!("     About {}: {description}", card.name));
    }
    if let Some(contact) = &card.contact {
        lines.push(format!("     Email: {contact}"));
    }
    if let Some(phone) = &card.phone {
        lines.push(format!("     Tel: {phone}"));
    }
    lines.join("\n")
}

fn describe(query: &Query) -> String {
    let animal = match query.animal_type {
        Some(AnimalType::Dog) => "dogs",
        Some(AnimalType::Cat) => "cats",
        None => "pets",
    };
    let mut text = format!("Searching {animal} near {}", query.location);
    for (label, value) in [("age", &query.age), ("size", &query.size)] {
        if let Some(value) = value {
            let _ = write!(text, ", {label} {value}");
        }
    }
    text.push_str("...");
    text
}

impl<W: Write> ResultSink for TerminalSink<W> {
    fn on_page(&mut self, update: &PageUpdate) {
        let view = ResultsView::new(
            update.query.animal_type,
            update.accumulated.len(),
            &update.appended,
            &update.info,
        );

        if update.info.page <= 1 {
            self.emit(&format!("\n== {} ==", view.title));
        }
        if view.is_empty {
            self.emit("No pets found. Try adjusting your search criteria or location.");
            return;
        }
        for card in &view.cards {
            self.emit(&render_card(card));
        }
        self.emit(&format!("-- {} --", view.footer));
    }

    fn on_error(&mut self, error: &FetchError) {
        self.emit(&format!("Error loading pets: {error}"));
    }

    fn on_search_started(&mut self, query: &Query) {
        self.emit(&describe(query));
    }

    fn on_idle(&mut self, reason: IdleReason) {
        self.emit(&format!("Nothing to load: {reason}."));
    }

    fn on_favorites(&mut self, view: &FavoritesView) {
        let panel = FavoritesPanel::from(view);
        self.emit(&format!("\n== {} ==", panel.heading));
        self.emit(&panel.stats);
        if panel.cards.is_empty() {
            self.emit("No favorites yet.");
        }
        for card in &panel.cards {
            self.emit(&render_card(card));
        }
    }

    fn on_favorite_saved(&mut self, pet: &Pet) {
        self.emit(&format!("{} added to favorites!", pet.name().unwrap_or("Pet")));
    }

    fn on_favorite_removed(&mut self, id: &str) {
        self.emit(&format!("Removed favorite {id}."));
    }

    fn on_favorites_error(&mut self, operation: &str, error: &FavoritesError) {
        self.emit(&format!("Could not {operation}: {error}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::PageInfo;
    use crate::domain::{Filters, QueryBuilder};
    use serde_json::json;

    fn output(sink: TerminalSink<Vec<u8>>) -> String {
        String::from_utf8(sink.into_inner()).unwrap()
    }

    fn update(animal: Option<AnimalType>, pets: Vec<Pet>, page: u32, total_pages: u32) -> PageUpdate {
        let query = QueryBuilder::default().build(&Filters {
            animal_type: animal.map(|a| a.as_str().to_string()),
            ..Filters::default()
        });
        PageUpdate {
            query,
            info: PageInfo {
                generation: 1,
                page,
                total_pages,
                total_items: pets.len(),
            },
            accumulated: pets.clone(),
            appended: pets,
        }
    }

    #[test]
    fn first_page_prints_title_cards_and_footer() {
        let mut sink = TerminalSink::new(Vec::new());
        let pets = vec![
            Pet::from_value(json!({"id": "a1", "name": "Biscuit", "breed": "Beagle", "type": "Dog", "age": "Young"}))
                .unwrap(),
        ];
        sink.on_page(&update(Some(AnimalType::Dog), pets, 1, 2));

        let text = output(sink);
        assert!(text.contains("== Found 1 dog =="));
        assert!(text.contains("  1. Biscuit [a1]"));
        assert!(text.contains("Dog · Beagle · Young"));
        assert!(text.contains("Page 1 of 2"));
    }

    #[test]
    fn empty_search() {
        let mut sink = TerminalSink::new(Vec::new());
        sink.on_page(&update(Some(AnimalType::Cat), vec![], 1, 1));

        let text = output(sink);
        assert!(text.contains("== No cats found =="));
        assert!(text.contains("No pets found."));
    }

    #[test]
    fn errors_and_saved_message() {
        let mut sink = TerminalSink::new(Vec::new());
        sink.on_error(&FetchError::HttpStatus(500));
        sink.on_favorite_saved(&Pet::default());
        sink.on_favorites_error("add favorite", &FavoritesError::Rejected("id and name required".into()));

        let text = output(sink);
        assert!(text.contains("Error loading pets: server responded with HTTP 500"));
        assert!(text.contains("Pet added to favorites!"));
        assert!(text.contains("Could not add favorite: favorite rejected: id and name required"));
    }

    #[test]
    fn search_description() {
        let query = QueryBuilder::default().build(&Filters {
            animal_type: Some("dog".into()),
            age: Some("Puppy".into()),
            ..Filters::default()
        });
        assert_eq!(describe(&query), "Searching dogs near 10001, age Puppy...");

        let query = QueryBuilder::default().build(&Filters {
            location: Some("New York".into()),
            age: Some("Adult".into()),
            size: Some("Small".into()),
            ..Filters::default()
        });
        assert_eq!(
            describe(&query),
            "Searching pets near New York, age Adult, size Small..."
        );
    }
}
