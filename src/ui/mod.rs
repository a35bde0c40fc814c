//! Text rendering of search results and favorites.
//!
//! # Architecture
//!
//! ```text
//! Notification → view model → text lines → writer
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: display-ready cards, titles, and footers
//! - [`renderer`]: [`TerminalSink`], a [`ResultSink`](crate::app::ResultSink) over any writer

pub mod renderer;
pub mod viewmodel;

pub use renderer::{render_card, TerminalSink};
pub use viewmodel::{page_footer, results_title, FavoritesPanel, PetCard, ResultsView};
