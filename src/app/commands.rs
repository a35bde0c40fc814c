//! Command interface for front-ends.
//!
//! A front-end binds its controls to these traits instead of touching session
//! state. [`CommandSender`] implements both by posting events to the runtime's
//! loop, so commands can be issued from any task or thread.

use super::favorites::FavoritesFilter;
use super::handler::Event;
use crate::domain::{Category, Filters, PetscoutError, Pet, Result};
use tokio::sync::mpsc::UnboundedSender;

/// Search-side commands.
pub trait SearchCommands {
    /// Starts a new search from the form values.
    ///
    /// # Errors
    ///
    /// Fails only if the runtime has stopped.
    fn on_submit(&self, filters: Filters) -> Result<()>;

    /// Starts a new search for a category.
    ///
    /// # Errors
    ///
    /// Fails only if the runtime has stopped.
    fn on_category_select(&self, category: Category) -> Result<()>;

    /// Asks for the next page of the current search.
    ///
    /// # Errors
    ///
    /// Fails only if the runtime has stopped.
    fn on_load_more(&self) -> Result<()>;
}

/// Favorites-side commands. All fail only if the runtime has stopped.
#[allow(clippy::missing_errors_doc)]
pub trait FavoritesCommands {
    fn on_save_favorite(&self, pet: Pet) -> Result<()>;

    /// Saves the accumulated search result at a zero-based position.
    fn on_save_result(&self, index: usize) -> Result<()>;

    fn on_remove_favorite(&self, id: String) -> Result<()>;

    fn on_refresh_favorites(&self) -> Result<()>;

    fn on_filter_favorites(&self, filter: FavoritesFilter) -> Result<()>;
}

/// What travels on the runtime's channel.
#[derive(Debug)]
pub(crate) enum Message {
    Event(Event),
    Shutdown,
}

/// Handle for posting commands to a running [`Runtime`](crate::runtime::Runtime).
#[derive(Debug, Clone)]
pub struct CommandSender {
    tx: UnboundedSender<Message>,
}

impl CommandSender {
    pub(crate) const fn new(tx: UnboundedSender<Message>) -> Self {
        Self { tx }
    }

    /// Posts a raw event.
    ///
    /// # Errors
    ///
    /// Returns [`PetscoutError::Runtime`] if the runtime has stopped.
    pub fn send(&self, event: Event) -> Result<()> {
        self.post(Message::Event(event))
    }

    /// Issues the initial all-animals search.
    ///
    /// # Errors
    ///
    /// Returns [`PetscoutError::Runtime`] if the runtime has stopped.
    pub fn initialize(&self) -> Result<()> {
        self.send(Event::Initialize)
    }

    /// Stops the runtime once the events already queued are handled.
    ///
    /// # Errors
    ///
    /// Returns [`PetscoutError::Runtime`] if the runtime has already stopped.
    pub fn shutdown(&self) -> Result<()> {
        self.post(Message::Shutdown)
    }

    fn post(&self, message: Message) -> Result<()> {
        self.tx
            .send(message)
            .map_err(|_| PetscoutError::Runtime("event loop has stopped".to_string()))
    }
}

impl SearchCommands for CommandSender {
    fn on_submit(&self, filters: Filters) -> Result<()> {
        self.send(Event::Submit(filters))
    }

    fn on_category_select(&self, category: Category) -> Result<()> {
        self.send(Event::SelectCategory(category))
    }

    fn on_load_more(&self) -> Result<()> {
        self.send(Event::LoadMore)
    }
}

impl FavoritesCommands for CommandSender {
    fn on_save_favorite(&self, pet: Pet) -> Result<()> {
        self.send(Event::SaveFavorite(pet))
    }

    fn on_save_result(&self, index: usize) -> Result<()> {
        self.send(Event::SaveResult(index))
    }

    fn on_remove_favorite(&self, id: String) -> Result<()> {
        self.send(Event::RemoveFavorite(id))
    }

    fn on_refresh_favorites(&self) -> Result<()> {
        self.send(Event::RefreshFavorites)
    }

    fn on_filter_favorites(&self, filter: FavoritesFilter) -> Result<()> {
        self.send(Event::FilterFavorites(filter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[test]
    fn commands_become_events() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let sender = CommandSender::new(tx);

        sender.on_category_select(Category::Dogs).unwrap();
        sender.on_load_more().unwrap();
        sender.shutdown().unwrap();

        assert!(matches!(
            rx.try_recv(),
            Ok(Message::Event(Event::SelectCategory(Category::Dogs)))
        ));
        assert!(matches!(rx.try_recv(), Ok(Message::Event(Event::LoadMore))));
        assert!(matches!(rx.try_recv(), Ok(Message::Shutdown)));
    }

    #[test]
    fn sending_after_runtime_stops_fails() {
        let (tx, rx) = mpsc::unbounded_channel();
        let sender = CommandSender::new(tx);
        drop(rx);

        assert!(matches!(
            sender.on_refresh_favorites(),
            Err(PetscoutError::Runtime(_))
        ));
    }
}
