//! Cooperative event loop driving the application state.
//!
//! The [`Runtime`] owns the [`AppState`], the [`SearchWorker`], and the
//! [`ResultSink`]. It receives events on an unbounded channel, runs them
//! through [`handle_event`], and executes the resulting actions:
//!
//! - `FetchPage` and `Favorites` are spawned as tokio tasks whose outcomes come
//!   back on the same channel, tagged with the generation they were issued for;
//! - `Notify` is delivered to the sink immediately.
//!
//! All state mutation happens on the loop, so there is no locking. A late page
//! from a superseded search is recognised by its generation when its completion
//! event is handled, and dropped there.
//!
//! # Example
//!
//! ```no_run
//! use petscout::app::{ResultSink, PageUpdate, SearchCommands};
//! use petscout::domain::{Category, FetchError};
//! use petscout::runtime::Runtime;
//! use petscout::Config;
//!
//! struct Print;
//!
//! impl ResultSink for Print {
//!     fn on_page(&mut self, update: &PageUpdate) {
//!         println!("{} pets", update.accumulated.len());
//!     }
//!     fn on_error(&mut self, error: &FetchError) {
//!         eprintln!("{error}");
//!     }
//! }
//!
//! # async fn demo() -> petscout::domain::Result<()> {
//! let mut runtime = Runtime::from_config(&Config::default(), Print)?;
//! runtime.commands().on_category_select(Category::Dogs)?;
//! runtime.run_until_idle().await?;
//! # Ok(())
//! # }
//! ```

use crate::app::commands::Message;
use crate::app::{handle_event, Action, AppState, CommandSender, Event, ResultSink};
use crate::domain::{FetchError, Result};
use crate::favorites::{FavoritesBackend, HttpFavorites};
use crate::fetch::{HttpPageFetcher, PageFetcher};
use crate::infrastructure::build_client;
use crate::worker::{FavoritesOutcome, PageOutcome, SearchWorker};
use crate::Config;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::Instrument;

/// Event loop over one [`AppState`].
pub struct Runtime<S> {
    state: AppState,
    worker: SearchWorker,
    sink: S,
    tx: UnboundedSender<Message>,
    rx: UnboundedReceiver<Message>,
    outstanding: usize,
    shutting_down: bool,
}

impl<S: ResultSink> Runtime<S> {
    #[must_use]
    pub fn new(
        state: AppState,
        fetcher: Arc<dyn PageFetcher>,
        favorites: Arc<dyn FavoritesBackend>,
        sink: S,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            state,
            worker: SearchWorker::new(fetcher, favorites),
            sink,
            tx,
            rx,
            outstanding: 0,
            shutting_down: false,
        }
    }

    /// Builds a runtime over the HTTP backends described by `config`.
    ///
    /// Both backends share one connection pool.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if an endpoint URL is invalid or the HTTP
    /// client cannot be built.
    pub fn from_config(config: &Config, sink: S) -> Result<Self> {
        let client = build_client(config.request_timeout())?;
        let fetcher = HttpPageFetcher::with_client(config, client.clone())?;
        let favorites = HttpFavorites::with_client(config, client)?;
        Ok(Self::new(
            crate::initialize(config),
            Arc::new(fetcher),
            Arc::new(favorites),
            sink,
        ))
    }

    /// A handle for posting commands from other tasks.
    #[must_use]
    pub fn commands(&self) -> CommandSender {
        CommandSender::new(self.tx.clone())
    }

    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    #[must_use]
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Number of spawned requests whose completion has not been handled yet.
    #[must_use]
    pub const fn outstanding(&self) -> usize {
        self.outstanding
    }

    /// Handles one event and executes its actions.
    ///
    /// Must be called from within a tokio runtime, since fetches are spawned.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`handle_event`].
    pub fn dispatch(&mut self, event: &Event) -> Result<bool> {
        if event.is_completion() {
            self.outstanding = self.outstanding.saturating_sub(1);
        }

        let (changed, actions) = handle_event(&mut self.state, event)?;
        tracing::trace!(event = event.name(), changed, actions = actions.len(), "event handled");

        for action in actions {
            self.execute(action);
        }
        Ok(changed)
    }

    /// Spawns requests in two layers: the work itself, and a reporter that
    /// awaits it. A panicking or aborted fetch still posts a failed outcome,
    /// so the session never stays busy and `outstanding` always drains.
    fn execute(&mut self, action: Action) {
        match action {
            Action::Notify(notification) => notification.deliver(&mut self.sink),
            Action::FetchPage(request) => {
                let span = tracing::debug_span!(
                    "page_task",
                    generation = request.generation,
                    page = request.page
                );
                let (generation, page) = (request.generation, request.page);
                let worker = self.worker.clone();
                let work = tokio::spawn(
                    async move { worker.handle_page(request).await }.instrument(span.clone()),
                );
                let tx = self.tx.clone();
                self.outstanding += 1;
                tokio::spawn(
                    async move {
                        let outcome = work.await.unwrap_or_else(|e| {
                            tracing::warn!(error = %e, "page task failed");
                            PageOutcome {
                                generation,
                                page,
                                result: Err(FetchError::Network(format!("fetch task failed: {e}"))),
                            }
                        });
                        if tx.send(Message::Event(Event::PageFetched(outcome))).is_err() {
                            tracing::debug!("event loop gone, page outcome dropped");
                        }
                    }
                    .instrument(span),
                );
            }
            Action::Favorites(request) => {
                let operation = request.operation();
                let span = tracing::debug_span!("favorites_task", operation);
                let worker = self.worker.clone();
                let work = tokio::spawn(
                    async move { worker.handle_favorites(request).await }.instrument(span.clone()),
                );
                let tx = self.tx.clone();
                self.outstanding += 1;
                tokio::spawn(
                    async move {
                        let outcome = work.await.unwrap_or_else(|e| {
                            tracing::warn!(error = %e, "favorites task failed");
                            FavoritesOutcome::Failed {
                                operation,
                                error: FetchError::Network(format!("favorites task failed: {e}"))
                                    .into(),
                            }
                        });
                        if tx.send(Message::Event(Event::FavoritesResponse(outcome))).is_err() {
                            tracing::debug!("event loop gone, favorites outcome dropped");
                        }
                    }
                    .instrument(span),
                );
            }
        }
    }

    fn process(&mut self, message: Message) -> Result<bool> {
        match message {
            Message::Event(event) if self.shutting_down && !event.is_completion() => {
                tracing::debug!(event = event.name(), "shutting down, event ignored");
                Ok(true)
            }
            Message::Event(event) => {
                self.dispatch(&event)?;
                Ok(true)
            }
            Message::Shutdown => {
                tracing::debug!(outstanding = self.outstanding, "shutdown requested");
                self.shutting_down = true;
                Ok(false)
            }
        }
    }

    /// Waits for one message and handles it.
    ///
    /// Returns `false` once shutdown has been requested.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`handle_event`].
    pub async fn step(&mut self) -> Result<bool> {
        match self.rx.recv().await {
            Some(message) => self.process(message),
            None => Ok(false),
        }
    }

    /// Runs until a shutdown is requested through a [`CommandSender`].
    ///
    /// Requests already issued when the shutdown arrives are still completed
    /// and delivered. Commands queued after the shutdown are ignored.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`handle_event`].
    pub async fn run(&mut self) -> Result<()> {
        tracing::debug!("event loop started");
        while self.step().await? {}
        while !self.run_until_idle().await? {}
        tracing::debug!("event loop stopped");
        Ok(())
    }

    /// Handles messages until nothing is queued and no request is outstanding.
    ///
    /// Returns `false` if a shutdown was requested on the way.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`handle_event`].
    pub async fn run_until_idle(&mut self) -> Result<bool> {
        loop {
            let message = if self.outstanding == 0 {
                match self.rx.try_recv() {
                    Ok(message) => message,
                    Err(_) => return Ok(true),
                }
            } else {
                match self.rx.recv().await {
                    Some(message) => message,
                    None => return Ok(false),
                }
            };

            if !self.process(message)? {
                return Ok(false);
            }
        }
    }
}
