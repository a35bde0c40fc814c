//! Application layer coordinating state, events, and actions.
//!
//! This layer sits between the front-end (commands in, notifications out) and
//! the worker that talks to the network. It owns every piece of mutable state
//! and performs no I/O itself.
//!
//! # Architecture
//!
//! ```text
//! Commands → Events → Event Handler → State Mutations → Actions → Runtime
//!                         ↑                                          ↓
//!                         └────────── Fetch / Favorites outcomes ────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: side effects and sink notifications emitted by the handler
//! - [`commands`]: command traits and the channel-backed [`CommandSender`]
//! - [`favorites`]: local favorites view with filtering and stats
//! - [`handler`]: event processing and state transitions
//! - [`session`]: the paginated search session
//! - [`sink`]: the [`ResultSink`] trait
//! - [`state`]: central application state
//!
//! # Example
//!
//! ```
//! use petscout::app::{handle_event, AppState, Event};
//! use petscout::domain::Category;
//!
//! let mut state = AppState::default();
//! let (changed, actions) = handle_event(&mut state, &Event::SelectCategory(Category::Dogs))?;
//! assert!(changed);
//! assert_eq!(actions.len(), 2);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod actions;
pub mod commands;
pub mod favorites;
pub mod handler;
pub mod session;
pub mod sink;
pub mod state;

pub use actions::{Action, Notification};
pub use commands::{CommandSender, FavoritesCommands, SearchCommands};
pub use favorites::{FavoritesBook, FavoritesFilter, FavoritesStats, FavoritesView};
pub use handler::{handle_event, Event};
pub use session::{Completion, IdleReason, LoadNext, PageInfo, PageUpdate, SearchSession};
pub use sink::ResultSink;
pub use state::AppState;
