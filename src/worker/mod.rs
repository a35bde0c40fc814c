//! Asynchronous execution of remote requests.
//!
//! The event handler never performs I/O. It emits [`PageRequest`]s and
//! [`FavoritesRequest`]s; the runtime hands them to a [`SearchWorker`] on a
//! spawned task and feeds the resulting outcome back in as an event.
//!
//! # Architecture
//!
//! - `messages`: request and outcome types, tagged with the search generation
//! - `handler`: worker implementation over the fetcher and favorites backends

pub mod handler;
pub mod messages;

pub use handler::SearchWorker;
pub use messages::{FavoritesOutcome, FavoritesRequest, PageOutcome, PageRequest};
