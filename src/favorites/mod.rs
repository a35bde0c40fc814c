//! Client for the favorites endpoints.
//!
//! Favorites are persisted by the server; this crate only issues the calls.
//!
//! # Modules
//!
//! - `backend`: the [`FavoritesBackend`] trait used by the runtime
//! - `http`: `reqwest` implementation
//! - `models`: acknowledgement payload

pub mod backend;
pub mod http;
pub mod models;

pub use backend::FavoritesBackend;
pub use http::HttpFavorites;
pub use models::FavoriteAck;
