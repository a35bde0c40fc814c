//! Search page fetching.
//!
//! # Modules
//!
//! - `backend`: the [`PageFetcher`] trait the session runtime depends on
//! - `http`: `reqwest` implementation against the paginated search endpoint

pub mod backend;
pub mod http;

pub use backend::PageFetcher;
pub use http::HttpPageFetcher;
