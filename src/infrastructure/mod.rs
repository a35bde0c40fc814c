//! Infrastructure layer for network interactions.
//!
//! Holds the pieces of HTTP handling that are shared between the search
//! fetcher and the favorites client.

pub mod http;

pub use http::{build_client, endpoint};
