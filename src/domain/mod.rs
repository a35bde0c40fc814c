//! Domain layer for petscout.
//!
//! Core types shared by every other layer, independent of HTTP, the event loop,
//! or presentation.
//!
//! # Organization
//!
//! - [`error`]: Error taxonomy and result alias
//! - [`pet`]: Opaque pet record
//! - [`query`]: Filters, the query builder, and categories
//! - [`page`]: Validated result pages
//!
//! # Examples
//!
//! ```
//! use petscout::domain::{build_query, Filters};
//!
//! let query = build_query(&Filters::default());
//! assert_eq!(query.location, "10001");
//! assert_eq!(query.page, 1);
//! ```

pub mod error;
pub mod page;
pub mod pet;
pub mod query;

pub use error::{FavoritesError, FetchError, PetscoutError, Result};
pub use page::{parse_page, PageResponse};
pub use pet::Pet;
pub use query::{
    build_query, AnimalType, Category, Filters, Query, QueryBuilder, DEFAULT_LOCATION, PAGE_SIZE,
};
