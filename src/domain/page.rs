//! One page of search results.

use super::error::FetchError;
use super::pet::Pet;
use serde::{Deserialize, Serialize};

/// A validated page returned by the search endpoint.
///
/// Construction through [`PageResponse::new`] enforces
/// `1 <= page <= total_pages`, so every value of this type is well formed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageResponse {
    pub items: Vec<Pet>,
    pub page: u32,
    pub total_pages: u32,
}

impl PageResponse {
    /// Validates page counters.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Malformed`] when `page` or `total_pages` is zero
    /// or `page` exceeds `total_pages`.
    pub fn new(items: Vec<Pet>, page: u32, total_pages: u32) -> Result<Self, FetchError> {
        if page == 0 || total_pages == 0 {
            return Err(FetchError::Malformed(format!(
                "page counters must be positive (page {page}, total_pages {total_pages})"
            )));
        }
        if page > total_pages {
            return Err(FetchError::Malformed(format!(
                "page {page} exceeds total_pages {total_pages}"
            )));
        }
        Ok(Self {
            items,
            page,
            total_pages,
        })
    }

    #[must_use]
    pub const fn is_last(&self) -> bool {
        self.page >= self.total_pages
    }
}

/// Wire shape of the search response before validation.
#[derive(Debug, Deserialize)]
pub(crate) struct RawPageResponse {
    pub items: Vec<Pet>,
    pub page: u32,
    pub total_pages: u32,
}

impl TryFrom<RawPageResponse> for PageResponse {
    type Error = FetchError;

    fn try_from(raw: RawPageResponse) -> Result<Self, Self::Error> {
        Self::new(raw.items, raw.page, raw.total_pages)
    }
}

/// Parses and validates a search response body.
///
/// # Errors
///
/// Returns [`FetchError::Malformed`] if the body is not JSON, lacks `items`,
/// `page` or `total_pages`, contains a non-object item, or violates the page
/// counter invariant.
pub fn parse_page(body: &[u8]) -> Result<PageResponse, FetchError> {
    let raw: RawPageResponse =
        serde_json::from_slice(body).map_err(|e| FetchError::Malformed(e.to_string()))?;
    PageResponse::try_from(raw)
}
