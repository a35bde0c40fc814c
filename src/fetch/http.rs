//! HTTP implementation of [`PageFetcher`].

use super::backend::PageFetcher;
use crate::domain::{parse_page, FetchError, PageResponse, Query, Result};
use crate::infrastructure::http::{self, build_client, endpoint};
use crate::Config;
use futures_util::future::BoxFuture;
use reqwest::{Client, Url};
use tracing::Instrument;

/// Fetches result pages with `GET {base_url}{search_path}?...`.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct HttpPageFetcher {
    client: Client,
    url: Url,
}

impl HttpPageFetcher {
    /// Creates a fetcher for an explicit endpoint using an existing client.
    #[must_use]
    pub const fn new(client: Client, url: Url) -> Self {
        Self { client, url }
    }

    /// Creates a fetcher from configuration, with its own client.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the endpoint URL is invalid or the
    /// client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = build_client(config.request_timeout())?;
        Self::with_client(config, client)
    }

    /// Creates a fetcher from configuration, sharing `client`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the endpoint URL is invalid.
    pub fn with_client(config: &Config, client: Client) -> Result<Self> {
        let url = endpoint(&config.base_url, &config.search_path)?;
        Ok(Self::new(client, url))
    }

    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    async fn get_page(&self, query: &Query, page_number: u32) -> std::result::Result<PageResponse, FetchError> {
        let params = query.with_page(page_number).to_params();
        tracing::debug!(params = ?params, "requesting search page");

        let response = http::send(self.client.get(self.url.clone()).query(&params)).await?;
        if let Err(e) = http::ensure_success(&response) {
            tracing::debug!(error = %e, "search endpoint rejected request");
            return Err(e);
        }

        let body = http::read_body(response).await?;
        let page = parse_page(&body)?;

        tracing::debug!(
            item_count = page.items.len(),
            page = page.page,
            total_pages = page.total_pages,
            "search page received"
        );
        Ok(page)
    }
}

impl PageFetcher for HttpPageFetcher {
    fn fetch_page<'a>(
        &'a self,
        query: &'a Query,
        page_number: u32,
    ) -> BoxFuture<'a, std::result::Result<PageResponse, FetchError>> {
        let span = tracing::debug_span!("fetch_page", url = %self.url, page = page_number);
        Box::pin(self.get_page(query, page_number).instrument(span))
    }
}
