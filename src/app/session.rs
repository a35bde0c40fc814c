//! Search session: the paginated accumulation of one search at a time.
//!
//! The session owns the current query, page counters, the accumulated results,
//! and two guards:
//!
//! - a **generation** counter, bumped by every new search, which tags each page
//!   request so that late responses from a superseded search are discarded;
//! - an **in-flight** marker, so that at most one page request exists per
//!   generation and extra "load more" requests are dropped instead of queued.
//!
//! The session performs no I/O. Starting a search or asking for the next page
//! yields a [`PageRequest`]; whoever performs it reports back through
//! [`SearchSession::complete`].

use crate::domain::{FetchError, Filters, PageResponse, Pet, Query, QueryBuilder};
use crate::worker::{PageOutcome, PageRequest};

/// Why `load_next_page` did not issue a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdleReason {
    /// No search has been started yet.
    NoActiveSearch,

    /// `current_page` already equals `total_pages`.
    LastPageReached,

    /// A page of the current search is still being fetched.
    FetchInFlight,
}

impl std::fmt::Display for IdleReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::NoActiveSearch => "no search has been started",
            Self::LastPageReached => "all pages are loaded",
            Self::FetchInFlight => "a page is already loading",
        })
    }
}

/// Result of asking for the next page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadNext {
    Requested(PageRequest),
    Idle(IdleReason),
}

/// Page counters reported alongside each successful load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    pub generation: u64,
    pub page: u32,
    pub total_pages: u32,
    pub total_items: usize,
}

impl PageInfo {
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.page < self.total_pages
    }
}

/// What the result sink receives after a page of the current search loads.
#[derive(Debug, Clone, PartialEq)]
pub struct PageUpdate {
    /// Query the results belong to.
    pub query: Query,

    /// Everything accumulated so far, in request order.
    pub accumulated: Vec<Pet>,

    /// Items appended by this page.
    pub appended: Vec<Pet>,

    pub info: PageInfo,
}

/// How a completed request affected the session.
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    /// The page belonged to the current search and was appended.
    Applied(PageUpdate),

    /// The request of the current search failed; state is unchanged apart
    /// from the request no longer being in flight.
    Failed(FetchError),

    /// The response belongs to a superseded search and was discarded.
    Stale,
}

/// Paginated state of the current search.
#[derive(Debug, Clone)]
pub struct SearchSession {
    builder: QueryBuilder,
    generation: u64,
    query: Option<Query>,
    current_page: u32,
    total_pages: u32,
    accumulated: Vec<Pet>,
    in_flight: Option<u32>,
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new(QueryBuilder::default())
    }
}

impl SearchSession {
    #[must_use]
    pub const fn new(builder: QueryBuilder) -> Self {
        Self {
            builder,
            generation: 0,
            query: None,
            current_page: 0,
            total_pages: 1,
            accumulated: Vec::new(),
            in_flight: None,
        }
    }

    /// Starts a new search, superseding any previous one.
    ///
    /// Resets the counters and accumulated results and returns the request for
    /// page 1. Any request still outstanding from an earlier search becomes
    /// stale.
    ///
    /// # Example
    ///
    /// ```
    /// use petscout::app::SearchSession;
    /// use petscout::domain::Filters;
    ///
    /// let mut session = SearchSession::default();
    /// let first = session.start_search(&Filters::default());
    /// let second = session.start_search(&Filters::default());
    /// assert_eq!(first.page, 1);
    /// assert!(second.generation > first.generation);
    /// assert!(session.is_loading());
    /// ```
    pub fn start_search(&mut self, filters: &Filters) -> PageRequest {
        let query = self.builder.build(filters);
        self.generation += 1;
        self.current_page = 0;
        self.total_pages = 1;
        self.accumulated.clear();
        self.in_flight = None;

        tracing::debug!(
            generation = self.generation,
            query = ?query,
            "search started"
        );

        self.query = Some(query.clone());
        self.load_page(query, 1)
    }

    /// Requests the page after `current_page`, unless there is nothing to load.
    ///
    /// Calls made while a page is in flight are dropped, not queued.
    pub fn load_next_page(&mut self) -> LoadNext {
        let Some(query) = self.query.clone() else {
            return LoadNext::Idle(IdleReason::NoActiveSearch);
        };
        if self.in_flight.is_some() {
            tracing::debug!(generation = self.generation, "load more dropped, fetch in flight");
            return LoadNext::Idle(IdleReason::FetchInFlight);
        }
        if self.current_page >= self.total_pages {
            return LoadNext::Idle(IdleReason::LastPageReached);
        }
        LoadNext::Requested(self.load_page(query, self.current_page + 1))
    }

    fn load_page(&mut self, query: Query, page: u32) -> PageRequest {
        self.in_flight = Some(page);
        PageRequest {
            generation: self.generation,
            query,
            page,
        }
    }

    /// Applies the outcome of a page request.
    ///
    /// Outcomes from an older generation are discarded without touching any
    /// state. For the current generation a success appends the items and
    /// updates the counters from the response; a failure only clears the
    /// in-flight marker.
    pub fn complete(&mut self, outcome: PageOutcome) -> Completion {
        let current = self.query.clone().filter(|_| outcome.generation == self.generation);
        let Some(query) = current else {
            tracing::debug!(
                stale_generation = outcome.generation,
                current_generation = self.generation,
                "discarding stale page response"
            );
            return Completion::Stale;
        };

        self.in_flight = None;

        match outcome.result {
            Ok(response) => Completion::Applied(self.append(query, response)),
            Err(error) => {
                tracing::debug!(
                    generation = self.generation,
                    page = outcome.page,
                    error = %error,
                    "page load failed"
                );
                Completion::Failed(error)
            }
        }
    }

    fn append(&mut self, query: Query, response: PageResponse) -> PageUpdate {
        let PageResponse {
            items,
            page,
            total_pages,
        } = response;

        self.accumulated.extend(items.iter().cloned());
        self.current_page = page;
        self.total_pages = total_pages;

        tracing::debug!(
            generation = self.generation,
            page = page,
            total_pages = total_pages,
            appended = items.len(),
            accumulated = self.accumulated.len(),
            "page appended"
        );

        PageUpdate {
            query,
            accumulated: self.accumulated.clone(),
            appended: items,
            info: self.page_info(),
        }
    }

    #[must_use]
    pub const fn page_info(&self) -> PageInfo {
        PageInfo {
            generation: self.generation,
            page: self.current_page,
            total_pages: self.total_pages,
            total_items: self.accumulated.len(),
        }
    }

    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub const fn query(&self) -> Option<&Query> {
        self.query.as_ref()
    }

    #[must_use]
    pub const fn current_page(&self) -> u32 {
        self.current_page
    }

    #[must_use]
    pub const fn total_pages(&self) -> u32 {
        self.total_pages
    }

    #[must_use]
    pub fn accumulated(&self) -> &[Pet] {
        &self.accumulated
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    #[must_use]
    pub const fn builder(&self) -> &QueryBuilder {
        &self.builder
    }
}
