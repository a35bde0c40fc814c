//! Petscout: a paginated pet-adoption search and favorites client.
//!
//! Petscout talks to a pet-adoption server and provides:
//! - Canonical query building from loosely filled search forms
//! - Page-by-page result loading with an accumulated result list
//! - Logical cancellation of superseded searches via generation tags
//! - Favorites: save, list, remove, filter, and CSV export
//! - A line-oriented terminal front-end (`petscout` binary)

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Terminal front-end (main.rs, cli/, ui/)            │  ← Commands in,
//! └─────────────────────────────────────────────────────┘    text out
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Runtime (runtime.rs)                               │  ← Event loop
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Search session + generation fencing              │
//! │  - Favorites book                                   │
//! │  - Event handling, actions, result sink             │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Worker Layer (worker/)                             │  ← Spawned tasks
//! └─────────────────────────────────────────────────────┘
//!         │                                     │
//! ┌───────────────┐                     ┌───────────────┐
//! │ fetch/        │                     │ favorites/    │
//! │ - PageFetcher │                     │ - Backend API │
//! │ - HTTP impl   │                     │ - HTTP impl   │
//! └───────────────┘                     └───────────────┘
//!         │                                     │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - HTTP client + endpoint helpers                   │
//! │  - Query, Pet, PageResponse, error types            │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Application state machine with event/action model
//! - [`domain`]: Core types (queries, pets, pages, errors)
//! - [`fetch`]: Search page fetcher
//! - [`favorites`]: Favorites endpoints client
//! - [`worker`]: Request execution on background tasks
//! - [`runtime`]: Event loop tying everything together
//! - [`ui`]: Text rendering of results and favorites
//! - [`cli`]: Command-line arguments and interactive commands
//! - [`observability`]: `tracing` subscriber setup
//!
//! # Configuration
//!
//! Configuration comes from a TOML file, `PETSCOUT_*` environment variables,
//! or a plain string map:
//!
//! ```toml
//! base_url = "http://127.0.0.1:5000"
//! search_path = "/api/search"
//! favorites_path = "/api/favorites"
//! default_location = "10001"
//! per_page = 24
//! request_timeout_secs = 10
//! trace_level = "info"
//! log_file = "/tmp/petscout.log"
//! ```
//!
//! # Examples
//!
//! ## Driving the state machine directly
//!
//! ```rust
//! use petscout::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! let (_, actions) = handle_event(&mut state, &Event::Initialize)?;
//!
//! for action in actions {
//!     if let Action::FetchPage(request) = action {
//!         assert_eq!(request.query.location, "10001");
//!         assert_eq!(request.query.per_page, 24);
//!     }
//! }
//! # Ok::<(), petscout::PetscoutError>(())
//! ```
//!
//! # Key Design Decisions
//!
//! ## Generation-Tagged Requests
//!
//! Each new search bumps a generation counter and every page request carries
//! it. Completions of an older generation are dropped when they arrive, so a
//! slow response can never overwrite a newer search.
//!
//! ## One Page In Flight
//!
//! "Load more" while a page is loading is dropped rather than queued, which
//! keeps pages appended strictly in order.
//!
//! ## No Automatic Retries
//!
//! Every failure is reported to the result sink; the session stays usable so
//! the user can simply ask again.

pub mod app;
pub mod cli;
pub mod domain;
pub mod favorites;
pub mod fetch;
pub mod infrastructure;
pub mod observability;
pub mod runtime;
pub mod ui;
pub mod worker;

pub use app::{handle_event, Action, AppState, Event, ResultSink};
pub use domain::{PetscoutError, Result};
pub use runtime::Runtime;

use domain::{QueryBuilder, DEFAULT_LOCATION, PAGE_SIZE};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Prefix of environment variables read by [`Config::from_env`].
pub const ENV_PREFIX: &str = "PETSCOUT_";

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
const DEFAULT_SEARCH_PATH: &str = "/api/search";
const DEFAULT_FAVORITES_PATH: &str = "/api/favorites";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Client configuration.
///
/// Every field has a default, so an empty file or map is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server origin. Default: `http://127.0.0.1:5000`
    pub base_url: String,

    /// Path of the paginated search endpoint. Default: `/api/search`
    pub search_path: String,

    /// Path of the favorites endpoints. Default: `/api/favorites`
    pub favorites_path: String,

    /// Location used when a search leaves it blank. Default: `10001`
    pub default_location: String,

    /// Page size sent with every search. Default: 24
    pub per_page: u32,

    /// Per-request timeout in seconds. Default: 10
    pub request_timeout_secs: u64,

    /// Log level or `EnvFilter` directive.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,

    /// Write logs to this file instead of stderr.
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            search_path: DEFAULT_SEARCH_PATH.to_string(),
            favorites_path: DEFAULT_FAVORITES_PATH.to_string(),
            default_location: DEFAULT_LOCATION.to_string(),
            per_page: PAGE_SIZE,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            trace_level: None,
            log_file: None,
        }
    }
}

impl Config {
    /// Parses configuration from a string map.
    ///
    /// # Parsing Rules
    ///
    /// - Blank values are ignored and the default is kept
    /// - `per_page`, `request_timeout_secs`: unsigned integers, falling back to
    ///   the default on parse errors or zero
    /// - `location` is accepted as an alias of `default_location`, and
    ///   `timeout` of `request_timeout_secs`
    /// - Unknown keys are ignored
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use petscout::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("base_url".to_string(), "http://pets.local".to_string());
    /// map.insert("per_page".to_string(), "not a number".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.base_url, "http://pets.local");
    /// assert_eq!(config.per_page, 24);
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let text = |keys: &[&str]| {
            keys.iter()
                .filter_map(|key| map.get(*key))
                .map(|value| value.trim())
                .find(|value| !value.is_empty())
                .map(String::from)
        };
        let number = |keys: &[&str], fallback: u64| {
            text(keys)
                .and_then(|raw| {
                    raw.parse::<u64>()
                        .map_err(|e| tracing::debug!(value = %raw, error = %e, "ignoring invalid number"))
                        .ok()
                })
                .filter(|n| *n > 0)
                .unwrap_or(fallback)
        };

        let per_page = number(&["per_page"], u64::from(defaults.per_page));

        Self {
            base_url: text(&["base_url"]).unwrap_or(defaults.base_url),
            search_path: text(&["search_path"]).unwrap_or(defaults.search_path),
            favorites_path: text(&["favorites_path"]).unwrap_or(defaults.favorites_path),
            default_location: text(&["default_location", "location"])
                .unwrap_or(defaults.default_location),
            per_page: u32::try_from(per_page).unwrap_or(defaults.per_page),
            request_timeout_secs: number(
                &["request_timeout_secs", "timeout"],
                defaults.request_timeout_secs,
            ),
            trace_level: text(&["trace_level"]),
            log_file: text(&["log_file"]).map(PathBuf::from),
        }
    }

    /// Collects `PETSCOUT_*` pairs (prefix stripped, lowercased) into
    /// [`from_map`](Self::from_map).
    #[must_use]
    pub fn from_vars<I>(vars: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let map = vars
            .into_iter()
            .filter_map(|(key, value)| {
                key.strip_prefix(ENV_PREFIX)
                    .map(|name| (name.to_lowercase(), value))
            })
            .collect();
        Self::from_map(&map)
    }

    /// Reads configuration from `PETSCOUT_*` environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_vars(std::env::vars())
    }

    /// Parses a TOML document. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`PetscoutError::Config`] for invalid TOML, unknown value types,
    /// or a zero `per_page`/`request_timeout_secs`.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| PetscoutError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read, or a configuration
    /// error if it does not parse.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source).map_err(|e| match e {
            PetscoutError::Config(message) => {
                PetscoutError::Config(format!("{}: {message}", path.display()))
            }
            other => other,
        })
    }

    /// Checks values that have no sensible fallback.
    ///
    /// # Errors
    ///
    /// Returns [`PetscoutError::Config`] naming the first invalid field.
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(PetscoutError::Config("base_url must not be empty".to_string()));
        }
        if self.per_page == 0 {
            return Err(PetscoutError::Config("per_page must be at least 1".to_string()));
        }
        if self.request_timeout_secs == 0 {
            return Err(PetscoutError::Config(
                "request_timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    #[must_use]
    pub fn query_builder(&self) -> QueryBuilder {
        QueryBuilder::new(self.default_location.as_str(), self.per_page)
    }
}

/// Creates the application state for a configuration.
///
/// The state starts with no search; send [`Event::Initialize`] to load the
/// first page of all animals.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(
        base_url = %config.base_url,
        default_location = %config.default_location,
        per_page = config.per_page,
        "initializing petscout"
    );
    AppState::new(config.query_builder())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn empty_map_is_default() {
        assert_eq!(Config::from_map(&BTreeMap::new()), Config::default());
    }

    #[test]
    fn map_values_are_trimmed_and_blank_ignored() {
        let config = Config::from_map(&map(&[
            ("base_url", "  http://pets.test  "),
            ("location", "94103"),
            ("search_path", "   "),
            ("timeout", "3"),
            ("per_page", "0"),
            ("log_file", "/tmp/p.log"),
        ]));

        assert_eq!(config.base_url, "http://pets.test");
        assert_eq!(config.default_location, "94103");
        assert_eq!(config.search_path, "/api/search");
        assert_eq!(config.request_timeout(), Duration::from_secs(3));
        assert_eq!(config.per_page, 24);
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/p.log")));
    }

    #[test]
    fn vars_with_prefix_only() {
        let config = Config::from_vars(vec![
            ("PETSCOUT_BASE_URL".to_string(), "http://env.test".to_string()),
            ("PETSCOUT_PER_PAGE".to_string(), "12".to_string()),
            ("BASE_URL".to_string(), "http://ignored".to_string()),
        ]);
        assert_eq!(config.base_url, "http://env.test");
        assert_eq!(config.per_page, 12);
    }

    #[test]
    fn toml_with_partial_keys() {
        let config = Config::from_toml_str(
            r#"
            base_url = "http://toml.test"
            per_page = 10
            trace_level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.base_url, "http://toml.test");
        assert_eq!(config.per_page, 10);
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
        assert_eq!(config.favorites_path, "/api/favorites");
        assert_eq!(config.request_timeout_secs, 10);
    }

    #[test]
    fn toml_errors_are_config_errors() {
        assert!(matches!(
            Config::from_toml_str("per_page = \"many\""),
            Err(PetscoutError::Config(_))
        ));
        assert!(matches!(
            Config::from_toml_str("request_timeout_secs = 0"),
            Err(PetscoutError::Config(_))
        ));
    }

    #[test]
    fn from_file_reads_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "default_location = \"60601\"").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.default_location, "60601");
        assert_eq!(config.query_builder().default_location(), "60601");
    }

    #[test]
    fn from_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Config::from_file(dir.path().join("missing.toml")),
            Err(PetscoutError::Io(_))
        ));
    }

    #[test]
    fn initialize_uses_configured_builder() {
        let config = Config {
            default_location: "30301".to_string(),
            per_page: 12,
            ..Config::default()
        };
        let mut state = initialize(&config);
        let request = state.session.start_search(&domain::Filters::default());
        assert_eq!(request.query.location, "30301");
        assert_eq!(request.query.per_page, 12);
    }
}
