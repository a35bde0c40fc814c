use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::domain::Result;
use crate::Config;

/// Command-line arguments accepted by the `petscout` binary.
#[derive(Parser, Debug, Default)]
#[command(
    name = "petscout",
    version,
    about = "Search adoptable pets and manage favorites from the terminal"
)]
pub struct CliArgs {
    #[arg(
        short,
        long = "config",
        value_name = "FILE",
        env = "PETSCOUT_CONFIG",
        help = "TOML configuration file (default: PETSCOUT_* environment variables)"
    )]
    pub config: Option<PathBuf>,
    #[arg(
        short = 'u',
        long,
        value_name = "URL",
        env = "PETSCOUT_BASE_URL",
        help = "Server origin (default: http://127.0.0.1:5000)"
    )]
    pub base_url: Option<String>,
    #[arg(
        short = 'l',
        long,
        value_name = "LOCATION",
        help = "Location used when a search leaves it blank (default: 10001)"
    )]
    pub location: Option<String>,
    #[arg(
        long,
        value_name = "SECONDS",
        help = "Per-request timeout (default: 10)"
    )]
    pub timeout: Option<u64>,
    #[arg(
        short = 't',
        long,
        value_name = "LEVEL",
        env = "PETSCOUT_TRACE_LEVEL",
        help = "Log level or filter directive (default: info)"
    )]
    pub trace_level: Option<String>,
    #[arg(
        long,
        value_name = "FILE",
        help = "Write logs to FILE instead of stderr"
    )]
    pub log_file: Option<PathBuf>,
    #[arg(
        long = "no-initial-search",
        action = ArgAction::SetTrue,
        help = "Do not load all animals on startup"
    )]
    pub no_initial_search: bool,
}

impl CliArgs {
    /// Loads the base configuration and applies flag overrides.
    ///
    /// The base is `--config` when given, otherwise `PETSCOUT_*` variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file cannot be read or parsed,
    /// or if the result fails validation.
    pub fn load_config(&self) -> Result<Config> {
        let base = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::from_env(),
        };
        let config = self.apply(base);
        config.validate()?;
        Ok(config)
    }

    /// Overlays explicitly given flags on `config`.
    #[must_use]
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(base_url) = &self.base_url {
            config.base_url.clone_from(base_url);
        }
        if let Some(location) = &self.location {
            config.default_location.clone_from(location);
        }
        if let Some(timeout) = self.timeout {
            config.request_timeout_secs = timeout;
        }
        if self.trace_level.is_some() {
            config.trace_level.clone_from(&self.trace_level);
        }
        if self.log_file.is_some() {
            config.log_file.clone_from(&self.log_file);
        }
        config
    }
}
