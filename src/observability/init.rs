//! Tracing initialization and subscriber setup.

use super::file_writer::RotatingFile;
use crate::domain::Result;
use crate::Config;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Level used when neither `RUST_LOG` nor `trace_level` is set.
pub const DEFAULT_LEVEL: &str = "info";

/// Builds the filter: `RUST_LOG` wins, then `config.trace_level`, then `info`.
///
/// An unparsable `trace_level` falls back to the default level.
#[must_use]
pub fn env_filter(config: &Config) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = config.trace_level.as_deref().unwrap_or(DEFAULT_LEVEL);
        EnvFilter::try_new(level).unwrap_or_else(|e| {
            eprintln!("invalid trace level {level:?} ({e}), using {DEFAULT_LEVEL}");
            EnvFilter::new(DEFAULT_LEVEL)
        })
    })
}

/// Installs the global `tracing` subscriber.
///
/// Formatted events go to stderr, or to `config.log_file` (rotated by size)
/// when it is set. Only the first call in a process installs anything; later
/// calls are no-ops.
///
/// # Errors
///
/// Returns an I/O error if the log file cannot be opened.
///
/// # Example
///
/// ```no_run
/// use petscout::observability::init_tracing;
/// use petscout::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
/// init_tracing(&config)?;
/// tracing::debug!("tracing is now active");
/// # Ok::<(), petscout::domain::PetscoutError>(())
/// ```
pub fn init_tracing(config: &Config) -> Result<()> {
    let (writer, ansi) = match &config.log_file {
        Some(path) => (BoxMakeWriter::new(RotatingFile::open(path)?), false),
        None => (BoxMakeWriter::new(std::io::stderr), true),
    };

    let layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(false);

    let installed = tracing_subscriber::registry()
        .with(env_filter(config))
        .with(layer)
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(log_file = ?config.log_file, "tracing initialized");
    }
    Ok(())
}
