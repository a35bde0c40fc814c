//! Logging setup.
//!
//! Everything in the crate logs through `tracing` macros with structured
//! fields. This module installs the subscriber that formats those events.
//!
//! # Configuration
//!
//! The level is controlled via:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` in [`Config`](crate::Config)
//! 3. Default: `"info"`
//!
//! Output goes to stderr unless `log_file` is set, in which case it is written
//! to that file and rotated at 10 MB with three backups.
//!
//! # Modules
//!
//! - [`init`]: subscriber setup
//! - [`file_writer`]: size-rotated log file

pub mod file_writer;
pub mod init;

pub use file_writer::RotatingFile;
pub use init::{env_filter, init_tracing};
