//! Command-line surface of the `petscout` binary.
//!
//! - `args`: process arguments and configuration overrides
//! - `line`: interactive commands read from stdin

pub mod args;
pub mod line;

pub use args::CliArgs;
pub use line::{parse_command, Command, CommandError, HELP};
