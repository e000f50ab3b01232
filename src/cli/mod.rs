//! Command-line interface
//!
//! Argument parsing and the runner that wires catalogs, configuration,
//! and the API client together.

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
