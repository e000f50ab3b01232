//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Worklane SDK CLI
#[derive(Parser, Debug)]
#[command(name = "worklane-sdk")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Catalog: a built-in name (e.g. "directory") or a YAML file path
    #[arg(short = 'c', long, global = true)]
    pub catalog: Option<String>,

    /// Configuration file (JSON with credentials and overrides)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List built-in catalogs
    List,

    /// List the endpoints of the selected catalog
    Endpoints,

    /// Validate a catalog definition
    Validate,

    /// Invoke a single-call endpoint
    Call {
        /// Endpoint name
        endpoint: String,

        /// Parameters as key=value pairs (values parsed as JSON when possible)
        #[arg(short, long)]
        param: Vec<String>,

        /// Inline parameters JSON (merged over --param)
        #[arg(long)]
        params_json: Option<String>,

        /// Inline config JSON (overrides --config)
        #[arg(long)]
        config_json: Option<String>,
    },

    /// Run a paginated listing, printing one page per line
    Pages {
        /// Endpoint name
        endpoint: String,

        /// Parameters as key=value pairs (values parsed as JSON when possible)
        #[arg(short, long)]
        param: Vec<String>,

        /// Inline parameters JSON (merged over --param)
        #[arg(long)]
        params_json: Option<String>,

        /// Inline config JSON (overrides --config)
        #[arg(long)]
        config_json: Option<String>,

        /// Stop after this many pages
        #[arg(long)]
        max_pages: Option<usize>,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one value per line)
    Json,
    /// Human-readable output
    Pretty,
}
