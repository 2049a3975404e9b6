//! CLI argument definitions using clap
//!
//! This module defines all command-line arguments for swaggen.

use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

/// Generate typed TypeScript clients from OpenAPI descriptions
#[derive(Parser, Debug, Clone)]
#[command(name = "swaggen")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    // =========================================================================
    // INPUT / OUTPUT
    // =========================================================================

    /// OpenAPI document, or a directory of documents (*.json, *.yaml, *.yml)
    #[arg(long = "files", value_name = "PATH")]
    pub files: PathBuf,

    /// Existing directory receiving the generated sources
    #[arg(long = "output", value_name = "DIR")]
    pub output: PathBuf,

    /// Server prefix removed from servers[0].url to build the service base URL
    #[arg(long = "strip-server", value_name = "URL")]
    pub strip_server: Option<String>,

    /// Module the generated services import `Service` from
    #[arg(long = "fetch-module", value_name = "MODULE")]
    pub fetch_module: Option<String>,

    /// Print the generated files instead of writing them
    #[arg(long = "dry-run", action = ArgAction::SetTrue)]
    pub dry_run: bool,

    // =========================================================================
    // CONFIGURATION
    // =========================================================================

    /// Configuration file (TOML)
    #[arg(long = "config", value_name = "FILE", env = "SWAGGEN_CONFIG")]
    pub config: Option<PathBuf>,

    // =========================================================================
    // TROUBLESHOOTING
    // =========================================================================

    /// Verbose logging. Use -vv for debug, -vvv for trace
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress lines on stderr
    #[arg(short = 'q', long = "quiet", action = ArgAction::SetTrue)]
    pub quiet: bool,

    /// Output format for logs: json (JSON Lines) or text (default)
    #[arg(long = "log-format", value_name = "FORMAT", value_enum)]
    pub log_format: Option<LogFormat>,
}

/// Log format for structured output (CI/CD)
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Plain text output (default)
    #[default]
    Text,
    /// JSON Lines format for parsing
    Json,
}
