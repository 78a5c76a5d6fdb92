//! CLI parse: clap types for Trellis. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Trellis CLI - inspect the site context a configuration produces
#[derive(Parser)]
#[command(name = "trellis")]
#[command(about = "Inspect rendering contexts built from site configuration")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory
    #[arg(long, global = true, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show what the site context remembers
    Show {
        /// Output format (text, json or toml)
        #[arg(long, default_value = "text", value_parser = ["text", "json", "toml"])]
        format: String,
    },
    /// Locate a capability from a page context beneath the site
    Locate {
        /// Capability name, e.g. "session"
        key: String,
        /// Match to return: 1 is the nearest, -1 the most distant
        #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
        depth: isize,
    },
    /// Show the filler of a slot
    Slot {
        /// Slot name
        name: String,
    },
}
