//! CLI argument definitions for proconf.
//!
//! Uses `clap` derive macros to define the full command surface. Each command
//! corresponds to a handler in the [`super::commands`] module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "proconf",
    version,
    about = "Resolve build unit dependencies",
    long_about = "proconf reads a registry of build units from Units.toml and computes \
                  transitive dependencies, link order and per-directory build order."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Registry manifest to use instead of searching for Units.toml
    #[arg(long, global = true, env = "PROCONF_REGISTRY")]
    pub registry: Option<PathBuf>,

    /// Configuration file to use instead of proconf.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve every unit and print the result
    Resolve {
        /// Report format: text or json
        #[arg(short, long)]
        format: Option<String>,
        /// Write the report to a file; left untouched when unchanged
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Validate the registry without printing a report
    Check,

    /// Show the unit hierarchy and inferred subdir order
    Tree,

    /// Show the static link plan of a unit
    Link {
        /// Unit id, e.g. libs/Gui/Widgets
        unit: String,
        /// Output format: text or json
        #[arg(short, long)]
        format: Option<String>,
    },
}

/// Parse command-line arguments.
pub fn parse() -> Cli {
    Cli::parse()
}
