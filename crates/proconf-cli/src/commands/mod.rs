//! Command dispatch and handler modules.

mod check;
mod link;
mod resolve;
mod tree;

use miette::Result;
use proconf_core::config::OutputFormat;
use proconf_ops::ops_setup::Overrides;

use crate::cli::{Cli, Command};

/// Route a parsed CLI invocation to the appropriate command handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    let overrides = Overrides {
        registry: cli.registry,
        config: cli.config,
    };
    match cli.command {
        Command::Resolve { format, out } => resolve::exec(&overrides, format.as_deref(), out),
        Command::Check => check::exec(&overrides),
        Command::Tree => tree::exec(&overrides),
        Command::Link { unit, format } => link::exec(&overrides, &unit, format.as_deref()),
    }
}

/// Parse a `--format` value.
fn parse_format(format: Option<&str>) -> Result<Option<OutputFormat>> {
    Ok(format.map(str::parse::<OutputFormat>).transpose()?)
}

fn current_dir() -> Result<std::path::PathBuf> {
    Ok(std::env::current_dir().map_err(proconf_util::errors::ProconfError::Io)?)
}
