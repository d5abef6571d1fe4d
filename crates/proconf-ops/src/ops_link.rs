//! Operation: print the static link plan of one unit.

use std::fmt::Write as _;
use std::path::Path;

use proconf_core::config::OutputFormat;
use proconf_resolver::link::LinkPlan;
use proconf_util::errors::ProconfError;

use crate::ops_setup::{Overrides, Session};

/// Plan the link of `unit` and print it in `format` (or the configured one).
pub fn link(
    cwd: &Path,
    overrides: &Overrides,
    unit: &str,
    format: Option<OutputFormat>,
) -> miette::Result<()> {
    let session = Session::load(cwd, overrides)?;
    let resolution = session.resolve()?;
    let plan = LinkPlan::for_unit(&resolution, unit, &session.config.link).ok_or_else(|| {
        ProconfError::UnitNotFound {
            id: unit.to_string(),
        }
    })?;

    match format.unwrap_or(session.config.output.format) {
        OutputFormat::Text => print!("{}", render_plan(&plan)),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&plan).map_err(|e| ProconfError::Generic {
                message: format!("Failed to serialize link plan: {e}"),
            })?;
            println!("{json}");
        }
    }
    Ok(())
}

/// One archive path per line, most dependent first, then external modules and flags.
pub fn render_plan(plan: &LinkPlan) -> String {
    let mut out = String::new();
    for lib in &plan.libraries {
        let _ = writeln!(out, "{}", lib.search_dir.join(&lib.artifact).display());
    }
    if !plan.external.is_empty() {
        let _ = writeln!(out, "external: {}", plan.external.join(" "));
    }
    if !plan.libraries.is_empty() {
        let _ = writeln!(out, "flags: {}", plan.flags().join(" "));
    }
    out
}
