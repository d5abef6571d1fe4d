//! Operation: resolve the registry and report the result.
//!
//! The report is written to stdout, or to a file that is only rewritten when
//! its content changes so downstream build steps keyed on mtime stay quiet.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use proconf_core::config::OutputFormat;
use proconf_resolver::resolver::{Resolution, ResolvedUnit};
use proconf_util::errors::ProconfError;
use proconf_util::fs::write_if_changed;
use proconf_util::progress;

use crate::ops_setup::{Overrides, Session};

/// Options for `proconf resolve`.
#[derive(Debug, Default)]
pub struct ResolveOptions {
    /// Overrides the `[output]` format from the configuration.
    pub format: Option<OutputFormat>,
    /// Write the report here instead of stdout.
    pub out: Option<PathBuf>,
}

/// Resolve the registry found from `cwd` and emit the report.
pub fn resolve(cwd: &Path, overrides: &Overrides, opts: &ResolveOptions) -> miette::Result<()> {
    let session = Session::load(cwd, overrides)?;
    let resolution = session.resolve()?;
    progress::status(
        "Resolved",
        &format!(
            "{} units from {}",
            resolution.len(),
            session.manifest_path.display()
        ),
    );

    let format = opts.format.unwrap_or(session.config.output.format);
    let report = render(&resolution, format)?;

    match &opts.out {
        Some(out) => {
            let path = cwd.join(out);
            if write_if_changed(&path, &report).map_err(ProconfError::Io)? {
                progress::status("Wrote", &path.display().to_string());
            } else {
                progress::status_info("Fresh", &path.display().to_string());
            }
        }
        None => print!("{report}"),
    }
    Ok(())
}

/// Render a resolution in the requested format.
pub fn render(resolution: &Resolution, format: OutputFormat) -> miette::Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(resolution)),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(resolution).map_err(|e| {
                ProconfError::Generic {
                    message: format!("Failed to serialize resolution: {e}"),
                }
            })?;
            json.push('\n');
            Ok(json)
        }
    }
}

fn render_text(resolution: &Resolution) -> String {
    let mut out = String::new();
    for unit in resolution.units() {
        render_unit(&mut out, unit);
    }
    out
}

fn render_unit(out: &mut String, unit: &ResolvedUnit) {
    let id = if unit.id.is_empty() { "<root>" } else { &unit.id };
    let _ = writeln!(out, "[{id}] {}", unit.kind);
    if let Some(parent) = &unit.parent {
        let parent = if parent.is_empty() { "<root>" } else { parent };
        let _ = writeln!(out, "  parent: {parent} (subdir {})", unit.subdir);
    }
    field(out, "depends", unit.sorted_depends.iter());
    field(out, "link", unit.link_order());
    field(out, "external", unit.external.iter());
    field(out, "after", unit.group_depends.iter());
    out.push('\n');
}

fn field<I, S>(out: &mut String, name: &str, values: I)
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    let values: Vec<String> = values.map(|v| v.as_ref().to_string()).collect();
    if !values.is_empty() {
        let _ = writeln!(out, "  {name}: {}", values.join(" "));
    }
}
