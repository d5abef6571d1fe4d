//! Operation: validate the registry without producing a report.

use std::path::Path;

use proconf_util::progress;

use crate::ops_setup::{Overrides, Session};

/// Resolve the registry found from `cwd` and report only success or failure.
///
/// Returns the number of resolved units.
pub fn check(cwd: &Path, overrides: &Overrides) -> miette::Result<usize> {
    let session = Session::load(cwd, overrides)?;
    let resolution = session.resolve()?;
    let groups = resolution
        .units()
        .iter()
        .filter(|u| !u.children.is_empty())
        .count();
    progress::status(
        "Checked",
        &format!(
            "{} units in {groups} groups, no problems found",
            resolution.len()
        ),
    );
    Ok(resolution.len())
}
