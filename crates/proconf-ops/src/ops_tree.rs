//! Operation: display the unit hierarchy.
//!
//! Every top-level unit starts a tree. Each node shows the subdir it is
//! listed under, its kind and the sibling keys it must be built after.

use std::path::Path;

use proconf_resolver::resolver::{Resolution, ResolvedUnit};

use crate::ops_setup::{Overrides, Session};

/// Print the hierarchy of the registry found from `cwd`.
pub fn tree(cwd: &Path, overrides: &Overrides) -> miette::Result<()> {
    let session = Session::load(cwd, overrides)?;
    let resolution = session.resolve()?;
    print!("{}", render_tree(&resolution));
    Ok(())
}

/// Render the hierarchy with box-drawing connectors.
pub fn render_tree(resolution: &Resolution) -> String {
    let mut output = String::new();
    for unit in resolution.top_level() {
        output.push_str(&format!("{}\n", label(unit)));
        print_children(resolution, &mut output, unit, "");
    }
    output
}

fn print_children(
    resolution: &Resolution,
    output: &mut String,
    unit: &ResolvedUnit,
    prefix: &str,
) {
    let children = resolution.children(&unit.id);
    let count = children.len();
    for (i, child) in children.into_iter().enumerate() {
        let is_last = i == count - 1;
        let connector = if is_last { "└── " } else { "├── " };
        output.push_str(&format!("{prefix}{connector}{}\n", label(child)));

        let child_prefix = format!("{prefix}{}", if is_last { "    " } else { "│   " });
        print_children(resolution, output, child, &child_prefix);
    }
}

fn label(unit: &ResolvedUnit) -> String {
    let name = if unit.subdir.is_empty() {
        "<root>"
    } else {
        unit.subdir.as_str()
    };
    let mut label = format!("{name} ({})", unit.kind);
    if !unit.group_depends.is_empty() {
        let after: Vec<&str> = unit.group_depends.iter().map(String::as_str).collect();
        label.push_str(&format!(" after {}", after.join(", ")));
    }
    label
}
