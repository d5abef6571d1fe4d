//! Handler for `proconf resolve`.

use std::path::PathBuf;

use miette::Result;

use proconf_ops::ops_resolve::{self, ResolveOptions};
use proconf_ops::ops_setup::Overrides;

pub fn exec(overrides: &Overrides, format: Option<&str>, out: Option<PathBuf>) -> Result<()> {
    let cwd = super::current_dir()?;
    let opts = ResolveOptions {
        format: super::parse_format(format)?,
        out,
    };
    ops_resolve::resolve(&cwd, overrides, &opts)
}
