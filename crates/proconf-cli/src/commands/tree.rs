//! Handler for `proconf tree`.

use miette::Result;

use proconf_ops::ops_setup::Overrides;

pub fn exec(overrides: &Overrides) -> Result<()> {
    let cwd = super::current_dir()?;
    proconf_ops::ops_tree::tree(&cwd, overrides)
}
