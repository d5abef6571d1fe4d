//! Check command implementation.

use miette::Result;

use proconf_ops::ops_setup::Overrides;

pub fn exec(overrides: &Overrides) -> Result<()> {
    let cwd = super::current_dir()?;
    proconf_ops::ops_check::check(&cwd, overrides)?;
    Ok(())
}
