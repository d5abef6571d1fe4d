//! Handler for `proconf link`.

use miette::Result;

use proconf_ops::ops_setup::Overrides;

pub fn exec(overrides: &Overrides, unit: &str, format: Option<&str>) -> Result<()> {
    let cwd = super::current_dir()?;
    let format = super::parse_format(format)?;
    proconf_ops::ops_link::link(&cwd, overrides, unit, format)
}
