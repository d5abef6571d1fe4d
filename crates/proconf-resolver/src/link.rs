//! Static link plans.
//!
//! A single-pass linker resolves symbols left to right, so a library must
//! appear before everything it depends on. The plan lists the libraries of a
//! unit's closure in that order, each with the directory its archive is
//! built into, followed by the external modules.

use std::path::PathBuf;

use proconf_core::config::{LinkConfig, Platform};
use serde::Serialize;

use crate::resolver::Resolution;

/// One library to link against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkEntry {
    pub id: String,
    /// Last segment of the id; the library's link name.
    pub name: String,
    pub search_dir: PathBuf,
    pub artifact: String,
}

/// Everything a unit links against, most dependent first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkPlan {
    pub unit: String,
    pub libraries: Vec<LinkEntry>,
    pub external: Vec<String>,
}

impl LinkPlan {
    /// Plan the link of `id`. Returns `None` for an unknown unit.
    ///
    /// Applications and groups in the closure produce no archive and are skipped.
    pub fn for_unit(resolution: &Resolution, id: &str, config: &LinkConfig) -> Option<Self> {
        let unit = resolution.get(id)?;
        let libraries = unit
            .link_order()
            .filter_map(|dep| resolution.get(dep))
            .filter(|dep| dep.kind.is_library())
            .map(|dep| {
                let name = dep.name().to_string();
                let mut search_dir = config.out_dir.join(&dep.id);
                if config.platform == Platform::Win32 {
                    search_dir.push(config.mode.as_str());
                }
                let artifact = match config.platform {
                    Platform::Unix => format!("lib{name}.a"),
                    Platform::Win32 => format!("{name}.lib"),
                };
                LinkEntry {
                    id: dep.id.clone(),
                    name,
                    search_dir,
                    artifact,
                }
            })
            .collect();

        Some(Self {
            unit: unit.id.clone(),
            libraries,
            external: unit.external.clone(),
        })
    }

    /// Linker arguments in `-L<dir> -l<name>` form.
    pub fn flags(&self) -> Vec<String> {
        self.libraries
            .iter()
            .flat_map(|lib| {
                [
                    format!("-L{}", lib.search_dir.display()),
                    format!("-l{}", lib.name),
                ]
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::resolve;
    use proconf_core::config::BuildMode;
    use proconf_core::registry::Registry;
    use proconf_core::unit::{Unit, UnitKind};
    use std::path::Path;

    fn resolution() -> Resolution {
        let registry = Registry::new([
            Unit::new("app", UnitKind::Application)
                .with_depends(["libs/Gui", "tools"])
                .with_external(["opengl"]),
            Unit::new("tools", UnitKind::Application),
            Unit::new("libs/Gui", UnitKind::Library)
                .with_depends(["libs/Core"])
                .with_external(["gui"]),
            Unit::new("libs/Core", UnitKind::ThirdParty),
        ])
        .unwrap();
        resolve(&registry).unwrap()
    }

    #[test]
    fn unix_plan_is_most_dependent_first() {
        let config = LinkConfig {
            platform: Platform::Unix,
            ..LinkConfig::default()
        };
        let plan = LinkPlan::for_unit(&resolution(), "app", &config).unwrap();
        let ids: Vec<&str> = plan.libraries.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["libs/Gui", "libs/Core"]);
        assert_eq!(plan.libraries[0].name, "Gui");
        assert_eq!(plan.libraries[0].artifact, "libGui.a");
        assert_eq!(plan.libraries[0].search_dir, Path::new("build/libs/Gui"));
        assert_eq!(plan.external, vec!["gui", "opengl"]);
        assert_eq!(
            plan.flags(),
            vec!["-Lbuild/libs/Gui", "-lGui", "-Lbuild/libs/Core", "-lCore"]
        );
    }

    #[test]
    fn win32_plan_uses_mode_directory() {
        let config = LinkConfig {
            platform: Platform::Win32,
            mode: BuildMode::Debug,
            out_dir: PathBuf::from("out"),
        };
        let plan = LinkPlan::for_unit(&resolution(), "libs/Gui", &config).unwrap();
        assert_eq!(plan.libraries.len(), 1);
        assert_eq!(plan.libraries[0].artifact, "Core.lib");
        assert_eq!(
            plan.libraries[0].search_dir,
            Path::new("out").join("libs/Core").join("debug")
        );
    }

    #[test]
    fn unknown_unit_has_no_plan() {
        assert!(LinkPlan::for_unit(&resolution(), "nope", &LinkConfig::default()).is_none());
    }
}
