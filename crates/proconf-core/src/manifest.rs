use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::registry::Registry;
use crate::unit::UnitDecl;

/// Default file name of the registry manifest.
pub const MANIFEST_FILE: &str = "Units.toml";

/// The parsed representation of a `Units.toml` file.
///
/// ```toml
/// [units."libs/Gui"]
/// kind = "library"
/// depends = ["libs/Core"]
/// external = ["gui"]
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default)]
    pub units: BTreeMap<String, UnitDecl>,
}

impl Manifest {
    /// Load and parse a `Units.toml` file from the given path.
    pub fn from_path(path: &Path) -> miette::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            proconf_util::errors::ProconfError::Manifest {
                message: format!("Failed to read {}: {e}", path.display()),
            }
        })?;
        let manifest = Self::parse_toml(&content)?;
        tracing::debug!(
            "loaded {} units from {}",
            manifest.units.len(),
            path.display()
        );
        Ok(manifest)
    }

    /// Parse a `Units.toml` from a string.
    pub fn parse_toml(content: &str) -> miette::Result<Self> {
        toml::from_str(content).map_err(|e| {
            proconf_util::errors::ProconfError::Manifest {
                message: format!("Failed to parse Units.toml: {e}"),
            }
            .into()
        })
    }

    /// Freeze the declarations into a [`Registry`].
    pub fn into_registry(self) -> Registry {
        Registry::from_decls(self.units)
    }
}
