//! Locating and loading the registry, shared by every operation.
//!
//! The registry manifest is taken from `--registry` when given. Otherwise the
//! path configured under `[registry]` is tried relative to the working
//! directory, then its file name is searched for in every parent directory.

use std::path::{Path, PathBuf};

use proconf_core::config::Config;
use proconf_core::manifest::Manifest;
use proconf_core::registry::Registry;
use proconf_resolver::resolver::{self, Resolution};
use proconf_util::errors::ProconfError;
use proconf_util::fs::find_ancestor_with;
use proconf_util::progress;

/// Paths given on the command line that override discovery.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub registry: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

/// A loaded configuration together with the registry it points at.
pub struct Session {
    pub config: Config,
    pub manifest_path: PathBuf,
    pub registry: Registry,
}

impl Session {
    /// Load configuration and registry as seen from `cwd`.
    pub fn load(cwd: &Path, overrides: &Overrides) -> miette::Result<Self> {
        let config = Config::load(overrides.config.as_deref(), cwd)?;
        let manifest_path = match &overrides.registry {
            Some(path) => cwd.join(path),
            None => locate_manifest(cwd, &config.registry.path)?,
        };
        let registry = Manifest::from_path(&manifest_path)?.into_registry();
        if registry.is_empty() {
            progress::status_warn(
                "Warning",
                &format!("{} declares no units", manifest_path.display()),
            );
        }
        tracing::debug!(
            "registry {} has {} units",
            manifest_path.display(),
            registry.len()
        );
        Ok(Self {
            config,
            manifest_path,
            registry,
        })
    }

    /// Run the resolution engine over the loaded registry.
    pub fn resolve(&self) -> miette::Result<Resolution> {
        Ok(resolver::resolve(&self.registry)?)
    }
}

fn locate_manifest(cwd: &Path, configured: &Path) -> miette::Result<PathBuf> {
    let direct = cwd.join(configured);
    if direct.is_file() {
        return Ok(direct);
    }

    let file_name = configured
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(proconf_core::manifest::MANIFEST_FILE);
    find_ancestor_with(cwd, file_name)
        .map(|dir| dir.join(file_name))
        .ok_or_else(|| {
            ProconfError::Manifest {
                message: format!(
                    "Could not find {} in this directory or any parent",
                    configured.display()
                ),
            }
            .into()
        })
}
