use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use proconf_util::errors::ProconfError;

/// Name of the per-project configuration file.
pub const CONFIG_FILE: &str = "proconf.toml";

/// User configuration loaded from `proconf.toml` or `~/.proconf/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub registry: RegistryConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub link: LinkConfig,
}

/// Registry settings from `[registry]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    #[serde(default = "default_registry_path")]
    pub path: PathBuf,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            path: default_registry_path(),
        }
    }
}

fn default_registry_path() -> PathBuf {
    PathBuf::from(crate::manifest::MANIFEST_FILE)
}

/// Report settings from `[output]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

/// Rendering of a resolution report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = ProconfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(ProconfError::Config {
                message: format!("unknown output format '{other}' (expected text or json)"),
            }),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => f.write_str("text"),
            OutputFormat::Json => f.write_str("json"),
        }
    }
}

/// Link plan settings from `[link]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkConfig {
    #[serde(default)]
    pub platform: Platform,
    #[serde(default)]
    pub mode: BuildMode,
    #[serde(default = "default_out_dir", rename = "out-dir")]
    pub out_dir: PathBuf,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            platform: Platform::default(),
            mode: BuildMode::default(),
            out_dir: default_out_dir(),
        }
    }
}

fn default_out_dir() -> PathBuf {
    PathBuf::from("build")
}

/// Target platform family; decides static library naming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Unix,
    Win32,
}

impl Default for Platform {
    fn default() -> Self {
        if cfg!(windows) {
            Platform::Win32
        } else {
            Platform::Unix
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    #[default]
    Release,
    Debug,
}

impl BuildMode {
    pub fn as_str(self) -> &'static str {
        match self {
            BuildMode::Release => "release",
            BuildMode::Debug => "debug",
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit path must exist. Otherwise `proconf.toml` in `cwd` is used,
    /// then `~/.proconf/config.toml`, then defaults.
    pub fn load(explicit: Option<&Path>, cwd: &Path) -> miette::Result<Self> {
        if let Some(path) = explicit {
            return Self::from_path(path);
        }
        let local = cwd.join(CONFIG_FILE);
        if local.is_file() {
            return Self::from_path(&local);
        }
        let global = Self::global_path();
        if global.is_file() {
            return Self::from_path(&global);
        }
        Ok(Self::default())
    }

    /// Load and parse a configuration file.
    pub fn from_path(path: &Path) -> miette::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ProconfError::Config {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        tracing::debug!("using config {}", path.display());
        Self::parse_toml(&content)
    }

    pub fn parse_toml(content: &str) -> miette::Result<Self> {
        toml::from_str(content).map_err(|e| {
            ProconfError::Config {
                message: format!("Failed to parse config: {e}"),
            }
            .into()
        })
    }

    /// Returns the path to the global config file.
    pub fn global_path() -> PathBuf {
        dirs_path().join("config.toml")
    }
}

/// Returns the path to the proconf data directory (`~/.proconf/`).
pub fn dirs_path() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    Path::new(&home).join(".proconf")
}
