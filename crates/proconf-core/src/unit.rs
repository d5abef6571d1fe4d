use serde::{Deserialize, Serialize};
use std::fmt;

/// What a build unit produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnitKind {
    /// An executable.
    #[serde(alias = "app")]
    Application,
    /// An internal static library.
    #[serde(alias = "lib")]
    Library,
    /// A vendored third-party library. Resolved exactly like [`UnitKind::Library`].
    #[serde(alias = "third")]
    ThirdParty,
    /// A directory grouping that only aggregates sub-units.
    #[serde(alias = "subdirs")]
    Group,
}

impl UnitKind {
    /// Whether other units link against this unit's artifact.
    pub fn is_library(self) -> bool {
        matches!(self, UnitKind::Library | UnitKind::ThirdParty)
    }

}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UnitKind::Application => "application",
            UnitKind::Library => "library",
            UnitKind::ThirdParty => "third-party",
            UnitKind::Group => "group",
        };
        f.write_str(s)
    }
}

/// A unit as declared under `[units."<id>"]` in `Units.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UnitDecl {
    pub kind: UnitKind,

    /// Ids of the units this unit directly depends on.
    #[serde(default)]
    pub depends: Vec<String>,

    /// External system modules (no registry entry), e.g. `core`, `gui`.
    #[serde(default)]
    pub external: Vec<String>,

    /// Names of the units nested directly beneath this one, relative to its id.
    #[serde(default)]
    pub subdirs: Vec<String>,
}

/// A registered build unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    /// Path-like unique key, e.g. `libs/Gui/Widgets`. The distribution root is `""`.
    pub id: String,
    pub kind: UnitKind,
    pub depends: Vec<String>,
    pub external: Vec<String>,
    pub subdirs: Vec<String>,
}

impl Unit {
    pub fn new(id: impl Into<String>, kind: UnitKind) -> Self {
        Self {
            id: id.into(),
            kind,
            depends: Vec::new(),
            external: Vec::new(),
            subdirs: Vec::new(),
        }
    }

    pub fn from_decl(id: impl Into<String>, decl: UnitDecl) -> Self {
        Self {
            id: id.into(),
            kind: decl.kind,
            depends: decl.depends,
            external: decl.external,
            subdirs: decl.subdirs,
        }
    }

    pub fn with_depends<I, S>(mut self, depends: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.depends = depends.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_external<I, S>(mut self, external: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.external = external.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_subdirs<I, S>(mut self, subdirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subdirs = subdirs.into_iter().map(Into::into).collect();
        self
    }

    /// Id of the unit listed as `subdir` beneath this one.
    pub fn child_id(&self, subdir: &str) -> String {
        if self.id.is_empty() {
            subdir.to_string()
        } else {
            format!("{}/{subdir}", self.id)
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.id.is_empty() {
            write!(f, "<root> ({})", self.kind)
        } else {
            write!(f, "{} ({})", self.id, self.kind)
        }
    }
}

/// Last path segment of a unit id, used as the artifact name (`libs/Gui/Widgets` -> `Widgets`).
pub fn unit_name(id: &str) -> &str {
    id.rsplit('/').next().unwrap_or(id)
}

/// Slash-free key identifying a subdir among its siblings (`Gui/Widgets` -> `Gui__Widgets`).
pub fn subdir_key(subdir: &str) -> String {
    subdir.replace('/', "__")
}
