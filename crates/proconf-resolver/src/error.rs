//! Resolution failures.
//!
//! Every phase collects all the problems it finds; [`ResolveErrors`] bundles
//! them so a single run reports everything at once.

use miette::Diagnostic;
use thiserror::Error;

/// A single problem found while resolving a registry.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ResolveError {
    /// A declared dependency has no registry entry.
    #[error("unit '{unit}' depends on unknown unit '{missing}'")]
    #[diagnostic(
        code(proconf::resolve::unknown_dependency),
        help("declare the missing unit in Units.toml or drop it from `depends`")
    )]
    UnknownDependency { unit: String, missing: String },

    /// A dependency cycle. `path` starts and ends with `unit`.
    #[error("dependency cycle through '{unit}': {}", .path.join(" -> "))]
    #[diagnostic(
        code(proconf::resolve::cycle),
        help("remove one of the dependencies on the cycle")
    )]
    Cycle { unit: String, path: Vec<String> },

    /// A group lists a subdir that is not registered.
    #[error("group '{group}' lists subdir '{name}', which is not a registered unit")]
    #[diagnostic(code(proconf::hierarchy::unresolved_subdir))]
    UnresolvedSubUnit { group: String, name: String },

    /// A group lists two subdirs with the same key.
    #[error("group '{group}' lists subdir key '{key}' more than once")]
    #[diagnostic(
        code(proconf::hierarchy::duplicate_subdir),
        help("`a/b` and `a__b` share the key `a__b`")
    )]
    DuplicateSubUnit { group: String, key: String },

    /// Two groups claim the same unit.
    #[error("unit '{unit}' is listed by both '{first}' and '{second}'")]
    #[diagnostic(code(proconf::hierarchy::conflicting_parent))]
    ConflictingParent {
        unit: String,
        first: String,
        second: String,
    },

    /// A unit depends on a group that contains it.
    #[error("unit '{unit}' depends on its own ancestor '{ancestor}'")]
    #[diagnostic(
        code(proconf::subdirs::ancestor_dependency),
        help("a group always builds its contents first; depend on a sibling instead")
    )]
    AncestorDependency { unit: String, ancestor: String },

    /// Inferred sibling dependencies inside one group form a cycle.
    #[error("subdirs of group '{group}' depend on each other cyclically: {}", .keys.join(", "))]
    #[diagnostic(
        code(proconf::subdirs::cycle),
        help("move the mutually dependent libraries under a common subdir")
    )]
    GroupCycle { group: String, keys: Vec<String> },
}

/// Every error found by one resolution run.
#[derive(Debug, Error, Diagnostic)]
#[error("resolution failed with {} error(s)", .errors.len())]
#[diagnostic(code(proconf::resolve::failed))]
pub struct ResolveErrors {
    #[related]
    pub errors: Vec<ResolveError>,
}

impl ResolveErrors {
    pub fn iter(&self) -> impl Iterator<Item = &ResolveError> {
        self.errors.iter()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// The cycle paths among the collected errors.
    pub fn cycles(&self) -> impl Iterator<Item = &[String]> {
        self.errors.iter().filter_map(|e| match e {
            ResolveError::Cycle { path, .. } => Some(path.as_slice()),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_display_joins_path() {
        let err = ResolveError::Cycle {
            unit: "A".into(),
            path: vec!["A".into(), "B".into(), "C".into(), "A".into()],
        };
        assert_eq!(
            err.to_string(),
            "dependency cycle through 'A': A -> B -> C -> A"
        );
    }

    #[test]
    fn errors_summary_counts() {
        let errors = ResolveErrors {
            errors: vec![
                ResolveError::UnknownDependency {
                    unit: "app".into(),
                    missing: "libs/Nope".into(),
                },
                ResolveError::DuplicateSubUnit {
                    group: "libs".into(),
                    key: "Core".into(),
                },
            ],
        };
        assert_eq!(errors.to_string(), "resolution failed with 2 error(s)");
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.cycles().count(), 0);
    }
}
