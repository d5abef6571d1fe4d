//! Parent/child relationships between units.
//!
//! A group lists its sub-units by name relative to its own id, so the child
//! id is always strictly longer than the parent's and the relation cannot
//! cycle. Parent links are plain registry indices.
//!
//! ```text
//! <root>            subdirs = third libs app
//!   |-- third       subdirs = Geometry
//!   |-- libs        subdirs = Core Gui
//!   |     |-- Gui   subdirs = Widgets Windows
//!   |-- app
//! ```
//!
//! Units nobody lists are top-level: children of an implicit distribution
//! root, where they are known by their full id.

use std::collections::HashSet;

use proconf_core::registry::{Registry, UnitIdx};
use proconf_core::unit::subdir_key;

use crate::error::ResolveError;

/// The unit tree of a registry, indexed like the registry.
#[derive(Debug, Clone)]
pub struct Hierarchy {
    parent: Vec<Option<UnitIdx>>,
    children: Vec<Vec<UnitIdx>>,
    subdir: Vec<String>,
    key: Vec<String>,
}

impl Hierarchy {
    /// Attach every listed subdir to its group.
    ///
    /// Collects every unresolved, duplicate or doubly claimed subdir.
    pub fn build(registry: &Registry) -> Result<Self, Vec<ResolveError>> {
        let len = registry.len();
        let mut hierarchy = Self {
            parent: vec![None; len],
            children: vec![Vec::new(); len],
            subdir: registry.iter().map(|(_, u)| u.id.clone()).collect(),
            key: registry.iter().map(|(_, u)| subdir_key(&u.id)).collect(),
        };
        let mut errors = Vec::new();

        for (group_idx, group) in registry.iter() {
            let mut keys = HashSet::new();
            for name in &group.subdirs {
                let key = subdir_key(name);
                if !keys.insert(key.clone()) {
                    errors.push(ResolveError::DuplicateSubUnit {
                        group: group.id.clone(),
                        key,
                    });
                    continue;
                }

                let child = match registry.find(&group.child_id(name)) {
                    Some(child) if !name.is_empty() => child,
                    _ => {
                        errors.push(ResolveError::UnresolvedSubUnit {
                            group: group.id.clone(),
                            name: name.clone(),
                        });
                        continue;
                    }
                };

                if let Some(first) = hierarchy.parent[child] {
                    errors.push(ResolveError::ConflictingParent {
                        unit: registry.get(child).id.clone(),
                        first: registry.get(first).id.clone(),
                        second: group.id.clone(),
                    });
                    continue;
                }

                hierarchy.parent[child] = Some(group_idx);
                hierarchy.children[group_idx].push(child);
                hierarchy.subdir[child] = name.clone();
                hierarchy.key[child] = key;
            }
        }

        // Top-level units are siblings under the implicit root.
        let mut top_keys = HashSet::new();
        for idx in hierarchy.top_level() {
            if !top_keys.insert(hierarchy.key[idx].as_str()) {
                errors.push(ResolveError::DuplicateSubUnit {
                    group: String::new(),
                    key: hierarchy.key[idx].clone(),
                });
            }
        }

        if errors.is_empty() {
            Ok(hierarchy)
        } else {
            Err(errors)
        }
    }

    pub fn parent(&self, idx: UnitIdx) -> Option<UnitIdx> {
        self.parent[idx]
    }

    /// Sub-units of `idx` in the order the group lists them.
    pub fn children(&self, idx: UnitIdx) -> &[UnitIdx] {
        &self.children[idx]
    }

    /// Units without a parent, in id order.
    pub fn top_level(&self) -> Vec<UnitIdx> {
        (0..self.parent.len())
            .filter(|&idx| self.parent[idx].is_none())
            .collect()
    }

    /// Name under which the parent lists `idx`; the full id for top-level units.
    pub fn subdir(&self, idx: UnitIdx) -> &str {
        &self.subdir[idx]
    }

    /// Slash-free form of [`Hierarchy::subdir`].
    pub fn subdir_key(&self, idx: UnitIdx) -> &str {
        &self.key[idx]
    }

    /// Path from the top-level ancestor of `idx` down to `idx` itself.
    pub fn ancestor_chain(&self, idx: UnitIdx) -> Vec<UnitIdx> {
        let mut chain = vec![idx];
        let mut current = idx;
        while let Some(parent) = self.parent[current] {
            chain.push(parent);
            current = parent;
        }
        chain.reverse();
        chain
    }
}
