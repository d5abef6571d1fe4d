//! A full resolution run over a registry.
//!
//! Closures and the hierarchy are computed independently so that both report
//! their problems in the same run. Link order and subdir inference need both
//! and only run when both succeeded. Any error makes the whole run fail;
//! nothing partial is handed out.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use proconf_core::registry::{Registry, UnitIdx};
use proconf_core::unit::{unit_name, UnitKind};
use serde::Serialize;

use crate::closure::{ClosureResolver, Closures};
use crate::error::{ResolveError, ResolveErrors};
use crate::graph::DependencyGraph;
use crate::hierarchy::Hierarchy;
use crate::order;
use crate::subdirs::{self, SubdirDepends};

/// Everything computed for one unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedUnit {
    pub id: String,
    pub kind: UnitKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    pub subdir: String,
    pub subdir_key: String,
    /// Child ids in the order the group lists them.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<String>,
    /// Transitive dependencies, least dependent first.
    pub sorted_depends: Vec<String>,
    /// External modules used transitively, sorted by name.
    pub external: Vec<String>,
    /// Keys of the siblings this unit must be built after.
    pub group_depends: BTreeSet<String>,
}

impl ResolvedUnit {
    /// Dependencies in the order a single-pass linker wants them: most dependent first.
    pub fn link_order(&self) -> impl Iterator<Item = &str> {
        self.sorted_depends.iter().rev().map(String::as_str)
    }

    /// Link name of the unit's artifact (`libs/Gui/Widgets` -> `Widgets`).
    pub fn name(&self) -> &str {
        unit_name(&self.id)
    }
}

/// The successful outcome of [`resolve`].
#[derive(Debug, Clone, Serialize)]
pub struct Resolution {
    units: Vec<ResolvedUnit>,
    #[serde(skip)]
    index: HashMap<String, usize>,
    #[serde(skip)]
    top_level: Vec<usize>,
}

impl Resolution {
    /// Resolved units in id order.
    pub fn units(&self) -> &[ResolvedUnit] {
        &self.units
    }

    pub fn get(&self, id: &str) -> Option<&ResolvedUnit> {
        self.index.get(id).map(|&i| &self.units[i])
    }

    /// `sortedDeps` of a unit, least dependent first.
    pub fn sorted_depends(&self, id: &str) -> Option<&[String]> {
        self.get(id).map(|u| u.sorted_depends.as_slice())
    }

    /// Units that nobody lists as a subdir, in id order.
    pub fn top_level(&self) -> impl Iterator<Item = &ResolvedUnit> {
        self.top_level.iter().map(|&i| &self.units[i])
    }

    /// Sub-units of a unit, in listed order.
    pub fn children(&self, id: &str) -> Vec<&ResolvedUnit> {
        self.get(id)
            .map(|u| u.children.iter().filter_map(|c| self.get(c)).collect())
            .unwrap_or_default()
    }

    /// For a group: each child's subdir key mapped to the sibling keys it builds after.
    pub fn group_depends(&self, group: &str) -> Option<BTreeMap<String, BTreeSet<String>>> {
        self.get(group)?;
        Some(
            self.children(group)
                .into_iter()
                .map(|c| (c.subdir_key.clone(), c.group_depends.clone()))
                .collect(),
        )
    }

    /// Like [`Resolution::group_depends`] for the implicit distribution root.
    pub fn top_level_depends(&self) -> BTreeMap<String, BTreeSet<String>> {
        self.top_level()
            .map(|u| (u.subdir_key.clone(), u.group_depends.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

/// Resolve every unit of `registry`.
///
/// Either every unit resolves or every problem found is returned.
pub fn resolve(registry: &Registry) -> Result<Resolution, ResolveErrors> {
    let _span = tracing::debug_span!("resolve", units = registry.len()).entered();
    let mut errors = Vec::new();

    let graph = DependencyGraph::build(registry);
    let closures = ClosureResolver::new(registry, &graph)
        .run()
        .map_err(|e| errors.extend(e))
        .ok();
    let hierarchy = Hierarchy::build(registry)
        .map_err(|e| errors.extend(e))
        .ok();

    let (Some(closures), Some(hierarchy)) = (closures, hierarchy) else {
        return Err(ResolveErrors { errors });
    };
    tracing::debug!("closures and hierarchy built");

    let mut sorted = Vec::with_capacity(registry.len());
    for (idx, unit) in registry.iter() {
        match order::sorted_dependencies(&graph, &closures, idx) {
            Ok(order) => sorted.push(order),
            Err(rest) => {
                let mut path: Vec<String> =
                    rest.iter().map(|&i| registry.get(i).id.clone()).collect();
                path.push(path[0].clone());
                errors.push(ResolveError::Cycle {
                    unit: unit.id.clone(),
                    path,
                });
                sorted.push(Vec::new());
            }
        }
    }

    let inferred = subdirs::infer(registry, &hierarchy, &closures)
        .map_err(|e| errors.extend(e))
        .ok();

    match inferred {
        Some(inferred) if errors.is_empty() => {
            let resolution = assemble(registry, &closures, &hierarchy, &inferred, sorted);
            tracing::debug!("resolved {} units", resolution.len());
            Ok(resolution)
        }
        _ => Err(ResolveErrors { errors }),
    }
}

fn assemble(
    registry: &Registry,
    closures: &Closures,
    hierarchy: &Hierarchy,
    inferred: &SubdirDepends,
    sorted: Vec<Vec<UnitIdx>>,
) -> Resolution {
    let id = |i: UnitIdx| registry.get(i).id.clone();

    let units: Vec<ResolvedUnit> = registry
        .iter()
        .zip(sorted)
        .map(|((idx, unit), order)| ResolvedUnit {
            id: unit.id.clone(),
            kind: unit.kind,
            parent: hierarchy.parent(idx).map(id),
            subdir: hierarchy.subdir(idx).to_string(),
            subdir_key: hierarchy.subdir_key(idx).to_string(),
            children: hierarchy.children(idx).iter().map(|&c| id(c)).collect(),
            sorted_depends: order.into_iter().map(id).collect(),
            external: closures.external_of(idx).iter().cloned().collect(),
            group_depends: inferred
                .of(idx)
                .iter()
                .map(|&s| hierarchy.subdir_key(s).to_string())
                .collect(),
        })
        .collect();

    let index = units
        .iter()
        .enumerate()
        .map(|(i, u)| (u.id.clone(), i))
        .collect();

    Resolution {
        units,
        index,
        top_level: hierarchy.top_level(),
    }
}
