//! Subdir dependency inference.
//!
//! Build tools that orchestrate per directory need to know, inside each
//! group, which subdirs must be built before which. That is derived from the
//! unit-level closures: for `u` depending on `v`, walk both ancestor chains
//! down from the top until they part ways. The two units where they part are
//! siblings under the lowest common ancestor, and the one leading to `u` must
//! be built after the one leading to `v`.
//!
//! ```text
//! <root>                      u = libs/Gui/Widgets, v = libs/Core
//!   |-- libs    <- LCA        A = [<root>, libs, Gui, Widgets]
//!         |-- Core            B = [<root>, libs, Core]
//!         |-- Gui             =>  Gui depends on Core
//! ```
//!
//! Top-level units share the implicit distribution root as common ancestor.

use std::collections::{BTreeSet, HashMap};

use petgraph::algo::tarjan_scc;
use petgraph::graph::DiGraph;
use proconf_core::registry::{Registry, UnitIdx};

use crate::closure::Closures;
use crate::error::ResolveError;
use crate::hierarchy::Hierarchy;

/// Inferred sibling edges: `depends[u]` holds the siblings `u` builds after.
#[derive(Debug, Clone)]
pub struct SubdirDepends {
    depends: Vec<BTreeSet<UnitIdx>>,
}

impl SubdirDepends {
    /// Siblings that must be built before `idx`.
    pub fn of(&self, idx: UnitIdx) -> &BTreeSet<UnitIdx> {
        &self.depends[idx]
    }
}

/// Where two ancestor chains part.
enum Split {
    /// `A[k] -> B[k]`: distinct siblings.
    Siblings(UnitIdx, UnitIdx),
    /// `u` contains `v`: nothing to order between subdirs.
    Internal,
    /// `v` contains `u`.
    Ancestor,
}

fn split(a: &[UnitIdx], b: &[UnitIdx]) -> Split {
    let shared = a.iter().zip(b).take_while(|(x, y)| x == y).count();
    match (a.get(shared), b.get(shared)) {
        (Some(&from), Some(&to)) => Split::Siblings(from, to),
        (None, _) => Split::Internal,
        (Some(_), None) => Split::Ancestor,
    }
}

/// Infer sibling dependencies for every group, then reject sibling cycles.
pub fn infer(
    registry: &Registry,
    hierarchy: &Hierarchy,
    closures: &Closures,
) -> Result<SubdirDepends, Vec<ResolveError>> {
    let chains: Vec<Vec<UnitIdx>> = (0..registry.len())
        .map(|idx| hierarchy.ancestor_chain(idx))
        .collect();
    let mut depends = vec![BTreeSet::new(); registry.len()];
    let mut errors = Vec::new();

    for (unit, _) in registry.iter() {
        for &dep in closures.of(unit) {
            match split(&chains[unit], &chains[dep]) {
                Split::Siblings(from, to) => {
                    if depends[from].insert(to) {
                        tracing::trace!(
                            "{} -> {} (from {} -> {})",
                            registry.get(from).id,
                            registry.get(to).id,
                            registry.get(unit).id,
                            registry.get(dep).id
                        );
                    }
                }
                Split::Internal => {}
                Split::Ancestor => errors.push(ResolveError::AncestorDependency {
                    unit: registry.get(unit).id.clone(),
                    ancestor: registry.get(dep).id.clone(),
                }),
            }
        }
    }

    let inferred = SubdirDepends { depends };
    for (idx, group) in registry.iter() {
        errors.extend(sibling_cycles(
            &group.id,
            hierarchy.children(idx),
            hierarchy,
            &inferred,
        ));
    }
    errors.extend(sibling_cycles(
        "",
        &hierarchy.top_level(),
        hierarchy,
        &inferred,
    ));

    if errors.is_empty() {
        Ok(inferred)
    } else {
        Err(errors)
    }
}

/// Strongly connected sibling sets with more than one member.
fn sibling_cycles(
    group: &str,
    siblings: &[UnitIdx],
    hierarchy: &Hierarchy,
    inferred: &SubdirDepends,
) -> Vec<ResolveError> {
    if siblings.len() < 2 {
        return Vec::new();
    }

    let mut graph: DiGraph<UnitIdx, ()> = DiGraph::new();
    let nodes: HashMap<UnitIdx, _> = siblings
        .iter()
        .map(|&s| (s, graph.add_node(s)))
        .collect();
    for &sibling in siblings {
        for to in inferred.of(sibling) {
            if let Some(&target) = nodes.get(to) {
                graph.add_edge(nodes[&sibling], target, ());
            }
        }
    }

    let mut cycles: Vec<Vec<String>> = tarjan_scc(&graph)
        .into_iter()
        .filter(|scc| scc.len() > 1)
        .map(|scc| {
            let mut keys: Vec<String> = scc
                .into_iter()
                .map(|n| hierarchy.subdir_key(graph[n]).to_string())
                .collect();
            keys.sort();
            keys
        })
        .collect();
    cycles.sort();

    cycles
        .into_iter()
        .map(|keys| ResolveError::GroupCycle {
            group: group.to_string(),
            keys,
        })
        .collect()
}
