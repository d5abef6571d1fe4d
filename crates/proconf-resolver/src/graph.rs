//! Unit dependency graph construction.

use std::collections::BTreeSet;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use proconf_core::registry::{Registry, UnitIdx};

/// The registry's `depends` relation as a directed graph.
///
/// Node `i` is registry unit `i`; an edge `u -> v` means `u` depends on `v`.
/// Dependency ids that name no registered unit are kept aside per unit so the
/// closure pass can report them where it meets them.
pub struct DependencyGraph {
    graph: DiGraph<UnitIdx, ()>,
    missing: Vec<Vec<String>>,
}

impl DependencyGraph {
    pub fn build(registry: &Registry) -> Self {
        let mut graph = DiGraph::with_capacity(registry.len(), 0);
        for (idx, _) in registry.iter() {
            graph.add_node(idx);
        }

        let mut missing = vec![Vec::new(); registry.len()];
        for (idx, unit) in registry.iter() {
            let mut seen = BTreeSet::new();
            for dep in &unit.depends {
                if !seen.insert(dep.as_str()) {
                    continue;
                }
                match registry.find(dep) {
                    Some(target) => {
                        graph.add_edge(NodeIndex::new(idx), NodeIndex::new(target), ());
                    }
                    None => missing[idx].push(dep.clone()),
                }
            }
        }

        tracing::trace!(
            "dependency graph: {} units, {} edges",
            graph.node_count(),
            graph.edge_count()
        );
        Self { graph, missing }
    }

    /// Direct dependencies of a unit, in declaration order.
    pub fn dependencies_of(&self, idx: UnitIdx) -> Vec<UnitIdx> {
        // petgraph walks outgoing edges newest first
        let mut deps: Vec<UnitIdx> = self
            .graph
            .neighbors_directed(NodeIndex::new(idx), Direction::Outgoing)
            .map(|n| self.graph[n])
            .collect();
        deps.reverse();
        deps
    }

    /// Declared dependency ids of `idx` that are not registered.
    pub fn missing_of(&self, idx: UnitIdx) -> &[String] {
        &self.missing[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proconf_core::unit::{Unit, UnitKind};

    fn lib(id: &str, deps: &[&str]) -> Unit {
        Unit::new(id, UnitKind::Library).with_depends(deps.iter().copied())
    }

    #[test]
    fn dependencies_keep_declaration_order() {
        let registry = Registry::new([
            lib("a", &["d", "b", "c"]),
            lib("b", &[]),
            lib("c", &[]),
            lib("d", &[]),
        ])
        .unwrap();
        let graph = DependencyGraph::build(&registry);
        let a = registry.find("a").unwrap();
        let ids: Vec<&str> = graph
            .dependencies_of(a)
            .into_iter()
            .map(|i| registry.get(i).id.as_str())
            .collect();
        assert_eq!(ids, vec!["d", "b", "c"]);
    }

    #[test]
    fn duplicate_dependencies_collapse() {
        let registry = Registry::new([lib("a", &["b", "b"]), lib("b", &[])]).unwrap();
        let graph = DependencyGraph::build(&registry);
        assert_eq!(graph.dependencies_of(0), vec![1]);
    }

    #[test]
    fn unknown_dependencies_are_kept_aside() {
        let registry = Registry::new([lib("a", &["b", "ghost"]), lib("b", &[])]).unwrap();
        let graph = DependencyGraph::build(&registry);
        assert_eq!(graph.dependencies_of(0), vec![1]);
        assert_eq!(graph.missing_of(0).to_vec(), vec!["ghost".to_string()]);
        assert!(graph.missing_of(1).is_empty());
    }
}
