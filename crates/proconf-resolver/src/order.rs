//! Deterministic link order for a unit's closure.
//!
//! "Depends on" is only a partial order, so the closure is sorted with Kahn's
//! algorithm over the induced sub-graph rather than with a comparator. A unit
//! is emitted once all of its in-set dependencies have been emitted; among
//! ready units the lowest registry index, i.e. the lexicographically smallest
//! id, goes first.
//!
//! The result is least dependent first: for `v, w` in the set, if `v` depends
//! on `w` then `w` comes before `v`. Single-pass linkers want the reverse.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet, BinaryHeap};

use proconf_core::registry::UnitIdx;

use crate::closure::Closures;
use crate::graph::DependencyGraph;

/// Topologically order `members`, dependencies first.
///
/// `deps_of` yields the direct dependencies of a member; dependencies outside
/// `members` are ignored. On a cycle, returns the members that could not be
/// ordered.
pub fn topological_order<F, I>(
    members: &BTreeSet<UnitIdx>,
    deps_of: F,
) -> Result<Vec<UnitIdx>, BTreeSet<UnitIdx>>
where
    F: Fn(UnitIdx) -> I,
    I: IntoIterator<Item = UnitIdx>,
{
    let mut pending: BTreeMap<UnitIdx, usize> = BTreeMap::new();
    let mut dependents: BTreeMap<UnitIdx, Vec<UnitIdx>> = BTreeMap::new();

    for &member in members {
        let deps: BTreeSet<UnitIdx> = deps_of(member)
            .into_iter()
            .filter(|d| members.contains(d))
            .collect();
        pending.insert(member, deps.len());
        for dep in deps {
            dependents.entry(dep).or_default().push(member);
        }
    }

    let mut ready: BinaryHeap<Reverse<UnitIdx>> = pending
        .iter()
        .filter(|&(_, &count)| count == 0)
        .map(|(&member, _)| Reverse(member))
        .collect();

    let mut ordered = Vec::with_capacity(members.len());
    while let Some(Reverse(next)) = ready.pop() {
        ordered.push(next);
        pending.remove(&next);
        for &dependent in dependents.get(&next).into_iter().flatten() {
            if let Some(count) = pending.get_mut(&dependent) {
                *count -= 1;
                if *count == 0 {
                    ready.push(Reverse(dependent));
                }
            }
        }
    }

    if pending.is_empty() {
        Ok(ordered)
    } else {
        Err(pending.into_keys().collect())
    }
}

/// `sortedDeps` of `unit`: its closure in link order, least dependent first.
pub fn sorted_dependencies(
    graph: &DependencyGraph,
    closures: &Closures,
    unit: UnitIdx,
) -> Result<Vec<UnitIdx>, BTreeSet<UnitIdx>> {
    topological_order(closures.of(unit), |member| graph.dependencies_of(member))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::closure::ClosureResolver;
    use proconf_core::registry::Registry;
    use proconf_core::unit::{Unit, UnitKind};

    fn sorted_ids(units: Vec<Unit>, of: &str) -> Vec<String> {
        let registry = Registry::new(units).unwrap();
        let graph = DependencyGraph::build(&registry);
        let closures = ClosureResolver::new(&registry, &graph).run().unwrap();
        let idx = registry.find(of).unwrap();
        sorted_dependencies(&graph, &closures, idx)
            .unwrap()
            .into_iter()
            .map(|i| registry.get(i).id.clone())
            .collect()
    }

    fn lib(id: &str, deps: &[&str]) -> Unit {
        Unit::new(id, UnitKind::Library).with_depends(deps.iter().copied())
    }

    #[test]
    fn chain_is_least_dependent_first() {
        let order = sorted_ids(
            vec![
                lib("app", &["gui"]),
                lib("gui", &["core"]),
                lib("core", &["base"]),
                lib("base", &[]),
            ],
            "app",
        );
        assert_eq!(order, vec!["base", "core", "gui"]);
    }

    #[test]
    fn incomparable_units_are_ordered_by_id() {
        let order = sorted_ids(
            vec![
                lib("app", &["zeta", "alpha", "mid"]),
                lib("zeta", &[]),
                lib("alpha", &[]),
                lib("mid", &[]),
            ],
            "app",
        );
        assert_eq!(order, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn dependency_beats_lexicographic_order() {
        // "a" sorts first but depends on "z"
        let order = sorted_ids(
            vec![lib("app", &["a"]), lib("a", &["z"]), lib("z", &[])],
            "app",
        );
        assert_eq!(order, vec!["z", "a"]);
    }

    #[test]
    fn diamond() {
        let order = sorted_ids(
            vec![
                lib("app", &["left", "right"]),
                lib("left", &["base"]),
                lib("right", &["base"]),
                lib("base", &[]),
            ],
            "app",
        );
        assert_eq!(order, vec!["base", "left", "right"]);
    }

    #[test]
    fn cycle_reports_unordered_members() {
        let members = BTreeSet::from([0, 1, 2]);
        let deps = |i: UnitIdx| match i {
            0 => vec![1],
            1 => vec![0],
            _ => vec![],
        };
        let rest = topological_order(&members, deps).unwrap_err();
        assert_eq!(rest, BTreeSet::from([0, 1]));
    }
}
