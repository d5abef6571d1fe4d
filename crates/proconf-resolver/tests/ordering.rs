//! Invariants checked over pseudo-random acyclic registries.

use std::collections::BTreeSet;

use proconf_core::registry::Registry;
use proconf_core::unit::{Unit, UnitKind};
use proconf_resolver::resolver::resolve;

/// Small linear congruential generator so the registries are reproducible.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    fn below(&mut self, n: u64) -> u64 {
        self.next() % n
    }
}

/// Unit `i` may only depend on units with a larger index, so the graph is acyclic.
fn random_dag(seed: u64, size: usize) -> Vec<Unit> {
    let mut rng = Lcg(seed);
    (0..size)
        .map(|i| {
            let depends: Vec<String> = (i + 1..size)
                .filter(|_| rng.below(4) == 0)
                .map(|j| format!("u{j:03}"))
                .collect();
            Unit::new(format!("u{i:03}"), UnitKind::Library).with_depends(depends)
        })
        .collect()
}

fn reachable(units: &[Unit], from: usize) -> BTreeSet<String> {
    let mut seen = BTreeSet::new();
    let mut stack = units[from].depends.clone();
    while let Some(id) = stack.pop() {
        if seen.insert(id.clone()) {
            let idx: usize = id[1..].parse().unwrap();
            stack.extend(units[idx].depends.iter().cloned());
        }
    }
    seen
}

#[test]
fn test_closure_matches_brute_force_reachability() {
    for seed in 0..20 {
        let units = random_dag(seed, 30);
        let registry = Registry::new(units.clone()).unwrap();
        let resolution = resolve(&registry).unwrap();

        for (i, unit) in units.iter().enumerate() {
            let sorted = resolution.sorted_depends(&unit.id).unwrap();
            let closure: BTreeSet<String> = sorted.iter().cloned().collect();
            assert_eq!(closure.len(), sorted.len(), "duplicates for {}", unit.id);
            assert_eq!(closure, reachable(&units, i), "seed {seed}, unit {}", unit.id);
        }
    }
}

#[test]
fn test_sorted_depends_put_dependencies_first() {
    for seed in 100..120 {
        let units = random_dag(seed, 25);
        let registry = Registry::new(units.clone()).unwrap();
        let resolution = resolve(&registry).unwrap();

        for unit in resolution.units() {
            let position = |id: &str| unit.sorted_depends.iter().position(|d| d == id);
            for v in &unit.sorted_depends {
                let pv = position(v).unwrap();
                for w in &resolution.get(v).unwrap().sorted_depends {
                    let pw = position(w).unwrap();
                    assert!(pw < pv, "{w} must precede {v} in {}", unit.id);
                }
            }
        }
    }
}

#[test]
fn test_incomparable_dependencies_are_ordered_by_id() {
    let lib = |id: &str, deps: &[&str]| {
        Unit::new(id, UnitKind::Library).with_depends(deps.iter().copied())
    };
    // declaration order deliberately differs from id order
    let registry = Registry::new([
        lib("app", &["zlib", "gui", "png", "core"]),
        lib("gui", &["core", "mesa"]),
        lib("png", &["zlib"]),
        lib("zlib", &[]),
        lib("core", &[]),
        lib("mesa", &[]),
    ])
    .unwrap();
    let resolution = resolve(&registry).unwrap();
    assert_eq!(
        resolution.sorted_depends("app").unwrap(),
        ["core", "mesa", "gui", "zlib", "png"]
    );
    assert_eq!(resolution.sorted_depends("gui").unwrap(), ["core", "mesa"]);
}
