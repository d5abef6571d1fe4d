//! Transitive closure of unit dependencies with cycle detection.
//!
//! The traversal is an iterative depth-first search over an explicit stack of
//! frames, with a tri-color [`ClosureState`] per unit stored in an arena
//! indexed like the registry. Each unit is entered at most once; finished
//! units hand out their memoized closure.
//!
//! Failures do not stop the pass. A unit on a cycle, a unit with an unknown
//! dependency, and every unit depending on one of those is *poisoned*: it gets
//! no closure, and the pass goes on so that every problem is reported.

use std::collections::{BTreeSet, HashSet};

use proconf_core::registry::{Registry, UnitIdx};

use crate::error::ResolveError;
use crate::graph::DependencyGraph;

/// Traversal state of a unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ClosureState {
    #[default]
    Unvisited,
    InProgress,
    Done,
}

#[derive(Debug, Default)]
struct Slot {
    state: ClosureState,
    poisoned: bool,
    closure: BTreeSet<UnitIdx>,
    external: BTreeSet<String>,
}

struct Frame {
    unit: UnitIdx,
    deps: Vec<UnitIdx>,
    next: usize,
}

/// Closures of every unit of a registry, indexed like the registry.
#[derive(Debug, Clone)]
pub struct Closures {
    units: Vec<BTreeSet<UnitIdx>>,
    external: Vec<BTreeSet<String>>,
}

impl Closures {
    /// Every unit transitively reachable from `idx`.
    pub fn of(&self, idx: UnitIdx) -> &BTreeSet<UnitIdx> {
        &self.units[idx]
    }

    /// External modules used by `idx` or anything it depends on.
    pub fn external_of(&self, idx: UnitIdx) -> &BTreeSet<String> {
        &self.external[idx]
    }
}

/// Computes [`Closures`] for a registry in one pass.
pub struct ClosureResolver<'a> {
    registry: &'a Registry,
    graph: &'a DependencyGraph,
    slots: Vec<Slot>,
    errors: Vec<ResolveError>,
    reported_cycles: HashSet<Vec<UnitIdx>>,
}

impl<'a> ClosureResolver<'a> {
    pub fn new(registry: &'a Registry, graph: &'a DependencyGraph) -> Self {
        let slots = (0..registry.len()).map(|_| Slot::default()).collect();
        Self {
            registry,
            graph,
            slots,
            errors: Vec::new(),
            reported_cycles: HashSet::new(),
        }
    }

    /// Resolve every unit, visiting roots in id order.
    ///
    /// Returns every cycle and unknown dependency found if any unit is poisoned.
    pub fn run(mut self) -> Result<Closures, Vec<ResolveError>> {
        for idx in 0..self.registry.len() {
            if self.slots[idx].state == ClosureState::Unvisited {
                self.visit(idx);
            }
        }

        if !self.errors.is_empty() {
            let poisoned = self.slots.iter().filter(|s| s.poisoned).count();
            tracing::debug!(
                "closure pass failed: {} error(s), {poisoned} unit(s) invalidated",
                self.errors.len()
            );
            return Err(self.errors);
        }

        let (units, external) = self
            .slots
            .into_iter()
            .map(|slot| (slot.closure, slot.external))
            .unzip();
        Ok(Closures { units, external })
    }

    fn visit(&mut self, root: UnitIdx) {
        let mut stack = Vec::new();
        self.enter(root, &mut stack);

        while let Some(frame) = stack.last_mut() {
            if let Some(&dep) = frame.deps.get(frame.next) {
                frame.next += 1;
                let unit = frame.unit;
                match self.slots[dep].state {
                    ClosureState::Unvisited => self.enter(dep, &mut stack),
                    ClosureState::InProgress => self.report_cycle(&stack, dep),
                    ClosureState::Done => {
                        if self.slots[dep].poisoned {
                            self.slots[unit].poisoned = true;
                        }
                    }
                }
                continue;
            }

            let unit = frame.unit;
            stack.pop();
            self.finish(unit);
            if self.slots[unit].poisoned {
                if let Some(parent) = stack.last() {
                    self.slots[parent.unit].poisoned = true;
                }
            }
        }
    }

    fn enter(&mut self, idx: UnitIdx, stack: &mut Vec<Frame>) {
        let unit = self.registry.get(idx);
        tracing::trace!("entering {}", unit.id);
        self.slots[idx].state = ClosureState::InProgress;

        for missing in self.graph.missing_of(idx) {
            self.errors.push(ResolveError::UnknownDependency {
                unit: unit.id.clone(),
                missing: missing.clone(),
            });
            self.slots[idx].poisoned = true;
        }

        stack.push(Frame {
            unit: idx,
            deps: self.graph.dependencies_of(idx),
            next: 0,
        });
    }

    fn finish(&mut self, idx: UnitIdx) {
        self.slots[idx].state = ClosureState::Done;
        if self.slots[idx].poisoned {
            return;
        }

        let mut closure = BTreeSet::new();
        let mut external: BTreeSet<String> =
            self.registry.get(idx).external.iter().cloned().collect();
        for dep in self.graph.dependencies_of(idx) {
            closure.insert(dep);
            closure.extend(self.slots[dep].closure.iter().copied());
            external.extend(self.slots[dep].external.iter().cloned());
        }

        let slot = &mut self.slots[idx];
        slot.closure = closure;
        slot.external = external;
    }

    /// `dep` is on the stack: the frames from `dep` to the top form a cycle.
    fn report_cycle(&mut self, stack: &[Frame], dep: UnitIdx) {
        let start = stack
            .iter()
            .position(|f| f.unit == dep)
            .unwrap_or_default();
        let members: Vec<UnitIdx> = stack[start..].iter().map(|f| f.unit).collect();
        for &member in &members {
            self.slots[member].poisoned = true;
        }

        let mut key = members.clone();
        key.sort_unstable();
        if !self.reported_cycles.insert(key) {
            return;
        }

        let mut path: Vec<String> = members
            .iter()
            .map(|&m| self.registry.get(m).id.clone())
            .collect();
        let unit = self.registry.get(dep).id.clone();
        path.push(unit.clone());
        tracing::debug!("cycle detected: {}", path.join(" -> "));
        self.errors.push(ResolveError::Cycle { unit, path });
    }
}
