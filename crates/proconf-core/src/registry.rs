//! The project registry: an immutable snapshot of every declared unit.

use std::collections::{BTreeMap, HashMap};

use proconf_util::errors::ProconfError;

use crate::unit::{Unit, UnitDecl};

/// Stable index of a unit inside a [`Registry`].
pub type UnitIdx = usize;

/// All units of a distribution, stored as an arena sorted by id.
///
/// Because the arena is sorted, comparing two indices orders their ids
/// lexicographically. The resolver relies on this for deterministic
/// tie-breaking.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    units: Vec<Unit>,
    index: HashMap<String, UnitIdx>,
}

impl Registry {
    /// Build a registry from a list of units. Fails on duplicate ids.
    pub fn new(units: impl IntoIterator<Item = Unit>) -> Result<Self, ProconfError> {
        let mut sorted: BTreeMap<String, Unit> = BTreeMap::new();
        for unit in units {
            if sorted.contains_key(&unit.id) {
                return Err(ProconfError::Manifest {
                    message: format!("duplicate unit id '{}'", unit.id),
                });
            }
            sorted.insert(unit.id.clone(), unit);
        }
        Ok(Self::from_sorted(sorted))
    }

    /// Build a registry from manifest declarations keyed by id.
    pub fn from_decls(decls: BTreeMap<String, UnitDecl>) -> Self {
        let sorted = decls
            .into_iter()
            .map(|(id, decl)| (id.clone(), Unit::from_decl(id, decl)))
            .collect();
        Self::from_sorted(sorted)
    }

    fn from_sorted(sorted: BTreeMap<String, Unit>) -> Self {
        let units: Vec<Unit> = sorted.into_values().collect();
        let index = units
            .iter()
            .enumerate()
            .map(|(idx, unit)| (unit.id.clone(), idx))
            .collect();
        Self { units, index }
    }

    /// Look up a unit index by id.
    pub fn find(&self, id: &str) -> Option<UnitIdx> {
        self.index.get(id).copied()
    }

    /// Look up a unit by id.
    pub fn unit(&self, id: &str) -> Option<&Unit> {
        self.find(id).map(|idx| &self.units[idx])
    }

    /// The unit at `idx`. Panics if `idx` did not come from this registry.
    pub fn get(&self, idx: UnitIdx) -> &Unit {
        &self.units[idx]
    }

    pub fn iter(&self) -> impl Iterator<Item = (UnitIdx, &Unit)> {
        self.units.iter().enumerate()
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}
