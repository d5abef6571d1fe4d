//! Build dependency resolution engine.
//!
//! Given an immutable [`proconf_core::registry::Registry`], computes the
//! transitive closure of every unit's dependencies, a deterministic link
//! order for each closure, the unit hierarchy, and the sibling-level build
//! dependencies of every group. The engine performs no I/O.

pub mod closure;
pub mod error;
pub mod graph;
pub mod hierarchy;
pub mod link;
pub mod order;
pub mod resolver;
pub mod subdirs;
