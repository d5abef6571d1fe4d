//! Core data types for proconf.
//!
//! This crate defines the input side of a resolution run: build units and
//! their declared relationships, the immutable [`registry::Registry`] the
//! resolver consumes, the `Units.toml` manifest it is loaded from, and the
//! user configuration.
//!
//! This crate is intentionally free of graph algorithms.

pub mod config;
pub mod manifest;
pub mod registry;
pub mod unit;
