//! Domain model for the planets collection.
//!
//! # Responsibility
//! - Define the record shape shared by store, resolver and dispatch layers.
//! - Own blank-value normalization for request parameters.
//!
//! # Invariants
//! - Every stored planet is identified by a stable `PlanetId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod planet;
