//! Record store abstraction and persistence implementation.
//!
//! # Responsibility
//! - Define the data access contract used by the resolver service.
//! - Isolate SQLite query details from business orchestration.
//!
//! # Invariants
//! - Storage failures surface as `RepoError`, never as "not found".

pub mod planet_repo;
