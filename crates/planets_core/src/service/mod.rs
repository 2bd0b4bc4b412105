//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store and enrichment calls into request-level operations.
//! - Keep dispatch layers decoupled from storage details.

pub mod planet_service;
