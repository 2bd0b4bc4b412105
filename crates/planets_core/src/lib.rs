//! Core logic for the planets service.
//! Record storage, enrichment and request resolution live here; front ends
//! only parse input and render `ApiResponse`s.

pub mod api;
pub mod config;
pub mod db;
pub mod enrichment;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use api::{dispatch, Action, ApiResponse, Body, Method, Status};
pub use config::ServiceConfig;
pub use enrichment::{EnrichmentClient, EnrichmentError, SwapiClient};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::planet::{
    CreateParams, DeleteParams, EnrichedPlanet, NewPlanet, Planet, PlanetId, PlanetMatch,
    PlanetPatch, PlanetValidationError, RequestParams, UpdateParams, ViewParams,
};
pub use repo::planet_repo::{PlanetStore, RepoError, RepoResult, SqlitePlanetStore};
pub use service::planet_service::{Listing, Outcome, PlanetService, ServiceError, ServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
