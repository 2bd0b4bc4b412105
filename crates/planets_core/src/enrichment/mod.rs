//! Film appearance enrichment backed by a SWAPI-compatible service.
//!
//! # Responsibility
//! - Look up how many films a planet appears in, by display name.
//! - Own percent-encoding of the name for transport.
//!
//! # Invariants
//! - A non-success response is a hard error, never "zero appearances".
//! - Only an exact name match among the search results counts.
//! - No retry and no caching; every call hits the remote service.

use log::{debug, error};
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{Duration, Instant};

/// Enrichment failure. Always fatal for the request that triggered it.
#[derive(Debug)]
pub enum EnrichmentError {
    /// Remote service answered with a non-success status.
    Status(u16),
    /// Connection, timeout or body read failure.
    Transport(String),
    /// Response body did not match the expected payload shape.
    Payload(String),
}

impl Display for EnrichmentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Status(code) => write!(f, "enrichment service returned status {code}"),
            Self::Transport(message) => write!(f, "enrichment transport error: {message}"),
            Self::Payload(message) => write!(f, "invalid enrichment payload: {message}"),
        }
    }
}

impl Error for EnrichmentError {}

/// Read-only lookup of a planet's film appearance count.
pub trait EnrichmentClient {
    fn appearances(&self, name: &str) -> Result<u32, EnrichmentError>;
}

impl<T: EnrichmentClient + ?Sized> EnrichmentClient for &T {
    fn appearances(&self, name: &str) -> Result<u32, EnrichmentError> {
        (**self).appearances(name)
    }
}

/// Search page returned by `GET /planets/?search=`.
#[derive(Debug, Clone, Deserialize)]
pub struct PlanetSearchPage {
    pub count: u64,
    #[serde(default)]
    pub results: Vec<PlanetSearchHit>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlanetSearchHit {
    pub name: String,
    #[serde(default)]
    pub films: Vec<serde_json::Value>,
}

/// Picks the film count of the first exact name match, or 0.
pub fn count_appearances(page: &PlanetSearchPage, name: &str) -> u32 {
    if page.count == 0 {
        return 0;
    }

    page.results
        .iter()
        .find(|hit| hit.name == name)
        .map_or(0, |hit| u32::try_from(hit.films.len()).unwrap_or(u32::MAX))
}

/// Blocking HTTP client for a SWAPI-compatible planets endpoint.
pub struct SwapiClient {
    agent: ureq::Agent,
    base_url: String,
}

impl SwapiClient {
    /// Builds a client for `base_url` (e.g. `https://swapi.dev/api`).
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build();
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self {
            agent: ureq::Agent::new_with_config(config),
            base_url,
        }
    }

    /// Returns the search URL for `name`, percent-encoding every reserved byte.
    pub fn search_url(&self, name: &str) -> String {
        format!(
            "{}/planets/?search={}",
            self.base_url,
            urlencoding::encode(name)
        )
    }

    fn fetch_page(&self, url: &str) -> Result<PlanetSearchPage, EnrichmentError> {
        let mut response = self.agent.get(url).call().map_err(|err| match err {
            ureq::Error::StatusCode(code) => EnrichmentError::Status(code),
            other => EnrichmentError::Transport(other.to_string()),
        })?;

        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|err| EnrichmentError::Transport(format!("failed to read body: {err}")))?;

        serde_json::from_str(&body).map_err(|err| EnrichmentError::Payload(err.to_string()))
    }
}

impl EnrichmentClient for SwapiClient {
    fn appearances(&self, name: &str) -> Result<u32, EnrichmentError> {
        let started_at = Instant::now();
        let url = self.search_url(name);

        match self.fetch_page(&url) {
            Ok(page) => {
                let appearances = count_appearances(&page, name);
                debug!(
                    "event=enrichment_lookup module=enrichment status=ok duration_ms={} candidates={} appearances={}",
                    started_at.elapsed().as_millis(),
                    page.results.len(),
                    appearances
                );
                Ok(appearances)
            }
            Err(err) => {
                error!(
                    "event=enrichment_lookup module=enrichment status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }
}
