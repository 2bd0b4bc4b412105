//! Planet request resolution service.
//!
//! # Responsibility
//! - Resolve typed request params to zero-or-one stored planet.
//! - Enforce name uniqueness, the required `name` field and partial-merge
//!   update semantics.
//! - Enrich every returned planet with its film appearance count.
//!
//! # Invariants
//! - `view` consults the name first; the id is only a fallback.
//! - `update` never renames; `name` is the lookup key only.
//! - Expected outcomes (`NotFound`, validation) are values, not errors.
//! - Storage and enrichment failures abort the whole operation.

use crate::enrichment::{EnrichmentClient, EnrichmentError};
use crate::model::planet::{
    is_blank, parse_planet_id, CreateParams, DeleteParams, EnrichedPlanet, NewPlanet, Planet,
    PlanetMatch, PlanetValidationError, UpdateParams, ViewParams,
};
use crate::repo::planet_repo::{PlanetStore, RepoError, RepoResult};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Infrastructure failure while resolving a request.
#[derive(Debug)]
pub enum ServiceError {
    /// Storage-layer failure.
    Repo(RepoError),
    /// Enrichment service failure.
    Enrichment(EnrichmentError),
    /// Write succeeded but the read-back did not find the record.
    InconsistentState(&'static str),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::Enrichment(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent planet state: {details}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Enrichment(err) => Some(err),
            Self::InconsistentState(_) => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<EnrichmentError> for ServiceError {
    fn from(value: EnrichmentError) -> Self {
        Self::Enrichment(value)
    }
}

/// Expected result of a single-record operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Success(T),
    NotFound,
    Invalid(PlanetValidationError),
}

/// Result of `list`: either enriched planets or an explicit empty signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing {
    Planets(Vec<EnrichedPlanet>),
    Empty,
}

/// Resolver over an injected store and enrichment client.
pub struct PlanetService<S: PlanetStore, E: EnrichmentClient> {
    store: S,
    enrichment: E,
}

impl<S: PlanetStore, E: EnrichmentClient> PlanetService<S, E> {
    pub fn new(store: S, enrichment: E) -> Self {
        Self { store, enrichment }
    }

    /// Lists every stored planet, enriched, in storage order.
    pub fn list(&self) -> ServiceResult<Listing> {
        let planets = self.store.project_all()?;
        if planets.is_empty() {
            info!("event=planet_list module=service status=empty");
            return Ok(Listing::Empty);
        }

        let enriched = planets
            .into_iter()
            .map(|planet| self.enrich(planet))
            .collect::<ServiceResult<Vec<_>>>()?;
        info!(
            "event=planet_list module=service status=ok count={}",
            enriched.len()
        );
        Ok(Listing::Planets(enriched))
    }

    /// Finds one planet by name, falling back to id.
    ///
    /// # Contract
    /// - A blank name skips the name lookup.
    /// - A malformed id is treated as absent, not as an error.
    pub fn view(&self, params: &ViewParams) -> ServiceResult<Outcome<EnrichedPlanet>> {
        let planet = match self.find_by_name(params.name.as_deref())? {
            Some(planet) => Some(planet),
            None => self.find_by_id(params.id.as_deref())?,
        };

        match planet {
            Some(planet) => Ok(Outcome::Success(self.enrich(planet)?)),
            None => {
                info!("event=planet_view module=service status=not_found");
                Ok(Outcome::NotFound)
            }
        }
    }

    /// Creates a planet and returns the stored, enriched record.
    ///
    /// # Contract
    /// - An existing planet with the same name rejects with `AlreadyExists`.
    /// - A missing or blank name rejects with `MissingField("name")`.
    /// - Rejections never touch storage.
    pub fn create(&self, params: &CreateParams) -> ServiceResult<Outcome<EnrichedPlanet>> {
        if self.find_by_name(params.name.as_deref())?.is_some() {
            return Ok(Self::reject_duplicate(params.name.as_deref()));
        }

        let Some(name) = params.name.as_deref().filter(|name| !is_blank(Some(*name))) else {
            warn!("event=planet_create module=service status=rejected reason=missing_name");
            return Ok(Outcome::Invalid(PlanetValidationError::MissingField(
                "name",
            )));
        };

        let draft = NewPlanet {
            name: name.to_string(),
            climate: params.climate.clone(),
            terrain: params.terrain.clone(),
        };
        let id = match self.store.insert(&draft) {
            Ok(id) => id,
            Err(RepoError::DuplicateName(_)) => return Ok(Self::reject_duplicate(Some(name))),
            Err(err) => return Err(err.into()),
        };
        info!("event=planet_create module=service status=ok planet_id={id}");

        let created = self
            .find_by_name(Some(name))?
            .ok_or(ServiceError::InconsistentState(
                "created planet not found in read-back",
            ))?;
        Ok(Outcome::Success(self.enrich(created)?))
    }

    /// Merges non-blank `climate`/`terrain` into the planet named `name`.
    pub fn update(&self, params: &UpdateParams) -> ServiceResult<Outcome<EnrichedPlanet>> {
        let Some(existing) = self.find_by_name(params.name.as_deref())? else {
            info!("event=planet_update module=service status=not_found");
            return Ok(Outcome::NotFound);
        };

        let patch = params.patch();
        self.store.update_by_name(&existing.name, &patch)?;
        info!(
            "event=planet_update module=service status=ok planet_id={} changed_fields={}",
            existing.id,
            usize::from(patch.climate.is_some()) + usize::from(patch.terrain.is_some())
        );

        let updated = self
            .find_by_name(Some(&existing.name))?
            .ok_or(ServiceError::InconsistentState(
                "updated planet not found in read-back",
            ))?;
        Ok(Outcome::Success(self.enrich(updated)?))
    }

    /// Deletes the planet named `name` and returns a confirmation message.
    pub fn delete(&self, params: &DeleteParams) -> ServiceResult<Outcome<String>> {
        let Some(existing) = self.find_by_name(params.name.as_deref())? else {
            info!("event=planet_delete module=service status=not_found");
            return Ok(Outcome::NotFound);
        };

        self.store.delete_by_name(&existing.name)?;
        info!(
            "event=planet_delete module=service status=ok planet_id={}",
            existing.id
        );
        Ok(Outcome::Success(format!("{} is deleted.", existing.name)))
    }

    fn find_by_name(&self, name: Option<&str>) -> RepoResult<Option<Planet>> {
        match name {
            Some(name) if !is_blank(Some(name)) => {
                self.store.find_by_match(&PlanetMatch::Name(name.to_string()))
            }
            _ => Ok(None),
        }
    }

    fn find_by_id(&self, id: Option<&str>) -> RepoResult<Option<Planet>> {
        match parse_planet_id(id) {
            Some(id) => self.store.find_by_match(&PlanetMatch::Id(id)),
            None => Ok(None),
        }
    }

    fn enrich(&self, planet: Planet) -> ServiceResult<EnrichedPlanet> {
        let appearances = self.enrichment.appearances(&planet.name)?;
        Ok(EnrichedPlanet::new(planet, appearances))
    }

    fn reject_duplicate<T>(name: Option<&str>) -> Outcome<T> {
        warn!("event=planet_create module=service status=rejected reason=duplicate_name");
        Outcome::Invalid(PlanetValidationError::AlreadyExists(
            name.unwrap_or_default().to_string(),
        ))
    }
}
