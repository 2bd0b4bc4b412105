//! Planet domain model and typed request parameters.
//!
//! # Responsibility
//! - Define the external record shape returned to callers.
//! - Turn loosely-typed request maps into typed per-operation params.
//!
//! # Invariants
//! - `id` is assigned by the store and never supplied by callers.
//! - Blank or whitespace-only values are treated as absent everywhere.
//! - `appearances` is derived at read time and never persisted.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier assigned to every stored planet.
pub type PlanetId = Uuid;

/// Loose key/value request parameters as received at the boundary.
pub type RequestParams = BTreeMap<String, String>;

/// Planet in its external (projected) shape, without derived fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Planet {
    /// Rendered as the hyphenated UUID string.
    pub id: PlanetId,
    pub name: String,
    pub climate: Option<String>,
    pub terrain: Option<String>,
}

/// Planet plus the film appearance count fetched from enrichment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedPlanet {
    #[serde(flatten)]
    pub planet: Planet,
    pub appearances: u32,
}

impl EnrichedPlanet {
    pub fn new(planet: Planet, appearances: u32) -> Self {
        Self {
            planet,
            appearances,
        }
    }
}

/// Fields accepted by the store when inserting a new planet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPlanet {
    pub name: String,
    pub climate: Option<String>,
    pub terrain: Option<String>,
}

/// Partial update applied to an existing planet.
///
/// `None` means "leave the stored value untouched".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanetPatch {
    pub climate: Option<String>,
    pub terrain: Option<String>,
}

impl PlanetPatch {
    /// Returns `true` when the patch carries no field to merge.
    pub fn is_empty(&self) -> bool {
        self.climate.is_none() && self.terrain.is_none()
    }
}

/// Equality criterion used for single-record lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanetMatch {
    Name(String),
    Id(PlanetId),
}

/// Parameters for `view`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewParams {
    pub name: Option<String>,
    /// Raw id text; validity is decided at lookup time.
    pub id: Option<String>,
}

/// Parameters for `create`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateParams {
    pub name: Option<String>,
    pub climate: Option<String>,
    pub terrain: Option<String>,
}

/// Parameters for `update`. `name` is the lookup key, not mutable content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateParams {
    pub name: Option<String>,
    pub climate: Option<String>,
    pub terrain: Option<String>,
}

/// Parameters for `delete`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteParams {
    pub name: Option<String>,
}

impl ViewParams {
    pub fn from_request(params: &RequestParams) -> Self {
        Self {
            name: param(params, "name"),
            id: param(params, "id"),
        }
    }
}

impl CreateParams {
    pub fn from_request(params: &RequestParams) -> Self {
        Self {
            name: param(params, "name"),
            climate: param(params, "climate"),
            terrain: param(params, "terrain"),
        }
    }
}

impl UpdateParams {
    pub fn from_request(params: &RequestParams) -> Self {
        Self {
            name: param(params, "name"),
            climate: param(params, "climate"),
            terrain: param(params, "terrain"),
        }
    }

    /// Returns the mergeable fields, dropping blanks.
    pub fn patch(&self) -> PlanetPatch {
        PlanetPatch {
            climate: non_blank(self.climate.as_deref()),
            terrain: non_blank(self.terrain.as_deref()),
        }
    }
}

impl DeleteParams {
    pub fn from_request(params: &RequestParams) -> Self {
        Self {
            name: param(params, "name"),
        }
    }
}

/// Business-rule rejection for planet mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanetValidationError {
    /// Another planet already uses this name.
    AlreadyExists(String),
    /// A required field is missing or blank.
    MissingField(&'static str),
}

impl Display for PlanetValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadyExists(name) => write!(f, "Planet with name {name} already exists"),
            Self::MissingField(field) => write!(f, "Missing argument: '{field}'"),
        }
    }
}

impl Error for PlanetValidationError {}

/// Returns the trimmed-non-empty check used for every optional value.
pub fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |text| text.trim().is_empty())
}

/// Returns an owned copy of `value` unless it is blank.
///
/// Non-blank values are kept verbatim (not trimmed); only emptiness is judged
/// on the trimmed form.
pub fn non_blank(value: Option<&str>) -> Option<String> {
    if is_blank(value) {
        None
    } else {
        value.map(str::to_string)
    }
}

/// Parses a syntactically valid planet id; anything else is `None`.
pub fn parse_planet_id(value: Option<&str>) -> Option<PlanetId> {
    let text = value?.trim();
    if text.is_empty() {
        return None;
    }
    Uuid::parse_str(text).ok()
}

fn param(params: &RequestParams, key: &str) -> Option<String> {
    non_blank(params.get(key).map(String::as_str))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(pairs: &[(&str, &str)]) -> RequestParams {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn blank_values_normalize_to_none() {
        let params = CreateParams::from_request(&request(&[
            ("name", "   "),
            ("climate", ""),
            ("terrain", "desert"),
        ]));
        assert_eq!(params.name, None);
        assert_eq!(params.climate, None);
        assert_eq!(params.terrain.as_deref(), Some("desert"));
    }

    #[test]
    fn update_patch_ignores_name_and_blank_fields() {
        let params = UpdateParams::from_request(&request(&[
            ("name", "Hoth"),
            ("climate", "frozen"),
            ("terrain", " \t"),
        ]));
        let patch = params.patch();
        assert_eq!(patch.climate.as_deref(), Some("frozen"));
        assert_eq!(patch.terrain, None);
        assert!(!patch.is_empty());
        assert!(UpdateParams::default().patch().is_empty());
    }

    #[test]
    fn parse_planet_id_rejects_malformed_text() {
        assert!(parse_planet_id(None).is_none());
        assert!(parse_planet_id(Some("  ")).is_none());
        assert!(parse_planet_id(Some("5e8f8f8f8f8f8f8f8f8f8f8f")).is_none());

        let id = Uuid::new_v4();
        assert_eq!(parse_planet_id(Some(&id.to_string())), Some(id));
    }

    #[test]
    fn enriched_planet_serializes_flat() {
        let planet = Planet {
            id: Uuid::nil(),
            name: "Tatooine".to_string(),
            climate: Some("arid".to_string()),
            terrain: None,
        };
        let value = serde_json::to_value(EnrichedPlanet::new(planet, 5)).unwrap();
        assert_eq!(value["id"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(value["name"], "Tatooine");
        assert_eq!(value["climate"], "arid");
        assert!(value["terrain"].is_null());
        assert_eq!(value["appearances"], 5);
    }

    #[test]
    fn validation_errors_render_user_messages() {
        assert_eq!(
            PlanetValidationError::AlreadyExists("Naboo".to_string()).to_string(),
            "Planet with name Naboo already exists"
        );
        assert_eq!(
            PlanetValidationError::MissingField("name").to_string(),
            "Missing argument: 'name'"
        );
    }
}
