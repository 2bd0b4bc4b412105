//! Planet record store contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide lookup, insert, partial update and delete over `planets`.
//! - Project stored rows into the external `Planet` shape.
//!
//! # Invariants
//! - Lookups return at most one record (first match).
//! - Partial updates never overwrite a field the patch leaves as `None`.
//! - Read paths reject corrupt persisted rows instead of masking them.

use crate::db::DbError;
use crate::model::planet::{NewPlanet, Planet, PlanetId, PlanetMatch, PlanetPatch};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const PLANET_SELECT_SQL: &str = "SELECT
    id,
    name,
    climate,
    terrain
FROM planets";

pub type RepoResult<T> = Result<T, RepoError>;

/// Store-level error for planet persistence.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// The unique name index rejected an insert.
    DuplicateName(String),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::DuplicateName(name) => write!(f, "planet name already stored: {name}"),
            Self::InvalidData(message) => write!(f, "invalid persisted planet data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::DuplicateName(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Persistence contract for the planets collection.
///
/// The store enforces no business rules; name uniqueness and required-field
/// checks belong to the caller.
pub trait PlanetStore {
    fn project_all(&self) -> RepoResult<Vec<Planet>>;
    fn find_by_match(&self, criteria: &PlanetMatch) -> RepoResult<Option<Planet>>;
    fn insert(&self, planet: &NewPlanet) -> RepoResult<PlanetId>;
    fn update_by_name(&self, name: &str, patch: &PlanetPatch) -> RepoResult<()>;
    fn delete_by_name(&self, name: &str) -> RepoResult<()>;
}

/// SQLite-backed planet store borrowing a caller-owned connection.
pub struct SqlitePlanetStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePlanetStore<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl PlanetStore for SqlitePlanetStore<'_> {
    fn project_all(&self) -> RepoResult<Vec<Planet>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PLANET_SELECT_SQL} ORDER BY rowid ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut planets = Vec::new();

        while let Some(row) = rows.next()? {
            planets.push(parse_planet_row(row)?);
        }

        Ok(planets)
    }

    fn find_by_match(&self, criteria: &PlanetMatch) -> RepoResult<Option<Planet>> {
        let (column, value) = match criteria {
            PlanetMatch::Name(name) => ("name", name.clone()),
            PlanetMatch::Id(id) => ("id", id.to_string()),
        };

        let mut stmt = self.conn.prepare(&format!(
            "{PLANET_SELECT_SQL} WHERE {column} = ?1 ORDER BY rowid ASC LIMIT 1;"
        ))?;
        let mut rows = stmt.query([value])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_planet_row(row)?));
        }

        Ok(None)
    }

    fn insert(&self, planet: &NewPlanet) -> RepoResult<PlanetId> {
        let id = Uuid::new_v4();

        let result = self.conn.execute(
            "INSERT INTO planets (id, name, climate, terrain) VALUES (?1, ?2, ?3, ?4);",
            params![
                id.to_string(),
                planet.name.as_str(),
                planet.climate.as_deref(),
                planet.terrain.as_deref(),
            ],
        );

        match result {
            Ok(_) => Ok(id),
            Err(err) if is_unique_violation(&err) => {
                Err(RepoError::DuplicateName(planet.name.clone()))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn update_by_name(&self, name: &str, patch: &PlanetPatch) -> RepoResult<()> {
        if patch.is_empty() {
            return Ok(());
        }

        self.conn.execute(
            "UPDATE planets
             SET
                climate = COALESCE(?1, climate),
                terrain = COALESCE(?2, terrain)
             WHERE name = ?3;",
            params![patch.climate.as_deref(), patch.terrain.as_deref(), name],
        )?;

        Ok(())
    }

    fn delete_by_name(&self, name: &str) -> RepoResult<()> {
        self.conn
            .execute("DELETE FROM planets WHERE name = ?1;", [name])?;
        Ok(())
    }
}

fn parse_planet_row(row: &Row<'_>) -> RepoResult<Planet> {
    let id_text: String = row.get("id")?;
    let id = Uuid::parse_str(&id_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{id_text}` in planets.id"))
    })?;

    Ok(Planet {
        id,
        name: row.get("name")?,
        climate: row.get("climate")?,
        terrain: row.get("terrain")?,
    })
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(code, _)
            if code.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}
