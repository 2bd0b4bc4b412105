//! SQLite storage bootstrap for the planets collection.
//!
//! # Responsibility
//! - Open the database backing `planets` (file or in-memory).
//! - Bring the `planets` schema up to date before any record is touched.
//!
//! # Invariants
//! - Schema version lives in `PRAGMA user_version`.
//! - A database written by a newer binary is refused, never downgraded.
//! - Every error names what was being opened or which schema step failed.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Storage-layer failure. Always an infrastructure error for callers.
#[derive(Debug)]
pub enum DbError {
    /// The database at `target` could not be opened or configured.
    Open {
        target: String,
        source: rusqlite::Error,
    },
    /// Schema step `version` failed and was rolled back.
    Migration {
        version: u32,
        source: rusqlite::Error,
    },
    /// `target` carries a schema newer than this binary understands.
    UnsupportedSchemaVersion {
        target: String,
        db_version: u32,
        latest_supported: u32,
    },
    /// Statement failure on an already-open planets database.
    Sqlite(rusqlite::Error),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open { target, source } => {
                write!(f, "failed to open planets database `{target}`: {source}")
            }
            Self::Migration { version, source } => {
                write!(f, "planets schema migration v{version} failed: {source}")
            }
            Self::UnsupportedSchemaVersion {
                target,
                db_version,
                latest_supported,
            } => write!(
                f,
                "planets database `{target}` has schema v{db_version}, newer than supported v{latest_supported}"
            ),
            Self::Sqlite(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open { source, .. } | Self::Migration { source, .. } => Some(source),
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
