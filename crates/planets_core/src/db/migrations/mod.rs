//! Versioned `planets` schema steps.
//!
//! Each step runs in its own transaction together with the matching
//! `PRAGMA user_version` bump, so a failed step leaves the previous version
//! intact and is reported as `DbError::Migration`.

use crate::db::{DbError, DbResult};
use log::{error, info};
use rusqlite::Connection;
use std::time::Instant;

/// One schema step: `version` is reached after `sql` runs.
#[derive(Debug, Clone, Copy)]
struct SchemaStep {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const SCHEMA_STEPS: &[SchemaStep] = &[SchemaStep {
    version: 1,
    name: "planets_table",
    sql: include_str!("0001_init.sql"),
}];

/// Returns the newest schema version this binary can produce.
pub fn latest_version() -> u32 {
    SCHEMA_STEPS.last().map_or(0, |step| step.version)
}

/// Reads the schema version recorded in `conn`.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?)
}

/// Applies every step newer than the recorded version and returns how many ran.
///
/// `target` only labels errors and log lines.
pub fn apply_migrations(conn: &mut Connection, target: &str) -> DbResult<usize> {
    let current = schema_version(conn)?;
    let latest = latest_version();

    if current > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            target: target.to_string(),
            db_version: current,
            latest_supported: latest,
        });
    }

    let pending = SCHEMA_STEPS.iter().filter(|step| step.version > current);
    let mut applied = 0;
    for step in pending {
        run_step(conn, step)?;
        applied += 1;
    }
    Ok(applied)
}

fn run_step(conn: &mut Connection, step: &SchemaStep) -> DbResult<()> {
    let started_at = Instant::now();
    let result = conn.transaction().and_then(|tx| {
        tx.execute_batch(step.sql)?;
        tx.execute_batch(&format!("PRAGMA user_version = {};", step.version))?;
        tx.commit()
    });

    match result {
        Ok(()) => {
            info!(
                "event=db_migrate module=db status=ok version={} step={} duration_ms={}",
                step.version,
                step.name,
                started_at.elapsed().as_millis()
            );
            Ok(())
        }
        Err(source) => {
            error!(
                "event=db_migrate module=db status=error version={} step={} error={}",
                step.version, step.name, source
            );
            Err(DbError::Migration {
                version: step.version,
                source,
            })
        }
    }
}
