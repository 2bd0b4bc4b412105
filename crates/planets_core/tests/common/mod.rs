#![allow(dead_code)]

use planets_core::{EnrichmentClient, EnrichmentError};
use rusqlite::Connection;
use std::cell::RefCell;

/// Enrichment stub answering a fixed count and recording queried names.
pub struct FixedAppearances {
    count: u32,
    queried: RefCell<Vec<String>>,
}

impl FixedAppearances {
    pub fn new(count: u32) -> Self {
        Self {
            count,
            queried: RefCell::new(Vec::new()),
        }
    }

    pub fn queried(&self) -> Vec<String> {
        self.queried.borrow().clone()
    }
}

impl EnrichmentClient for FixedAppearances {
    fn appearances(&self, name: &str) -> Result<u32, EnrichmentError> {
        self.queried.borrow_mut().push(name.to_string());
        Ok(self.count)
    }
}

/// Enrichment stub that always fails like an unavailable remote service.
pub struct UnavailableEnrichment;

impl EnrichmentClient for UnavailableEnrichment {
    fn appearances(&self, _name: &str) -> Result<u32, EnrichmentError> {
        Err(EnrichmentError::Status(503))
    }
}

pub fn planet_count(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM planets;", [], |row| row.get(0))
        .unwrap()
}
