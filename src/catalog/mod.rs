//! Place catalog loading.
//!
//! The catalog is a JSON array of place records, read once at startup and
//! immutable afterwards. A record's identity is its position in the file.

#[cfg(test)]
mod tests;

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{PlannerError, Result};

/// One candidate place from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceRecord {
    pub city: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub best_time: String,
    #[serde(default = "default_cost")]
    pub avg_cost_egp: f64,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Missing costs default to 0, which always passes a cost ceiling.
fn default_cost() -> f64 {
    0.0
}

impl PlaceRecord {
    /// Text embedded for similarity search over the catalog.
    #[inline]
    pub fn index_text(&self) -> String {
        format!(
            "{} - {} - {} - {}",
            self.city, self.name, self.kind, self.description
        )
    }
}

/// Load the place catalog from a JSON file.
///
/// Fails with [`PlannerError::CatalogLoad`] when the file is unreadable or
/// any record is missing a required field.
#[inline]
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Vec<PlaceRecord>> {
    let path = path.as_ref();
    debug!("Loading place catalog from {}", path.display());

    let content = fs::read_to_string(path).map_err(|e| {
        PlannerError::CatalogLoad(format!("Failed to read {}: {}", path.display(), e))
    })?;

    let records: Vec<PlaceRecord> = serde_json::from_str(&content).map_err(|e| {
        PlannerError::CatalogLoad(format!("Malformed catalog {}: {}", path.display(), e))
    })?;

    info!(
        "Loaded {} places from {}",
        records.len(),
        path.display()
    );
    Ok(records)
}
