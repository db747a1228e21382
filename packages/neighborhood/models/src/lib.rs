#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Neighborhood polygon document types.
//!
//! Defines how names are read out of a polygon document and the
//! normalized boundary type handed to the spatial index.

use serde::{Deserialize, Serialize};

/// Property used for the neighborhood name when none is configured.
pub const DEFAULT_NAME_PROPERTY: &str = "name";

/// Name given to boundaries whose source element carries no name.
pub const UNKNOWN_NEIGHBORHOOD: &str = "unknown";

/// Field mapping for extracting the neighborhood name from `GeoJSON`
/// features.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NeighborhoodFieldMapping {
    /// Property field containing the neighborhood name.
    pub name: String,
}

impl Default for NeighborhoodFieldMapping {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME_PROPERTY.to_string(),
        }
    }
}

/// A normalized neighborhood boundary, ready for indexing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedBoundary {
    /// Human-readable neighborhood name.
    pub name: String,
    /// `GeoJSON` `Polygon` or `MultiPolygon` geometry as a JSON string.
    pub geometry_json: String,
}
