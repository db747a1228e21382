#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Neighborhood polygon document parsing and normalization.
//!
//! Reads the polygon documents a city publishes (`GeoJSON` feature
//! collections) or that Overpass returns for `out geom` queries, and turns them into
//! [`NormalizedBoundary`] values for the spatial index.

pub mod normalize;
pub mod overpass;

use poi_atlas_neighborhood_models::{NeighborhoodFieldMapping, NormalizedBoundary};
use thiserror::Error;

/// Errors that can occur during neighborhood operations.
#[derive(Debug, Error)]
pub enum NeighborhoodError {
    /// JSON parsing failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Data conversion or normalization error.
    #[error("Conversion error: {message}")]
    Conversion {
        /// Description of what went wrong.
        message: String,
    },
}

/// Parses a polygon document, detecting its format.
///
/// Overpass documents are recognized by their `elements` array, `GeoJSON`
/// by a `FeatureCollection` `features` array.
///
/// # Errors
///
/// Returns an error if the document is not JSON or is neither an Overpass
/// response nor a `GeoJSON` `FeatureCollection`.
pub fn load_boundaries(
    document: &str,
    fields: &NeighborhoodFieldMapping,
) -> Result<Vec<NormalizedBoundary>, NeighborhoodError> {
    let value: serde_json::Value = serde_json::from_str(document)?;

    if value.get("elements").is_some_and(serde_json::Value::is_array) {
        return overpass::parse_overpass(document);
    }

    let features = value
        .get("features")
        .and_then(serde_json::Value::as_array)
        .ok_or_else(|| NeighborhoodError::Conversion {
            message: "expected an Overpass `elements` or GeoJSON `features` array".to_string(),
        })?;

    let boundaries = normalize::normalize_features(features, fields);
    log::info!(
        "Normalized {} of {} GeoJSON features",
        boundaries.len(),
        features.len()
    );

    Ok(boundaries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_document_format() {
        let fields = NeighborhoodFieldMapping::default();

        let overpass = r#"{"elements":[]}"#;
        assert!(load_boundaries(overpass, &fields).unwrap().is_empty());

        let geojson = r#"{"type":"FeatureCollection","features":[{"type":"Feature",
            "properties":{"name":"Chiaia"},
            "geometry":{"type":"Polygon","coordinates":[[[0,0],[1,0],[1,1],[0,0]]]}}]}"#;
        assert_eq!(load_boundaries(geojson, &fields).unwrap()[0].name, "Chiaia");
    }

    #[test]
    fn rejects_unknown_documents() {
        let fields = NeighborhoodFieldMapping::default();
        assert!(matches!(
            load_boundaries(r#"{"type":"Point"}"#, &fields),
            Err(NeighborhoodError::Conversion { .. })
        ));
        assert!(matches!(
            load_boundaries("not json", &fields),
            Err(NeighborhoodError::Json(_))
        ));
    }
}
