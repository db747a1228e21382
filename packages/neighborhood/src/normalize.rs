//! Normalizes `GeoJSON` features into [`NormalizedBoundary`] values.
//!
//! Uses the document's [`NeighborhoodFieldMapping`] to extract the
//! neighborhood name from each feature, regardless of the publisher's
//! field naming.

use poi_atlas_neighborhood_models::{NeighborhoodFieldMapping, NormalizedBoundary};

/// Normalizes a list of `GeoJSON` features into boundaries.
///
/// Skips features with missing names or empty geometries.
#[must_use]
pub fn normalize_features(
    features: &[serde_json::Value],
    fields: &NeighborhoodFieldMapping,
) -> Vec<NormalizedBoundary> {
    features
        .iter()
        .enumerate()
        .filter_map(|(index, feature)| {
            let boundary = normalize_feature(feature, fields);
            if boundary.is_none() {
                log::warn!("Skipping feature {index}: missing {:?} or geometry", fields.name);
            }
            boundary
        })
        .collect()
}

fn normalize_feature(
    feature: &serde_json::Value,
    fields: &NeighborhoodFieldMapping,
) -> Option<NormalizedBoundary> {
    let props = feature.get("properties")?;

    let name = match props.get(&fields.name)? {
        serde_json::Value::String(s) => s.trim().to_string(),
        serde_json::Value::Number(n) => n.to_string(),
        _ => return None,
    };
    if name.is_empty() {
        return None;
    }

    let geom = feature.get("geometry").filter(|g| !g.is_null())?;
    let geometry_json = serde_json::to_string(geom).ok()?;

    Some(NormalizedBoundary {
        name,
        geometry_json,
    })
}
