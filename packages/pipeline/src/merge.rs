//! Proximity merge of duplicate POIs.
//!
//! The same feature often appears several times in a batch (bus stops
//! mapped once per platform, a monument mapped as node and area). After
//! naming, records with the same canonical name standing close together
//! are collapsed into the first one seen.
//!
//! The merge is greedy and order dependent: each record is compared with
//! the survivors so far and joins the first match. Chains of records each
//! within the threshold of the next are not clustered transitively.

use poi_atlas_poi_models::PoiRecord;

/// Default merge threshold in meters.
pub const DEFAULT_MAX_DISTANCE_M: f64 = 50.0;

/// Mean Earth radius in meters.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance in meters between two WGS84 coordinates.
#[must_use]
pub fn haversine(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (lat1.to_radians().cos() * lat2.to_radians().cos())
        .mul_add((d_lon / 2.0).sin().powi(2), (d_lat / 2.0).sin().powi(2));

    2.0 * EARTH_RADIUS_M * a.sqrt().asin()
}

/// Merges records with equal names lying strictly closer than
/// `max_distance_m`. Survivors keep their own fields and input order.
#[must_use]
pub fn merge(pois: Vec<PoiRecord>, max_distance_m: f64) -> Vec<PoiRecord> {
    let mut merged: Vec<PoiRecord> = Vec::with_capacity(pois.len());

    for poi in pois {
        let survivor = merged.iter().find(|m| {
            m.name == poi.name
                && haversine(poi.latitude, poi.longitude, m.latitude, m.longitude) < max_distance_m
        });

        if let Some(survivor) = survivor {
            log::debug!(
                "Merged POI {:?} {} ({},{}) into {} ({},{})",
                poi.name,
                poi.id,
                poi.latitude,
                poi.longitude,
                survivor.id,
                survivor.latitude,
                survivor.longitude
            );
        } else {
            merged.push(poi);
        }
    }

    merged
}
