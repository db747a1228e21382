#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! In-memory spatial index for neighborhood attribution.
//!
//! Builds an R-tree over neighborhood polygons and resolves coordinates
//! to a neighborhood name. POI coordinates are often snapped to a street
//! or a building outline just outside the polygon they belong to, so
//! resolution widens a tolerance buffer step by step and keeps the
//! closest polygon at the first step that finds any.

use std::cmp::Ordering;

use geo::{Closest, ClosestPoint, Contains, MultiPolygon, Point, Validation};
use geojson::GeoJson;
use poi_atlas_neighborhood_models::NormalizedBoundary;
use rstar::{AABB, RTree, RTreeObject};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tolerance steps in degrees (~55 m, ~165 m, ~330 m, ~660 m, ~1300 m,
/// ~2600 m).
pub const DEFAULT_TOLERANCES: [f64; 6] = [0.0005, 0.0015, 0.003, 0.006, 0.012, 0.024];

/// Maximum distance in degrees (~400 m) of the nearest-polygon fallback.
pub const DEFAULT_FALLBACK_MAX_DISTANCE: f64 = 0.004;

/// Errors that can occur while building a neighborhood index.
#[derive(Debug, Error)]
pub enum SpatialError {
    /// The resolver configuration is unusable.
    #[error("Invalid resolver configuration: {message}")]
    InvalidConfig {
        /// Description of what is wrong.
        message: String,
    },
}

/// Tolerance schedule of the resolver, deserialized from the
/// `[neighborhood]` configuration section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Buffer tolerances in degrees, tried in ascending order.
    pub tolerances: Vec<f64>,
    /// Distance in degrees below which the nearest polygon is accepted
    /// when no tolerance step matched.
    pub fallback_max_distance: f64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            tolerances: DEFAULT_TOLERANCES.to_vec(),
            fallback_max_distance: DEFAULT_FALLBACK_MAX_DISTANCE,
        }
    }
}

impl ResolverConfig {
    /// Checks that tolerances are finite, positive and strictly ascending
    /// and that the fallback distance is finite and non-negative.
    ///
    /// # Errors
    ///
    /// Returns [`SpatialError::InvalidConfig`] describing the first
    /// offending value.
    pub fn validate(&self) -> Result<(), SpatialError> {
        if let Some(bad) = self
            .tolerances
            .iter()
            .find(|t| !t.is_finite() || **t <= 0.0)
        {
            return Err(SpatialError::InvalidConfig {
                message: format!("tolerance {bad} must be a positive number of degrees"),
            });
        }

        if self.tolerances.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(SpatialError::InvalidConfig {
                message: "tolerances must be strictly ascending".to_string(),
            });
        }

        if !self.fallback_max_distance.is_finite() || self.fallback_max_distance < 0.0 {
            return Err(SpatialError::InvalidConfig {
                message: format!(
                    "fallback_max_distance {} must be a non-negative number of degrees",
                    self.fallback_max_distance
                ),
            });
        }

        Ok(())
    }
}

/// Outcome of resolving a coordinate.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// A polygon's buffer at `tolerance` contains the point.
    Contained {
        name: String,
        tolerance: f64,
        distance: f64,
    },
    /// No buffer matched; the nearest polygon is within the fallback
    /// distance.
    Nearest { name: String, distance: f64 },
    /// Nothing close enough.
    Unresolved,
}

impl Resolution {
    /// Returns the resolved neighborhood name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Contained { name, .. } | Self::Nearest { name, .. } => Some(name),
            Self::Unresolved => None,
        }
    }

    /// Returns the resolved name, or an empty string when unresolved.
    #[must_use]
    pub fn into_name(self) -> String {
        match self {
            Self::Contained { name, .. } | Self::Nearest { name, .. } => name,
            Self::Unresolved => String::new(),
        }
    }
}

/// A neighborhood polygon stored in the R-tree with its metadata.
struct BoundaryEntry {
    /// Declaration order, used to break distance ties.
    index: usize,
    name: String,
    envelope: AABB<[f64; 2]>,
    polygon: MultiPolygon<f64>,
}

impl RTreeObject for BoundaryEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

impl BoundaryEntry {
    /// Planar distance in degrees from `point` to the polygon; zero inside.
    fn distance_to(&self, point: Point<f64>) -> f64 {
        if self.polygon.contains(&point) {
            return 0.0;
        }

        self.polygon
            .0
            .iter()
            .flat_map(|polygon| std::iter::once(polygon.exterior()).chain(polygon.interiors()))
            .filter_map(|ring| match ring.closest_point(&point) {
                Closest::Intersection(p) | Closest::SinglePoint(p) => Some(p),
                Closest::Indeterminate => None,
            })
            .map(|closest| (closest.x() - point.x()).hypot(closest.y() - point.y()))
            .fold(f64::INFINITY, f64::min)
    }
}

/// Orders candidates by distance, then declaration order.
fn closer(a: &(&BoundaryEntry, f64), b: &(&BoundaryEntry, f64)) -> Ordering {
    a.1.total_cmp(&b.1).then(a.0.index.cmp(&b.0.index))
}

/// Immutable R-tree of neighborhood polygons.
///
/// Built once per city and safe to share read-only across threads.
pub struct NeighborhoodIndex {
    tree: RTree<BoundaryEntry>,
    config: ResolverConfig,
}

impl NeighborhoodIndex {
    /// Parses boundary geometries and bulk-loads them into an R-tree.
    ///
    /// Boundaries whose geometry is not a `GeoJSON` `Polygon` or
    /// `MultiPolygon` are skipped with a warning. Invalid polygons (for
    /// instance self-intersecting rings) are indexed as is, with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`SpatialError::InvalidConfig`] if `config` fails
    /// validation.
    pub fn build(
        boundaries: &[NormalizedBoundary],
        config: ResolverConfig,
    ) -> Result<Self, SpatialError> {
        config.validate()?;

        let entries: Vec<BoundaryEntry> = boundaries
            .iter()
            .enumerate()
            .filter_map(|(index, boundary)| {
                let Some(polygon) = parse_geojson_to_multipolygon(&boundary.geometry_json) else {
                    log::warn!("Failed to parse GeoJSON for neighborhood {:?}", boundary.name);
                    return None;
                };
                let Some(envelope) = compute_envelope(&polygon) else {
                    log::warn!("Neighborhood {:?} has an empty geometry", boundary.name);
                    return None;
                };
                if let Err(problem) = polygon.check_validation() {
                    log::warn!("Neighborhood {:?} has an invalid geometry: {problem}", boundary.name);
                }

                Some(BoundaryEntry {
                    index,
                    name: boundary.name.clone(),
                    envelope,
                    polygon,
                })
            })
            .collect();

        log::info!(
            "Loaded {} of {} neighborhoods into spatial index",
            entries.len(),
            boundaries.len()
        );

        Ok(Self {
            tree: RTree::bulk_load(entries),
            config,
        })
    }

    /// Number of indexed polygons.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    #[must_use]
    pub const fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolves a coordinate to a neighborhood.
    ///
    /// At each tolerance step the polygons whose buffer contains the point
    /// are candidates and the closest one wins. When no step yields a
    /// candidate, the nearest polygon overall is accepted if it lies
    /// within the fallback distance.
    #[must_use]
    pub fn resolve(&self, lat: f64, lon: f64) -> Resolution {
        let point = Point::new(lon, lat);

        for &tolerance in &self.config.tolerances {
            let query_env =
                AABB::from_corners([lon - tolerance, lat - tolerance], [lon + tolerance, lat + tolerance]);

            let best = self
                .tree
                .locate_in_envelope_intersecting(&query_env)
                .map(|entry| (entry, entry.distance_to(point)))
                .filter(|(_, distance)| *distance < tolerance)
                .min_by(closer);

            if let Some((entry, distance)) = best {
                log::debug!(
                    "{lat:.6},{lon:.6} in {:?} at tolerance {tolerance} (distance {distance:.6})",
                    entry.name
                );
                return Resolution::Contained {
                    name: entry.name.clone(),
                    tolerance,
                    distance,
                };
            }
        }

        let nearest = self
            .tree
            .iter()
            .map(|entry| (entry, entry.distance_to(point)))
            .min_by(closer);

        match nearest {
            Some((entry, distance)) if distance < self.config.fallback_max_distance => {
                log::debug!(
                    "{lat:.6},{lon:.6} assigned to nearest {:?} (distance {distance:.6})",
                    entry.name
                );
                Resolution::Nearest {
                    name: entry.name.clone(),
                    distance,
                }
            }
            _ => {
                log::debug!("{lat:.6},{lon:.6} matched no neighborhood");
                Resolution::Unresolved
            }
        }
    }

    /// Resolves a coordinate to a neighborhood name, or an empty string.
    #[must_use]
    pub fn resolve_neighborhood(&self, lat: f64, lon: f64) -> String {
        self.resolve(lat, lon).into_name()
    }
}

/// Parse a `GeoJSON` string into a [`MultiPolygon`].
/// Handles both `Polygon` and `MultiPolygon` geometry types.
fn parse_geojson_to_multipolygon(geojson_str: &str) -> Option<MultiPolygon<f64>> {
    let geojson: GeoJson = geojson_str.parse().ok()?;
    let GeoJson::Geometry(geom) = geojson else {
        return None;
    };

    match geo::Geometry::<f64>::try_from(geom).ok()? {
        geo::Geometry::MultiPolygon(mp) => Some(mp),
        geo::Geometry::Polygon(p) => Some(MultiPolygon(vec![p])),
        _ => None,
    }
}

/// Compute the bounding box envelope for a [`MultiPolygon`]. `None` for an
/// empty geometry.
fn compute_envelope(mp: &MultiPolygon<f64>) -> Option<AABB<[f64; 2]>> {
    use geo::BoundingRect;

    mp.bounding_rect()
        .map(|rect| AABB::from_corners([rect.min().x, rect.min().y], [rect.max().x, rect.max().y]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(name: &str, min_lon: f64, min_lat: f64, size: f64) -> NormalizedBoundary {
        let (max_lon, max_lat) = (min_lon + size, min_lat + size);
        NormalizedBoundary {
            name: name.to_string(),
            geometry_json: format!(
                r#"{{"type":"Polygon","coordinates":[[[{min_lon},{min_lat}],[{max_lon},{min_lat}],[{max_lon},{max_lat}],[{min_lon},{max_lat}],[{min_lon},{min_lat}]]]}}"#
            ),
        }
    }

    fn naples() -> NeighborhoodIndex {
        NeighborhoodIndex::build(
            &[
                square("Chiaia", 14.20, 40.83, 0.02),
                square("Vomero", 14.23, 40.83, 0.02),
            ],
            ResolverConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn point_inside_resolves_at_first_step() {
        let index = naples();
        assert_eq!(index.resolve_neighborhood(40.84, 14.21), "Chiaia");
        assert_eq!(
            index.resolve(40.84, 14.24),
            Resolution::Contained {
                name: "Vomero".to_string(),
                tolerance: 0.0005,
                distance: 0.0,
            }
        );
    }

    #[test]
    fn point_just_outside_widens_the_buffer() {
        let index = naples();
        let resolution = index.resolve(40.84, 14.195);
        assert_eq!(resolution.name(), Some("Chiaia"));
        assert!(matches!(
            resolution,
            Resolution::Contained { tolerance, .. } if (tolerance - 0.006).abs() < f64::EPSILON
        ));
    }

    #[test]
    fn closest_candidate_wins_within_a_step() {
        let index = naples();
        assert_eq!(index.resolve_neighborhood(40.84, 14.2245), "Chiaia");
        assert_eq!(index.resolve_neighborhood(40.84, 14.2255), "Vomero");
    }

    #[test]
    fn self_intersecting_polygons_are_flagged_but_indexed() {
        let bowtie = NormalizedBoundary {
            name: "Farfalla".to_string(),
            geometry_json: r#"{"type":"Polygon","coordinates":[[[0,0],[1,1],[1,0],[0,1],[0,0]]]}"#
                .to_string(),
        };

        let polygon = parse_geojson_to_multipolygon(&bowtie.geometry_json).unwrap();
        assert!(polygon.check_validation().is_err());

        let index = NeighborhoodIndex::build(&[bowtie], ResolverConfig::default()).unwrap();
        assert_eq!(index.len(), 1);
        assert_eq!(index.resolve_neighborhood(0.5, -0.0001), "Farfalla");
    }

    #[test]
    fn ties_go_to_declaration_order() {
        let index = NeighborhoodIndex::build(
            &[square("Primo", 0.0, 0.0, 1.0), square("Secondo", 0.0, 0.0, 1.0)],
            ResolverConfig::default(),
        )
        .unwrap();
        assert_eq!(index.resolve_neighborhood(0.5, 0.5), "Primo");
    }

    #[test]
    fn far_points_are_unresolved() {
        let index = naples();
        assert_eq!(index.resolve(41.5, 14.21), Resolution::Unresolved);
        assert_eq!(index.resolve_neighborhood(40.84, 14.30), "");
    }

    #[test]
    fn nearest_fallback() {
        let config = ResolverConfig {
            tolerances: vec![0.0005],
            fallback_max_distance: 0.004,
        };
        let index = NeighborhoodIndex::build(&[square("Chiaia", 14.20, 40.83, 0.02)], config).unwrap();

        match index.resolve(40.84, 14.198) {
            Resolution::Nearest { name, distance } => {
                assert_eq!(name, "Chiaia");
                assert!((distance - 0.002).abs() < 1e-9);
            }
            other => panic!("expected nearest fallback, got {other:?}"),
        }
        assert_eq!(index.resolve(40.84, 14.19), Resolution::Unresolved);
    }

    #[test]
    fn malformed_geometries_are_skipped() {
        let index = NeighborhoodIndex::build(
            &[
                NormalizedBoundary {
                    name: "Rotto".to_string(),
                    geometry_json: "not json".to_string(),
                },
                NormalizedBoundary {
                    name: "Punto".to_string(),
                    geometry_json: r#"{"type":"Point","coordinates":[14.21,40.84]}"#.to_string(),
                },
                square("Chiaia", 14.20, 40.83, 0.02),
            ],
            ResolverConfig::default(),
        )
        .unwrap();

        assert_eq!(index.len(), 1);
        assert_eq!(index.resolve_neighborhood(40.84, 14.21), "Chiaia");
    }

    #[test]
    fn empty_index_resolves_nothing() {
        let index = NeighborhoodIndex::build(&[], ResolverConfig::default()).unwrap();
        assert!(index.is_empty());
        assert_eq!(index.resolve(40.84, 14.21), Resolution::Unresolved);
    }

    #[test]
    fn rejects_invalid_config() {
        let descending = ResolverConfig {
            tolerances: vec![0.01, 0.001],
            ..ResolverConfig::default()
        };
        assert!(NeighborhoodIndex::build(&[], descending).is_err());

        let negative = ResolverConfig {
            fallback_max_distance: -1.0,
            ..ResolverConfig::default()
        };
        assert!(negative.validate().is_err());
    }

    #[test]
    fn config_from_toml() {
        let config: ResolverConfig = toml::from_str("tolerances = [0.001, 0.01]").unwrap();
        assert_eq!(config.tolerances, vec![0.001, 0.01]);
        assert!((config.fallback_max_distance - DEFAULT_FALLBACK_MAX_DISTANCE).abs() < f64::EPSILON);
    }
}
