//! Converts Overpass `out geom` documents into [`NormalizedBoundary`]
//! values.
//!
//! Closed ways become polygons directly. Relations carry their outline as
//! member ways that must be stitched end to end into rings; `inner`
//! members become holes of the outer ring containing them.

use std::collections::BTreeMap;

use poi_atlas_neighborhood_models::{NormalizedBoundary, UNKNOWN_NEIGHBORHOOD};
use serde::Deserialize;

use crate::NeighborhoodError;

/// Minimum number of coordinates (first point repeated last) of a ring.
const MIN_RING_POINTS: usize = 4;

type Coord = [f64; 2];
type Ring = Vec<Coord>;

#[derive(Debug, Deserialize)]
struct OverpassDocument {
    #[serde(default)]
    elements: Vec<OverpassElement>,
}

#[derive(Debug, Deserialize)]
struct OverpassElement {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    id: i64,
    #[serde(default)]
    tags: BTreeMap<String, String>,
    #[serde(default)]
    geometry: Vec<Option<LatLon>>,
    #[serde(default)]
    members: Vec<OverpassMember>,
}

#[derive(Debug, Deserialize)]
struct OverpassMember {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    role: String,
    #[serde(default)]
    geometry: Vec<Option<LatLon>>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct LatLon {
    lat: f64,
    lon: f64,
}

/// Parses an Overpass JSON document into boundaries.
///
/// Elements without a usable polygon are skipped with a warning. Elements
/// without a name are kept under [`UNKNOWN_NEIGHBORHOOD`].
///
/// # Errors
///
/// Returns [`NeighborhoodError::Json`] if the document is not valid
/// Overpass JSON.
pub fn parse_overpass(document: &str) -> Result<Vec<NormalizedBoundary>, NeighborhoodError> {
    let document: OverpassDocument = serde_json::from_str(document)?;
    log::info!("Found {} raw Overpass elements", document.elements.len());

    let boundaries: Vec<NormalizedBoundary> = document
        .elements
        .iter()
        .filter(|element| element.kind == "way" || element.kind == "relation")
        .filter_map(|element| {
            let name = element_name(element);
            let polygons = match element.kind.as_str() {
                "way" => way_polygons(element),
                _ => relation_polygons(element),
            };

            if polygons.is_empty() {
                log::warn!(
                    "Skipping {} {} ({name}): no valid polygon geometry",
                    element.kind,
                    element.id
                );
                return None;
            }

            Some(NormalizedBoundary {
                name,
                geometry_json: multipolygon_json(&polygons),
            })
        })
        .collect();

    log::info!("Loaded {} neighborhood polygons", boundaries.len());

    Ok(boundaries)
}

fn element_name(element: &OverpassElement) -> String {
    element
        .tags
        .get("name")
        .map(|name| name.trim())
        .filter(|name| !name.is_empty())
        .unwrap_or(UNKNOWN_NEIGHBORHOOD)
        .to_string()
}

fn to_coords(geometry: &[Option<LatLon>]) -> Vec<Coord> {
    geometry.iter().flatten().map(|p| [p.lon, p.lat]).collect()
}

fn way_polygons(element: &OverpassElement) -> Vec<Vec<Ring>> {
    close_ring(to_coords(&element.geometry))
        .map(|ring| vec![vec![ring]])
        .unwrap_or_default()
}

fn relation_polygons(element: &OverpassElement) -> Vec<Vec<Ring>> {
    let mut outer_chains = Vec::new();
    let mut inner_chains = Vec::new();

    for member in element.members.iter().filter(|m| m.kind == "way") {
        let coords = to_coords(&member.geometry);
        if coords.len() < 2 {
            continue;
        }
        if member.role == "inner" {
            inner_chains.push(coords);
        } else {
            outer_chains.push(coords);
        }
    }

    let mut polygons: Vec<Vec<Ring>> = stitch(outer_chains)
        .into_iter()
        .map(|ring| vec![ring])
        .collect();

    for hole in stitch(inner_chains) {
        let owner = polygons
            .iter_mut()
            .find(|polygon| ring_contains(&polygon[0], hole[0]));

        match owner {
            Some(polygon) => polygon.push(hole),
            None => log::debug!(
                "Dropping inner ring of relation {} outside every outer ring",
                element.id
            ),
        }
    }

    polygons
}

fn same_point(a: Coord, b: Coord) -> bool {
    (a[0] - b[0]).abs() < f64::EPSILON && (a[1] - b[1]).abs() < f64::EPSILON
}

fn is_closed(chain: &[Coord]) -> bool {
    match (chain.first(), chain.last()) {
        (Some(first), Some(last)) => chain.len() > 1 && same_point(*first, *last),
        _ => false,
    }
}

/// Closes a chain into a ring. Returns `None` for chains too short to
/// bound an area.
fn close_ring(mut chain: Vec<Coord>) -> Option<Ring> {
    if !is_closed(&chain) {
        if chain.len() < MIN_RING_POINTS {
            return None;
        }
        chain.push(chain[0]);
    }

    (chain.len() >= MIN_RING_POINTS).then_some(chain)
}

/// Joins way chains sharing endpoints into closed rings.
///
/// Chains that cannot be closed by joining are closed as-is when they
/// have enough points, and dropped otherwise.
fn stitch(chains: Vec<Vec<Coord>>) -> Vec<Ring> {
    let mut rings = Vec::new();
    let mut pending = Vec::new();

    for chain in chains {
        if is_closed(&chain) {
            rings.extend(close_ring(chain));
        } else {
            pending.push(chain);
        }
    }

    while !pending.is_empty() {
        let mut current = pending.remove(0);

        while !is_closed(&current) {
            let Some(end) = current.last().copied() else {
                break;
            };

            let Some(index) = pending.iter().position(|chain| {
                chain.first().is_some_and(|p| same_point(*p, end))
                    || chain.last().is_some_and(|p| same_point(*p, end))
            }) else {
                break;
            };

            let mut next = pending.remove(index);
            if next.last().is_some_and(|p| same_point(*p, end)) {
                next.reverse();
            }
            current.extend(next.into_iter().skip(1));
        }

        rings.extend(close_ring(current));
    }

    rings
}

/// Even-odd ray casting test of `point` against a closed ring.
fn ring_contains(ring: &[Coord], point: Coord) -> bool {
    let [x, y] = point;
    let mut inside = false;

    for edge in ring.windows(2) {
        let [x1, y1] = edge[0];
        let [x2, y2] = edge[1];

        if (y1 > y) != (y2 > y) && x < (x2 - x1) * (y - y1) / (y2 - y1) + x1 {
            inside = !inside;
        }
    }

    inside
}

fn multipolygon_json(polygons: &[Vec<Ring>]) -> String {
    serde_json::json!({
        "type": "MultiPolygon",
        "coordinates": polygons,
    })
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coords(points: &[(f64, f64)]) -> String {
        points
            .iter()
            .map(|(lon, lat)| format!(r#"{{"lat":{lat},"lon":{lon}}}"#))
            .collect::<Vec<_>>()
            .join(",")
    }

    fn geometry(boundary: &NormalizedBoundary) -> serde_json::Value {
        serde_json::from_str(&boundary.geometry_json).unwrap()
    }

    #[test]
    fn closed_way_becomes_polygon() {
        let doc = format!(
            r#"{{"elements":[{{"type":"way","id":1,"tags":{{"name":" Chiaia "}},"geometry":[{}]}}]}}"#,
            coords(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.0, 0.0)])
        );
        let boundaries = parse_overpass(&doc).unwrap();
        assert_eq!(boundaries.len(), 1);
        assert_eq!(boundaries[0].name, "Chiaia");

        let geometry = geometry(&boundaries[0]);
        assert_eq!(geometry["type"], "MultiPolygon");
        assert_eq!(geometry["coordinates"][0][0].as_array().unwrap().len(), 5);
    }

    #[test]
    fn relation_ways_are_stitched() {
        let doc = format!(
            r#"{{"elements":[{{"type":"relation","id":2,"tags":{{"name":"Vomero"}},"members":[
                {{"type":"way","role":"outer","geometry":[{}]}},
                {{"type":"way","role":"outer","geometry":[{}]}}
            ]}}]}}"#,
            coords(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0)]),
            coords(&[(0.0, 0.0), (0.0, 2.0), (2.0, 2.0)])
        );
        let boundaries = parse_overpass(&doc).unwrap();
        let geometry = geometry(&boundaries[0]);
        let ring = geometry["coordinates"][0][0].as_array().unwrap();
        assert_eq!(ring.len(), 5);
        assert_eq!(ring.first(), ring.last());
    }

    #[test]
    fn inner_members_become_holes() {
        let doc = format!(
            r#"{{"elements":[{{"type":"relation","id":3,"tags":{{"name":"Posillipo"}},"members":[
                {{"type":"way","role":"outer","geometry":[{}]}},
                {{"type":"way","role":"inner","geometry":[{}]}}
            ]}}]}}"#,
            coords(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0), (0.0, 0.0)]),
            coords(&[(1.0, 1.0), (2.0, 1.0), (2.0, 2.0), (1.0, 1.0)])
        );
        let boundaries = parse_overpass(&doc).unwrap();
        let geometry = geometry(&boundaries[0]);
        assert_eq!(geometry["coordinates"][0].as_array().unwrap().len(), 2);
    }

    #[test]
    fn open_chains_are_closed_or_dropped() {
        let doc = format!(
            r#"{{"elements":[
                {{"type":"relation","id":4,"members":[{{"type":"way","role":"outer","geometry":[{}]}}]}},
                {{"type":"way","id":5,"tags":{{"name":"Stub"}},"geometry":[{}]}},
                {{"type":"node","id":6,"lat":0.0,"lon":0.0}}
            ]}}"#,
            coords(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]),
            coords(&[(0.0, 0.0), (1.0, 0.0)])
        );
        let boundaries = parse_overpass(&doc).unwrap();
        assert_eq!(boundaries.len(), 1);
        assert_eq!(boundaries[0].name, UNKNOWN_NEIGHBORHOOD);
    }

    #[test]
    fn ray_casting() {
        let square = vec![[0.0, 0.0], [2.0, 0.0], [2.0, 2.0], [0.0, 2.0], [0.0, 0.0]];
        assert!(ring_contains(&square, [1.0, 1.0]));
        assert!(!ring_contains(&square, [3.0, 1.0]));
    }
}
