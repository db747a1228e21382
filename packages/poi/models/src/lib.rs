#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Point-of-interest record types shared across the canonicalization
//! pipeline.
//!
//! Ingestion collaborators produce [`PoiRecord`] values with only the raw
//! fields populated. Each pipeline stage fills in its derived fields
//! (canonical name, category, tags, neighborhood) in place.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Name used when every naming rule and fallback came up empty.
pub const UNNAMED_POI: &str = "POI senza nome";

/// Geometry kind of a POI. Only points are produced today; area features
/// are collapsed to their center upstream.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum GeometryKind {
    /// A single WGS84 coordinate.
    #[default]
    Point,
}

/// A point of interest flowing through the pipeline.
///
/// Raw fields come from the ingestion layer; derived fields are empty
/// until the corresponding stage runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoiRecord {
    /// Stable opaque identifier.
    pub id: String,
    /// Source system tag (e.g. `"OpenStreetMap (ODbL)"`).
    #[serde(default)]
    pub source: String,
    /// Latitude (WGS84 decimal degrees).
    pub latitude: f64,
    /// Longitude (WGS84 decimal degrees).
    pub longitude: f64,
    /// Geometry kind.
    #[serde(default)]
    pub geometry_kind: GeometryKind,
    /// Name as delivered by the source, possibly empty or a placeholder.
    #[serde(default)]
    pub raw_name: String,
    /// Canonical display name. Never empty after name normalization.
    #[serde(default)]
    pub name: String,
    /// Free-text category from the source.
    #[serde(default)]
    pub raw_category: String,
    /// Canonical (persistent) category.
    #[serde(default)]
    pub category: String,
    /// Tourism-facing category.
    #[serde(default)]
    pub tourism_category: String,
    /// Raw `key=value;key=value` attribute string.
    #[serde(default)]
    pub attributes: String,
    /// Derived descriptive tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Municipality the POI belongs to.
    #[serde(default)]
    pub city: String,
    /// Neighborhood or sub-area name, empty when unresolved.
    #[serde(default)]
    pub neighborhood: String,
    /// Short free-text address.
    #[serde(default)]
    pub address: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Free-text history.
    #[serde(default)]
    pub history: String,
    /// Free-text architecture/art description.
    #[serde(default)]
    pub architecture: String,
    /// Website URL.
    #[serde(default)]
    pub website: String,
    /// Contact phone number.
    #[serde(default)]
    pub phone: String,
    /// Opening hours in OSM syntax.
    #[serde(default)]
    pub opening_hours: String,
}

impl PoiRecord {
    /// Creates a record with identity, coordinates and raw name set and
    /// every other field empty.
    #[must_use]
    pub fn new(id: impl Into<String>, latitude: f64, longitude: f64, raw_name: &str) -> Self {
        Self {
            id: id.into(),
            latitude,
            longitude,
            raw_name: raw_name.to_string(),
            ..Self::default()
        }
    }

    /// Parses the raw attribute string.
    #[must_use]
    pub fn attribute_tags(&self) -> AttributeTags {
        AttributeTags::parse(&self.attributes)
    }

    /// Returns `true` if both coordinates are finite and within WGS84 range.
    #[must_use]
    pub fn has_valid_coordinates(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Ordered, lowercased view of a `key=value;key=value` attribute string.
///
/// Segments without `=` are ignored. A repeated key keeps its first
/// position and takes the last value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeTags {
    entries: Vec<(String, String)>,
}

impl AttributeTags {
    /// Parses an attribute string.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let mut entries: Vec<(String, String)> = Vec::new();

        for part in raw.split(';') {
            let Some((key, value)) = part.split_once('=') else {
                continue;
            };
            let key = key.trim().to_lowercase();
            let value = value.trim().to_lowercase();

            if let Some(existing) = entries.iter_mut().find(|(k, _)| *k == key) {
                existing.1 = value;
            } else {
                entries.push((key, value));
            }
        }

        Self { entries }
    }

    /// Looks up the value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns the value for `key`, or an empty string.
    #[must_use]
    pub fn value(&self, key: &str) -> &str {
        self.get(key).unwrap_or("")
    }

    /// Returns `true` if `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Returns `true` if `key` is present with exactly `value`.
    #[must_use]
    pub fn has(&self, key: &str, value: &str) -> bool {
        self.get(key) == Some(value)
    }

    /// Iterates over `(key, value)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of distinct keys.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no attribute was parsed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_attribute_pairs() {
        let tags = AttributeTags::parse("Bus=Yes; highway=bus_stop;operator=ANM");
        assert_eq!(tags.get("bus"), Some("yes"));
        assert_eq!(tags.value("highway"), "bus_stop");
        assert_eq!(tags.value("operator"), "anm");
        assert_eq!(tags.len(), 3);
    }

    #[test]
    fn ignores_segments_without_separator() {
        let tags = AttributeTags::parse("garbage;;name=Piazza=Dante");
        assert_eq!(tags.len(), 1);
        assert_eq!(tags.value("name"), "piazza=dante");
    }

    #[test]
    fn repeated_key_keeps_position_takes_last_value() {
        let tags = AttributeTags::parse("a=1;b=2;a=3");
        let pairs: Vec<_> = tags.iter().collect();
        assert_eq!(pairs, vec![("a", "3"), ("b", "2")]);
    }

    #[test]
    fn empty_attribute_string() {
        let tags = AttributeTags::parse("");
        assert!(tags.is_empty());
        assert_eq!(tags.value("bus"), "");
        assert!(!tags.has("bus", "yes"));
    }

    #[test]
    fn validates_coordinates() {
        assert!(PoiRecord::new("a", 40.85, 14.26, "x").has_valid_coordinates());
        assert!(!PoiRecord::new("a", f64::NAN, 14.26, "x").has_valid_coordinates());
        assert!(!PoiRecord::new("a", 91.0, 14.26, "x").has_valid_coordinates());
    }

    #[test]
    fn deserializes_with_defaults() {
        let poi: PoiRecord = serde_json::from_str(
            r#"{"id":"n1","latitude":40.85,"longitude":14.26,"rawName":"Stop"}"#,
        )
        .unwrap();
        assert_eq!(poi.raw_name, "Stop");
        assert_eq!(poi.geometry_kind, GeometryKind::Point);
        assert!(poi.tags.is_empty());
        assert_eq!(poi.geometry_kind.to_string(), "point");
    }
}
