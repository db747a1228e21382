//! Round-robin sampling across tourism categories.
//!
//! Large cities yield tens of thousands of POIs dominated by a few
//! categories (stops, restaurants). Sampling one POI per category in
//! rotation keeps a capped batch varied.

use std::collections::{BTreeSet, VecDeque};

use poi_atlas_poi_models::PoiRecord;

/// Group used for POIs without a tourism category.
pub const UNCATEGORIZED_GROUP: &str = "Altro";

/// Drops repeated ids (first wins), groups by tourism category in order of
/// first appearance, then takes one record per group in rotation until
/// `max_pois` are selected. `max_pois == 0` keeps every record, in rotated
/// order.
#[must_use]
pub fn sample_round_robin(pois: Vec<PoiRecord>, max_pois: usize) -> Vec<PoiRecord> {
    let total = pois.len();
    let mut seen = BTreeSet::new();
    let mut groups: Vec<(String, VecDeque<PoiRecord>)> = Vec::new();

    for poi in pois {
        if !seen.insert(poi.id.clone()) {
            log::debug!("Dropping duplicate POI id {}", poi.id);
            continue;
        }

        let category = match poi.tourism_category.trim() {
            "" => UNCATEGORIZED_GROUP,
            category => category,
        }
        .to_string();

        match groups.iter_mut().find(|(name, _)| *name == category) {
            Some((_, group)) => group.push_back(poi),
            None => groups.push((category, VecDeque::from([poi]))),
        }
    }

    let limit = if max_pois == 0 { usize::MAX } else { max_pois };
    let mut sampled = Vec::with_capacity(total.min(limit));

    while sampled.len() < limit && !groups.is_empty() {
        for (_, group) in &mut groups {
            if sampled.len() >= limit {
                break;
            }
            if let Some(poi) = group.pop_front() {
                sampled.push(poi);
            }
        }
        groups.retain(|(_, group)| !group.is_empty());
    }

    log::info!(
        "Sampled {} of {total} POIs across categories (limit {})",
        sampled.len(),
        if max_pois == 0 { "none".to_string() } else { max_pois.to_string() }
    );

    sampled
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poi(id: &str, category: &str) -> PoiRecord {
        let mut poi = PoiRecord::new(id, 40.85, 14.27, id);
        poi.tourism_category = category.to_string();
        poi
    }

    fn ids(pois: &[PoiRecord]) -> Vec<&str> {
        pois.iter().map(|p| p.id.as_str()).collect()
    }

    fn batch() -> Vec<PoiRecord> {
        vec![
            poi("s1", "Fermata urbana"),
            poi("s2", "Fermata urbana"),
            poi("s3", "Fermata urbana"),
            poi("c1", "Chiesa / Basilica"),
            poi("x1", ""),
            poi("c2", "Chiesa / Basilica"),
        ]
    }

    #[test]
    fn rotates_across_categories() {
        let sampled = sample_round_robin(batch(), 4);
        assert_eq!(ids(&sampled), vec!["s1", "c1", "x1", "s2"]);
    }

    #[test]
    fn zero_keeps_everything_in_rotated_order() {
        let sampled = sample_round_robin(batch(), 0);
        assert_eq!(ids(&sampled), vec!["s1", "c1", "x1", "s2", "c2", "s3"]);
    }

    #[test]
    fn limit_above_batch_size() {
        assert_eq!(sample_round_robin(batch(), 100).len(), 6);
    }

    #[test]
    fn duplicate_ids_are_dropped() {
        let pois = vec![poi("a", "Museo"), poi("a", "Museo"), poi("b", "Museo")];
        assert_eq!(ids(&sample_round_robin(pois, 0)), vec!["a", "b"]);
    }
}
