#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Staged canonicalization of a city's POI batch.
//!
//! A run takes raw records from the ingestion layer and applies, in
//! order: category mapping, round-robin sampling, contact lifting, name
//! normalization, tag generation, neighborhood resolution and the
//! proximity merge. Record-level failures are logged and counted; the
//! record keeps its pre-stage values and the batch continues.

pub mod config;
pub mod contact;
pub mod merge;
pub mod progress;
pub mod sampling;

use std::sync::Arc;

use poi_atlas_category::{canonical_category, classify_osm};
use poi_atlas_naming::{NameNormalizer, NamingError, is_generic_poi};
use poi_atlas_neighborhood::NeighborhoodError;
use poi_atlas_poi_models::PoiRecord;
use poi_atlas_spatial::{NeighborhoodIndex, SpatialError};
use poi_atlas_tags::{HeuristicAnalyzer, TagRequest, TagScorer, TextAnalyzer};
use serde::Serialize;
use thiserror::Error;

pub use config::PipelineConfig;
pub use progress::{NullProgress, ProgressCallback, null_progress};

/// Errors that prevent a run from starting.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Configuration file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration did not parse.
    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    /// Configuration parsed but holds an unusable value.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what is wrong.
        message: String,
    },

    /// City-dependent naming patterns did not compile.
    #[error(transparent)]
    Naming(#[from] NamingError),

    /// The polygon document could not be read.
    #[error(transparent)]
    Neighborhood(#[from] NeighborhoodError),

    /// The resolver configuration is unusable.
    #[error(transparent)]
    Spatial(#[from] SpatialError),
}

/// A failure confined to one record.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    #[error("POI {id} has invalid coordinates ({latitude}, {longitude})")]
    InvalidCoordinates {
        id: String,
        latitude: f64,
        longitude: f64,
    },
}

/// Counters collected over one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PipelineReport {
    /// Records received.
    pub total: usize,
    /// Records dropped by sampling or as repeated ids.
    pub sampled_out: usize,
    /// Records whose canonical name differs from the raw name.
    pub renamed: usize,
    /// Records whose raw name was kept.
    pub unchanged: usize,
    /// Records whose canonical name is generic.
    pub generic: usize,
    /// Records with contact fields filled from attributes.
    pub contacts_lifted: usize,
    /// Record-level failures.
    pub failed: usize,
    /// Records left without a neighborhood.
    pub unresolved: usize,
    /// Records merged into a nearby namesake.
    pub merged: usize,
}

/// Canonical records and the run's counters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineOutput {
    pub records: Vec<PoiRecord>,
    pub report: PipelineReport,
}

/// The canonicalization pipeline for one city.
pub struct Pipeline<A = HeuristicAnalyzer> {
    city: String,
    config: PipelineConfig,
    normalizer: NameNormalizer,
    scorer: TagScorer<A>,
}

impl Pipeline {
    /// Creates a pipeline using the built-in heuristic text analyzer.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Naming`] if the city patterns do not
    /// compile.
    pub fn new(city: &str, config: PipelineConfig) -> Result<Self, PipelineError> {
        Self::with_analyzer(city, config, HeuristicAnalyzer)
    }
}

impl<A: TextAnalyzer> Pipeline<A> {
    /// Creates a pipeline with a custom text analyzer for tag generation.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Naming`] if the city patterns do not
    /// compile.
    pub fn with_analyzer(
        city: &str,
        config: PipelineConfig,
        analyzer: A,
    ) -> Result<Self, PipelineError> {
        Ok(Self {
            city: city.trim().to_string(),
            normalizer: NameNormalizer::new(city)?,
            scorer: TagScorer::new(analyzer),
            config,
        })
    }

    #[must_use]
    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Parses a polygon document and indexes it with the configured
    /// field mapping and tolerances.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be parsed or the resolver
    /// configuration is invalid.
    pub fn build_index(&self, document: &str) -> Result<NeighborhoodIndex, PipelineError> {
        let neighborhood = &self.config.neighborhood;
        let boundaries = poi_atlas_neighborhood::load_boundaries(document, &neighborhood.fields)?;

        Ok(NeighborhoodIndex::build(
            &boundaries,
            neighborhood.resolver.clone(),
        )?)
    }

    /// Runs every stage over `records`.
    pub fn run(
        &self,
        records: Vec<PoiRecord>,
        index: &NeighborhoodIndex,
        progress: &Arc<dyn ProgressCallback>,
    ) -> PipelineOutput {
        let mut report = PipelineReport {
            total: records.len(),
            ..PipelineReport::default()
        };

        log::info!("Canonicalizing {} POIs for {}", records.len(), self.city);

        let mut records = self.stage(progress, "Categorizing", records, |poi| {
            self.categorize(poi);
        });

        records = sampling::sample_round_robin(records, self.config.sampling.max_pois);
        report.sampled_out = report.total - records.len();

        records = self.stage(progress, "Lifting contacts", records, |poi| {
            if contact::lift_contacts(poi) > 0 {
                report.contacts_lifted += 1;
            }
        });

        progress.set_message("Normalizing names".to_string());
        let batch = self.normalizer.normalize_batch(records);
        report.renamed = batch.renamed;
        report.unchanged = batch.unchanged;
        records = batch.records;

        records = self.stage(progress, "Generating tags", records, |poi| {
            if is_generic_poi(&poi.name, &poi.address) {
                report.generic += 1;
            }
            poi.tags = self.generate_tags(poi);
        });

        records = self.stage(progress, "Resolving neighborhoods", records, |poi| {
            match resolve_record(poi, index) {
                Ok(neighborhood) => {
                    if neighborhood.is_empty() {
                        report.unresolved += 1;
                    }
                    poi.neighborhood = neighborhood;
                }
                Err(e) => {
                    log::warn!("Skipping neighborhood resolution: {e}");
                    report.failed += 1;
                }
            }
        });

        progress.set_message("Merging duplicates".to_string());
        let before = records.len();
        let records = merge::merge(records, self.config.merge.max_distance_m);
        report.merged = before - records.len();

        log::info!(
            "Canonicalized {} POIs: {} renamed, {} generic, {} unresolved, {} merged, {} failed",
            records.len(),
            report.renamed,
            report.generic,
            report.unresolved,
            report.merged,
            report.failed
        );
        progress.finish(format!("{} POIs canonicalized", records.len()));

        PipelineOutput { records, report }
    }

    /// Applies `f` to every record, reporting progress.
    fn stage(
        &self,
        progress: &Arc<dyn ProgressCallback>,
        message: &str,
        mut records: Vec<PoiRecord>,
        mut f: impl FnMut(&mut PoiRecord),
    ) -> Vec<PoiRecord> {
        log::debug!("{message} ({} records, {})", records.len(), self.city);
        progress.set_message(message.to_string());
        progress.set_total(records.len() as u64);

        for poi in &mut records {
            f(poi);
            progress.inc(1);
        }

        records
    }

    fn categorize(&self, poi: &mut PoiRecord) {
        let tags = poi.attribute_tags();

        poi.category = canonical_category(&poi.raw_category, &tags);
        if poi.tourism_category.trim().is_empty() {
            poi.tourism_category = classify_osm(&tags).tourism.to_string();
        }
        if poi.city.trim().is_empty() {
            poi.city.clone_from(&self.city);
        }
    }

    fn generate_tags(&self, poi: &PoiRecord) -> Vec<String> {
        self.scorer.generate_tags(&TagRequest {
            name: &poi.name,
            description: &poi.description,
            history: &poi.history,
            architecture: &poi.architecture,
            city: &poi.city,
            max_tags: self.config.tags.max_tags,
            excluded: &self.config.tags.excluded,
        })
    }
}

/// Resolves one record's neighborhood.
///
/// # Errors
///
/// Returns [`RecordError::InvalidCoordinates`] for coordinates outside the
/// WGS84 range.
pub fn resolve_record(poi: &PoiRecord, index: &NeighborhoodIndex) -> Result<String, RecordError> {
    if !poi.has_valid_coordinates() {
        return Err(RecordError::InvalidCoordinates {
            id: poi.id.clone(),
            latitude: poi.latitude,
            longitude: poi.longitude,
        });
    }

    Ok(index.resolve_neighborhood(poi.latitude, poi.longitude))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHIAIA: &str = r#"{"type":"FeatureCollection","features":[{"type":"Feature",
        "properties":{"name":"Chiaia"},
        "geometry":{"type":"Polygon","coordinates":[[[14.20,40.83],[14.22,40.83],[14.22,40.85],[14.20,40.85],[14.20,40.83]]]}}]}"#;

    fn record(id: &str, raw_name: &str, lat: f64, lon: f64, attributes: &str) -> PoiRecord {
        let mut poi = PoiRecord::new(id, lat, lon, raw_name);
        poi.attributes = attributes.to_string();
        poi.address = "Via Roma 12, 80121 Napoli".to_string();
        poi
    }

    fn run(records: Vec<PoiRecord>) -> PipelineOutput {
        let pipeline = Pipeline::new("Napoli", PipelineConfig::default()).unwrap();
        let index = pipeline.build_index(CHIAIA).unwrap();
        pipeline.run(records, &index, &null_progress())
    }

    #[test]
    fn canonicalizes_a_batch() {
        let mut church = record("w1", "Chiesa del Gesù Nuovo", 40.84, 14.21, "amenity=place_of_worship");
        church.description = "Chiesa in stile barocco con affreschi di Solimena.".to_string();

        let output = run(vec![
            record("n1", "Stop", 40.84, 14.21, "highway=bus_stop;bus=yes;website=https://Anm.example"),
            record("n2", "Stop", 40.840_09, 14.21, "highway=bus_stop;bus=yes"),
            church,
            record("n3", "Museo", 123.0, 14.21, ""),
            record("n4", "Villa", 41.5, 14.21, "tourism=attraction"),
        ]);

        let report = output.report;
        assert_eq!(report.total, 5);
        assert_eq!(report.merged, 1);
        assert_eq!(report.failed, 1);
        assert_eq!(report.unresolved, 1);
        assert_eq!(report.contacts_lifted, 1);
        assert_eq!(output.records.len(), 4);

        let by_id = |id: &str| {
            output
                .records
                .iter()
                .find(|p| p.id == id)
                .unwrap_or_else(|| panic!("missing {id}"))
        };

        let stop = by_id("n1");
        assert_eq!(stop.name, "Fermata autobus Via Roma 12");
        assert_eq!(stop.neighborhood, "Chiaia");
        assert_eq!(stop.city, "Napoli");
        assert_eq!(stop.website, "https://Anm.example");
        assert_eq!(stop.category, "Infrastruttura di trasporto");

        let church = by_id("w1");
        assert_eq!(church.neighborhood, "Chiaia");
        assert!(!church.tags.is_empty());
        assert!(church.tags.len() <= 6);
        assert!(church.tags.iter().all(|tag| !tag.eq_ignore_ascii_case("napoli")));

        assert!(by_id("n3").neighborhood.is_empty());
        assert!(by_id("n4").neighborhood.is_empty());
    }

    #[test]
    fn prefixed_and_bare_stop_names_merge() {
        let output = run(vec![
            record("t1", "Garibaldi", 40.84, 14.21, "railway=tram_stop;tram=yes"),
            record("t2", "Fermata tram Garibaldi", 40.840_09, 14.21, "railway=tram_stop;tram=yes"),
        ]);

        assert_eq!(output.report.merged, 1);
        assert_eq!(output.records.len(), 1);
        assert_eq!(output.records[0].name, "Fermata tram Garibaldi");
    }

    #[test]
    fn names_are_never_empty() {
        let output = run(vec![record("n1", "", 40.84, 14.21, "")]);
        assert!(!output.records[0].name.is_empty());
    }

    #[test]
    fn sampling_caps_the_batch() {
        let pipeline = Pipeline::new(
            "Napoli",
            PipelineConfig::from_toml("[sampling]\nmax_pois = 2\n").unwrap(),
        )
        .unwrap();
        let index = pipeline.build_index(CHIAIA).unwrap();

        let output = pipeline.run(
            vec![
                record("a", "Bar Uno", 40.84, 14.21, "amenity=bar"),
                record("b", "Bar Due", 40.84, 14.21, "amenity=bar"),
                record("c", "Hotel Tre", 40.84, 14.21, "tourism=hotel"),
            ],
            &index,
            &null_progress(),
        );

        let ids: Vec<&str> = output.records.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
        assert_eq!(output.report.sampled_out, 1);
    }

    #[test]
    fn invalid_coordinates_are_isolated() {
        let mut poi = record("n1", "Museo", f64::NAN, 14.21, "");
        poi.neighborhood = "Centro".to_string();
        let index = NeighborhoodIndex::build(&[], poi_atlas_spatial::ResolverConfig::default()).unwrap();

        assert!(matches!(
            resolve_record(&poi, &index),
            Err(RecordError::InvalidCoordinates { .. })
        ));

        let output = run(vec![poi]);
        assert_eq!(output.report.failed, 1);
        assert_eq!(output.records[0].neighborhood, "Centro");
    }
}
