//! Pipeline configuration, deserialized from TOML.
//!
//! Every section is optional. The defaults live in
//! `config/default.toml`, embedded at compile time.

use std::path::Path;

use poi_atlas_neighborhood_models::NeighborhoodFieldMapping;
use poi_atlas_spatial::ResolverConfig;
use poi_atlas_tags::DEFAULT_MAX_TAGS;
use serde::{Deserialize, Serialize};

use crate::PipelineError;
use crate::merge::DEFAULT_MAX_DISTANCE_M;

/// The embedded default configuration.
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../config/default.toml");

/// Top-level pipeline configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub tags: TagsConfig,
    pub merge: MergeConfig,
    pub neighborhood: NeighborhoodConfig,
    pub sampling: SamplingConfig,
}

impl PipelineConfig {
    /// Parses a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Config`] if the document is not valid TOML
    /// or does not match the schema, [`PipelineError::InvalidConfig`] if
    /// the merge distance is unusable, and [`PipelineError::Spatial`] if
    /// the resolver settings are unusable.
    pub fn from_toml(document: &str) -> Result<Self, PipelineError> {
        let config: Self = toml::de::from_str(document)?;
        config.merge.validate()?;
        config.neighborhood.resolver.validate()?;
        Ok(config)
    }

    /// Reads and parses a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Io`] if the file cannot be read, or any
    /// error of [`Self::from_toml`].
    pub fn from_path(path: &Path) -> Result<Self, PipelineError> {
        let document = std::fs::read_to_string(path)?;
        log::info!("Loading pipeline configuration from {}", path.display());
        Self::from_toml(&document)
    }
}

/// `[tags]`: descriptive tag generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagsConfig {
    pub max_tags: usize,
    /// Terms never emitted as tags.
    pub excluded: Vec<String>,
}

impl Default for TagsConfig {
    fn default() -> Self {
        Self {
            max_tags: DEFAULT_MAX_TAGS,
            excluded: Vec::new(),
        }
    }
}

/// `[merge]`: proximity merge of same-named POIs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    /// Records closer than this many meters are merged.
    pub max_distance_m: f64,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            max_distance_m: DEFAULT_MAX_DISTANCE_M,
        }
    }
}

impl MergeConfig {
    /// Checks that the merge distance is finite and non-negative.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::InvalidConfig`] otherwise.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if !self.max_distance_m.is_finite() || self.max_distance_m < 0.0 {
            return Err(PipelineError::InvalidConfig {
                message: format!(
                    "merge.max_distance_m {} must be a non-negative number of meters",
                    self.max_distance_m
                ),
            });
        }

        Ok(())
    }
}

/// `[neighborhood]`: polygon document fields and resolver tolerances.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NeighborhoodConfig {
    #[serde(flatten)]
    pub resolver: ResolverConfig,
    pub fields: NeighborhoodFieldMapping,
}

/// `[sampling]`: round-robin sampling across tourism categories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Maximum POIs kept; `0` keeps all.
    pub max_pois: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_default_matches_default() {
        let parsed = PipelineConfig::from_toml(DEFAULT_CONFIG_TOML).unwrap();
        assert_eq!(parsed, PipelineConfig::default());
    }

    #[test]
    fn sections_are_optional() {
        let config = PipelineConfig::from_toml("[merge]\nmax_distance_m = 25.0\n").unwrap();
        assert!((config.merge.max_distance_m - 25.0).abs() < f64::EPSILON);
        assert_eq!(config.tags, TagsConfig::default());
        assert_eq!(config.neighborhood, NeighborhoodConfig::default());

        assert_eq!(PipelineConfig::from_toml("").unwrap(), PipelineConfig::default());
    }

    #[test]
    fn neighborhood_section() {
        let config = PipelineConfig::from_toml(
            r#"
            [neighborhood]
            tolerances = [0.001]

            [neighborhood.fields]
            name = "QUARTIERE"
            "#,
        )
        .unwrap();

        assert_eq!(config.neighborhood.resolver.tolerances, vec![0.001]);
        assert_eq!(config.neighborhood.fields.name, "QUARTIERE");
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            PipelineConfig::from_toml("[tags]\nmax_tags = \"six\"\n"),
            Err(PipelineError::Config(_))
        ));
        assert!(matches!(
            PipelineConfig::from_toml("[neighborhood]\ntolerances = [0.01, 0.001]\n"),
            Err(PipelineError::Spatial(_))
        ));
    }

    #[test]
    fn rejects_unusable_merge_distance() {
        for document in [
            "[merge]\nmax_distance_m = -1.0\n",
            "[merge]\nmax_distance_m = nan\n",
            "[merge]\nmax_distance_m = inf\n",
        ] {
            assert!(
                matches!(
                    PipelineConfig::from_toml(document),
                    Err(PipelineError::InvalidConfig { .. })
                ),
                "{document}"
            );
        }

        let zero = PipelineConfig::from_toml("[merge]\nmax_distance_m = 0.0\n").unwrap();
        assert!(zero.merge.max_distance_m.abs() < f64::EPSILON);
    }
}
