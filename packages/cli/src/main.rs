#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the POI canonicalization pipeline.
//!
//! Reads a JSON array of raw POI records and a neighborhood polygon
//! document, runs the pipeline for one city and writes the canonical
//! records back as JSON. Smaller subcommands expose the neighborhood
//! resolver and the category mapper on their own.

mod progress;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use poi_atlas_pipeline::config::DEFAULT_CONFIG_TOML;
use poi_atlas_pipeline::{Pipeline, PipelineConfig};
use poi_atlas_poi_models::{AttributeTags, PoiRecord};
use poi_atlas_spatial::Resolution;

use crate::progress::{IndicatifProgress, init_logger};

/// Canonicalize POI batches and resolve their neighborhoods.
#[derive(Parser)]
#[command(name = "poi_atlas_cli")]
#[command(about = "Canonicalize POI batches and resolve their neighborhoods")]
struct Cli {
    /// Pipeline configuration TOML (defaults are built in).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline over a JSON array of POI records.
    Canonicalize {
        /// Municipality the batch belongs to.
        #[arg(long)]
        city: String,

        /// Input JSON array of POI records.
        #[arg(long)]
        input: PathBuf,

        /// Neighborhood polygons (`GeoJSON` or Overpass JSON).
        #[arg(long)]
        neighborhoods: PathBuf,

        /// Output JSON path.
        #[arg(long)]
        output: PathBuf,

        /// Also write the run report as JSON to this path.
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Resolve a single coordinate to a neighborhood.
    Resolve {
        /// Neighborhood polygons (`GeoJSON` or Overpass JSON).
        #[arg(long)]
        neighborhoods: PathBuf,

        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
    },

    /// Map a free-text category and OSM attributes to canonical labels.
    Categorize {
        /// Free-text source category.
        #[arg(default_value = "")]
        raw_category: String,

        /// Attribute string (`key=value;key=value`).
        #[arg(long, default_value = "")]
        attributes: String,
    },

    /// Print the built-in default configuration.
    DefaultConfig,
}

fn load_config(path: Option<&Path>) -> Result<PipelineConfig, Box<dyn std::error::Error>> {
    Ok(match path {
        Some(path) => PipelineConfig::from_path(path)?,
        None => PipelineConfig::default(),
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = init_logger();
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Canonicalize {
            city,
            input,
            neighborhoods,
            output,
            report,
        } => {
            let pipeline = Pipeline::new(&city, config)?;
            let index = pipeline.build_index(&std::fs::read_to_string(&neighborhoods)?)?;

            let records: Vec<PoiRecord> = serde_json::from_str(&std::fs::read_to_string(&input)?)?;
            log::info!("Read {} POIs from {}", records.len(), input.display());

            let progress = IndicatifProgress::stage_bar(&multi, &format!("Canonicalizing {city}"));
            let result = pipeline.run(records, &index, &progress);

            std::fs::write(&output, serde_json::to_string_pretty(&result.records)?)?;
            log::info!("Wrote {} POIs to {}", result.records.len(), output.display());

            if let Some(report_path) = report {
                std::fs::write(&report_path, serde_json::to_string_pretty(&result.report)?)?;
            }

            println!("{}", serde_json::to_string_pretty(&result.report)?);
        }
        Commands::Resolve {
            neighborhoods,
            lat,
            lon,
        } => {
            let pipeline = Pipeline::new("", config)?;
            let index = pipeline.build_index(&std::fs::read_to_string(&neighborhoods)?)?;

            match index.resolve(lat, lon) {
                Resolution::Contained {
                    name,
                    tolerance,
                    distance,
                } => println!("{name} (within tolerance {tolerance}, distance {distance:.6})"),
                Resolution::Nearest { name, distance } => {
                    println!("{name} (nearest polygon, distance {distance:.6})");
                }
                Resolution::Unresolved => println!("(no neighborhood)"),
            }
        }
        Commands::Categorize {
            raw_category,
            attributes,
        } => {
            let tags = AttributeTags::parse(&attributes);
            let osm = poi_atlas_category::classify_osm(&tags);

            println!(
                "category: {}",
                poi_atlas_category::canonical_category(&raw_category, &tags)
            );
            println!("tourism category: {}", osm.tourism);
        }
        Commands::DefaultConfig => print!("{DEFAULT_CONFIG_TOML}"),
    }

    Ok(())
}
