#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Canonical display names for POIs.
//!
//! Source names are often placeholders (`Stop`, `platform`), bare English
//! labels or empty. [`NameNormalizer`] rewrites them with a fixed rule
//! cascade into names fit for presentation, using the attributes, the
//! canonical category and the address of each record.

pub mod address;
pub mod artwork;
pub mod city;
pub mod generic;
pub mod normalize;
pub mod tables;
pub mod text;
pub mod transport;

use thiserror::Error;

pub use address::short_address;
pub use generic::is_generic_poi;
pub use normalize::{BatchContext, NameNormalizer, NormalizedBatch};
pub use transport::TransportMode;

/// Errors that can occur while setting up name normalization.
#[derive(Debug, Error)]
pub enum NamingError {
    /// A pattern derived from the city name failed to compile.
    #[error("Invalid city pattern for {city:?}: {source}")]
    CityPattern {
        /// City the pattern was built from.
        city: String,
        /// Underlying regex error.
        source: regex::Error,
    },
}
