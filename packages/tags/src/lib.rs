#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Descriptive tag generation for POIs.
//!
//! Candidates come from three places: whole-word hits of a fixed heritage
//! vocabulary, named entities, and content tokens. They are scored on
//! proper-noun shape, relevance to the architecture text, length and
//! frequency, then picked greedily so that no tag overlaps another.

pub mod analyzer;
pub mod heuristic;
pub mod scorer;
pub mod vocabulary;

pub use analyzer::{Analysis, PartOfSpeech, TextAnalyzer, Token};
pub use heuristic::HeuristicAnalyzer;
pub use scorer::{DEFAULT_MAX_TAGS, TagRequest, TagScorer};
pub use vocabulary::Facet;
