#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Canonical POI category taxonomy and the mappers that classify into it.
//!
//! Two inputs feed classification: a free-text category string coming from
//! cultural-heritage catalogues ([`map_category`]) and the OSM tag pair of a
//! feature ([`classify_osm`]). [`canonical_category`] combines both into the
//! persistent category stored on each record.

pub mod osm;
pub mod type_mapping;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

pub use osm::{OsmClassification, canonical_category, classify_osm};
pub use type_mapping::{classify, map_category};

/// Canonical heritage category labels.
///
/// `Display` and `FromStr` use the presentation label stored on records.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum HeritageCategory {
    // ── Religious architecture ───────────────────────────
    /// Parish and minor churches
    #[strum(serialize = "Chiesa")]
    #[serde(rename = "Chiesa")]
    Chiesa,
    /// Basilicas and cathedrals
    #[strum(serialize = "Basilica / Duomo")]
    #[serde(rename = "Basilica / Duomo")]
    BasilicaDuomo,
    /// Chapels and oratories
    #[strum(serialize = "Cappella / Oratorio")]
    #[serde(rename = "Cappella / Oratorio")]
    CappellaOratorio,
    /// Monasteries, convents, canonries
    #[strum(serialize = "Monastero / Convento")]
    #[serde(rename = "Monastero / Convento")]
    MonasteroConvento,

    // ── Civil and military architecture ─────────────────
    /// Palaces, villas and other historic civil buildings
    #[strum(serialize = "Palazzo storico")]
    #[serde(rename = "Palazzo storico")]
    PalazzoStorico,
    /// Castles and fortresses
    #[strum(serialize = "Castello / Fortezza")]
    #[serde(rename = "Castello / Fortezza")]
    CastelloFortezza,
    /// Towers and bell towers
    #[strum(serialize = "Torre / Campanile")]
    #[serde(rename = "Torre / Campanile")]
    TorreCampanile,
    /// City gates and walls
    #[strum(serialize = "Porta / Mura urbane")]
    #[serde(rename = "Porta / Mura urbane")]
    PortaMura,
    /// Squares, markets and historic centers
    #[strum(serialize = "Piazza / Spazio urbano")]
    #[serde(rename = "Piazza / Spazio urbano")]
    PiazzaSpazioUrbano,
    /// Bridges and aqueducts
    #[strum(serialize = "Ponte / Acquedotto")]
    #[serde(rename = "Ponte / Acquedotto")]
    PonteAcquedotto,

    // ── Museums and collections ─────────────────────────
    /// Museums
    #[strum(serialize = "Museo")]
    #[serde(rename = "Museo")]
    Museo,
    /// Galleries and exhibitions
    #[strum(serialize = "Mostra / Galleria")]
    #[serde(rename = "Mostra / Galleria")]
    MostraGalleria,

    // ── Archaeology ─────────────────────────────────────
    /// Archaeological areas
    #[strum(serialize = "Area archeologica")]
    #[serde(rename = "Area archeologica")]
    AreaArcheologica,
    /// Ancient monuments
    #[strum(serialize = "Monumento antico")]
    #[serde(rename = "Monumento antico")]
    MonumentoAntico,

    // ── Art and sculpture ───────────────────────────────
    /// Statues and monuments
    #[strum(serialize = "Statua / Monumento")]
    #[serde(rename = "Statua / Monumento")]
    StatuaMonumento,
    /// Fountains
    #[strum(serialize = "Fontana")]
    #[serde(rename = "Fontana")]
    Fontana,
    /// Paintings, frescoes, sculptures, mosaics
    #[strum(serialize = "Opera d’arte")]
    #[serde(rename = "Opera d’arte")]
    OperaDArte,
    /// Contemporary installations
    #[strum(serialize = "Opera contemporanea")]
    #[serde(rename = "Opera contemporanea")]
    OperaContemporanea,

    // ── Landscape and nature ────────────────────────────
    /// Parks and gardens
    #[strum(serialize = "Parco / Giardino")]
    #[serde(rename = "Parco / Giardino")]
    ParcoGiardino,
    /// Viewpoints
    #[strum(serialize = "Belvedere / Panorama")]
    #[serde(rename = "Belvedere / Panorama")]
    BelvederePanorama,
    /// Nature reserves
    #[strum(serialize = "Riserva naturale")]
    #[serde(rename = "Riserva naturale")]
    RiservaNaturale,

    // ── Memory and identity ─────────────────────────────
    /// Memorials and plaques
    #[strum(serialize = "Luogo simbolico / Memoria")]
    #[serde(rename = "Luogo simbolico / Memoria")]
    LuogoSimbolico,

    // ── Urban and intangible ────────────────────────────
    /// Street furniture
    #[strum(serialize = "Elemento urbano (generico)")]
    #[serde(rename = "Elemento urbano (generico)")]
    ElementoUrbano,
    /// Traditions, rituals, folklore
    #[strum(serialize = "Tradizione / Rituale / Folklore")]
    #[serde(rename = "Tradizione / Rituale / Folklore")]
    Tradizione,
    /// Experiential urban walks
    #[strum(serialize = "Percorso urbano esperienziale")]
    #[serde(rename = "Percorso urbano esperienziale")]
    PercorsoUrbano,
    /// Territorial cultural itineraries
    #[strum(serialize = "Itinerario culturale territoriale")]
    #[serde(rename = "Itinerario culturale territoriale")]
    ItinerarioCulturale,
    /// Event venues, theatres, auditoriums
    #[strum(serialize = "Centro eventi / Teatro / Auditorium")]
    #[serde(rename = "Centro eventi / Teatro / Auditorium")]
    CentroEventi,
    /// Contemporary public spaces
    #[strum(serialize = "Spazio pubblico contemporaneo")]
    #[serde(rename = "Spazio pubblico contemporaneo")]
    SpazioPubblico,
}
