//! Transit stop and station naming.

use std::sync::LazyLock;

use poi_atlas_poi_models::AttributeTags;
use regex::Regex;
use strum_macros::{AsRefStr, Display};

use crate::tables::{MEANINGLESS_STOP_NAMES, NATIONAL_RAIL_OPERATOR, SUBURBAN_RAIL_KEYWORDS};
use crate::text::fold_for_match;

static SUBURBAN_RAIL_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    SUBURBAN_RAIL_KEYWORDS
        .iter()
        .map(|keyword| {
            Regex::new(&format!(r"\b{}\b", regex::escape(keyword))).expect("valid regex")
        })
        .collect()
});

/// Transit mode of a stop, in priority order. `Display` is the name
/// prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
pub enum TransportMode {
    #[strum(serialize = "Fermata autobus")]
    Bus,
    #[strum(serialize = "Fermata treno")]
    SuburbanRail,
    #[strum(serialize = "Stazione Ferroviaria")]
    RailwayStation,
    #[strum(serialize = "Fermata treno")]
    Train,
    #[strum(serialize = "Stazione metropolitana")]
    Subway,
    #[strum(serialize = "Stazione funicolare")]
    Funicular,
    #[strum(serialize = "Fermata tram")]
    Tram,
    #[strum(serialize = "Fermata")]
    Stop,
}

/// Returns `true` if the attributes describe a transit stop or station.
#[must_use]
pub fn is_transit(tags: &AttributeTags) -> bool {
    tags.contains_key("public_transport")
        || tags.has("highway", "bus_stop")
        || tags.has("bus", "yes")
        || tags.contains_key("railway")
        || ["train", "tram", "light_rail", "subway", "funicular"]
            .iter()
            .any(|key| tags.has(key, "yes"))
}

/// Returns `true` for a railway station run by the national operator.
#[must_use]
pub fn is_national_rail_station(tags: &AttributeTags) -> bool {
    tags.has("railway", "station")
        && (tags.has("operator", NATIONAL_RAIL_OPERATOR)
            || tags.has("network", NATIONAL_RAIL_OPERATOR))
}

/// Returns `true` if the name, operator or network mentions a regional
/// railway.
#[must_use]
pub fn is_suburban_rail(name: &str, tags: &AttributeTags) -> bool {
    let haystack = format!(
        "{} {} {}",
        name.to_lowercase(),
        tags.value("operator"),
        tags.value("network")
    );

    SUBURBAN_RAIL_PATTERNS
        .iter()
        .any(|pattern| pattern.is_match(&haystack))
}

/// Picks the transit mode. `name` is the stop name with the city already
/// stripped.
#[must_use]
pub fn transport_mode(name: &str, tags: &AttributeTags) -> TransportMode {
    if tags.has("bus", "yes") || tags.has("highway", "bus_stop") {
        TransportMode::Bus
    } else if is_suburban_rail(name, tags) {
        TransportMode::SuburbanRail
    } else if tags.has("railway", "station") {
        TransportMode::RailwayStation
    } else if tags.has("train", "yes") || tags.has("railway", "stop") {
        TransportMode::Train
    } else if tags.has("subway", "yes") {
        TransportMode::Subway
    } else if tags.has("funicular", "yes") {
        TransportMode::Funicular
    } else if tags.has("tram", "yes") || tags.has("light_rail", "yes") {
        TransportMode::Tram
    } else {
        TransportMode::Stop
    }
}

/// Returns `true` for placeholder stop names and names of three
/// characters or fewer.
#[must_use]
pub fn is_meaningless_stop_name(name: &str) -> bool {
    let folded = fold_for_match(name);
    MEANINGLESS_STOP_NAMES.contains(&folded.as_str()) || folded.chars().count() <= 3
}
