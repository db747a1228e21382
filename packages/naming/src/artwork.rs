//! Names for artworks, statues and installations.
//!
//! Public art is rarely named in the source data. The name is composed
//! from the translated `artwork_type` and the cleaned `inscription`.

use std::sync::LazyLock;

use poi_atlas_category::HeritageCategory;
use poi_atlas_poi_models::AttributeTags;
use regex::Regex;

use crate::city::CityPatterns;
use crate::tables::{ARTWORK_TYPES, STATUE_INSCRIPTION_WORDS, STATUE_STOP_MARKERS, lookup};
use crate::text::{collapse_whitespace, smart_capitalize};

static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*[|/]\s*").expect("valid regex"));
static WIKIDATA_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bQ\d+\b").expect("valid regex"));

const IN_MEMORIA: &str = "in memoria";

/// Normalizes typographic apostrophes to `'` and lowercases.
fn normalize_label(label: &str) -> String {
    label
        .trim()
        .to_lowercase()
        .replace(['’', '‘', '`'], "'")
}

/// Returns `true` if `category` is one of the artwork categories.
#[must_use]
pub fn is_artwork_category(category: &str) -> bool {
    let normalized = normalize_label(category);

    [
        HeritageCategory::OperaDArte,
        HeritageCategory::StatuaMonumento,
        HeritageCategory::OperaContemporanea,
    ]
    .iter()
    .any(|c| normalize_label(c.as_ref()) == normalized)
}

/// A composed artwork name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtworkName {
    /// Translated type label, emitted as is.
    pub label: String,
    /// Cleaned inscription.
    pub inscription: String,
    /// The inscription is an `in memoria ...` dedication and keeps its
    /// lowercase lead.
    pub dedication: bool,
}

/// Composes an artwork name from the `artwork_type` and `inscription`
/// attributes. Returns `None` when both are empty.
#[must_use]
pub fn compose_artwork_name(tags: &AttributeTags, city: Option<&CityPatterns>) -> Option<ArtworkName> {
    let artwork_type = tags.value("artwork_type").replace('"', "");
    let artwork_type = artwork_type.trim();
    let mut inscription = tags.value("inscription").replace('"', "").trim().to_string();

    if let Some(city) = city {
        inscription = city.remove_anywhere(&inscription).trim().to_string();
    }

    let mut label = if artwork_type.is_empty() {
        String::new()
    } else {
        lookup(ARTWORK_TYPES, artwork_type)
            .map_or_else(|| smart_capitalize(artwork_type, true), ToString::to_string)
    };

    if !inscription.is_empty() {
        let collapsed = SEPARATORS.replace_all(&inscription, " ");
        let collapsed = WIKIDATA_ID.replace_all(&collapsed, "");
        inscription = collapse_whitespace(&collapsed);
    }

    let mut dedication = false;

    if label == HeritageCategory::StatuaMonumento.as_ref() {
        label = collapse_whitespace(&label.replace('/', " "));
        inscription = truncate_statue_inscription(&inscription);

        if inscription.to_lowercase().starts_with(IN_MEMORIA) {
            let rest = inscription.get(IN_MEMORIA.len()..).unwrap_or_default();
            inscription = format!("{IN_MEMORIA}{rest}");
            dedication = true;
        }
    }

    if label.is_empty() && inscription.is_empty() {
        return None;
    }

    Some(ArtworkName {
        label,
        inscription,
        dedication,
    })
}

/// Keeps an inscription up to and including the first stop marker, or its
/// first few words when there is none.
fn truncate_statue_inscription(inscription: &str) -> String {
    let words: Vec<&str> = inscription.split_whitespace().collect();

    let end = words
        .iter()
        .position(|word| STATUE_STOP_MARKERS.contains(&word.to_lowercase().as_str()))
        .map_or(STATUE_INSCRIPTION_WORDS, |i| i + 1);

    words.iter().take(end).copied().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_artwork_categories() {
        assert!(is_artwork_category("Opera d'arte"));
        assert!(is_artwork_category("opera d’arte"));
        assert!(is_artwork_category("Statua / Monumento"));
        assert!(!is_artwork_category("Chiesa"));
    }

    #[test]
    fn statue_with_dedication() {
        let city = CityPatterns::new("Napoli").unwrap();
        let tags = AttributeTags::parse(
            "artwork_type=sculpture;inscription=In memoria dei caduti di Napoli | Q12345",
        );
        let name = compose_artwork_name(&tags, city.as_ref()).unwrap();
        assert_eq!(name.label, "Statua Monumento");
        assert_eq!(name.inscription, "in memoria dei caduti di");
        assert!(name.dedication);
    }

    #[test]
    fn statue_inscription_is_truncated() {
        let tags = AttributeTags::parse(
            "artwork_type=sculpture;inscription=a giuseppe garibaldi eroe dei due mondi la cittadinanza",
        );
        let name = compose_artwork_name(&tags, None).unwrap();
        assert_eq!(name.inscription, "a giuseppe garibaldi eroe dei due");

        let tags = AttributeTags::parse(
            "artwork_type=sculpture;inscription=a orlandi / la città riconoscente",
        );
        let name = compose_artwork_name(&tags, None).unwrap();
        assert_eq!(name.inscription, "a orlandi");
    }

    #[test]
    fn translates_and_capitalizes_types() {
        let tags = AttributeTags::parse("artwork_type=bust");
        let name = compose_artwork_name(&tags, None).unwrap();
        assert_eq!(name.label, "Busto");
        assert!(name.inscription.is_empty());

        let tags = AttributeTags::parse("artwork_type=mural");
        assert_eq!(compose_artwork_name(&tags, None).unwrap().label, "Mural");
    }

    #[test]
    fn nothing_to_compose() {
        assert_eq!(compose_artwork_name(&AttributeTags::parse("tourism=artwork"), None), None);
    }
}
