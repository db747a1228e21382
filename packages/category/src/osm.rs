//! OSM tag-pair classification.
//!
//! A feature is classified by the first tag key present in
//! [`TAG_PRIORITY`], looked up together with its value in the persistent
//! and tourism tables.

use poi_atlas_poi_models::AttributeTags;

use crate::type_mapping::map_category;

/// Tag keys inspected for classification, most specific first.
pub const TAG_PRIORITY: &[&str] = &[
    "amenity",
    "shop",
    "tourism",
    "leisure",
    "public_transport",
    "highway",
    "railway",
    "natural",
];

/// Tourism category used when the tag pair is not in the table.
pub const TOURISM_FALLBACK: &str = "Altro / Generico";

/// Persistent category used when no priority key is present.
pub const PERSISTENT_FALLBACK: &str = "Altro";

const PERSISTENT_CATEGORIES: &[((&str, &str), &str)] = &[
    (("tourism", "artwork"), "Opera d’arte"),
    (("tourism", "sculpture"), "Statua / Monumento"),
    (("tourism", "installation"), "Opera contemporanea"),
    (("amenity", "restaurant"), "Locale enogastronomico"),
    (("amenity", "cafe"), "Locale enogastronomico"),
    (("amenity", "bar"), "Locale enogastronomico"),
    (("tourism", "hotel"), "Struttura ricettiva"),
    (("tourism", "guest_house"), "Struttura ricettiva diffusa"),
    (("leisure", "park"), "Spazio verde / Parco"),
    (("tourism", "viewpoint"), "Belvedere"),
    (("railway", "station"), "Infrastruttura di trasporto"),
    (("highway", "bus_stop"), "Infrastruttura di trasporto"),
    (("amenity", "parking"), "Parcheggio"),
    (("amenity", "theatre"), "Teatro"),
    (("amenity", "cinema"), "Cinema"),
];

const TOURISM_CATEGORIES: &[((&str, &str), &str)] = &[
    (("amenity", "restaurant"), "Ristorante / Osteria / Trattoria"),
    (("amenity", "fast_food"), "Ristorante / Osteria / Trattoria"),
    (("amenity", "cafe"), "Pasticceria / Bar storico"),
    (("amenity", "bar"), "Pasticceria / Bar storico"),
    (("amenity", "pub"), "Pasticceria / Bar storico"),
    (("shop", "wine"), "Enoteca / Cantina"),
    (("shop", "deli"), "Ristorante / Osteria / Trattoria"),
    (("tourism", "hotel"), "Hotel / Albergo"),
    (("tourism", "guest_house"), "B&B / Affittacamere"),
    (("tourism", "hostel"), "Ostello / Foresteria"),
    (("tourism", "motel"), "Hotel / Albergo"),
    (("railway", "station"), "Trasporto pubblico"),
    (("railway", "halt"), "Fermata urbana"),
    (("highway", "bus_stop"), "Fermata urbana"),
    (("public_transport", "platform"), "Fermata urbana"),
    (("public_transport", "stop_position"), "Fermata urbana"),
    (("amenity", "parking"), "Parcheggio / Area sosta"),
    (("tourism", "viewpoint"), "Belvedere / Punto panoramico"),
    (("leisure", "park"), "Giardino storico / Orto botanico"),
    (("amenity", "theatre"), "Evento teatrale / spettacolo"),
    (("amenity", "cinema"), "Evento culturale"),
    (("amenity", "arts_centre"), "Evento culturale"),
    (("amenity", "community_centre"), "Vita locale / di quartiere"),
    (("natural", "water"), "Spiaggia / Lago / Fiume"),
];

/// Result of classifying a feature by its OSM tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OsmClassification {
    /// The decisive `(key, value)` pair, if any priority key was present.
    pub pair: Option<(String, String)>,
    /// Persistent category label from the table, if the pair is known.
    pub persistent: Option<&'static str>,
    /// Tourism category label.
    pub tourism: &'static str,
}

impl OsmClassification {
    /// Persistent category with the untranslated fallbacks applied:
    /// `key:value` for unknown pairs, [`PERSISTENT_FALLBACK`] without a pair.
    #[must_use]
    pub fn persistent_or_fallback(&self) -> String {
        match (self.persistent, &self.pair) {
            (Some(label), _) => label.to_string(),
            (None, Some((key, value))) => format!("{key}:{value}"),
            (None, None) => PERSISTENT_FALLBACK.to_string(),
        }
    }
}

fn lookup(table: &[((&str, &str), &'static str)], key: &str, value: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|((k, v), _)| *k == key && *v == value)
        .map(|(_, label)| *label)
}

/// Classifies a feature by its tags.
#[must_use]
pub fn classify_osm(tags: &AttributeTags) -> OsmClassification {
    let pair = TAG_PRIORITY
        .iter()
        .find_map(|key| tags.get(key).map(|value| ((*key).to_string(), value.to_string())));

    let Some((key, value)) = &pair else {
        return OsmClassification {
            pair: None,
            persistent: None,
            tourism: TOURISM_FALLBACK,
        };
    };

    OsmClassification {
        persistent: lookup(PERSISTENT_CATEGORIES, key, value),
        tourism: lookup(TOURISM_CATEGORIES, key, value).unwrap_or(TOURISM_FALLBACK),
        pair,
    }
}

/// Computes the persistent category of a record.
///
/// A known OSM tag pair wins. Otherwise the free-text category goes
/// through [`map_category`], and when that is empty too the OSM fallback
/// (`key:value` or [`PERSISTENT_FALLBACK`]) is used.
#[must_use]
pub fn canonical_category(raw_category: &str, tags: &AttributeTags) -> String {
    let osm = classify_osm(tags);

    if let Some(label) = osm.persistent {
        return label.to_string();
    }

    let raw = raw_category.trim();
    if raw.is_empty() {
        return osm.persistent_or_fallback();
    }

    map_category(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_first_priority_key() {
        let tags = AttributeTags::parse("tourism=hotel;amenity=restaurant");
        let c = classify_osm(&tags);
        assert_eq!(c.pair, Some(("amenity".to_string(), "restaurant".to_string())));
        assert_eq!(c.persistent, Some("Locale enogastronomico"));
        assert_eq!(c.tourism, "Ristorante / Osteria / Trattoria");
    }

    #[test]
    fn unknown_pair_falls_back_to_key_value() {
        let tags = AttributeTags::parse("amenity=post_office;opening_hours=Mo-Fr");
        let c = classify_osm(&tags);
        assert_eq!(c.persistent, None);
        assert_eq!(c.persistent_or_fallback(), "amenity:post_office");
        assert_eq!(c.tourism, TOURISM_FALLBACK);
    }

    #[test]
    fn no_priority_key() {
        let c = classify_osm(&AttributeTags::parse("wheelchair=yes"));
        assert_eq!(c.pair, None);
        assert_eq!(c.persistent_or_fallback(), "Altro");
    }

    #[test]
    fn canonical_category_prefers_known_pair() {
        let tags = AttributeTags::parse("tourism=artwork");
        assert_eq!(canonical_category("chiesa", &tags), "Opera d’arte");
    }

    #[test]
    fn canonical_category_uses_keyword_mapping() {
        let tags = AttributeTags::parse("historic=memorial");
        assert_eq!(canonical_category("Chiesa di San Marco", &tags), "Chiesa");
        assert_eq!(canonical_category("amenity:pharmacy", &tags), "amenity:pharmacy");
    }

    #[test]
    fn canonical_category_empty_raw_uses_osm_fallback() {
        let tags = AttributeTags::parse("amenity=bank");
        assert_eq!(canonical_category("  ", &tags), "amenity:bank");
    }
}
