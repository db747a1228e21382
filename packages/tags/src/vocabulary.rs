//! Fixed heritage vocabulary and word lists used by the tag scorer.

use strum_macros::Display;

/// Facet of a vocabulary term, reported in match diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Facet {
    Period,
    Style,
    Material,
    Technique,
    Theme,
}

/// Domain vocabulary in declaration order. Matching terms always become
/// tag candidates, regardless of what the analyzer finds.
pub const VOCABULARY: &[(&str, Facet)] = &[
    ("preistorico", Facet::Period),
    ("protostorico", Facet::Period),
    ("antico", Facet::Period),
    ("medievale", Facet::Period),
    ("rinascimentale", Facet::Period),
    ("barocco", Facet::Style),
    ("neoclassico", Facet::Style),
    ("moderno", Facet::Period),
    ("contemporaneo", Facet::Period),
    ("romanico", Facet::Style),
    ("gotico", Facet::Style),
    ("pietra", Facet::Material),
    ("marmo", Facet::Material),
    ("legno", Facet::Material),
    ("bronzo", Facet::Material),
    ("affresco", Facet::Technique),
    ("mosaico", Facet::Technique),
    ("religione", Facet::Theme),
    ("memoria", Facet::Theme),
    ("tradizione", Facet::Theme),
    ("storia", Facet::Theme),
    ("comunità", Facet::Theme),
    ("territorio", Facet::Theme),
    ("paesaggio", Facet::Theme),
    ("artigianato", Facet::Theme),
    ("musica", Facet::Theme),
    ("enogastronomia", Facet::Theme),
];

/// Catalogue boilerplate that says nothing about the POI.
pub const DOMAIN_STOPWORDS: &[&str] = &[
    "sant",
    "santa",
    "san",
    "s.",
    "s",
    "elemento",
    "orizzontale",
    "verticale",
    "realizzazione",
    "attuale",
    "presente",
    "oggi",
    "schema",
    "progetto",
    "piano",
    "costruzione",
    "struttura",
    "copertura",
    "pavimentazione",
    "altro",
];

/// Simple and articulated Italian prepositions.
pub const PREPOSITIONS: &[&str] = &[
    "di", "a", "da", "in", "con", "su", "per", "tra", "fra", "del", "della", "dello", "dei",
    "degli", "delle", "al", "allo", "alla", "ai", "agli", "alle", "dal", "dallo", "dalla",
    "dai", "dagli", "dalle", "nel", "nello", "nella", "nei", "negli", "nelle", "sul", "sullo",
    "sulla", "sui", "sugli", "sulle",
];

/// Endings that mark an entity string as a verb form or a generic
/// feminine/plural noun phrase rather than a name.
pub const INFLECTION_SUFFIXES: &[&str] = &["are", "ere", "ire", "ato", "uto", "ito", "ando", "endo", "e"];

#[must_use]
pub fn is_domain_stopword(word: &str) -> bool {
    DOMAIN_STOPWORDS.contains(&word)
}

#[must_use]
pub fn is_preposition(word: &str) -> bool {
    PREPOSITIONS.contains(&word)
}

#[must_use]
pub fn has_inflection_suffix(word: &str) -> bool {
    INFLECTION_SUFFIXES.iter().any(|suffix| word.ends_with(suffix))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facet_of(term: &str) -> Option<Facet> {
        VOCABULARY.iter().find(|(t, _)| *t == term).map(|(_, facet)| *facet)
    }

    #[test]
    fn style_terms_are_styles() {
        assert_eq!(facet_of("barocco"), Some(Facet::Style));
        assert_eq!(facet_of("neoclassico"), Some(Facet::Style));
        assert_eq!(facet_of("marmo"), Some(Facet::Material));
        assert_eq!(facet_of("chiesa"), None);
        assert_eq!(Facet::Technique.to_string(), "technique");
    }

    #[test]
    fn vocabulary_has_no_duplicates() {
        for (i, (term, _)) in VOCABULARY.iter().enumerate() {
            assert!(
                VOCABULARY[i + 1..].iter().all(|(other, _)| other != term),
                "{term} declared twice"
            );
        }
    }

    #[test]
    fn inflection_suffixes() {
        assert!(has_inflection_suffix("costruito"));
        assert!(has_inflection_suffix("chiese"));
        assert!(!has_inflection_suffix("vesuvio"));
    }
}
