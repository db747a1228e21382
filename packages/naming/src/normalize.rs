//! The naming rule cascade.
//!
//! Stages run in a fixed order on a `DraftName`: translation of English
//! source labels, transit stop rewriting, category-driven naming, generic
//! single-word augmentation, and final casing. Text composed by the rules
//! (prefixes and labels) is kept apart from source-derived text so only the
//! latter is title-cased.

use poi_atlas_poi_models::{AttributeTags, PoiRecord, UNNAMED_POI};

use crate::NamingError;
use crate::address::short_address;
use crate::artwork::{compose_artwork_name, is_artwork_category};
use crate::city::CityPatterns;
use crate::tables::{
    GENERIC_CATEGORY_LABELS, GENERIC_WITH_ADDRESS, STREET_INDICATORS, TRANSLATIONS, lookup,
};
use crate::text::{fix_initials, smart_capitalize};
use crate::transport::{
    TransportMode, is_meaningless_stop_name, is_national_rail_station, is_transit, transport_mode,
};

/// Facts about the whole batch that individual naming decisions depend on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchContext {
    /// Number of national-rail stations in the batch. With more than one,
    /// station names are disambiguated by address.
    pub national_rail_stations: usize,
}

impl BatchContext {
    #[must_use]
    pub fn from_batch(records: &[PoiRecord]) -> Self {
        let national_rail_stations = records
            .iter()
            .filter(|poi| is_national_rail_station(&poi.attribute_tags()))
            .count();

        Self {
            national_rail_stations,
        }
    }
}

/// Records after name normalization, with rename counts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedBatch {
    pub records: Vec<PoiRecord>,
    pub renamed: usize,
    pub unchanged: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct DraftName {
    /// Rule-composed leading text, emitted as is.
    label: String,
    /// Source-derived text, title-cased on render.
    body: String,
    body_verbatim: bool,
}

impl DraftName {
    fn source(body: &str) -> Self {
        Self {
            body: body.trim().to_string(),
            ..Self::default()
        }
    }

    fn labeled(label: &str, body: &str) -> Self {
        Self {
            label: label.trim().to_string(),
            body: body.trim().to_string(),
            body_verbatim: false,
        }
    }

    fn text(&self) -> String {
        match (self.label.is_empty(), self.body.is_empty()) {
            (true, _) => self.body.clone(),
            (false, true) => self.label.clone(),
            (false, false) => format!("{} {}", self.label, self.body),
        }
    }

    fn append(&mut self, separator: &str, text: &str) {
        if text.is_empty() {
            return;
        }
        if self.body.is_empty() {
            self.body = if self.label.is_empty() {
                text.to_string()
            } else {
                format!("{}{text}", separator.trim_start())
            };
        } else {
            self.body = format!("{}{separator}{text}", self.body);
        }
    }

    fn with_prefix(mut self, prefix: &str) -> Self {
        self.label = if self.label.is_empty() {
            prefix.to_string()
        } else {
            format!("{prefix} {}", self.label)
        };
        self
    }

    fn render(&self) -> String {
        let body = if self.body_verbatim {
            self.body.clone()
        } else {
            smart_capitalize(&self.body, self.label.is_empty())
        };

        let joined = Self {
            label: self.label.clone(),
            body,
            body_verbatim: true,
        }
        .text();

        fix_initials(&joined).trim().to_string()
    }
}

/// Canonical name builder for one city.
#[derive(Debug, Clone)]
pub struct NameNormalizer {
    city: Option<CityPatterns>,
}

impl NameNormalizer {
    /// Compiles the city-dependent patterns.
    ///
    /// # Errors
    ///
    /// Returns [`NamingError::CityPattern`] if a pattern built from the
    /// city name does not compile.
    pub fn new(city: &str) -> Result<Self, NamingError> {
        let city = CityPatterns::new(city).map_err(|source| NamingError::CityPattern {
            city: city.to_string(),
            source,
        })?;

        Ok(Self { city })
    }

    /// Returns a copy of `poi` with `name` set to the canonical name and
    /// `category`/`address` trimmed.
    #[must_use]
    pub fn normalize(&self, poi: &PoiRecord, context: &BatchContext) -> PoiRecord {
        let mut normalized = poi.clone();
        normalized.name = self.canonical_name(poi, context);
        normalized.category = poi.category.trim().to_string();
        normalized.address = poi.address.trim().to_string();

        log::debug!("{}: {:?} -> {:?}", poi.id, poi.raw_name, normalized.name);

        normalized
    }

    /// Normalizes a whole batch, computing the [`BatchContext`] first.
    #[must_use]
    pub fn normalize_batch(&self, records: Vec<PoiRecord>) -> NormalizedBatch {
        let context = BatchContext::from_batch(&records);
        let mut batch = NormalizedBatch::default();

        for poi in records {
            let normalized = self.normalize(&poi, &context);
            if normalized.name == poi.raw_name.trim() {
                batch.unchanged += 1;
            } else {
                batch.renamed += 1;
            }
            batch.records.push(normalized);
        }

        log::info!(
            "Normalized {} names ({} renamed, {} unchanged)",
            batch.records.len(),
            batch.renamed,
            batch.unchanged
        );

        batch
    }

    fn canonical_name(&self, poi: &PoiRecord, context: &BatchContext) -> String {
        let raw = poi.raw_name.trim();
        let tags = poi.attribute_tags();
        let short = short_address(&poi.address, self.city.as_ref());

        let mut draft = translate(raw);

        if is_transit(&tags) {
            draft = self.rename_transit(draft, &tags, &short, context);
        }

        draft = self.apply_category(draft, raw, &poi.category, &tags, &short);
        draft = append_address_to_generic(draft, &short);

        let name = draft.render();
        if !name.is_empty() {
            return name;
        }

        [&poi.category, &poi.tourism_category, &poi.raw_category]
            .into_iter()
            .map(|s| s.trim())
            .find(|s| !s.is_empty())
            .unwrap_or(UNNAMED_POI)
            .to_string()
    }

    fn strip_city(&self, mut draft: DraftName) -> DraftName {
        let Some(city) = &self.city else {
            return draft;
        };

        if draft.label.is_empty() {
            draft.body = city.strip_leading(&draft.body);
        }
        draft.body = city.strip_trailing(&draft.body);
        draft
    }

    fn rename_transit(
        &self,
        draft: DraftName,
        tags: &AttributeTags,
        short: &str,
        context: &BatchContext,
    ) -> DraftName {
        let mut stop = self.strip_city(draft.clone());
        let mode = transport_mode(&stop.text(), tags);

        if mode == TransportMode::RailwayStation && is_national_rail_station(tags) {
            stop = self
                .city
                .as_ref()
                .map_or(draft, |city| DraftName::source(city.name()));

            if context.national_rail_stations > 1 {
                stop.append(" - ", short);
            }
        }

        let prefix = mode.to_string();

        if is_meaningless_stop_name(&stop.text()) {
            return DraftName::labeled(&prefix, short);
        }

        match strip_prefix(&stop.text(), &prefix) {
            Some(rest) => DraftName::source(rest).with_prefix(&prefix),
            None => stop.with_prefix(&prefix),
        }
    }

    fn apply_category(
        &self,
        draft: DraftName,
        raw: &str,
        category: &str,
        tags: &AttributeTags,
        short: &str,
    ) -> DraftName {
        let base = category.rsplit(':').next().unwrap_or_default().trim();

        if is_artwork_category(base) {
            return compose_artwork_name(tags, self.city.as_ref()).map_or(draft, |artwork| {
                DraftName {
                    label: artwork.label,
                    body: artwork.inscription,
                    body_verbatim: artwork.dedication,
                }
            });
        }

        if let Some(label) = lookup(GENERIC_CATEGORY_LABELS, base) {
            let single_word = raw.split_whitespace().count() == 1;
            return DraftName::labeled(label, if single_word { short } else { "" });
        }

        draft
    }
}

/// Replaces a leading English term with its Italian label.
fn translate(name: &str) -> DraftName {
    let spaced = name.replace('_', " ");
    let spaced = spaced.trim();

    for (term, label) in TRANSLATIONS {
        let Some(head) = spaced.get(..term.len()) else {
            continue;
        };
        if !head.eq_ignore_ascii_case(term) {
            continue;
        }

        let rest = &spaced[term.len()..];
        if rest.is_empty() || rest.starts_with(' ') {
            return DraftName::labeled(label, rest);
        }
    }

    DraftName::source(name)
}

/// Returns what follows a leading `prefix` (ASCII case-insensitive) when it
/// ends on a word boundary.
fn strip_prefix<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let head = text.get(..prefix.len())?;
    let rest = &text[prefix.len()..];

    (head.eq_ignore_ascii_case(prefix) && (rest.is_empty() || rest.starts_with(' ')))
        .then(|| rest.trim())
}

/// Appends the short address to a name that is a single generic word.
fn append_address_to_generic(mut draft: DraftName, short: &str) -> DraftName {
    let text = draft.text().to_lowercase();
    let mut words = text.split_whitespace();

    let (Some(word), None) = (words.next(), words.next()) else {
        return draft;
    };

    if GENERIC_WITH_ADDRESS.contains(&word)
        && !STREET_INDICATORS.iter().any(|indicator| word.contains(indicator))
    {
        draft.append(" ", short);
    }

    draft
}
