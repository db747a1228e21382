//! Candidate extraction, scoring and greedy tag selection.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use regex::Regex;

use crate::analyzer::TextAnalyzer;
use crate::heuristic::HeuristicAnalyzer;
use crate::vocabulary::{
    Facet, VOCABULARY, has_inflection_suffix, is_domain_stopword, is_preposition,
};

/// Default upper bound on the number of tags per POI.
pub const DEFAULT_MAX_TAGS: usize = 6;

const PROPER_NOUN_BONUS: usize = 25;
const ARCHITECTURE_BONUS: usize = 20;
const MAX_LENGTH_BONUS: usize = 12;
/// Added to every candidate longer than three characters, so that short
/// ones rank ten points lower without going negative.
const LENGTH_BASE: usize = 10;

static VOCABULARY_PATTERNS: LazyLock<Vec<(&'static str, Facet, Regex)>> = LazyLock::new(|| {
    VOCABULARY
        .iter()
        .map(|(term, facet)| {
            let pattern = format!(r"\b{}\b", regex::escape(term));
            (*term, *facet, Regex::new(&pattern).expect("valid regex"))
        })
        .collect()
});

static ENTITY_NOISE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s.\-]").expect("valid regex"));
static TOKEN_NOISE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\-]").expect("valid regex"));
static ARCHITECTURE_NOISE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s\-]").expect("valid regex"));
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Inputs for one POI.
#[derive(Debug, Clone, Copy)]
pub struct TagRequest<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub history: &'a str,
    pub architecture: &'a str,
    /// Municipality name; never emitted as a tag.
    pub city: &'a str,
    pub max_tags: usize,
    /// Terms never emitted as tags, compared case-insensitively.
    pub excluded: &'a [String],
}

impl Default for TagRequest<'_> {
    fn default() -> Self {
        Self {
            name: "",
            description: "",
            history: "",
            architecture: "",
            city: "",
            max_tags: DEFAULT_MAX_TAGS,
            excluded: &[],
        }
    }
}

/// Ranks descriptive tags for POIs.
#[derive(Debug, Clone, Default)]
pub struct TagScorer<A = HeuristicAnalyzer> {
    analyzer: A,
}

impl<A: TextAnalyzer> TagScorer<A> {
    #[must_use]
    pub const fn new(analyzer: A) -> Self {
        Self { analyzer }
    }

    /// Generates up to `request.max_tags` tags.
    ///
    /// The result has no case-insensitive duplicates, no tag that contains
    /// or is contained in another, and never the city or an excluded term.
    #[must_use]
    pub fn generate_tags(&self, request: &TagRequest<'_>) -> Vec<String> {
        let text = [
            request.name,
            request.description,
            request.history,
            request.architecture,
        ]
        .join(" ");

        if text.trim().is_empty() || request.max_tags == 0 {
            return Vec::new();
        }

        let city = request.city.trim().to_lowercase();
        let excluded: BTreeSet<String> = request
            .excluded
            .iter()
            .map(|term| term.trim().to_lowercase())
            .collect();
        let is_blocked = |lower: &str| lower == city || excluded.contains(lower);

        let vocabulary_tags = vocabulary_matches(&text.to_lowercase(), &is_blocked);

        let analysis = self.analyzer.analyze(&text);

        let entity_tags: Vec<String> = analysis
            .entities
            .iter()
            .filter_map(|entity| clean_entity(entity, &is_blocked))
            .collect();

        let mut frequency: BTreeMap<String, usize> = BTreeMap::new();
        let mut free_tokens = Vec::new();
        for token in &analysis.tokens {
            if token.is_stop
                || token.is_punct
                || token.like_num
                || token.pos.is_closed_or_verbal()
                || token.text.chars().count() < 3
            {
                continue;
            }

            let clean = TOKEN_NOISE.replace_all(&token.text, " ").trim().to_string();
            if clean.is_empty() {
                continue;
            }

            let lower = clean.to_lowercase();
            if lower
                .split_whitespace()
                .any(|part| is_domain_stopword(part) || is_preposition(part))
                || is_blocked(&lower)
            {
                continue;
            }

            *frequency.entry(lower).or_default() += 1;
            free_tokens.push(clean);
        }

        let architecture_terms = architecture_ngrams(request.architecture);

        let mut candidates: Vec<String> = Vec::new();
        for candidate in vocabulary_tags
            .into_iter()
            .chain(entity_tags.iter().cloned())
            .chain(free_tokens)
        {
            if !candidates.contains(&candidate) {
                candidates.push(candidate);
            }
        }

        let mut scored: Vec<(usize, String)> = candidates
            .into_iter()
            .map(|candidate| {
                (
                    score(&candidate, &architecture_terms, &frequency),
                    candidate,
                )
            })
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0));

        let multiword_entities: Vec<String> = entity_tags
            .iter()
            .filter(|entity| entity.split_whitespace().count() > 1)
            .map(|entity| entity.to_lowercase())
            .collect();

        let mut seen = excluded.clone();
        seen.insert(city.clone());
        let mut selected: Vec<String> = Vec::new();

        for (_, candidate) in scored {
            if selected.len() >= request.max_tags {
                break;
            }

            let lower = candidate.to_lowercase();

            if selected.iter().any(|tag| {
                let tag = tag.to_lowercase();
                tag.contains(&lower) || lower.contains(&tag)
            }) {
                continue;
            }

            if !lower.contains(char::is_whitespace)
                && multiword_entities.iter().any(|entity| entity.contains(&lower))
            {
                continue;
            }

            if seen.insert(lower) {
                selected.push(candidate);
            }
        }

        log::debug!("Selected {} tags for {:?}: {selected:?}", selected.len(), request.name);

        selected
    }
}

fn vocabulary_matches(text_lower: &str, is_blocked: &impl Fn(&str) -> bool) -> Vec<String> {
    VOCABULARY_PATTERNS
        .iter()
        .filter(|(term, _, pattern)| !is_blocked(term) && pattern.is_match(text_lower))
        .map(|(term, facet, _)| {
            log::debug!("Vocabulary match {term:?} ({facet})");
            (*term).to_string()
        })
        .collect()
}

/// Cleans an entity string, or rejects it.
fn clean_entity(entity: &str, is_blocked: &impl Fn(&str) -> bool) -> Option<String> {
    let cleaned = ENTITY_NOISE.replace_all(entity.trim(), " ");
    let cleaned = WHITESPACE.replace_all(&cleaned, " ");
    let cleaned = cleaned.trim();

    if cleaned.is_empty() || is_blocked(&cleaned.to_lowercase()) {
        return None;
    }

    let words: Vec<&str> = cleaned
        .split_whitespace()
        .filter(|word| !is_preposition(&word.to_lowercase()))
        .collect();
    if words.is_empty() {
        return None;
    }

    let cleaned = words.join(" ");
    if has_inflection_suffix(&cleaned.to_lowercase()) {
        return None;
    }

    Some(cleaned)
}

/// Unigrams, bigrams and trigrams of the architecture text.
fn architecture_ngrams(architecture: &str) -> Vec<String> {
    let normalized = ARCHITECTURE_NOISE
        .replace_all(architecture, " ")
        .to_lowercase();
    let words: Vec<&str> = normalized.split_whitespace().collect();

    let mut terms: Vec<String> = words.iter().map(|w| (*w).to_string()).collect();
    terms.extend(words.windows(2).map(|w| w.join(" ")));
    terms.extend(words.windows(3).map(|w| w.join(" ")));
    terms
}

/// Looks like a proper noun: capitalized and not all caps.
fn looks_proper(candidate: &str) -> bool {
    candidate.chars().next().is_some_and(char::is_uppercase)
        && candidate.chars().any(char::is_lowercase)
}

fn score(candidate: &str, architecture_terms: &[String], frequency: &BTreeMap<String, usize>) -> usize {
    let lower = candidate.to_lowercase();
    let length = lower.chars().count();

    let mut score = length.min(MAX_LENGTH_BONUS) + frequency.get(&lower).copied().unwrap_or(0);

    if looks_proper(candidate) {
        score += PROPER_NOUN_BONUS;
    }
    if architecture_terms.iter().any(|term| term.contains(&lower)) {
        score += ARCHITECTURE_BONUS;
    }
    if length > 3 {
        score += LENGTH_BASE;
    }

    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{Analysis, PartOfSpeech, Token};

    struct FakeAnalyzer {
        analysis: Analysis,
    }

    impl FakeAnalyzer {
        fn new(tokens: &[(&str, PartOfSpeech, bool)], entities: &[&str]) -> Self {
            Self {
                analysis: Analysis {
                    tokens: tokens
                        .iter()
                        .map(|(text, pos, stop)| Token::new(*text, *pos, *stop))
                        .collect(),
                    entities: entities.iter().map(ToString::to_string).collect(),
                },
            }
        }
    }

    impl TextAnalyzer for FakeAnalyzer {
        fn analyze(&self, _text: &str) -> Analysis {
            self.analysis.clone()
        }
    }

    fn castel_nuovo() -> FakeAnalyzer {
        FakeAnalyzer::new(
            &[
                ("Maschio", PartOfSpeech::ProperNoun, false),
                ("Angioino", PartOfSpeech::ProperNoun, false),
                ("torre", PartOfSpeech::Noun, false),
                ("torre", PartOfSpeech::Noun, false),
                ("in", PartOfSpeech::Adposition, true),
                ("pietra", PartOfSpeech::Noun, false),
                ("1443", PartOfSpeech::Numeral, false),
                ("fu", PartOfSpeech::Aux, true),
                ("san", PartOfSpeech::Noun, false),
            ],
            &["Maschio Angioino", "Napoli", "restaurare", "della Sanità"],
        )
    }

    fn castel_nuovo_request(max_tags: usize) -> TagRequest<'static> {
        TagRequest {
            name: "Castel Nuovo",
            architecture: "torre in pietra",
            city: "Napoli",
            max_tags,
            ..TagRequest::default()
        }
    }

    #[test]
    fn ranks_and_filters_candidates() {
        let scorer = TagScorer::new(castel_nuovo());
        let tags = scorer.generate_tags(&castel_nuovo_request(6));
        assert_eq!(tags, vec!["Maschio Angioino", "Sanità", "pietra", "torre"]);
    }

    #[test]
    fn respects_max_tags() {
        let scorer = TagScorer::new(castel_nuovo());
        let tags = scorer.generate_tags(&castel_nuovo_request(2));
        assert_eq!(tags, vec!["Maschio Angioino", "Sanità"]);
        assert!(scorer.generate_tags(&castel_nuovo_request(0)).is_empty());
    }

    #[test]
    fn excluded_terms_are_case_insensitive() {
        let scorer = TagScorer::new(castel_nuovo());
        let excluded = vec!["PIETRA".to_string()];
        let request = TagRequest {
            excluded: &excluded,
            ..castel_nuovo_request(6)
        };
        let tags = scorer.generate_tags(&request);
        assert!(tags.iter().all(|t| !t.eq_ignore_ascii_case("pietra")));
        assert!(tags.contains(&"torre".to_string()));
    }

    #[test]
    fn single_word_inside_multiword_entity_is_skipped() {
        let mut tokens = vec![("Porta", PartOfSpeech::ProperNoun, false)];
        tokens.extend(std::iter::repeat_n(("Capuana", PartOfSpeech::ProperNoun, false), 20));
        let scorer = TagScorer::new(FakeAnalyzer::new(&tokens, &["Porta Capuana"]));

        let tags = scorer.generate_tags(&TagRequest {
            name: "Porta Capuana",
            ..TagRequest::default()
        });
        assert_eq!(tags, vec!["Porta Capuana"]);
    }

    #[test]
    fn empty_input_yields_no_tags() {
        let scorer: TagScorer = TagScorer::default();
        assert!(scorer.generate_tags(&TagRequest::default()).is_empty());
    }

    #[test]
    fn heuristic_pipeline_guarantees() {
        let scorer: TagScorer = TagScorer::default();
        let excluded = vec!["chiesa".to_string()];
        let request = TagRequest {
            name: "Chiesa di Santa Maria la Nova",
            description: "Chiesa barocca costruita in stile gotico con affresco nel chiostro. \
                          Napoli conserva la chiesa.",
            city: "Napoli",
            excluded: &excluded,
            ..TagRequest::default()
        };

        let tags = scorer.generate_tags(&request);
        assert!(!tags.is_empty());
        assert!(tags.len() <= DEFAULT_MAX_TAGS);
        assert!(tags.contains(&"affresco".to_string()));

        let lowered: Vec<String> = tags.iter().map(|t| t.to_lowercase()).collect();
        assert!(!lowered.contains(&"napoli".to_string()));
        assert!(!lowered.contains(&"chiesa".to_string()));
        for (i, tag) in lowered.iter().enumerate() {
            assert!(!lowered[i + 1..].contains(tag), "duplicate tag {tag}");
        }

        assert_eq!(tags, scorer.generate_tags(&request));
    }
}
