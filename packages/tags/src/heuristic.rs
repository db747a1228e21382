//! Lexicon-and-capitalization analyzer for Italian heritage text.
//!
//! Words come from Unicode word segmentation. Closed-class words are
//! looked up in small fixed lexicons, lowercase words with participle or
//! infinitive endings are treated as verbs, and runs of capitalized words
//! (optionally joined by `di`/`del`/`della`/... connectors) become entities.

use unicode_segmentation::UnicodeSegmentation;

use crate::analyzer::{Analysis, PartOfSpeech, TextAnalyzer, Token};
use crate::vocabulary::PREPOSITIONS;

const DETERMINERS: &[&str] = &[
    "il", "lo", "la", "i", "gli", "le", "l'", "un", "uno", "una", "un'", "questo", "questa",
    "questi", "queste", "quest'", "quel", "quello", "quella", "quei", "quegli", "quelle",
    "quell'", "ogni", "alcuni", "alcune", "ciascun", "ciascuna",
];

const ELIDED_PREPOSITIONS: &[&str] = &[
    "d'", "dell'", "all'", "dall'", "nell'", "sull'", "coll'", "tra'",
];

const CONJUNCTIONS: &[&str] = &[
    "e", "ed", "o", "od", "ma", "né", "oppure", "però", "quindi", "mentre", "se", "perché",
    "poiché", "quando", "sia", "anzi",
];

const PRONOUNS: &[&str] = &[
    "che", "chi", "cui", "quale", "quali", "si", "ci", "vi", "ne", "c'", "s'", "egli", "ella",
    "esso", "essa", "essi", "esse", "lui", "lei", "loro", "suo", "sua", "suoi", "sue", "io", "tu",
    "noi", "voi", "ciò",
];

const AUXILIARIES: &[&str] = &[
    "è", "e'", "era", "erano", "sono", "fu", "furono", "siano", "essere", "stato", "stata",
    "stati", "state", "ha", "hanno", "aveva", "avevano", "ebbe", "ebbero", "avere", "viene",
    "vengono", "venne", "vennero",
];

const STOPWORDS: &[&str] = &[
    "non", "più", "anche", "come", "molto", "molti", "molta", "molte", "già", "ancora", "poi",
    "così", "dove", "sempre", "oltre", "dopo", "prima", "solo", "tutto", "tutti", "tutta",
    "tutte", "altri", "altre", "altra", "stesso", "stessa", "qui", "lì", "là", "sopra",
    "sotto", "verso", "durante", "contro",
];

/// Lowercase words linking the parts of a multi-word name.
const CONNECTORS: &[&str] = &[
    "di", "de", "d'", "del", "dell'", "della", "dello", "dei", "degli", "delle", "da", "dal",
    "dalla", "la",
];

const VERB_SUFFIXES: &[&str] = &[
    "are", "ere", "ire", "ando", "endo", "ato", "ata", "ati", "ate", "ito", "ita", "iti", "ite",
    "uto", "uta", "uti", "ute",
];

/// Bundled [`TextAnalyzer`] with no model files.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicAnalyzer;

impl HeuristicAnalyzer {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl TextAnalyzer for HeuristicAnalyzer {
    fn analyze(&self, text: &str) -> Analysis {
        let mut tokens = Vec::new();
        let mut runs = EntityRuns::default();
        let mut sentence_start = true;

        for segment in text.split_word_bounds() {
            if segment.chars().all(char::is_whitespace) {
                continue;
            }

            if !segment.chars().any(char::is_alphanumeric) {
                tokens.push(Token::new(segment, PartOfSpeech::Punctuation, false));
                runs.flush();
                if segment.contains(['.', '!', '?']) {
                    sentence_start = true;
                }
                continue;
            }

            let (elided, rest) = split_elision(segment);
            for piece in elided.into_iter().chain(std::iter::once(rest)) {
                let token = classify_word(piece, sentence_start);
                runs.observe(&token);
                tokens.push(token);
                sentence_start = false;
            }
        }

        runs.flush();

        Analysis {
            tokens,
            entities: runs.found,
        }
    }
}

#[derive(Default)]
struct EntityRuns {
    current: Vec<String>,
    connectors: Vec<String>,
    found: Vec<String>,
}

impl EntityRuns {
    fn observe(&mut self, token: &Token) {
        if token.pos == PartOfSpeech::ProperNoun {
            if !self.current.is_empty() {
                self.current.append(&mut self.connectors);
            }
            self.connectors.clear();
            self.current.push(token.text.clone());
        } else if !self.current.is_empty() && CONNECTORS.contains(&normalize_word(&token.text).as_str())
        {
            self.connectors.push(token.text.clone());
        } else {
            self.flush();
        }
    }

    fn flush(&mut self) {
        self.connectors.clear();
        if self.current.is_empty() {
            return;
        }

        let mut entity = String::new();
        for piece in self.current.drain(..) {
            if !entity.is_empty() && !entity.ends_with(['\'', '’']) {
                entity.push(' ');
            }
            entity.push_str(&piece);
        }
        self.found.push(entity);
    }
}

/// Splits `dell'Ovo` into `dell'` and `Ovo`. Word segmentation keeps
/// apostrophe-joined words together.
fn split_elision(word: &str) -> (Option<&str>, &str) {
    word.char_indices()
        .find(|(_, c)| matches!(c, '\'' | '’'))
        .map_or((None, word), |(i, c)| {
            let cut = i + c.len_utf8();
            if cut < word.len() {
                (Some(&word[..cut]), &word[cut..])
            } else {
                (None, word)
            }
        })
}

fn normalize_word(word: &str) -> String {
    word.to_lowercase().replace('’', "'")
}

fn closed_class(lower: &str) -> Option<PartOfSpeech> {
    if DETERMINERS.contains(&lower) {
        Some(PartOfSpeech::Determiner)
    } else if PREPOSITIONS.contains(&lower) || ELIDED_PREPOSITIONS.contains(&lower) {
        Some(PartOfSpeech::Adposition)
    } else if AUXILIARIES.contains(&lower) {
        Some(PartOfSpeech::Aux)
    } else if CONJUNCTIONS.contains(&lower) {
        Some(PartOfSpeech::Conjunction)
    } else if PRONOUNS.contains(&lower) {
        Some(PartOfSpeech::Pronoun)
    } else {
        None
    }
}

fn looks_verbal(lower: &str) -> bool {
    lower.chars().count() > 5 && VERB_SUFFIXES.iter().any(|s| lower.ends_with(s))
}

fn is_roman_numeral(word: &str) -> bool {
    word.len() >= 2 && word.chars().all(|c| "IVXLCDM".contains(c))
}

fn starts_uppercase(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase)
}

fn classify_word(word: &str, sentence_start: bool) -> Token {
    let lower = normalize_word(word);

    if lower.chars().all(|c| c.is_ascii_digit() || c == '.' || c == ',') {
        return Token::new(word, PartOfSpeech::Numeral, false);
    }
    if let Some(pos) = closed_class(&lower) {
        return Token::new(word, pos, true);
    }
    if is_roman_numeral(word) {
        return Token::new(word, PartOfSpeech::Numeral, false);
    }

    let is_stop = STOPWORDS.contains(&lower.as_str());
    let verbal = looks_verbal(&lower);

    let pos = if starts_uppercase(word) && !(sentence_start && verbal) && !is_stop {
        PartOfSpeech::ProperNoun
    } else if verbal {
        PartOfSpeech::Verb
    } else if is_stop {
        PartOfSpeech::Other
    } else {
        PartOfSpeech::Noun
    };

    Token::new(word, pos, is_stop)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos_of<'a>(analysis: &'a Analysis, text: &str) -> Option<&'a Token> {
        analysis.tokens.iter().find(|t| t.text == text)
    }

    #[test]
    fn tags_closed_classes_and_verbs() {
        let analysis =
            HeuristicAnalyzer.analyze("La chiesa di Santa Maria la Nova fu costruita nel 1279.");

        assert_eq!(pos_of(&analysis, "La").unwrap().pos, PartOfSpeech::Determiner);
        assert_eq!(pos_of(&analysis, "chiesa").unwrap().pos, PartOfSpeech::Noun);
        assert_eq!(pos_of(&analysis, "fu").unwrap().pos, PartOfSpeech::Aux);
        assert_eq!(pos_of(&analysis, "costruita").unwrap().pos, PartOfSpeech::Verb);
        assert!(pos_of(&analysis, "nel").unwrap().is_stop);
        assert!(pos_of(&analysis, "1279").unwrap().like_num);
        assert!(pos_of(&analysis, ".").unwrap().is_punct);
    }

    #[test]
    fn joins_capitalized_runs_through_connectors() {
        let analysis =
            HeuristicAnalyzer.analyze("La chiesa di Santa Maria la Nova fu costruita nel 1279.");
        assert_eq!(analysis.entities, vec!["Santa Maria la Nova".to_string()]);
    }

    #[test]
    fn splits_elided_articles() {
        let analysis = HeuristicAnalyzer.analyze("Il borgo di Castel dell'Ovo, sul mare.");
        assert_eq!(pos_of(&analysis, "dell'").unwrap().pos, PartOfSpeech::Adposition);
        assert_eq!(analysis.entities, vec!["Castel dell'Ovo".to_string()]);
    }

    #[test]
    fn sentence_initial_participle_is_not_an_entity() {
        let analysis = HeuristicAnalyzer.analyze("Restaurata nel secolo XVIII.");
        assert_eq!(pos_of(&analysis, "Restaurata").unwrap().pos, PartOfSpeech::Verb);
        assert!(pos_of(&analysis, "XVIII").unwrap().like_num);
        assert!(analysis.entities.is_empty());
    }

    #[test]
    fn empty_text() {
        assert_eq!(HeuristicAnalyzer.analyze("  "), Analysis::default());
    }
}
