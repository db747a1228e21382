//! Casing and matching helpers.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

use crate::tables::LOWERCASE_WORDS;

static NON_ALNUM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9 ]+").expect("valid regex"));
static INITIAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\p{L})\.\s*(\p{L})").expect("valid regex"));

/// Lowercases, strips accents and replaces everything but ASCII letters,
/// digits and spaces with a space.
#[must_use]
pub fn fold_for_match(s: &str) -> String {
    let stripped: String = s
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect();

    NON_ALNUM.replace_all(&stripped, " ").trim().to_string()
}

/// Uppercases the first character and lowercases the rest.
#[must_use]
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
    })
}

fn capitalize_word(word: &str) -> String {
    if word.contains('.') && word.chars().count() <= 6 {
        let parts: Vec<&str> = word.split('.').filter(|p| !p.is_empty()).collect();
        if let [initial, rest] = parts.as_slice()
            && initial.chars().count() == 1
        {
            return format!("{}. {}", initial.to_uppercase(), capitalize(rest));
        }
    }

    if let Some((index, apostrophe)) = word.char_indices().find(|(_, c)| matches!(c, '\'' | '’')) {
        let head = &word[..index];
        let tail = &word[index + apostrophe.len_utf8()..];
        return format!("{}{apostrophe}{}", capitalize(head), capitalize(tail));
    }

    capitalize(word)
}

/// Title-cases `s`, keeping [`LOWERCASE_WORDS`] lowercase.
///
/// When `at_start` is `false` the text continues an existing name, so even
/// its first word may stay lowercase.
#[must_use]
pub fn smart_capitalize(s: &str, at_start: bool) -> String {
    s.split_whitespace()
        .enumerate()
        .map(|(i, word)| {
            let lower = word.to_lowercase();
            if (i != 0 || !at_start) && LOWERCASE_WORDS.contains(&lower.as_str()) {
                lower
            } else {
                capitalize_word(word)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Re-capitalizes single-letter initials (`s.maria` → `S. Maria`).
#[must_use]
pub fn fix_initials(s: &str) -> String {
    INITIAL
        .replace_all(s, |caps: &Captures<'_>| {
            format!("{}. {}", caps[1].to_uppercase(), caps[2].to_uppercase())
        })
        .into_owned()
}

/// Collapses runs of whitespace into single spaces and trims.
#[must_use]
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_accents_and_punctuation() {
        assert_eq!(fold_for_match("Stop_Position"), "stop position");
        assert_eq!(fold_for_match("Università!"), "universita");
        assert_eq!(fold_for_match("  "), "");
    }

    #[test]
    fn title_cases_with_exceptions() {
        assert_eq!(smart_capitalize("chiesa di santa maria", true), "Chiesa di Santa Maria");
        assert_eq!(smart_capitalize("di vittorio", true), "Di Vittorio");
        assert_eq!(smart_capitalize("di vittorio", false), "di Vittorio");
        assert_eq!(smart_capitalize("VIA ROMA 12", true), "Via Roma 12");
    }

    #[test]
    fn capitalizes_both_sides_of_apostrophe() {
        assert_eq!(smart_capitalize("castel dell'ovo", true), "Castel Dell'Ovo");
        assert_eq!(smart_capitalize("sant’anna", true), "Sant’Anna");
    }

    #[test]
    fn splits_dotted_initials() {
        assert_eq!(smart_capitalize("via s.rita", true), "Via S. Rita");
    }

    #[test]
    fn fixes_initials_without_touching_the_rest() {
        assert_eq!(fix_initials("Piazza g.Garibaldi"), "Piazza G. Garibaldi");
        assert_eq!(fix_initials("Via A. mcDonald"), "Via A. McDonald");
        assert_eq!(fix_initials("Via Roma"), "Via Roma");
    }
}
