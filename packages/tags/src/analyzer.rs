//! Text analysis seam.
//!
//! The scorer only needs tokens with a coarse part of speech and a list of
//! named-entity strings. Anything that can produce those (a statistical
//! model, a remote service, the bundled heuristics) plugs in through
//! [`TextAnalyzer`].

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Coarse universal part-of-speech tags.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum PartOfSpeech {
    Noun,
    #[strum(serialize = "PROPN")]
    #[serde(rename = "PROPN")]
    ProperNoun,
    #[strum(serialize = "ADJ")]
    #[serde(rename = "ADJ")]
    Adjective,
    Verb,
    Aux,
    #[strum(serialize = "ADP")]
    #[serde(rename = "ADP")]
    Adposition,
    #[strum(serialize = "CCONJ")]
    #[serde(rename = "CCONJ")]
    Conjunction,
    #[strum(serialize = "DET")]
    #[serde(rename = "DET")]
    Determiner,
    #[strum(serialize = "PRON")]
    #[serde(rename = "PRON")]
    Pronoun,
    #[strum(serialize = "NUM")]
    #[serde(rename = "NUM")]
    Numeral,
    #[strum(serialize = "PUNCT")]
    #[serde(rename = "PUNCT")]
    Punctuation,
    #[strum(serialize = "X")]
    #[serde(rename = "X")]
    Other,
}

impl PartOfSpeech {
    /// Function-word and verbal classes that never make a useful tag.
    #[must_use]
    pub const fn is_closed_or_verbal(self) -> bool {
        matches!(
            self,
            Self::Verb
                | Self::Aux
                | Self::Adposition
                | Self::Conjunction
                | Self::Determiner
                | Self::Pronoun
        )
    }
}

/// A single analyzed token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub pos: PartOfSpeech,
    pub is_stop: bool,
    pub is_punct: bool,
    pub like_num: bool,
}

impl Token {
    /// Builds a token, deriving the punctuation and numeral flags from the
    /// part of speech.
    #[must_use]
    pub fn new(text: impl Into<String>, pos: PartOfSpeech, is_stop: bool) -> Self {
        Self {
            text: text.into(),
            pos,
            is_stop,
            is_punct: pos == PartOfSpeech::Punctuation,
            like_num: pos == PartOfSpeech::Numeral,
        }
    }
}

/// Output of a [`TextAnalyzer`] run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Analysis {
    pub tokens: Vec<Token>,
    /// Named-entity surface strings in order of appearance.
    pub entities: Vec<String>,
}

/// Tokenizer, part-of-speech tagger and entity recognizer in one.
pub trait TextAnalyzer: Send + Sync {
    /// Analyzes `text`. Must not fail; unparseable input yields an empty
    /// [`Analysis`].
    fn analyze(&self, text: &str) -> Analysis;
}

impl<T: TextAnalyzer + ?Sized> TextAnalyzer for &T {
    fn analyze(&self, text: &str) -> Analysis {
        (**self).analyze(text)
    }
}

impl<T: TextAnalyzer + ?Sized> TextAnalyzer for Box<T> {
    fn analyze(&self, text: &str) -> Analysis {
        (**self).analyze(text)
    }
}
