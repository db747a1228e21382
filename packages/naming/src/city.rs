//! City-name patterns compiled once per batch.

use regex::Regex;

/// Case-insensitive matchers for one municipality name.
#[derive(Debug, Clone)]
pub struct CityPatterns {
    name: String,
    word: Regex,
    leading: Regex,
    trailing: Regex,
    anywhere: Regex,
}

impl CityPatterns {
    /// Compiles the patterns for `city`. Returns `Ok(None)` for a blank
    /// city, which disables every city rule.
    ///
    /// # Errors
    ///
    /// Returns an error if a pattern fails to compile (for instance when
    /// the escaped name exceeds the regex size limit).
    pub fn new(city: &str) -> Result<Option<Self>, regex::Error> {
        let name = city.trim();
        if name.is_empty() {
            return Ok(None);
        }

        let escaped = regex::escape(name);

        Ok(Some(Self {
            name: name.to_string(),
            word: Regex::new(&format!(r"(?i)\b{escaped}\b"))?,
            leading: Regex::new(&format!(r"(?i)^\s*{escaped}(?:\s|[-,–:]|$)\s*[-,–:]?\s*"))?,
            trailing: Regex::new(&format!(r"(?i)\s*[-,–:]\s*{escaped}\s*$"))?,
            anywhere: Regex::new(&format!(r"(?i){escaped}"))?,
        }))
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Removes every whole-word occurrence of the city.
    #[must_use]
    pub fn remove_words(&self, s: &str) -> String {
        self.word.replace_all(s, "").into_owned()
    }

    /// Removes every occurrence of the city, even inside words.
    #[must_use]
    pub fn remove_anywhere(&self, s: &str) -> String {
        self.anywhere.replace_all(s, "").into_owned()
    }

    /// Strips a leading `City -`/`City,` qualifier.
    #[must_use]
    pub fn strip_leading(&self, s: &str) -> String {
        self.leading.replace(s.trim(), "").trim().to_string()
    }

    /// Strips a trailing `- City`/`, City` qualifier.
    #[must_use]
    pub fn strip_trailing(&self, s: &str) -> String {
        self.trailing.replace(s.trim(), "").trim().to_string()
    }
}
