//! Short address used to disambiguate generic names.

use std::sync::LazyLock;

use regex::Regex;

use crate::city::CityPatterns;
use crate::text::collapse_whitespace;

static POSTCODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\d{5}\b").expect("valid regex"));

/// Returns `address` without 5-digit postcodes, the city name and
/// parentheses, with whitespace collapsed and leading/trailing spaces and
/// commas trimmed.
#[must_use]
pub fn short_address(address: &str, city: Option<&CityPatterns>) -> String {
    if address.trim().is_empty() {
        return String::new();
    }

    let without_postcode = POSTCODE.replace_all(address, "");
    let without_city = city.map_or_else(
        || without_postcode.to_string(),
        |city| city.remove_words(&without_postcode),
    );
    let without_parens: String = without_city.chars().filter(|c| !matches!(c, '(' | ')')).collect();

    collapse_whitespace(&without_parens)
        .trim_matches([' ', ','])
        .to_string()
}
