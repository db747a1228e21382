use crate::tables::GENERIC_KEYWORDS;

/// Returns `true` if `name` is only a generic keyword, optionally followed
/// by text that already appears in the POI's own address.
///
/// Generic POIs ("Farmacia Via Toledo 5", "Fermata tram") carry no
/// identity worth enriching from encyclopedic sources.
#[must_use]
pub fn is_generic_poi(name: &str, address: &str) -> bool {
    let name = name.trim().to_lowercase();
    let address = address.to_lowercase();

    GENERIC_KEYWORDS.iter().any(|keyword| {
        name.strip_prefix(keyword).is_some_and(|rest| {
            let remainder = rest.trim();
            (rest.is_empty() || rest.starts_with(char::is_whitespace))
                && (remainder.is_empty() || address.contains(remainder))
        })
    })
}
