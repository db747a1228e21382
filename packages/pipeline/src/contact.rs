//! Lifts contact details out of the raw attribute string.
//!
//! Values are read from the raw `key=value` segments rather than the
//! lowercased [`AttributeTags`](poi_atlas_poi_models::AttributeTags) view,
//! since URLs and opening hours are case sensitive.

use poi_atlas_poi_models::PoiRecord;

const WEBSITE_KEYS: &[&str] = &["website", "contact:website"];
const PHONE_KEYS: &[&str] = &["phone", "contact:phone"];
const OPENING_HOURS_KEYS: &[&str] = &["opening_hours"];

/// First non-empty value among `keys`, in key order, case preserved.
fn raw_attribute<'a>(attributes: &'a str, keys: &[&str]) -> Option<&'a str> {
    keys.iter().find_map(|wanted| {
        attributes
            .split(';')
            .filter_map(|segment| segment.split_once('='))
            .find(|(key, value)| key.trim().eq_ignore_ascii_case(wanted) && !value.trim().is_empty())
            .map(|(_, value)| value.trim())
    })
}

fn fill(field: &mut String, attributes: &str, keys: &[&str]) -> bool {
    if !field.trim().is_empty() {
        return false;
    }

    raw_attribute(attributes, keys).is_some_and(|value| {
        *field = value.to_string();
        true
    })
}

/// Fills empty `website`, `phone` and `opening_hours` fields from the
/// attributes. Returns the number of fields filled.
pub fn lift_contacts(poi: &mut PoiRecord) -> usize {
    let attributes = poi.attributes.clone();

    [
        fill(&mut poi.website, &attributes, WEBSITE_KEYS),
        fill(&mut poi.phone, &attributes, PHONE_KEYS),
        fill(&mut poi.opening_hours, &attributes, OPENING_HOURS_KEYS),
    ]
    .into_iter()
    .filter(|filled| *filled)
    .count()
}
