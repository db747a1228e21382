//! Heritage category mapping.
//!
//! Maps free-text catalogue categories (e.g. `"Chiesa di San Marco"`,
//! `"architettura fortificata - castello"`) to the canonical
//! [`HeritageCategory`] taxonomy. Keywords are matched as whole words so
//! that `"casa"` does not fire inside `"casale"`.

use std::sync::LazyLock;

use regex::Regex;

use crate::HeritageCategory;

/// Keyword table in priority order. When several keywords match, the one
/// declared first wins.
const CATEGORY_KEYWORDS: &[(&str, HeritageCategory)] = &[
    // ── Religious architecture ──────────────────────────────────────
    ("chiesa", HeritageCategory::Chiesa),
    ("basilica", HeritageCategory::BasilicaDuomo),
    ("cattedrale", HeritageCategory::BasilicaDuomo),
    ("cappella", HeritageCategory::CappellaOratorio),
    ("oratorio", HeritageCategory::CappellaOratorio),
    ("monastero", HeritageCategory::MonasteroConvento),
    ("convento", HeritageCategory::MonasteroConvento),
    ("canonica", HeritageCategory::MonasteroConvento),
    // ── Civil and military architecture ─────────────────────────────
    ("palazzo", HeritageCategory::PalazzoStorico),
    ("villa", HeritageCategory::PalazzoStorico),
    ("castello", HeritageCategory::CastelloFortezza),
    ("torre", HeritageCategory::TorreCampanile),
    ("porta", HeritageCategory::PortaMura),
    ("mura", HeritageCategory::PortaMura),
    ("piazza", HeritageCategory::PiazzaSpazioUrbano),
    ("ponte", HeritageCategory::PonteAcquedotto),
    ("acquedotto", HeritageCategory::PonteAcquedotto),
    ("convitto", HeritageCategory::PalazzoStorico),
    ("casa privata", HeritageCategory::PalazzoStorico),
    ("casa", HeritageCategory::PalazzoStorico),
    ("edificio residenziale", HeritageCategory::PalazzoStorico),
    ("rifugio", HeritageCategory::PalazzoStorico),
    ("scuola", HeritageCategory::PalazzoStorico),
    ("accademia", HeritageCategory::PalazzoStorico),
    ("orfanotrofio", HeritageCategory::PalazzoStorico),
    ("canonico", HeritageCategory::PalazzoStorico),
    ("mercato", HeritageCategory::PiazzaSpazioUrbano),
    ("architettura dello stato", HeritageCategory::PalazzoStorico),
    ("edificio-residenziale", HeritageCategory::PalazzoStorico),
    // ── Museums and collections ─────────────────────────────────────
    ("museo", HeritageCategory::Museo),
    ("galleria", HeritageCategory::MostraGalleria),
    ("mostra", HeritageCategory::MostraGalleria),
    // ── Archaeology ─────────────────────────────────────────────────
    ("area archeologica", HeritageCategory::AreaArcheologica),
    ("monumento antico", HeritageCategory::MonumentoAntico),
    // ── Art and sculpture ───────────────────────────────────────────
    ("statua", HeritageCategory::StatuaMonumento),
    ("monumento", HeritageCategory::StatuaMonumento),
    ("fontana", HeritageCategory::Fontana),
    ("opera d’arte", HeritageCategory::OperaDArte),
    ("dipinto", HeritageCategory::OperaDArte),
    ("affresco", HeritageCategory::OperaDArte),
    ("scultura", HeritageCategory::OperaDArte),
    ("mosaico", HeritageCategory::OperaDArte),
    // ── Landscape and nature ────────────────────────────────────────
    ("parco", HeritageCategory::ParcoGiardino),
    ("giardino", HeritageCategory::ParcoGiardino),
    ("belvedere", HeritageCategory::BelvederePanorama),
    ("panorama", HeritageCategory::BelvederePanorama),
    ("riserva naturale", HeritageCategory::RiservaNaturale),
    // ── Memory and identity ─────────────────────────────────────────
    // Shadowed by "monumento" above; kept so the table documents the label.
    ("monumento ai caduti", HeritageCategory::LuogoSimbolico),
    ("lapide", HeritageCategory::LuogoSimbolico),
    // ── Urban area ──────────────────────────────────────────────────
    ("centro storico", HeritageCategory::PiazzaSpazioUrbano),
    ("convittorio", HeritageCategory::PalazzoStorico),
    ("casa-privata", HeritageCategory::PalazzoStorico),
    // ── Contemporary and urban ──────────────────────────────────────
    ("installazione", HeritageCategory::OperaContemporanea),
    ("arredo urbano", HeritageCategory::ElementoUrbano),
    // ── Intangible and territorial ──────────────────────────────────
    ("tradizione", HeritageCategory::Tradizione),
    ("rituale", HeritageCategory::Tradizione),
    ("folklore", HeritageCategory::Tradizione),
    ("percorso urbano", HeritageCategory::PercorsoUrbano),
    ("itinerario culturale", HeritageCategory::ItinerarioCulturale),
    // ── Contemporary venues ─────────────────────────────────────────
    ("centro eventi", HeritageCategory::CentroEventi),
    ("teatro", HeritageCategory::CentroEventi),
    ("auditorium", HeritageCategory::CentroEventi),
    ("spazio pubblico", HeritageCategory::SpazioPubblico),
];

/// Whole-word matchers compiled from [`CATEGORY_KEYWORDS`], same order.
static KEYWORD_PATTERNS: LazyLock<Vec<(Regex, HeritageCategory)>> = LazyLock::new(|| {
    CATEGORY_KEYWORDS
        .iter()
        .map(|(keyword, category)| {
            let pattern = format!(r"\b{}\b", regex::escape(keyword));
            (Regex::new(&pattern).expect("valid regex"), *category)
        })
        .collect()
});

/// Classifies a raw category string.
///
/// Case-insensitive whole-word matching; the first keyword in table order
/// that matches decides the category. Returns `None` when nothing matches.
#[must_use]
pub fn classify(raw: &str) -> Option<HeritageCategory> {
    let lower = raw.to_lowercase();

    KEYWORD_PATTERNS
        .iter()
        .find(|(pattern, _)| pattern.is_match(&lower))
        .map(|(_, category)| *category)
}

/// Maps a raw category string to its canonical label.
///
/// Falls back to the raw input, unchanged, when no keyword matches.
#[must_use]
pub fn map_category(raw: &str) -> String {
    classify(raw).map_or_else(
        || {
            log::debug!("No category keyword matched {raw:?}; keeping it verbatim");
            raw.to_string()
        },
        |category| category.to_string(),
    )
}
