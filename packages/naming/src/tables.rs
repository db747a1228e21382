//! Closed word tables driving the naming rules.

/// English source labels and their Italian replacements, in match order.
/// Underscores in names are matched as spaces.
pub const TRANSLATIONS: &[(&str, &str)] = &[
    ("parking", "Parcheggio"),
    ("restaurant", "Ristorante"),
    ("bar", "Bar"),
    ("cafe", "Caffè"),
    ("fast food", "Fast Food"),
    ("hotel", "Hotel"),
    ("guest house", "Affittacamere"),
    ("bed & breakfast", "B&B"),
    ("pharmacy", "Farmacia"),
    ("bank", "Banca"),
    ("atm", "Bancomat"),
    ("post office", "Ufficio Postale"),
    ("theatre", "Teatro"),
    ("cinema", "Cinema"),
    ("viewpoint", "Belvedere"),
    ("platform", "Piattaforma"),
    ("stop", "Fermata"),
    ("station", "Stazione"),
    ("park", "Parco"),
    ("hospital", "Ospedale"),
    ("clinic", "Clinica"),
    ("school", "Scuola"),
    ("university", "Università"),
    ("library", "Biblioteca"),
    ("museum", "Museo"),
    ("supermarket", "Supermercato"),
    ("marketplace", "Mercato"),
    ("church", "Chiesa"),
    ("chapel", "Cappella"),
];

/// Untranslated OSM category values (the part after `key:`) whose POIs are
/// named after the category itself.
pub const GENERIC_CATEGORY_LABELS: &[(&str, &str)] = &[
    ("post_office", "Ufficio Postale"),
    ("bank", "Banca"),
    ("atm", "Bancomat"),
    ("pharmacy", "Farmacia"),
    ("hospital", "Ospedale"),
    ("school", "Scuola"),
    ("supermarket", "Supermercato"),
    ("hotel", "Hotel"),
    ("bar", "Bar"),
    ("cafe", "Caffè"),
    ("restaurant", "Ristorante"),
    ("belvedere", "Belvedere"),
    ("pub", "Pub"),
    ("parcheggio", "Parcheggio"),
    ("teatro", "Teatro"),
    ("parco", "Parco"),
];

/// Single words that say what a place is but not which one.
pub const GENERIC_WITH_ADDRESS: &[&str] = &[
    "bar",
    "caffè",
    "ristorante",
    "parcheggio",
    "supermercato",
    "mercato",
    "farmacia",
    "banca",
    "belvedere",
    "pub",
    "hotel",
    "parco",
    "teatro",
];

pub const STREET_INDICATORS: &[&str] = &["via", "piazza", "viale", "corso", "largo"];

/// Placeholder stop names, compared after accent folding.
pub const MEANINGLESS_STOP_NAMES: &[&str] = &[
    "stop",
    "stop position",
    "platform",
    "piattaforma",
    "fermata",
    "bus stop",
    "halt",
];

/// Operators and lines of regional (non-national) railways.
pub const SUBURBAN_RAIL_KEYWORDS: &[&str] = &[
    "circumvesuviana",
    "eav",
    "trenord",
    "ferrovienord",
    "ferrovie nord",
    "fnm",
    "ferrovie appulo lucane",
    "ferrovie appulo-lucane",
    "fal",
    "ferrovie della calabria",
    "ferrovie calabria",
    "fcal",
    "ferrovie sud est",
    "fse",
    "roma–viterbo",
    "roma-viterbo",
    "roma viterbo",
];

/// National railway operator code, as it appears in `operator`/`network`.
pub const NATIONAL_RAIL_OPERATOR: &str = "rfi";

/// `artwork_type` values with an Italian label.
pub const ARTWORK_TYPES: &[(&str, &str)] = &[
    ("sculpture", "Statua / Monumento"),
    ("bust", "Busto"),
    ("installation", "Opera contemporanea"),
];

/// Words after which a statue inscription is cut.
pub const STATUE_STOP_MARKERS: &[&str] = &["orlandi"];

/// Maximum words kept from a statue inscription without a stop marker.
pub const STATUE_INSCRIPTION_WORDS: usize = 6;

/// Words kept lowercase by title casing unless they open the name.
pub const LOWERCASE_WORDS: &[&str] = &[
    "di", "del", "della", "dei", "da", "e", "a", "al", "ai", "alle", "degli", "delle", "nel",
    "sul", "sulla",
];

/// Leading keywords of names that identify no specific place.
pub const GENERIC_KEYWORDS: &[&str] = &[
    "parcheggio",
    "bancomat",
    "farmacia",
    "bar",
    "ristorante",
    "poste italiane",
    "belvedere",
    "piazza",
    "fontana",
    "parco",
    "stazione",
    "hotel",
    "villa",
    "teatro",
    "scuola",
    "ospedale",
    "fermata treno",
    "fermata autobus",
    "fermata tram",
    "fermata metropolitana",
];

/// Looks up `key` in a label table.
#[must_use]
pub fn lookup(table: &[(&str, &'static str)], key: &str) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}
