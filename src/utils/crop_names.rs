//! Crop name normalization
//!
//! Crop names in the requirements file may carry a parenthetical qualifier
//! ("Arhar (Pigeon Pea)") and regional-language names ("chana", "sarson").
//! Price lookups go through a single normalized key:
//! 1. Strip every parenthetical qualifier
//! 2. Trim and lowercase
//! 3. Map regional synonyms to the canonical English crop key

/// Regional synonym → canonical crop key
pub const CROP_ALIASES: &[(&str, &str)] = &[
    ("arhar", "PigeonPea"),
    ("tur", "PigeonPea"),
    ("moong", "GreenGram"),
    ("mung", "GreenGram"),
    ("urad", "BlackGram"),
    ("masoor", "Lentil"),
    ("chana", "Chickpea"),
    ("gram", "Chickpea"),
    ("millet", "Bajra"),
    ("sorghum", "Jowar"),
    ("sarson", "Mustard"),
];

/// Remove every "(...)" segment. An unclosed "(" drops the rest of the name.
pub fn strip_parentheticals(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut depth = 0usize;

    for c in name.chars() {
        match c {
            '(' => depth += 1,
            ')' if depth > 0 => depth -= 1,
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }

    out
}

/// Look up the canonical key for an already-normalized crop name
pub fn resolve_alias(normalized: &str) -> Option<&'static str> {
    CROP_ALIASES
        .iter()
        .find(|(alias, _)| *alias == normalized)
        .map(|(_, canonical)| *canonical)
}

/// Build the price lookup key for a crop name.
///
/// Returns the canonical alias when one exists, otherwise the cleaned,
/// lowercased name. Matching against price records is case-insensitive, so
/// the mixed case of canonical keys is preserved here.
pub fn market_lookup_key(crop_name: &str) -> String {
    let cleaned = strip_parentheticals(crop_name).trim().to_lowercase();

    match resolve_alias(&cleaned) {
        Some(canonical) => canonical.to_string(),
        None => cleaned,
    }
}
