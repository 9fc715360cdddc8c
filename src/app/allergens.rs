//! Allergen tag merging, normalization and Portuguese labels.
//!
//! Open Food Facts reports allergens three ways: `allergens_tags`,
//! `allergens_hierarchy`, and a free-text `allergens` string. They overlap
//! freely, so everything is reduced to one key per allergen before display.

use crate::util::capitalize_first;
use indexmap::IndexSet;

const NAMESPACE_PREFIX: &str = "en:";

/// Known allergen keys (post-normalization) and their Portuguese labels.
pub const TRANSLATIONS: &[(&str, &str)] = &[
    ("milk", "Leite"),
    ("nuts", "Nozes / Castanhas"),
    ("soybeans", "Soja"),
    ("eggs", "Ovos"),
    ("wheat", "Trigo"),
    ("peanuts", "Amendoim"),
    ("crustaceans", "Frutos do Mar (crustáceos)"),
    ("fish", "Peixe"),
    ("gluten", "Glúten"),
    ("sesame seeds", "Gergelim"),
    ("celery", "Aipo"),
    ("mustard", "Mostarda"),
    ("lupin", "Tremoço"),
    ("molluscs", "Moluscos"),
    ("sulphur dioxide and sulphites", "Sulfitos"),
];

/// Merges the three allergen sources into ordered, deduplicated labels.
///
/// Order is first occurrence across tags, then hierarchy, then the
/// comma-separated free text. An empty result means nothing was declared;
/// choosing what to show in that case is up to the caller.
pub fn normalize<T, H>(tags: T, hierarchy: H, free_text: &str) -> Vec<String>
where
    T: IntoIterator,
    T::Item: AsRef<str>,
    H: IntoIterator,
    H::Item: AsRef<str>,
{
    let mut keys: IndexSet<String> = IndexSet::new();

    let tags = tags.into_iter().map(|t| normalize_key(t.as_ref()));
    let hierarchy = hierarchy.into_iter().map(|h| normalize_key(h.as_ref()));
    let text = split_free_text(free_text).map(normalize_key);

    for key in tags.chain(hierarchy).chain(text) {
        if !key.is_empty() {
            keys.insert(key);
        }
    }

    keys.iter().map(|k| label_for(k)).collect()
}

/// Strips the `en:` prefix, turns hyphens into spaces and lowercases.
pub fn normalize_key(raw: &str) -> String {
    let raw = raw.trim();
    raw.strip_prefix(NAMESPACE_PREFIX)
        .unwrap_or(raw)
        .replace('-', " ")
        .to_lowercase()
}

/// Portuguese label for a normalized key, or the key with a capital first letter.
pub fn label_for(key: &str) -> String {
    match translate(key) {
        Some(label) => label.to_string(),
        None => capitalize_first(key),
    }
}

pub fn translate(key: &str) -> Option<&'static str> {
    TRANSLATIONS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, label)| *label)
}

fn split_free_text(text: &str) -> impl Iterator<Item = &str> {
    text.split(',').map(str::trim).filter(|s| !s.is_empty())
}
