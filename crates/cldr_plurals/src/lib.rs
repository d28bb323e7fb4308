//! Static CLDR plural rules for integer counts.
//!
//! Maps a `(locale, count)` pair to one of the six CLDR categories (`zero`,
//! `one`, `two`, `few`, `many`, `other`), for both cardinal selection
//! ("1 file", "2 files") and ordinal selection ("1st", "2nd"). All queries
//! are pure functions over tables baked in at compile time; unknown locales
//! fall back to a single `other` category.

mod cardinal;
mod category;
mod ordinal;

use unic_langid::LanguageIdentifier;

pub use category::PluralCategory;

/// Reduces a locale identifier to the lookup key of the rule tables: the
/// lowercased primary language subtag. `en-US`, `en_GB` and `EN` all key as
/// `en`. A string without a 2-3 letter first subtag is used whole.
fn normalize_locale(locale: &str) -> String {
  let lowered = locale.to_ascii_lowercase();
  if let Ok(langid) = lowered.replace('_', "-").parse::<LanguageIdentifier>() {
    return langid.language.as_str().to_string();
  }
  let first = lowered.split(['-', '_']).find(|part| !part.is_empty()).unwrap_or("");
  if (2..=3).contains(&first.len()) && first.bytes().all(|b| b.is_ascii_alphabetic()) {
    first.to_string()
  } else {
    lowered
  }
}

/// Returns the index of `count`'s cardinal category within
/// [`get_cardinal_categories`] for this locale.
pub fn get_cardinal_form_index(locale: &str, count: u64) -> usize {
  let rule = cardinal::rule_for(&normalize_locale(locale));
  cardinal::classify(rule, count)
}

/// Returns the CLDR name of `count`'s cardinal category for this locale.
pub fn get_cardinal_category_name(locale: &str, count: u64) -> &'static str {
  let rule = cardinal::rule_for(&normalize_locale(locale));
  cardinal::categories(rule)[cardinal::classify(rule, count)]
}

/// The ordered cardinal category list for this locale.
pub fn get_cardinal_categories(locale: &str) -> &'static [&'static str] {
  cardinal::categories(cardinal::rule_for(&normalize_locale(locale)))
}

/// Returns the index of `count`'s ordinal category within
/// [`get_ordinal_categories`] for this locale.
pub fn get_ordinal_form_index(locale: &str, count: u64) -> usize {
  let rule = ordinal::rule_for(&normalize_locale(locale));
  ordinal::classify(rule, count)
}

/// Returns the CLDR name of `count`'s ordinal category for this locale.
pub fn get_ordinal_category_name(locale: &str, count: u64) -> &'static str {
  let rule = ordinal::rule_for(&normalize_locale(locale));
  ordinal::categories(rule)[ordinal::classify(rule, count)]
}

/// The ordered ordinal category list for this locale.
pub fn get_ordinal_categories(locale: &str) -> &'static [&'static str] {
  ordinal::categories(ordinal::rule_for(&normalize_locale(locale)))
}

/// Number of cardinal categories this locale distinguishes.
pub fn get_plural_count(locale: &str) -> usize {
  get_cardinal_categories(locale).len()
}

/// True iff `name` is one of the six CLDR category names.
pub fn is_valid_category(name: &str) -> bool {
  PluralCategory::from_name(name).is_some()
}
