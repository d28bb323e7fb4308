//! Cardinal plural rules: locale sets, per-rule category lists and the
//! classifier mapping a non-negative integer count to a category index.

use std::collections::HashMap;

use lazy_static::lazy_static;

/// A group of languages sharing one classifier rule.
pub(crate) struct RuleSet {
  pub(crate) langs: &'static [&'static str],
  pub(crate) rule: usize,
}

static CARDINAL_SETS: &[RuleSet] = &[
  // 0: no plural distinction (ja, zh, ko, vi, th, id, ...)
  RuleSet {
    langs: &[
      "bm", "bo", "dz", "id", "ig", "ii", "in", "ja", "jbo", "jv", "jw", "kde", "kea", "km", "ko", "lkt", "lo", "ms",
      "my", "nqo", "sah", "ses", "sg", "su", "th", "to", "vi", "wo", "yo", "yue", "zh",
    ],
    rule: 0,
  },
  // 1: one for exactly 1 (en, de, nl, sv, el, hu, fi, et, bg, ...)
  RuleSet {
    langs: &[
      "af", "an", "asa", "ast", "az", "bem", "bez", "bg", "brx", "ce", "cgg", "chr", "ckb", "da", "de", "dv", "ee",
      "el", "en", "eo", "et", "eu", "fi", "fo", "fur", "fy", "gl", "gsw", "ha", "haw", "hu", "jgo", "jmc", "ka", "kaj",
      "kcg", "kk", "kkj", "kl", "ks", "ksb", "ku", "ky", "lb", "lg", "mas", "mgo", "ml", "mn", "mr", "nah", "nap",
      "nb", "nd", "ne", "nl", "nn", "nnh", "no", "nr", "ny", "nyn", "om", "or", "os", "pap", "ps", "rm", "rof", "rwk",
      "saq", "sco", "sd", "sdh", "se", "seh", "sn", "so", "sq", "ss", "ssy", "st", "sv", "sw", "syr", "ta", "te",
      "teo", "tig", "tn", "ts", "ur", "uz", "ve", "vo", "vun", "wae", "xh", "xog", "yi",
    ],
    rule: 1,
  },
  // 2: one for 0 and 1 (fil, tr, oc, ti, ln, ...)
  RuleSet {
    langs: &[
      "ach", "ak", "am", "arn", "as", "bh", "bn", "fa", "ff", "fil", "gu", "gun", "guw", "hi", "hy", "kab", "kn",
      "ln", "mfe", "mg", "mi", "nso", "oc", "pa", "si", "tg", "ti", "tl", "tr", "wa", "zu",
    ],
    rule: 2,
  },
  // 3: East Slavic / South Slavic (ru, uk, sr, hr, be, bs)
  RuleSet { langs: &["be", "bs", "cnr", "hr", "ru", "sh", "sr", "uk"], rule: 3 },
  // 4: cs, sk
  RuleSet { langs: &["cs", "sk"], rule: 4 },
  // 5: Irish
  RuleSet { langs: &["ga"], rule: 5 },
  // 6: Lithuanian
  RuleSet { langs: &["lt"], rule: 6 },
  // 7: Slovenian
  RuleSet { langs: &["sl"], rule: 7 },
  // 8: Macedonian
  RuleSet { langs: &["mk"], rule: 8 },
  // 9: Maltese
  RuleSet { langs: &["mt"], rule: 9 },
  // 10: Latvian
  RuleSet { langs: &["lv", "prg"], rule: 10 },
  // 11: Polish
  RuleSet { langs: &["csb", "pl", "szl"], rule: 11 },
  // 12: Romanian
  RuleSet { langs: &["mo", "ro"], rule: 12 },
  // 13: Arabic
  RuleSet { langs: &["ar", "ars"], rule: 13 },
  // 14: Welsh
  RuleSet { langs: &["cy"], rule: 14 },
  // 15: Icelandic
  RuleSet { langs: &["is"], rule: 15 },
  // 16: Scottish Gaelic
  RuleSet { langs: &["gd"], rule: 16 },
  // 17: Breton
  RuleSet { langs: &["br"], rule: 17 },
  // 18: Manx
  RuleSet { langs: &["gv"], rule: 18 },
  // 19: Hebrew
  RuleSet { langs: &["he", "iw"], rule: 19 },
  // 20: Romance with a "many" for round millions (CLDR 49)
  RuleSet { langs: &["ca", "es", "fr", "it", "pt", "vec"], rule: 20 },
];

static CARDINAL_CATEGORIES: &[&[&str]] = &[
  &["other"],                                      // 0
  &["one", "other"],                               // 1
  &["one", "other"],                               // 2
  &["one", "few", "many", "other"],                // 3
  &["one", "few", "other"],                        // 4
  &["one", "two", "few", "many", "other"],         // 5
  &["one", "few", "other"],                        // 6
  &["one", "two", "few", "other"],                 // 7
  &["one", "other"],                               // 8
  &["one", "few", "many", "other"],                // 9
  &["zero", "one", "other"],                       // 10
  &["one", "few", "many", "other"],                // 11
  &["one", "few", "other"],                        // 12
  &["zero", "one", "two", "few", "many", "other"], // 13
  &["zero", "one", "two", "few", "many", "other"], // 14
  &["one", "other"],                               // 15
  &["one", "two", "few", "other"],                 // 16
  &["one", "two", "few", "many", "other"],         // 17
  &["one", "two", "few", "other"],                 // 18
  &["one", "two", "many", "other"],                // 19
  &["one", "many", "other"],                       // 20
];

lazy_static! {
  static ref CARDINAL_RULES: HashMap<&'static str, usize> = {
    let mut rules = HashMap::new();
    for set in CARDINAL_SETS {
      for &lang in set.langs {
        rules.insert(lang, set.rule);
      }
    }
    rules
  };
}

/// Resolves a normalised language key to its cardinal rule id. Unknown keys
/// fall back to rule 0 (a single `other` category).
pub(crate) fn rule_for(language: &str) -> usize {
  CARDINAL_RULES.get(language).copied().unwrap_or(0)
}

pub(crate) fn categories(rule: usize) -> &'static [&'static str] {
  CARDINAL_CATEGORIES[rule]
}

/// Maps a count to an index within `categories(rule)`.
pub(crate) fn classify(rule: usize, n: u64) -> usize {
  let m10 = n % 10;
  let m100 = n % 100;
  match rule {
    1 => usize::from(n != 1),
    2 => usize::from(n > 1),
    3 => {
      if m10 == 1 && m100 != 11 {
        0
      } else if (2..=4).contains(&m10) && !(12..=14).contains(&m100) {
        1
      } else {
        2
      }
    },
    4 => {
      if n == 1 {
        0
      } else if (2..=4).contains(&n) {
        1
      } else {
        2
      }
    },
    5 => {
      if n == 1 {
        0
      } else if n == 2 {
        1
      } else if (3..=6).contains(&n) {
        2
      } else if (7..=10).contains(&n) {
        3
      } else {
        4
      }
    },
    6 => {
      if m10 == 1 && !(11..=19).contains(&m100) {
        0
      } else if (2..=9).contains(&m10) && !(11..=19).contains(&m100) {
        1
      } else {
        2
      }
    },
    7 => {
      if m100 == 1 {
        0
      } else if m100 == 2 {
        1
      } else if m100 == 3 || m100 == 4 {
        2
      } else {
        3
      }
    },
    8 | 15 => usize::from(!(m10 == 1 && m100 != 11)),
    9 => {
      if n == 1 {
        0
      } else if n == 0 || (2..=10).contains(&m100) {
        1
      } else if (11..=19).contains(&m100) {
        2
      } else {
        3
      }
    },
    10 => {
      if n == 0 {
        0
      } else if m10 == 1 && m100 != 11 {
        1
      } else {
        2
      }
    },
    11 => {
      if n == 1 {
        0
      } else if (2..=4).contains(&m10) && !(12..=14).contains(&m100) {
        1
      } else {
        2
      }
    },
    12 => {
      if n == 1 {
        0
      } else if n == 0 || (1..=19).contains(&m100) {
        1
      } else {
        2
      }
    },
    13 => {
      if n <= 2 {
        n as usize
      } else if (3..=10).contains(&m100) {
        3
      } else if (11..=99).contains(&m100) {
        4
      } else {
        5
      }
    },
    14 => match n {
      0 => 0,
      1 => 1,
      2 => 2,
      3 => 3,
      6 => 4,
      _ => 5,
    },
    16 => {
      if n == 1 || n == 11 {
        0
      } else if n == 2 || n == 12 {
        1
      } else if n > 2 && n < 20 {
        2
      } else {
        3
      }
    },
    17 => {
      if m10 == 1 && m100 != 11 && m100 != 71 && m100 != 91 {
        0
      } else if m10 == 2 && m100 != 12 && m100 != 72 && m100 != 92 {
        1
      } else if (m10 == 3 || m10 == 4 || m10 == 9)
        && !(10..=19).contains(&m100)
        && !(70..=79).contains(&m100)
        && !(90..=99).contains(&m100)
      {
        2
      } else if n != 0 && n % 1_000_000 == 0 {
        3
      } else {
        4
      }
    },
    18 => {
      if m10 == 1 {
        0
      } else if m10 == 2 {
        1
      } else if n % 20 == 0 {
        2
      } else {
        3
      }
    },
    19 => {
      if n == 1 {
        0
      } else if n == 2 {
        1
      } else if n > 10 && m10 == 0 {
        2
      } else {
        3
      }
    },
    20 => {
      if n == 1 {
        0
      } else if n != 0 && n % 1_000_000 == 0 {
        1
      } else {
        2
      }
    },
    _ => 0,
  }
}

/// All language keys with an explicit cardinal rule, for exhaustive sweeps.
pub(crate) fn known_languages() -> impl Iterator<Item = &'static str> {
  CARDINAL_SETS.iter().flat_map(|set| set.langs.iter().copied())
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;

  fn name(language: &str, n: u64) -> &'static str {
    let rule = rule_for(language);
    categories(rule)[classify(rule, n)]
  }

  #[test]
  fn test_rule_1_english() {
    assert_eq!(name("en", 0), "other");
    assert_eq!(name("en", 1), "one");
    assert_eq!(name("en", 2), "other");
  }

  #[test]
  fn test_rule_2_turkish_zero_is_one() {
    assert_eq!(name("tr", 0), "one");
    assert_eq!(name("tr", 1), "one");
    assert_eq!(name("tr", 2), "other");
  }

  #[test]
  fn test_rule_3_russian() {
    assert_eq!(name("ru", 1), "one");
    assert_eq!(name("ru", 21), "one");
    assert_eq!(name("ru", 2), "few");
    assert_eq!(name("ru", 24), "few");
    assert_eq!(name("ru", 5), "many");
    assert_eq!(name("ru", 11), "many");
    assert_eq!(name("ru", 12), "many");
    assert_eq!(name("ru", 111), "many");
  }

  #[test]
  fn test_rule_4_czech() {
    assert_eq!(name("cs", 1), "one");
    assert_eq!(name("cs", 3), "few");
    assert_eq!(name("cs", 5), "other");
  }

  #[test]
  fn test_rule_5_irish() {
    assert_eq!(name("ga", 1), "one");
    assert_eq!(name("ga", 2), "two");
    assert_eq!(name("ga", 4), "few");
    assert_eq!(name("ga", 8), "many");
    assert_eq!(name("ga", 11), "other");
  }

  #[test]
  fn test_rule_6_lithuanian() {
    assert_eq!(name("lt", 1), "one");
    assert_eq!(name("lt", 11), "other");
    assert_eq!(name("lt", 2), "few");
    assert_eq!(name("lt", 12), "other");
    assert_eq!(name("lt", 22), "few");
  }

  #[test]
  fn test_rule_7_slovenian() {
    assert_eq!(name("sl", 1), "one");
    assert_eq!(name("sl", 101), "one");
    assert_eq!(name("sl", 2), "two");
    assert_eq!(name("sl", 102), "two");
    assert_eq!(name("sl", 4), "few");
    assert_eq!(name("sl", 5), "other");
  }

  #[test]
  fn test_rule_9_maltese() {
    assert_eq!(name("mt", 1), "one");
    assert_eq!(name("mt", 0), "few");
    assert_eq!(name("mt", 105), "few");
    assert_eq!(name("mt", 113), "many");
    assert_eq!(name("mt", 21), "other");
  }

  #[test]
  fn test_rule_10_latvian_zero() {
    assert_eq!(name("lv", 0), "zero");
    assert_eq!(name("lv", 1), "one");
    assert_eq!(name("lv", 21), "one");
    assert_eq!(name("lv", 11), "other");
  }

  #[test]
  fn test_rule_11_polish() {
    assert_eq!(name("pl", 1), "one");
    assert_eq!(name("pl", 3), "few");
    assert_eq!(name("pl", 13), "many");
    assert_eq!(name("pl", 14), "many");
    assert_eq!(name("pl", 22), "few");
  }

  #[test]
  fn test_rule_12_romanian() {
    assert_eq!(name("ro", 1), "one");
    assert_eq!(name("ro", 0), "few");
    assert_eq!(name("ro", 119), "few");
    assert_eq!(name("ro", 20), "other");
  }

  #[test]
  fn test_rule_13_arabic() {
    assert_eq!(name("ar", 0), "zero");
    assert_eq!(name("ar", 1), "one");
    assert_eq!(name("ar", 2), "two");
    assert_eq!(name("ar", 103), "few");
    assert_eq!(name("ar", 111), "many");
    assert_eq!(name("ar", 100), "other");
  }

  #[test]
  fn test_rule_14_welsh() {
    assert_eq!(name("cy", 0), "zero");
    assert_eq!(name("cy", 1), "one");
    assert_eq!(name("cy", 2), "two");
    assert_eq!(name("cy", 3), "few");
    assert_eq!(name("cy", 6), "many");
    assert_eq!(name("cy", 4), "other");
  }

  #[test]
  fn test_rule_16_scottish_gaelic() {
    assert_eq!(name("gd", 11), "one");
    assert_eq!(name("gd", 12), "two");
    assert_eq!(name("gd", 19), "few");
    assert_eq!(name("gd", 20), "other");
  }

  #[test]
  fn test_rule_17_breton_round_million() {
    assert_eq!(name("br", 1), "one");
    assert_eq!(name("br", 71), "other");
    assert_eq!(name("br", 2), "two");
    assert_eq!(name("br", 9), "few");
    assert_eq!(name("br", 1_000_000), "many");
    assert_eq!(name("br", 0), "other");
  }

  #[test]
  fn test_rule_18_manx() {
    assert_eq!(name("gv", 1), "one");
    assert_eq!(name("gv", 2), "two");
    assert_eq!(name("gv", 40), "few");
    assert_eq!(name("gv", 3), "other");
  }

  #[test]
  fn test_rule_19_hebrew() {
    assert_eq!(name("he", 1), "one");
    assert_eq!(name("he", 2), "two");
    assert_eq!(name("he", 20), "many");
    assert_eq!(name("he", 10), "other");
    assert_eq!(name("he", 3), "other");
  }

  #[test]
  fn test_rule_20_romance_round_million() {
    for language in ["it", "es", "fr", "pt", "ca"] {
      assert_eq!(name(language, 1), "one");
      assert_eq!(name(language, 1_000_000), "many");
      assert_eq!(name(language, 0), "other");
      assert_eq!(name(language, 2), "other");
    }
  }

  #[test]
  fn test_unknown_language_falls_back_to_other() {
    assert_eq!(rule_for("tlh"), 0);
    assert_eq!(name("tlh", 1), "other");
  }
}
